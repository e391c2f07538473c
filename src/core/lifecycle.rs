//! Complaint lifecycle manager
//!
//! Owns complaint records, enforces the status state machine, and performs
//! the role checks for every operation. Access control is an explicit check
//! inside each operation rather than middleware, so the manager is testable
//! without any surrounding request layer.
//!
//! State machine:
//!
//! ```text
//! Submitted ──> UnderReview ──> Resolved
//!     │              │
//!     └──────────────┴────────> Rejected
//! ```
//!
//! Resolved and Rejected are terminal. All transitions are admin-only;
//! students submit and read their own records.

use chrono::Utc;
use thiserror::Error;

use crate::core::config::Config;
use crate::core::identity::{ComplaintId, UserId};
use crate::core::store::{ComplaintStore, StoreError};
use crate::entities::complaint::MAX_TITLE_LEN;
use crate::entities::{
    Actor, Comment, Complaint, Escalation, EscalationReason, HistoryEntry, Priority, Status,
};

/// Errors from lifecycle operations
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Invalid submission: {reason}")]
    Validation { reason: String },

    #[error("Complaint not found: {id}")]
    NotFound { id: ComplaintId },

    #[error("Forbidden: {actor} may not {action}")]
    Forbidden { actor: UserId, action: String },

    #[error("Invalid status transition {from} -> {to} requested by {actor}")]
    InvalidTransition {
        from: Status,
        to: Status,
        actor: UserId,
    },

    #[error("Concurrent update lost on {id}; retry the operation")]
    ConcurrencyConflict { id: ComplaintId },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result alias for lifecycle operations
pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Input for a new complaint
#[derive(Debug, Clone)]
pub struct NewComplaint {
    pub category: String,
    pub title: String,
    pub description: String,
    /// Falls back to the configured default when absent
    pub priority: Option<Priority>,
}

/// Check whether a status transition is allowed by the state machine
pub fn is_valid_transition(from: Status, to: Status) -> bool {
    matches!(
        (from, to),
        (Status::Submitted, Status::UnderReview)
            | (Status::Submitted, Status::Rejected)
            | (Status::UnderReview, Status::Resolved)
            | (Status::UnderReview, Status::Rejected)
    )
}

/// Allowed next statuses from the given status
pub fn allowed_transitions(from: Status) -> Vec<Status> {
    match from {
        Status::Submitted => vec![Status::UnderReview, Status::Rejected],
        Status::UnderReview => vec![Status::Resolved, Status::Rejected],
        Status::Resolved | Status::Rejected => vec![],
    }
}

/// The complaint lifecycle manager
///
/// Generic over storage; every mutation goes through a compare-and-swap on
/// the record version so concurrent writers serialize per complaint. A lost
/// race is retried once against the fresh record, then surfaced as
/// `ConcurrencyConflict`.
pub struct LifecycleManager<S: ComplaintStore> {
    store: S,
    config: Config,
}

impl<S: ComplaintStore> LifecycleManager<S> {
    pub fn new(store: S, config: Config) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// File a new complaint; it starts in Submitted with a one-entry history
    pub fn submit(&self, actor: &Actor, input: NewComplaint) -> LifecycleResult<Complaint> {
        let title = input.title.trim();
        let description = input.description.trim();

        if !self.config.accepts_category(&input.category) {
            return Err(LifecycleError::Validation {
                reason: format!(
                    "unknown or inactive category '{}' (active: {})",
                    input.category,
                    self.config.active_category_names().join(", ")
                ),
            });
        }
        if title.is_empty() {
            return Err(LifecycleError::Validation {
                reason: "title may not be empty".into(),
            });
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(LifecycleError::Validation {
                reason: format!("title exceeds {} characters", MAX_TITLE_LEN),
            });
        }
        if description.is_empty() {
            return Err(LifecycleError::Validation {
                reason: "description may not be empty".into(),
            });
        }

        let priority = input.priority.unwrap_or(self.config.default_priority);
        let complaint = Complaint::new(
            actor.id.clone(),
            input.category,
            title.to_string(),
            description.to_string(),
            priority,
            self.config.sla.resolution_window(priority),
        );

        self.store.insert(complaint.clone())?;
        Ok(complaint)
    }

    /// Move a complaint to a new status; admin-only
    pub fn transition(
        &self,
        id: &ComplaintId,
        actor: &Actor,
        new_status: Status,
    ) -> LifecycleResult<Complaint> {
        self.apply_transition(id, actor, new_status, None)
    }

    /// Resolve a complaint, optionally recording what was done
    pub fn resolve(
        &self,
        id: &ComplaintId,
        actor: &Actor,
        solution: Option<&str>,
    ) -> LifecycleResult<Complaint> {
        self.apply_transition(id, actor, Status::Resolved, solution)
    }

    fn apply_transition(
        &self,
        id: &ComplaintId,
        actor: &Actor,
        new_status: Status,
        solution: Option<&str>,
    ) -> LifecycleResult<Complaint> {
        if !actor.is_admin() {
            return Err(LifecycleError::Forbidden {
                actor: actor.id.clone(),
                action: format!("transition {} to {}", id, new_status),
            });
        }

        self.update_record(id, |current| {
            if !is_valid_transition(current.status, new_status) {
                return Err(LifecycleError::InvalidTransition {
                    from: current.status,
                    to: new_status,
                    actor: actor.id.clone(),
                });
            }

            let now = Utc::now();
            let mut updated = current.clone();
            updated.status = new_status;
            updated.history.push(HistoryEntry {
                status: new_status,
                actor: actor.id.clone(),
                at: now,
            });
            updated.updated_at = now;
            if new_status == Status::Resolved {
                if updated.resolved_at.is_none() {
                    updated.resolved_at = Some(now);
                }
                if let Some(text) = solution {
                    updated.solution = Some(text.to_string());
                }
            }
            Ok(updated)
        })
    }

    /// Fetch a complaint, enforcing read visibility
    ///
    /// Students see only their own submissions, with internal comments
    /// stripped.
    pub fn get(&self, id: &ComplaintId, actor: &Actor) -> LifecycleResult<Complaint> {
        let complaint = self.store.get(id).map_err(map_not_found(id))?;

        if actor.is_admin() {
            return Ok(complaint);
        }
        if complaint.submitter != actor.id {
            return Err(LifecycleError::Forbidden {
                actor: actor.id.clone(),
                action: format!("read {}", id),
            });
        }
        Ok(complaint.redacted())
    }

    /// List complaints visible to the actor, newest first
    pub fn list(&self, actor: &Actor) -> LifecycleResult<Vec<Complaint>> {
        let mut complaints = self.store.list_all()?;

        if !actor.is_admin() {
            complaints.retain(|c| c.submitter == actor.id);
            for c in &mut complaints {
                c.comments.retain(|comment| !comment.internal);
            }
        }
        complaints.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(complaints)
    }

    /// Assign a complaint to an admin; admin-only
    ///
    /// The manager trusts the caller to hand it a valid assignee; roster
    /// validation belongs to the layer that owns the roster.
    pub fn assign(
        &self,
        id: &ComplaintId,
        actor: &Actor,
        assignee: UserId,
    ) -> LifecycleResult<Complaint> {
        if !actor.is_admin() {
            return Err(LifecycleError::Forbidden {
                actor: actor.id.clone(),
                action: format!("assign {}", id),
            });
        }

        self.update_record(id, |current| {
            let mut updated = current.clone();
            updated.assigned_to = Some(assignee.clone());
            updated.updated_at = Utc::now();
            Ok(updated)
        })
    }

    /// Attach a comment
    ///
    /// Admins may comment anywhere, internally or not. Students may leave
    /// public comments on their own complaints only.
    pub fn comment(
        &self,
        id: &ComplaintId,
        actor: &Actor,
        body: &str,
        internal: bool,
    ) -> LifecycleResult<Complaint> {
        let body = body.trim();
        if body.is_empty() {
            return Err(LifecycleError::Validation {
                reason: "comment body may not be empty".into(),
            });
        }
        if !actor.is_admin() && internal {
            return Err(LifecycleError::Forbidden {
                actor: actor.id.clone(),
                action: format!("leave an internal comment on {}", id),
            });
        }

        self.update_record(id, |current| {
            if !actor.is_admin() && current.submitter != actor.id {
                return Err(LifecycleError::Forbidden {
                    actor: actor.id.clone(),
                    action: format!("comment on {}", id),
                });
            }
            let mut updated = current.clone();
            updated.comments.push(Comment {
                author: actor.id.clone(),
                body: body.to_string(),
                internal,
                at: Utc::now(),
            });
            updated.updated_at = Utc::now();
            Ok(updated)
        })
    }

    /// Record an escalation against a complaint; admin-only
    ///
    /// Escalations mark a complaint for attention; they do not change its
    /// status.
    pub fn escalate(
        &self,
        id: &ComplaintId,
        actor: &Actor,
        reason: EscalationReason,
        notes: &str,
    ) -> LifecycleResult<Complaint> {
        if !actor.is_admin() {
            return Err(LifecycleError::Forbidden {
                actor: actor.id.clone(),
                action: format!("escalate {}", id),
            });
        }

        self.update_record(id, |current| {
            let now = Utc::now();
            let mut updated = current.clone();
            updated.escalations.push(Escalation {
                reason,
                notes: notes.trim().to_string(),
                raised_by: actor.id.clone(),
                at: now,
            });
            updated.updated_at = now;
            Ok(updated)
        })
    }

    /// Read-validate-CAS loop shared by every mutator
    ///
    /// `build` runs against the freshest record each attempt, so a retry
    /// after a lost race re-validates against the winner's state.
    fn update_record<F>(&self, id: &ComplaintId, build: F) -> LifecycleResult<Complaint>
    where
        F: Fn(&Complaint) -> LifecycleResult<Complaint>,
    {
        let mut retried = false;
        loop {
            let current = self.store.get(id).map_err(map_not_found(id))?;
            let updated = build(&current)?;

            match self.store.compare_and_swap(id, current.version, updated) {
                Ok(written) => return Ok(written),
                Err(StoreError::Conflict { .. }) if !retried => {
                    retried = true;
                }
                Err(StoreError::Conflict { .. }) => {
                    return Err(LifecycleError::ConcurrencyConflict { id: id.clone() })
                }
                Err(other) => return Err(map_not_found(id)(other)),
            }
        }
    }
}

fn map_not_found(id: &ComplaintId) -> impl Fn(StoreError) -> LifecycleError + '_ {
    move |err| match err {
        StoreError::NotFound(_) => LifecycleError::NotFound { id: id.clone() },
        other => LifecycleError::Store(other),
    }
}
