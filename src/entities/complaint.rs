//! Complaint entity type

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::identity::{ComplaintId, UserId};

/// Maximum accepted title length, matching the submission form limit
pub const MAX_TITLE_LEN: usize = 200;

/// Lifecycle status of a complaint
///
/// Resolved and Rejected are terminal; nothing moves out of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum Status {
    #[default]
    Submitted,
    UnderReview,
    Resolved,
    Rejected,
}

impl Status {
    /// True for states that accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Resolved | Status::Rejected)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Submitted => write!(f, "submitted"),
            Status::UnderReview => write!(f, "under_review"),
            Status::Resolved => write!(f, "resolved"),
            Status::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "submitted" => Ok(Status::Submitted),
            "under_review" | "under-review" => Ok(Status::UnderReview),
            "resolved" => Ok(Status::Resolved),
            "rejected" => Ok(Status::Rejected),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}

/// Priority assigned at submission time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
            Priority::Urgent => write!(f, "urgent"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// One entry in a complaint's append-only status history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub status: Status,
    pub actor: UserId,
    pub at: DateTime<Utc>,
}

/// A comment attached to a complaint
///
/// Internal comments are staff notes; they are stripped from student reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub author: UserId,
    pub body: String,
    #[serde(default)]
    pub internal: bool,
    pub at: DateTime<Utc>,
}

/// Why a complaint was escalated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationReason {
    SlaBreach,
    StudentRequest,
    Complexity,
    Unresolved,
    Other,
}

impl std::fmt::Display for EscalationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EscalationReason::SlaBreach => write!(f, "sla_breach"),
            EscalationReason::StudentRequest => write!(f, "student_request"),
            EscalationReason::Complexity => write!(f, "complexity"),
            EscalationReason::Unresolved => write!(f, "unresolved"),
            EscalationReason::Other => write!(f, "other"),
        }
    }
}

/// Record of an escalation raised against a complaint
///
/// Escalations flag attention; they never move the status machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Escalation {
    pub reason: EscalationReason,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    pub raised_by: UserId,
    pub at: DateTime<Utc>,
}

/// A student-filed complaint tracked through its lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complaint {
    /// Unique identifier, assigned at creation
    pub id: ComplaintId,

    /// Student who filed the complaint
    pub submitter: UserId,

    /// Category name, validated against project config at submission
    pub category: String,

    /// Short title
    pub title: String,

    /// Full description; immutable after creation
    pub description: String,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default)]
    pub status: Status,

    /// Append-only status history, oldest first; the last entry always
    /// matches `status`
    pub history: Vec<HistoryEntry>,

    /// Admin the complaint is assigned to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<UserId>,

    /// Resolution notes, recorded when the complaint is resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub escalations: Vec<Escalation>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    /// Set once, the first time status reaches Resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,

    /// Deadline derived from the per-priority SLA at submission time
    pub sla_deadline: DateTime<Utc>,

    /// Optimistic-concurrency token, bumped by the store on every write
    #[serde(default)]
    pub version: u64,
}

impl Complaint {
    /// Create a fresh complaint in Submitted state with its initial history
    /// entry
    ///
    /// Input validation is the lifecycle manager's job; this constructor only
    /// assembles the record.
    pub fn new(
        submitter: UserId,
        category: String,
        title: String,
        description: String,
        priority: Priority,
        sla_resolution: Duration,
    ) -> Self {
        let now = Utc::now();
        let id = ComplaintId::new();
        Self {
            id,
            submitter: submitter.clone(),
            category,
            title,
            description,
            priority,
            status: Status::Submitted,
            history: vec![HistoryEntry {
                status: Status::Submitted,
                actor: submitter,
                at: now,
            }],
            assigned_to: None,
            solution: None,
            comments: Vec::new(),
            escalations: Vec::new(),
            created_at: now,
            updated_at: now,
            resolved_at: None,
            sla_deadline: now + sla_resolution,
            version: 0,
        }
    }

    /// True when the SLA deadline has passed and the complaint is still open
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.status.is_terminal() && now > self.sla_deadline
    }

    /// Time from submission to resolution, if resolved
    pub fn time_to_resolve(&self) -> Option<Duration> {
        self.resolved_at.map(|r| r - self.created_at)
    }

    /// Copy with internal comments removed, for student-facing reads
    pub fn redacted(&self) -> Self {
        let mut c = self.clone();
        c.comments.retain(|comment| !comment.internal);
        c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Complaint {
        Complaint::new(
            UserId::new("sam").unwrap(),
            "facilities".into(),
            "Broken light".into(),
            "Third floor hallway light is out".into(),
            Priority::Medium,
            Duration::hours(72),
        )
    }

    #[test]
    fn new_complaint_starts_submitted_with_one_history_entry() {
        let c = sample();
        assert_eq!(c.status, Status::Submitted);
        assert_eq!(c.history.len(), 1);
        assert_eq!(c.history[0].status, Status::Submitted);
        assert_eq!(c.history[0].actor, c.submitter);
        assert_eq!(c.version, 0);
    }

    #[test]
    fn sla_deadline_follows_creation() {
        let c = sample();
        assert_eq!(c.sla_deadline, c.created_at + Duration::hours(72));
        assert!(!c.is_overdue(c.created_at + Duration::hours(1)));
        assert!(c.is_overdue(c.created_at + Duration::hours(73)));
    }

    #[test]
    fn terminal_complaints_are_never_overdue() {
        let mut c = sample();
        c.status = Status::Rejected;
        assert!(!c.is_overdue(c.created_at + Duration::days(30)));
    }

    #[test]
    fn redacted_strips_internal_comments() {
        let mut c = sample();
        let now = Utc::now();
        c.comments.push(Comment {
            author: UserId::new("admin").unwrap(),
            body: "staff only".into(),
            internal: true,
            at: now,
        });
        c.comments.push(Comment {
            author: UserId::new("sam").unwrap(),
            body: "any update?".into(),
            internal: false,
            at: now,
        });

        let redacted = c.redacted();
        assert_eq!(redacted.comments.len(), 1);
        assert_eq!(redacted.comments[0].body, "any update?");
        // Original untouched
        assert_eq!(c.comments.len(), 2);
    }

    #[test]
    fn status_parses_both_spellings() {
        assert_eq!("under_review".parse::<Status>().unwrap(), Status::UnderReview);
        assert_eq!("under-review".parse::<Status>().unwrap(), Status::UnderReview);
        assert!("pending".parse::<Status>().is_err());
    }
}
