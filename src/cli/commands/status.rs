//! Status transition commands - review, resolve, reject
//!
//! Thin wrappers over `LifecycleManager::transition`; the manager owns the
//! role checks and the state machine, so these share one runner.

use clap::Args;
use miette::{IntoDiagnostic, Result};

use crate::cli::args::GlobalOpts;
use crate::cli::helpers::{open_context, resolve_actor, resolve_complaint_id};
use crate::cli::output::print_outcome;
use crate::entities::Status;

/// Move a complaint into review
#[derive(Debug, Args)]
pub struct ReviewArgs {
    /// Complaint ID or short ID
    pub id: String,
}

impl ReviewArgs {
    pub fn run(&self, global: &GlobalOpts) -> Result<()> {
        transition(&self.id, global, Status::UnderReview, None, "Reviewing")
    }
}

/// Resolve a complaint under review
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Complaint ID or short ID
    pub id: String,

    /// What was done to resolve it
    #[arg(long, short = 's')]
    pub solution: Option<String>,
}

impl ResolveArgs {
    pub fn run(&self, global: &GlobalOpts) -> Result<()> {
        transition(
            &self.id,
            global,
            Status::Resolved,
            self.solution.as_deref(),
            "Resolved",
        )
    }
}

/// Reject a complaint
#[derive(Debug, Args)]
pub struct RejectArgs {
    /// Complaint ID or short ID
    pub id: String,
}

impl RejectArgs {
    pub fn run(&self, global: &GlobalOpts) -> Result<()> {
        transition(&self.id, global, Status::Rejected, None, "Rejected")
    }
}

fn transition(
    reference: &str,
    global: &GlobalOpts,
    new_status: Status,
    solution: Option<&str>,
    verb: &str,
) -> Result<()> {
    let ctx = open_context()?;
    let actor = resolve_actor(&ctx, global)?;
    let id = resolve_complaint_id(&ctx, reference)?;

    let complaint = match new_status {
        Status::Resolved => ctx.manager.resolve(&id, &actor, solution),
        other => ctx.manager.transition(&id, &actor, other),
    }
    .into_diagnostic()?;

    print_outcome(&complaint, verb);
    Ok(())
}
