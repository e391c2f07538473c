//! `redress escalate` - Flag a complaint for attention

use clap::{Args, ValueEnum};
use miette::{IntoDiagnostic, Result};

use crate::cli::args::GlobalOpts;
use crate::cli::helpers::{open_context, resolve_actor, resolve_complaint_id};
use crate::cli::output::print_outcome;
use crate::entities::EscalationReason;

/// Escalation reason, as accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReasonArg {
    SlaBreach,
    StudentRequest,
    Complexity,
    Unresolved,
    Other,
}

impl From<ReasonArg> for EscalationReason {
    fn from(arg: ReasonArg) -> Self {
        match arg {
            ReasonArg::SlaBreach => EscalationReason::SlaBreach,
            ReasonArg::StudentRequest => EscalationReason::StudentRequest,
            ReasonArg::Complexity => EscalationReason::Complexity,
            ReasonArg::Unresolved => EscalationReason::Unresolved,
            ReasonArg::Other => EscalationReason::Other,
        }
    }
}

/// Escalate a complaint
#[derive(Debug, Args)]
pub struct EscalateArgs {
    /// Complaint ID or short ID
    pub id: String,

    /// Why this is being escalated
    #[arg(long, short = 'r', default_value = "other")]
    pub reason: ReasonArg,

    /// Free-form notes
    #[arg(long, short = 'n', default_value = "")]
    pub notes: String,
}

impl EscalateArgs {
    pub fn run(&self, global: &GlobalOpts) -> Result<()> {
        let ctx = open_context()?;
        let actor = resolve_actor(&ctx, global)?;
        let id = resolve_complaint_id(&ctx, &self.id)?;

        let complaint = ctx
            .manager
            .escalate(&id, &actor, self.reason.into(), &self.notes)
            .into_diagnostic()?;
        print_outcome(&complaint, "Escalated");
        Ok(())
    }
}
