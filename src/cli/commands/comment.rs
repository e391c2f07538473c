//! `redress comment` - Attach a comment to a complaint

use clap::Args;
use miette::{IntoDiagnostic, Result};

use crate::cli::args::GlobalOpts;
use crate::cli::helpers::{open_context, resolve_actor, resolve_complaint_id};
use crate::cli::output::print_outcome;

/// Comment on a complaint
#[derive(Debug, Args)]
pub struct CommentArgs {
    /// Complaint ID or short ID
    pub id: String,

    /// Comment text
    #[arg(long, short = 'm')]
    pub message: String,

    /// Staff-only note, hidden from the submitter (admin)
    #[arg(long)]
    pub internal: bool,
}

impl CommentArgs {
    pub fn run(&self, global: &GlobalOpts) -> Result<()> {
        let ctx = open_context()?;
        let actor = resolve_actor(&ctx, global)?;
        let id = resolve_complaint_id(&ctx, &self.id)?;

        let complaint = ctx
            .manager
            .comment(&id, &actor, &self.message, self.internal)
            .into_diagnostic()?;
        print_outcome(&complaint, "Commented on");
        Ok(())
    }
}
