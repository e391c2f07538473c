//! `redress show` - Display one complaint in full

use clap::Args;
use miette::{IntoDiagnostic, Result};

use crate::cli::args::GlobalOpts;
use crate::cli::helpers::{open_context, resolve_actor, resolve_complaint_id};
use crate::cli::output::print_complaint;

/// Show one complaint in full, including history and comments
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Complaint ID or short ID
    pub id: String,
}

impl ShowArgs {
    pub fn run(&self, global: &GlobalOpts) -> Result<()> {
        let ctx = open_context()?;
        let actor = resolve_actor(&ctx, global)?;
        let id = resolve_complaint_id(&ctx, self.id.as_str())?;

        let complaint = ctx.manager.get(&id, &actor).into_diagnostic()?;
        print_complaint(&complaint, global.format)
    }
}
