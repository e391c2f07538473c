//! `redress assign` - Hand a complaint to an admin

use clap::Args;
use miette::{bail, IntoDiagnostic, Result};

use crate::cli::args::GlobalOpts;
use crate::cli::helpers::{open_context, resolve_actor, resolve_complaint_id};
use crate::cli::output::print_outcome;
use crate::core::identity::UserId;

/// Assign a complaint to an admin
#[derive(Debug, Args)]
pub struct AssignArgs {
    /// Complaint ID or short ID
    pub id: String,

    /// Roster handle of the admin to assign
    #[arg(value_name = "HANDLE")]
    pub assignee: String,
}

impl AssignArgs {
    pub fn run(&self, global: &GlobalOpts) -> Result<()> {
        let ctx = open_context()?;
        let actor = resolve_actor(&ctx, global)?;
        let id = resolve_complaint_id(&ctx, &self.id)?;

        // Roster check lives here: the manager trusts the assignee handle
        let assignee = UserId::new(&self.assignee).into_diagnostic()?;
        if !ctx.roster.is_admin(&assignee) {
            bail!("'{}' is not a registered admin", self.assignee);
        }

        let complaint = ctx
            .manager
            .assign(&id, &actor, assignee)
            .into_diagnostic()?;
        print_outcome(&complaint, "Assigned");
        Ok(())
    }
}
