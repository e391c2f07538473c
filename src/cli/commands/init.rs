//! `redress init` - Set up a project directory

use clap::Args;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::args::GlobalOpts;
use crate::core::identity::UserId;
use crate::core::{Config, Project, Roster};
use crate::entities::{Role, User};

/// Initialize a redress project in the current directory
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Handle for the first admin account
    #[arg(long, value_name = "HANDLE")]
    pub admin: Option<String>,

    /// Display name for the first admin
    #[arg(long, requires = "admin")]
    pub admin_name: Option<String>,
}

impl InitArgs {
    pub fn run(&self, _global: &GlobalOpts) -> Result<()> {
        let cwd = std::env::current_dir().into_diagnostic()?;
        let project = Project::init(&cwd).into_diagnostic()?;

        // Seed config with the default categories and SLA windows so they
        // are visible and editable from day one
        let config = Config::default();
        config.save(&project.config_path()).into_diagnostic()?;

        let mut roster = Roster::default();
        if let Some(handle) = &self.admin {
            let id = UserId::new(handle).into_diagnostic()?;
            let name = self.admin_name.clone().unwrap_or_else(|| handle.clone());
            roster
                .add(User {
                    id,
                    name,
                    role: Role::Admin,
                })
                .into_diagnostic()?;
        }
        roster.save(&project.roster_path()).into_diagnostic()?;

        println!(
            "{} redress project in {}",
            style("Initialized").green().bold(),
            project.root().display()
        );
        if roster.is_empty() {
            println!("Add users next: redress user add <handle> --role admin");
        }
        Ok(())
    }
}
