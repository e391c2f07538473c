//! `redress user` - Roster management

use clap::{Args, Subcommand};
use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{settings::Style, Table, Tabled};

use crate::cli::args::GlobalOpts;
use crate::cli::helpers::open_context;
use crate::core::identity::UserId;
use crate::entities::{Role, User};

#[derive(Debug, Subcommand)]
pub enum UserCommands {
    /// Register a user
    Add(AddArgs),

    /// List registered users
    List,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Roster handle (unique, case-insensitive)
    pub handle: String,

    /// Role for the new user
    #[arg(long, short = 'r')]
    pub role: Role,

    /// Display name (defaults to the handle)
    #[arg(long, short = 'n')]
    pub name: Option<String>,
}

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "HANDLE")]
    handle: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "ROLE")]
    role: String,
}

pub fn run(cmd: UserCommands, _global: &GlobalOpts) -> Result<()> {
    match cmd {
        UserCommands::Add(args) => {
            let ctx = open_context()?;
            let mut roster = ctx.roster;

            let id = UserId::new(&args.handle).into_diagnostic()?;
            let name = args.name.unwrap_or_else(|| args.handle.clone());
            roster
                .add(User {
                    id: id.clone(),
                    name,
                    role: args.role,
                })
                .into_diagnostic()?;
            roster
                .save(&ctx.project.roster_path())
                .into_diagnostic()?;

            println!(
                "{} {} as {}",
                style("Added").green().bold(),
                id,
                args.role
            );
            Ok(())
        }
        UserCommands::List => {
            let ctx = open_context()?;
            let rows: Vec<_> = ctx
                .roster
                .users()
                .iter()
                .map(|u| UserRow {
                    handle: u.id.to_string(),
                    name: u.name.clone(),
                    role: u.role.to_string(),
                })
                .collect();

            let mut table = Table::new(rows);
            table.with(Style::sharp());
            println!("{}", table);
            println!("{} user(s)", ctx.roster.users().len());
            Ok(())
        }
    }
}
