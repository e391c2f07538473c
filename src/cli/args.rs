//! Top-level argument definitions

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    assign::AssignArgs, comment::CommentArgs, escalate::EscalateArgs, init::InitArgs,
    list::ListArgs, show::ShowArgs, status::{RejectArgs, ResolveArgs, ReviewArgs},
    submit::SubmitArgs, user::UserCommands,
};

/// Redress - track student complaints through a role-gated lifecycle
#[derive(Debug, Parser)]
#[command(name = "redress", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Debug, clap::Args)]
pub struct GlobalOpts {
    /// Act as this roster handle (stand-in for the session layer)
    #[arg(long = "as", global = true, value_name = "HANDLE", env = "REDRESS_USER")]
    pub actor: Option<String>,

    /// Output format
    #[arg(long, global = true, default_value = "auto")]
    pub format: OutputFormat,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Table for lists, YAML for single records
    Auto,
    Table,
    Yaml,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialize a redress project in the current directory
    Init(InitArgs),

    /// File a new complaint
    Submit(SubmitArgs),

    /// Move a complaint into review (admin)
    Review(ReviewArgs),

    /// Resolve a complaint under review (admin)
    Resolve(ResolveArgs),

    /// Reject a complaint (admin)
    Reject(RejectArgs),

    /// Show one complaint in full
    Show(ShowArgs),

    /// List complaints visible to you
    List(ListArgs),

    /// Assign a complaint to an admin (admin)
    Assign(AssignArgs),

    /// Comment on a complaint
    Comment(CommentArgs),

    /// Escalate a complaint (admin)
    Escalate(EscalateArgs),

    /// Manage the user roster
    #[command(subcommand)]
    User(UserCommands),
}
