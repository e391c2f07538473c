//! `redress list` - List complaints visible to the actor
//!
//! Visibility is the manager's call: admins see everything, students see
//! their own. Listing also rebuilds the short ID index so `CMP@N` aliases
//! line up with what is on screen.

use clap::{Args, ValueEnum};
use miette::{IntoDiagnostic, Result};

use crate::cli::args::{GlobalOpts, OutputFormat};
use crate::cli::helpers::{open_context, resolve_actor};
use crate::cli::output::effective_format;
use crate::cli::table::{render, ComplaintRow};
use crate::core::ShortIdIndex;
use crate::entities::{Complaint, Priority, Status};

/// Status filter for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusFilter {
    Submitted,
    UnderReview,
    Resolved,
    Rejected,
    /// Submitted and under review
    Open,
    /// All statuses
    All,
}

impl StatusFilter {
    fn matches(self, status: Status) -> bool {
        match self {
            StatusFilter::Submitted => status == Status::Submitted,
            StatusFilter::UnderReview => status == Status::UnderReview,
            StatusFilter::Resolved => status == Status::Resolved,
            StatusFilter::Rejected => status == Status::Rejected,
            StatusFilter::Open => !status.is_terminal(),
            StatusFilter::All => true,
        }
    }
}

/// List complaints visible to you
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Filter by status
    #[arg(long, short = 's', default_value = "all")]
    pub status: StatusFilter,

    /// Filter by category (exact match)
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Filter by priority
    #[arg(long, short = 'p')]
    pub priority: Option<Priority>,

    /// Only complaints past their SLA deadline
    #[arg(long)]
    pub overdue: bool,

    /// Only complaints assigned to this admin
    #[arg(long)]
    pub assigned_to: Option<String>,
}

impl ListArgs {
    pub fn run(&self, global: &GlobalOpts) -> Result<()> {
        let ctx = open_context()?;
        let actor = resolve_actor(&ctx, global)?;

        let mut complaints = ctx.manager.list(&actor).into_diagnostic()?;
        self.apply_filters(&mut complaints);

        // Aliases follow the filtered view, newest first
        let ids: Vec<_> = complaints.iter().map(|c| c.id.clone()).collect();
        let mut index = ShortIdIndex::load(&ctx.project.shortid_path());
        index.rebuild(&ids);
        index.save(&ctx.project.shortid_path()).into_diagnostic()?;

        match effective_format(global.format, true) {
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&complaints).into_diagnostic()?
                );
            }
            OutputFormat::Yaml => {
                println!("{}", serde_yml::to_string(&complaints).into_diagnostic()?);
            }
            _ => {
                let rows: Vec<_> = complaints
                    .iter()
                    .map(|c| ComplaintRow::new(c, &index))
                    .collect();
                println!("{}", render(rows));
                println!("{} complaint(s)", complaints.len());
            }
        }
        Ok(())
    }

    fn apply_filters(&self, complaints: &mut Vec<Complaint>) {
        let now = chrono::Utc::now();
        complaints.retain(|c| {
            self.status.matches(c.status)
                && self
                    .category
                    .as_ref()
                    .is_none_or(|cat| c.category.eq_ignore_ascii_case(cat))
                && self.priority.is_none_or(|p| c.priority == p)
                && (!self.overdue || c.is_overdue(now))
                && self.assigned_to.as_ref().is_none_or(|a| {
                    c.assigned_to
                        .as_ref()
                        .is_some_and(|assigned| assigned.as_str() == a.to_lowercase())
                })
        });
    }
}
