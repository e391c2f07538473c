//! `redress submit` - File a new complaint

use clap::Args;
use dialoguer::{theme::ColorfulTheme, Editor, Input, Select};
use miette::{IntoDiagnostic, Result};

use crate::cli::args::GlobalOpts;
use crate::cli::helpers::{open_context, resolve_actor};
use crate::cli::output::print_outcome;
use crate::core::NewComplaint;
use crate::entities::Priority;

/// File a new complaint
#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// Complaint category (see config for the active set)
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Short title
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// Full description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Priority (defaults from config)
    #[arg(long, short = 'p')]
    pub priority: Option<Priority>,

    /// Fail instead of prompting for missing fields
    #[arg(long)]
    pub no_input: bool,
}

impl SubmitArgs {
    pub fn run(&self, global: &GlobalOpts) -> Result<()> {
        let ctx = open_context()?;
        let actor = resolve_actor(&ctx, global)?;

        let input = self.gather(&ctx)?;
        let complaint = ctx.manager.submit(&actor, input).into_diagnostic()?;

        print_outcome(&complaint, "Submitted");
        println!("Deadline per SLA: {}", complaint.sla_deadline.format("%Y-%m-%d %H:%M UTC"));
        Ok(())
    }

    /// Collect missing fields interactively unless --no-input
    fn gather(&self, ctx: &crate::cli::helpers::Context) -> Result<NewComplaint> {
        let theme = ColorfulTheme::default();

        let category = match (&self.category, self.no_input) {
            (Some(c), _) => c.clone(),
            (None, true) => miette::bail!("--category is required with --no-input"),
            (None, false) => {
                let names: Vec<String> = ctx
                    .manager
                    .config()
                    .active_category_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect();
                let choice = Select::with_theme(&theme)
                    .with_prompt("Category")
                    .items(&names)
                    .default(0)
                    .interact()
                    .into_diagnostic()?;
                names[choice].clone()
            }
        };

        let title = match (&self.title, self.no_input) {
            (Some(t), _) => t.clone(),
            (None, true) => miette::bail!("--title is required with --no-input"),
            (None, false) => Input::with_theme(&theme)
                .with_prompt("Title")
                .interact_text()
                .into_diagnostic()?,
        };

        let description = match (&self.description, self.no_input) {
            (Some(d), _) => d.clone(),
            (None, true) => miette::bail!("--description is required with --no-input"),
            (None, false) => Editor::new()
                .edit("Describe the issue")
                .into_diagnostic()?
                .unwrap_or_default(),
        };

        Ok(NewComplaint {
            category,
            title,
            description,
            priority: self.priority,
        })
    }
}
