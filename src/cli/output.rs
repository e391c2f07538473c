//! Output formatting utilities

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::args::OutputFormat;
use crate::entities::{Complaint, Status};

/// Determine the effective output format based on context
pub fn effective_format(format: OutputFormat, is_list: bool) -> OutputFormat {
    match format {
        OutputFormat::Auto => {
            if is_list {
                OutputFormat::Table
            } else {
                OutputFormat::Yaml
            }
        }
        other => other,
    }
}

/// Status, colorized for terminals
pub fn styled_status(status: Status) -> String {
    match status {
        Status::Submitted => style("submitted").yellow().to_string(),
        Status::UnderReview => style("under_review").cyan().to_string(),
        Status::Resolved => style("resolved").green().to_string(),
        Status::Rejected => style("rejected").red().to_string(),
    }
}

/// Print a single complaint in the requested format
pub fn print_complaint(complaint: &Complaint, format: OutputFormat) -> Result<()> {
    match effective_format(format, false) {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(complaint).into_diagnostic()?
            );
        }
        _ => {
            println!(
                "{}",
                serde_yml::to_string(complaint).into_diagnostic()?
            );
        }
    }
    Ok(())
}

/// One-line confirmation after a mutation
pub fn print_outcome(complaint: &Complaint, verb: &str) {
    println!(
        "{} {} ({}) -> {}",
        style(verb).bold(),
        complaint.id,
        truncated_title(complaint),
        styled_status(complaint.status)
    );
}

fn truncated_title(complaint: &Complaint) -> String {
    super::helpers::truncate_str(&complaint.title, 40)
}
