//! Table rendering for complaint listings

use chrono::Utc;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::helpers::truncate_str;
use crate::core::ShortIdIndex;
use crate::entities::Complaint;

/// One row of `redress list` output
#[derive(Tabled)]
pub struct ComplaintRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "TITLE")]
    pub title: String,
    #[tabled(rename = "CATEGORY")]
    pub category: String,
    #[tabled(rename = "PRIORITY")]
    pub priority: String,
    #[tabled(rename = "STATUS")]
    pub status: String,
    #[tabled(rename = "SUBMITTER")]
    pub submitter: String,
    #[tabled(rename = "ASSIGNED")]
    pub assigned: String,
    #[tabled(rename = "SLA")]
    pub sla: String,
}

impl ComplaintRow {
    pub fn new(complaint: &Complaint, index: &ShortIdIndex) -> Self {
        let id = index
            .alias_of(&complaint.id)
            .map(str::to_string)
            .unwrap_or_else(|| complaint.id.to_string());
        let sla = if complaint.is_overdue(Utc::now()) {
            "OVERDUE".to_string()
        } else if complaint.status.is_terminal() {
            "-".to_string()
        } else {
            complaint.sla_deadline.format("%Y-%m-%d %H:%M").to_string()
        };
        Self {
            id,
            title: truncate_str(&complaint.title, 32),
            category: complaint.category.clone(),
            priority: complaint.priority.to_string(),
            status: complaint.status.to_string(),
            submitter: complaint.submitter.to_string(),
            assigned: complaint
                .assigned_to
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "-".to_string()),
            sla,
        }
    }
}

/// Render rows with the house table style
pub fn render(rows: Vec<ComplaintRow>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    table.to_string()
}
