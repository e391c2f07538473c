//! Shared helpers for CLI commands

use miette::{bail, IntoDiagnostic, Result};

use crate::cli::args::GlobalOpts;
use crate::core::identity::{ComplaintId, UserId};
use crate::core::{
    Config, LifecycleManager, Project, Roster, ShortIdIndex, SqliteStore,
};
use crate::entities::Actor;

/// Everything a command needs once it is inside a project
pub struct Context {
    pub project: Project,
    pub roster: Roster,
    pub manager: LifecycleManager<SqliteStore>,
}

/// Open the enclosing project and wire up the manager
pub fn open_context() -> Result<Context> {
    let project = Project::discover().into_diagnostic()?;
    let config = Config::load(&project.config_path()).into_diagnostic()?;
    let roster = Roster::load(&project.roster_path()).into_diagnostic()?;
    let store = SqliteStore::open(&project.db_path()).into_diagnostic()?;
    Ok(Context {
        project,
        roster,
        manager: LifecycleManager::new(store, config),
    })
}

/// Resolve the acting user from --as / REDRESS_USER against the roster
pub fn resolve_actor(ctx: &Context, global: &GlobalOpts) -> Result<Actor> {
    let Some(handle) = &global.actor else {
        bail!("No actor given. Pass --as <handle> or set REDRESS_USER");
    };
    let id = UserId::new(handle).into_diagnostic()?;
    ctx.roster.actor(&id).into_diagnostic()
}

/// Resolve a complaint reference: a full `CMP-<ULID>` or a `CMP@N`/`@N`
/// alias from the last listing
pub fn resolve_complaint_id(ctx: &Context, reference: &str) -> Result<ComplaintId> {
    if let Ok(id) = reference.parse::<ComplaintId>() {
        return Ok(id);
    }
    let index = ShortIdIndex::load(&ctx.project.shortid_path());
    if let Some(id) = index.resolve(reference) {
        return Ok(id);
    }
    bail!(
        "'{}' is not a complaint ID or a known short ID. Run 'redress list' to refresh aliases",
        reference
    );
}

/// Truncate a string for fixed-width table columns. Counts characters,
/// not bytes, so multi-byte text never splits mid-character.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let clipped: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{clipped}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_leaves_short_strings() {
        assert_eq!(truncate_str("short", 10), "short");
    }

    #[test]
    fn truncate_clips_long_strings() {
        assert_eq!(truncate_str("a very long sentence", 10), "a very ...");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let title = "é".repeat(50);
        let clipped = truncate_str(&title, 32);
        assert_eq!(clipped, format!("{}...", "é".repeat(29)));
        assert_eq!(clipped.chars().count(), 32);
    }
}
