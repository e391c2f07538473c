//! Core module - lifecycle engine, storage, and project plumbing

pub mod config;
pub mod identity;
pub mod lifecycle;
pub mod project;
pub mod roster;
pub mod shortid;
pub mod sqlite;
pub mod store;

pub use config::{Category, Config, ConfigError, SlaConfig};
pub use identity::{ComplaintId, IdParseError, UserId};
pub use lifecycle::{
    allowed_transitions, is_valid_transition, LifecycleError, LifecycleManager, LifecycleResult,
    NewComplaint,
};
pub use project::{Project, ProjectError};
pub use roster::{Roster, RosterError};
pub use shortid::ShortIdIndex;
pub use sqlite::SqliteStore;
pub use store::{ComplaintStore, MemoryStore, StoreError};
