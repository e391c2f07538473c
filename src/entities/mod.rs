//! Entity type definitions

pub mod complaint;
pub mod user;

pub use complaint::{
    Comment, Complaint, Escalation, EscalationReason, HistoryEntry, Priority, Status,
};
pub use user::{Actor, Role, User};
