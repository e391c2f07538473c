//! CLI command implementations

pub mod assign;
pub mod comment;
pub mod escalate;
pub mod init;
pub mod list;
pub mod show;
pub mod status;
pub mod submit;
pub mod user;
