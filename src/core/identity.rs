//! Identifier types for complaints and users
//!
//! Complaint IDs are ULIDs carrying a `CMP-` prefix so they stay sortable by
//! creation time and recognizable when pasted into chat or commit messages.
//! User IDs are normalized handles from the roster.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// Prefix carried by every complaint ID
pub const COMPLAINT_PREFIX: &str = "CMP";

/// Errors from parsing identifier strings
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("Missing '{COMPLAINT_PREFIX}-' prefix in complaint ID: {0}")]
    MissingPrefix(String),

    #[error("Invalid ULID in complaint ID '{id}': {message}")]
    InvalidUlid { id: String, message: String },

    #[error("User handle may not be empty")]
    EmptyHandle,
}

/// Unique identifier for a complaint (`CMP-<ULID>`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComplaintId(Ulid);

impl ComplaintId {
    /// Generate a fresh ID
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// The embedded ULID
    pub fn ulid(&self) -> Ulid {
        self.0
    }
}

impl Default for ComplaintId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", COMPLAINT_PREFIX, self.0)
    }
}

impl FromStr for ComplaintId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix(COMPLAINT_PREFIX)
            .and_then(|r| r.strip_prefix('-'))
            .ok_or_else(|| IdParseError::MissingPrefix(s.to_string()))?;

        let ulid = Ulid::from_string(rest).map_err(|e| IdParseError::InvalidUlid {
            id: s.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self(ulid))
    }
}

impl Serialize for ComplaintId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ComplaintId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Roster handle identifying a user
///
/// Normalized to lowercase so `--as Priya` and `--as priya` agree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(handle: &str) -> Result<Self, IdParseError> {
        let trimmed = handle.trim();
        if trimmed.is_empty() {
            return Err(IdParseError::EmptyHandle);
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
