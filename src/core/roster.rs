//! User roster
//!
//! The roster stands in for the authentication layer described in the system
//! boundary: it maps handles to roles so the CLI can hand the lifecycle
//! manager an authenticated actor. Stored as `.redress/users.yaml`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::identity::UserId;
use crate::entities::{Actor, Role, User};

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("User not found in roster: {0}")]
    UnknownUser(UserId),

    #[error("User already in roster: {0}")]
    DuplicateUser(UserId),

    #[error("Failed to parse roster: {message}")]
    Parse { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The set of registered users
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    users: Vec<User>,
}

impl Roster {
    /// Load the roster, or an empty one if the file is absent
    pub fn load(path: &Path) -> Result<Self, RosterError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        serde_yml::from_str(&contents).map_err(|e| RosterError::Parse {
            message: e.to_string(),
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), RosterError> {
        let contents = serde_yml::to_string(self).map_err(|e| RosterError::Parse {
            message: e.to_string(),
        })?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Register a user; handles are unique
    pub fn add(&mut self, user: User) -> Result<(), RosterError> {
        if self.find(&user.id).is_some() {
            return Err(RosterError::DuplicateUser(user.id));
        }
        self.users.push(user);
        Ok(())
    }

    pub fn find(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Resolve a handle to an authenticated actor
    pub fn actor(&self, id: &UserId) -> Result<Actor, RosterError> {
        self.find(id)
            .map(Actor::from)
            .ok_or_else(|| RosterError::UnknownUser(id.clone()))
    }

    /// True when the handle belongs to a registered admin
    pub fn is_admin(&self, id: &UserId) -> bool {
        self.find(id).is_some_and(|u| u.role == Role::Admin)
    }
}
