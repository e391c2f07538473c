//! Project directory handling
//!
//! A redress project is any directory containing a `.redress/` folder, which
//! holds the config, the user roster, the complaint database, and the short
//! ID index. `discover` walks up from the current directory like git does.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Name of the project metadata directory
pub const PROJECT_DIR: &str = ".redress";

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not inside a redress project (no {PROJECT_DIR} directory found). Run 'redress init' first")]
    NotFound,

    #[error("A redress project already exists at {0}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Handle to a redress project root
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    /// Initialize a new project at the given root
    pub fn init(root: &Path) -> Result<Self, ProjectError> {
        let meta = root.join(PROJECT_DIR);
        if meta.exists() {
            return Err(ProjectError::AlreadyExists(root.to_path_buf()));
        }
        std::fs::create_dir_all(&meta)?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Find the enclosing project by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let cwd = std::env::current_dir()?;
        Self::discover_from(&cwd)
    }

    /// Find the enclosing project by walking up from `start`
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut dir = start;
        loop {
            if dir.join(PROJECT_DIR).is_dir() {
                return Ok(Self {
                    root: dir.to_path_buf(),
                });
            }
            match dir.parent() {
                Some(parent) => dir = parent,
                None => return Err(ProjectError::NotFound),
            }
        }
    }

    /// Project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the `.redress` metadata directory
    pub fn meta_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    /// Path to the project config file
    pub fn config_path(&self) -> PathBuf {
        self.meta_dir().join("config.yaml")
    }

    /// Path to the user roster file
    pub fn roster_path(&self) -> PathBuf {
        self.meta_dir().join("users.yaml")
    }

    /// Path to the complaint database
    pub fn db_path(&self) -> PathBuf {
        self.meta_dir().join("complaints.db")
    }

    /// Path to the short ID index
    pub fn shortid_path(&self) -> PathBuf {
        self.meta_dir().join("shortids.json")
    }
}
