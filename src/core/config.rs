//! Project configuration
//!
//! Loaded from `.redress/config.yaml`. Categories and SLA windows are
//! configuration, not code: campuses disagree on both.

use std::fs;
use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::entities::Priority;

/// A complaint category offered to submitters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Inactive categories stay on old records but reject new submissions
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Category {
    fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            active: true,
        }
    }
}

/// SLA resolution windows, in hours, keyed by priority
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlaConfig {
    pub low_hours: u32,
    pub medium_hours: u32,
    pub high_hours: u32,
    pub urgent_hours: u32,
}

impl Default for SlaConfig {
    fn default() -> Self {
        Self {
            low_hours: 120,
            medium_hours: 72,
            high_hours: 24,
            urgent_hours: 8,
        }
    }
}

impl SlaConfig {
    /// Resolution window for the given priority
    pub fn resolution_window(&self, priority: Priority) -> Duration {
        let hours = match priority {
            Priority::Low => self.low_hours,
            Priority::Medium => self.medium_hours,
            Priority::High => self.high_hours,
            Priority::Urgent => self.urgent_hours,
        };
        Duration::hours(i64::from(hours))
    }
}

/// Errors loading or saving project configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {message}")]
    Parse { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Categories offered at submission
    pub categories: Vec<Category>,

    /// SLA windows per priority
    pub sla: SlaConfig,

    /// Priority applied when the submitter does not pick one
    pub default_priority: Priority,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            categories: vec![
                Category::new("academic", "Courses, grading, and instruction"),
                Category::new("facilities", "Buildings, equipment, and grounds"),
                Category::new("harassment", "Harassment or discrimination"),
                Category::new("other", "Anything that fits nowhere else"),
            ],
            sla: SlaConfig::default(),
            default_priority: Priority::Medium,
        }
    }
}

impl Config {
    /// Load config from a YAML file, or defaults if the file is absent
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        serde_yml::from_str(&contents).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Write config as YAML
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = serde_yml::to_string(self).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Look up a category by name, case-insensitively
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// True when the named category exists and accepts new submissions
    pub fn accepts_category(&self, name: &str) -> bool {
        self.category(name).is_some_and(|c| c.active)
    }

    /// Names of categories currently open for submission
    pub fn active_category_names(&self) -> Vec<&str> {
        self.categories
            .iter()
            .filter(|c| c.active)
            .map(|c| c.name.as_str())
            .collect()
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_have_four_active_categories() {
        let config = Config::default();
        assert_eq!(config.active_category_names().len(), 4);
        assert!(config.accepts_category("facilities"));
        assert!(config.accepts_category("FACILITIES"));
        assert!(!config.accepts_category("parking"));
    }

    #[test]
    fn inactive_category_rejects_submissions() {
        let mut config = Config::default();
        config.categories[0].active = false;
        assert!(!config.accepts_category(&config.categories[0].name.clone()));
        // Still resolvable for display on old records
        assert!(config.category("academic").is_some());
    }

    #[test]
    fn sla_window_tracks_priority() {
        let config = Config::default();
        assert_eq!(
            config.sla.resolution_window(Priority::Urgent),
            Duration::hours(8)
        );
        assert_eq!(
            config.sla.resolution_window(Priority::Low),
            Duration::hours(120)
        );
    }

    #[test]
    fn save_and_load_roundtrip() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.yaml");

        let mut config = Config::default();
        config.categories.push(Category::new("housing", "Dorm issues"));
        config.sla.urgent_hours = 4;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert!(loaded.accepts_category("housing"));
        assert_eq!(loaded.sla.urgent_hours, 4);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let tmp = tempdir().unwrap();
        let config = Config::load(&tmp.path().join("nope.yaml")).unwrap();
        assert_eq!(config.default_priority, Priority::Medium);
    }
}
