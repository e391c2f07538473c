//! Short ID aliases for complaints
//!
//! Full complaint IDs are 30-character ULIDs; nobody wants to type those.
//! Listing complaints assigns session-local aliases (`CMP@1`, `CMP@2`) that
//! any command accepting an ID will resolve. Persisted in
//! `.redress/shortids.json` and rebuilt on every list.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::core::identity::{ComplaintId, COMPLAINT_PREFIX};

/// Maps `CMP@N` aliases to full complaint IDs
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ShortIdIndex {
    /// "CMP@N" -> full ID string
    entries: HashMap<String, String>,
    /// Full ID string -> "CMP@N" (rebuilt on load)
    #[serde(skip)]
    reverse: HashMap<String, String>,
}

impl ShortIdIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the index, or an empty one if missing or unreadable
    pub fn load(path: &Path) -> Self {
        if let Ok(content) = fs::read_to_string(path) {
            if let Ok(mut index) = serde_json::from_str::<ShortIdIndex>(&content) {
                index.reverse = index
                    .entries
                    .iter()
                    .map(|(k, v)| (v.clone(), k.clone()))
                    .collect();
                return index;
            }
        }
        Self::new()
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
    }

    /// Replace the index with aliases for the given IDs, in listing order
    pub fn rebuild(&mut self, ids: &[ComplaintId]) {
        self.entries.clear();
        self.reverse.clear();
        for (i, id) in ids.iter().enumerate() {
            let alias = format!("{}@{}", COMPLAINT_PREFIX, i + 1);
            self.entries.insert(alias.clone(), id.to_string());
            self.reverse.insert(id.to_string(), alias);
        }
    }

    /// Resolve an alias like `CMP@3` or `@3` to a full ID
    pub fn resolve(&self, alias: &str) -> Option<ComplaintId> {
        let key = if let Some(n) = alias.strip_prefix('@') {
            format!("{}@{}", COMPLAINT_PREFIX, n)
        } else {
            alias.to_uppercase()
        };
        self.entries.get(&key).and_then(|full| full.parse().ok())
    }

    /// Alias for a full ID, if one was assigned this session
    pub fn alias_of(&self, id: &ComplaintId) -> Option<&str> {
        self.reverse.get(&id.to_string()).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn rebuild_assigns_sequential_aliases() {
        let ids = vec![ComplaintId::new(), ComplaintId::new(), ComplaintId::new()];
        let mut index = ShortIdIndex::new();
        index.rebuild(&ids);

        assert_eq!(index.resolve("CMP@1"), Some(ids[0].clone()));
        assert_eq!(index.resolve("cmp@2"), Some(ids[1].clone()));
        assert_eq!(index.resolve("@3"), Some(ids[2].clone()));
        assert_eq!(index.resolve("CMP@4"), None);
        assert_eq!(index.alias_of(&ids[1]), Some("CMP@2"));
    }

    #[test]
    fn rebuild_discards_old_aliases() {
        let old = ComplaintId::new();
        let new = ComplaintId::new();
        let mut index = ShortIdIndex::new();
        index.rebuild(std::slice::from_ref(&old));
        index.rebuild(std::slice::from_ref(&new));

        assert_eq!(index.resolve("@1"), Some(new));
        assert_eq!(index.alias_of(&old), None);
    }

    #[test]
    fn persists_across_load() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("shortids.json");
        let id = ComplaintId::new();

        let mut index = ShortIdIndex::new();
        index.rebuild(std::slice::from_ref(&id));
        index.save(&path).unwrap();

        let loaded = ShortIdIndex::load(&path);
        assert_eq!(loaded.resolve("@1"), Some(id.clone()));
        assert_eq!(loaded.alias_of(&id), Some("CMP@1"));
    }

    #[test]
    fn missing_file_loads_empty() {
        let tmp = tempdir().unwrap();
        let index = ShortIdIndex::load(&tmp.path().join("nope.json"));
        assert_eq!(index.resolve("@1"), None);
    }
}
