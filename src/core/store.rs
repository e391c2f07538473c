//! Complaint storage abstraction
//!
//! The lifecycle manager is storage-agnostic: it needs per-record atomic
//! read-modify-write, provided here as compare-and-swap on a record version.
//! `MemoryStore` is the reference implementation; `SqliteStore` (core::sqlite)
//! backs the CLI.

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;

use crate::core::identity::ComplaintId;
use crate::entities::Complaint;

/// Errors from the storage layer
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Complaint not found: {0}")]
    NotFound(ComplaintId),

    #[error("Complaint already exists: {0}")]
    AlreadyExists(ComplaintId),

    #[error("Write conflict on {id}: expected version {expected}, found {found}")]
    Conflict {
        id: ComplaintId,
        expected: u64,
        found: u64,
    },

    #[error("Storage backend error: {message}")]
    Backend { message: String },
}

/// Per-record atomic storage for complaints
///
/// `compare_and_swap` is the only write path for existing records: it applies
/// `updated` only when the stored version still equals `expected_version`,
/// and bumps the version on success. Implementations must make the
/// check-and-write atomic so concurrent writers serialize per record.
pub trait ComplaintStore: Send + Sync {
    /// Insert a new record; fails if the ID is taken
    fn insert(&self, complaint: Complaint) -> Result<(), StoreError>;

    /// Fetch a record by ID
    fn get(&self, id: &ComplaintId) -> Result<Complaint, StoreError>;

    /// All records, in unspecified order; callers sort
    fn list_all(&self) -> Result<Vec<Complaint>, StoreError>;

    /// Replace a record iff its stored version matches `expected_version`
    ///
    /// On success the stored record is `updated` with version
    /// `expected_version + 1`. A mismatch yields `StoreError::Conflict`.
    fn compare_and_swap(
        &self,
        id: &ComplaintId,
        expected_version: u64,
        updated: Complaint,
    ) -> Result<Complaint, StoreError>;
}

/// In-memory store backed by a mutex-guarded map
///
/// CAS atomicity comes from holding the map lock across check and write.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<ComplaintId, Complaint>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ComplaintStore for MemoryStore {
    fn insert(&self, complaint: Complaint) -> Result<(), StoreError> {
        let mut records = self.records.lock().expect("store lock poisoned");
        if records.contains_key(&complaint.id) {
            return Err(StoreError::AlreadyExists(complaint.id.clone()));
        }
        records.insert(complaint.id.clone(), complaint);
        Ok(())
    }

    fn get(&self, id: &ComplaintId) -> Result<Complaint, StoreError> {
        let records = self.records.lock().expect("store lock poisoned");
        records
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn list_all(&self) -> Result<Vec<Complaint>, StoreError> {
        let records = self.records.lock().expect("store lock poisoned");
        Ok(records.values().cloned().collect())
    }

    fn compare_and_swap(
        &self,
        id: &ComplaintId,
        expected_version: u64,
        mut updated: Complaint,
    ) -> Result<Complaint, StoreError> {
        let mut records = self.records.lock().expect("store lock poisoned");
        let current = records
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        if current.version != expected_version {
            return Err(StoreError::Conflict {
                id: id.clone(),
                expected: expected_version,
                found: current.version,
            });
        }

        updated.version = expected_version + 1;
        records.insert(id.clone(), updated.clone());
        Ok(updated)
    }
}
