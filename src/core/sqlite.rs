//! SQLite-backed complaint store
//!
//! One row per complaint. The JSON `body` column is the canonical record;
//! `status`, `priority`, and `created_at` are duplicated into columns for
//! filtering and ordering without deserializing every row. Compare-and-swap
//! is a single guarded UPDATE, so SQLite's write serialization gives the
//! per-record atomicity the store contract requires.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension};

use crate::core::identity::ComplaintId;
use crate::core::store::{ComplaintStore, StoreError};
use crate::entities::{Complaint, Priority, Status};

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Backend {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Backend {
            message: format!("record serialization: {}", err),
        }
    }
}

// =========================================================================
// Status / Priority - ToSql/FromSql
// =========================================================================

impl ToSql for Status {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

impl FromSql for Status {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        s.parse().map_err(|e: String| {
            FromSqlError::Other(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                e,
            )))
        })
    }
}

impl ToSql for Priority {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

impl FromSql for Priority {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        s.parse().map_err(|e: String| {
            FromSqlError::Other(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                e,
            )))
        })
    }
}

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS complaints (
    id          TEXT PRIMARY KEY,
    submitter   TEXT NOT NULL,
    category    TEXT NOT NULL,
    status      TEXT NOT NULL,
    priority    TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    version     INTEGER NOT NULL,
    body        TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_complaints_submitter ON complaints(submitter);
CREATE INDEX IF NOT EXISTS idx_complaints_status ON complaints(status);
";

/// Complaint store persisted in a SQLite database
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (creating if needed) the database at the given path
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database, for tests
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn decode(body: &str) -> Result<Complaint, StoreError> {
        Ok(serde_json::from_str(body)?)
    }
}

impl ComplaintStore for SqliteStore {
    fn insert(&self, complaint: Complaint) -> Result<(), StoreError> {
        let conn = self.conn.lock().expect("sqlite lock poisoned");
        let body = serde_json::to_string(&complaint)?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO complaints
             (id, submitter, category, status, priority, created_at, version, body)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                complaint.id.to_string(),
                complaint.submitter.as_str(),
                complaint.category,
                complaint.status,
                complaint.priority,
                complaint.created_at.to_rfc3339(),
                complaint.version as i64,
                body,
            ],
        )?;
        if inserted == 0 {
            return Err(StoreError::AlreadyExists(complaint.id));
        }
        Ok(())
    }

    fn get(&self, id: &ComplaintId) -> Result<Complaint, StoreError> {
        let conn = self.conn.lock().expect("sqlite lock poisoned");
        let body: Option<String> = conn
            .query_row(
                "SELECT body FROM complaints WHERE id = ?1",
                [id.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        match body {
            Some(body) => Self::decode(&body),
            None => Err(StoreError::NotFound(id.clone())),
        }
    }

    fn list_all(&self) -> Result<Vec<Complaint>, StoreError> {
        let conn = self.conn.lock().expect("sqlite lock poisoned");
        let mut stmt = conn.prepare("SELECT body FROM complaints")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut complaints = Vec::new();
        for body in rows {
            complaints.push(Self::decode(&body?)?);
        }
        Ok(complaints)
    }

    fn compare_and_swap(
        &self,
        id: &ComplaintId,
        expected_version: u64,
        mut updated: Complaint,
    ) -> Result<Complaint, StoreError> {
        let conn = self.conn.lock().expect("sqlite lock poisoned");

        updated.version = expected_version + 1;
        let body = serde_json::to_string(&updated)?;
        let changed = conn.execute(
            "UPDATE complaints
             SET status = ?1, priority = ?2, version = ?3, body = ?4
             WHERE id = ?5 AND version = ?6",
            params![
                updated.status,
                updated.priority,
                updated.version as i64,
                body,
                id.to_string(),
                expected_version as i64,
            ],
        )?;

        if changed == 1 {
            return Ok(updated);
        }

        // Guarded update missed: distinguish a vanished row from a lost race
        let found: Option<i64> = conn
            .query_row(
                "SELECT version FROM complaints WHERE id = ?1",
                [id.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        match found {
            Some(found) => Err(StoreError::Conflict {
                id: id.clone(),
                expected: expected_version,
                found: found as u64,
            }),
            None => Err(StoreError::NotFound(id.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::UserId;
    use chrono::Duration;

    fn sample() -> Complaint {
        Complaint::new(
            UserId::new("sam").unwrap(),
            "facilities".into(),
            "Broken light".into(),
            "Hallway light is out".into(),
            Priority::High,
            Duration::hours(24),
        )
    }

    #[test]
    fn status_column_roundtrip() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE t (status TEXT)", []).unwrap();

        for status in [
            Status::Submitted,
            Status::UnderReview,
            Status::Resolved,
            Status::Rejected,
        ] {
            conn.execute("DELETE FROM t", []).unwrap();
            conn.execute("INSERT INTO t VALUES (?1)", [&status]).unwrap();

            let retrieved: Status = conn
                .query_row("SELECT status FROM t", [], |row| row.get(0))
                .unwrap();
            assert_eq!(status, retrieved);
        }
    }

    #[test]
    fn priority_column_roundtrip() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE t (priority TEXT)", []).unwrap();

        for priority in [
            Priority::Low,
            Priority::Medium,
            Priority::High,
            Priority::Urgent,
        ] {
            conn.execute("DELETE FROM t", []).unwrap();
            conn.execute("INSERT INTO t VALUES (?1)", [&priority])
                .unwrap();

            let retrieved: Priority = conn
                .query_row("SELECT priority FROM t", [], |row| row.get(0))
                .unwrap();
            assert_eq!(priority, retrieved);
        }
    }

    #[test]
    fn insert_get_roundtrip() {
        let store = SqliteStore::open_in_memory().unwrap();
        let c = sample();
        let id = c.id.clone();
        store.insert(c.clone()).unwrap();

        let fetched = store.get(&id).unwrap();
        assert_eq!(fetched.id, id);
        assert_eq!(fetched.title, c.title);
        assert_eq!(fetched.priority, Priority::High);
        assert_eq!(fetched.history.len(), 1);
    }

    #[test]
    fn duplicate_insert_rejected() {
        let store = SqliteStore::open_in_memory().unwrap();
        let c = sample();
        store.insert(c.clone()).unwrap();
        assert!(matches!(
            store.insert(c),
            Err(StoreError::AlreadyExists(_))
        ));
    }

    #[test]
    fn cas_respects_versions() {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut c = sample();
        let id = c.id.clone();
        store.insert(c.clone()).unwrap();

        c.status = Status::UnderReview;
        let written = store.compare_and_swap(&id, 0, c.clone()).unwrap();
        assert_eq!(written.version, 1);
        assert_eq!(store.get(&id).unwrap().status, Status::UnderReview);

        // Stale writer loses
        let err = store.compare_and_swap(&id, 0, c).unwrap_err();
        assert!(matches!(err, StoreError::Conflict { found: 1, .. }));
    }

    #[test]
    fn cas_on_unknown_id_is_not_found() {
        let store = SqliteStore::open_in_memory().unwrap();
        let c = sample();
        let id = c.id.clone();
        assert!(matches!(
            store.compare_and_swap(&id, 0, c),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn persists_across_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("complaints.db");
        let c = sample();
        let id = c.id.clone();

        {
            let store = SqliteStore::open(&path).unwrap();
            store.insert(c).unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.get(&id).unwrap().id, id);
        assert_eq!(store.list_all().unwrap().len(), 1);
    }
}
