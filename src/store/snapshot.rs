//! JSON snapshots of the store's contents.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{BalanceLedger, Employee, LeaveRequest};

/// Every record held by a store, in a serializable form.
///
/// The batch runner loads a snapshot, runs a job against an
/// [`InMemoryStore`](super::InMemoryStore) built from it and writes the
/// result back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Employees.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Balance ledgers.
    #[serde(default)]
    pub ledgers: Vec<BalanceLedger>,
    /// Leave requests.
    #[serde(default)]
    pub requests: Vec<LeaveRequest>,
}

impl StoreSnapshot {
    /// Reads a snapshot from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| EngineError::StorageError {
            message: format!("cannot read snapshot '{}': {}", path.display(), e),
        })?;

        serde_json::from_str(&content).map_err(|e| EngineError::StorageError {
            message: format!("cannot parse snapshot '{}': {}", path.display(), e),
        })
    }

    /// Writes the snapshot to a JSON file, replacing any existing one.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> EngineResult<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self).map_err(|e| EngineError::StorageError {
            message: format!("cannot serialize snapshot: {}", e),
        })?;

        fs::write(path, content).map_err(|e| EngineError::StorageError {
            message: format!("cannot write snapshot '{}': {}", path.display(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LedgerKey;
    use chrono::NaiveDate;

    #[test]
    fn test_save_then_load() {
        let dir = std::env::temp_dir().join(format!("leave-snapshot-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("store.json");

        let snapshot = StoreSnapshot {
            employees: vec![Employee::new(
                "emp_001",
                "Ana Gomez",
                NaiveDate::from_ymd_opt(2020, 3, 15).unwrap(),
            )],
            ledgers: vec![BalanceLedger::empty(&LedgerKey::new("emp_001", 2026))],
            requests: vec![],
        };
        snapshot.save(&path).unwrap();

        assert_eq!(StoreSnapshot::load(&path).unwrap(), snapshot);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let snapshot: StoreSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snapshot, StoreSnapshot::default());
    }

    #[test]
    fn test_missing_file_is_storage_error() {
        let result = StoreSnapshot::load("/nonexistent/store.json");
        assert!(matches!(result, Err(EngineError::StorageError { .. })));
    }
}
