//! Persistent session results.
//!
//! Finished sessions are appended to a single JSON array file so separate
//! runs accumulate a history. The schema is flat and stable; loaders from
//! other tools key on these exact field names.

use std::fs;
use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::error::{CounterError, Result};
use crate::session::SessionSnapshot;

/// Completed-session summary, as stored in the results file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub username: String,
    pub timestamp: String,
    pub total_crossings: u64,
    pub counts_per_minute: f64,
    pub session_duration_seconds: f64,
}

impl SessionRecord {
    /// Build a record from a final snapshot, stamped with the local wall clock
    pub fn from_snapshot(username: &str, snapshot: &SessionSnapshot) -> Self {
        Self {
            username: username.to_string(),
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            total_crossings: snapshot.count,
            counts_per_minute: snapshot.rate,
            session_duration_seconds: snapshot.elapsed_seconds,
        }
    }
}

/// Load all records from a results file
///
/// A missing file is an empty history, not an error.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<SessionRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Vec::new());
    }

    let data = fs::read_to_string(path).map_err(|e| CounterError::Results {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&data).map_err(|e| CounterError::Results {
        path: path.to_path_buf(),
        message: format!("malformed results file: {e}"),
    })
}

/// Append one record, creating the file on first use
pub fn append_record<P: AsRef<Path>>(path: P, record: &SessionRecord) -> Result<()> {
    let path = path.as_ref();
    let mut records = load_records(path)?;
    records.push(record.clone());

    let data = serde_json::to_string_pretty(&records).map_err(|e| CounterError::Results {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    fs::write(path, data).map_err(|e| CounterError::Results {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    log::info!(
        "recorded session for {} ({} crossings) in {}",
        record.username,
        record.total_crossings,
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_carries_snapshot_fields() {
        let snapshot = SessionSnapshot {
            count: 42,
            rate: 18.5,
            elapsed_seconds: 132.4,
        };
        let record = SessionRecord::from_snapshot("ababa", &snapshot);

        assert_eq!(record.username, "ababa");
        assert_eq!(record.total_crossings, 42);
        assert_eq!(record.counts_per_minute, 18.5);
        assert_eq!(record.session_duration_seconds, 132.4);
    }

    #[test]
    fn test_record_field_names_are_stable() {
        let record = SessionRecord {
            username: "ababa".to_string(),
            timestamp: "2025-06-07 12:00:00".to_string(),
            total_crossings: 3,
            counts_per_minute: 9.0,
            session_duration_seconds: 20.0,
        };
        let json = serde_json::to_string(&record).unwrap();

        for key in [
            "username",
            "timestamp",
            "total_crossings",
            "counts_per_minute",
            "session_duration_seconds",
        ] {
            assert!(json.contains(&format!(r#""{key}":"#)), "missing {key}");
        }
    }

    #[test]
    fn test_missing_results_file_is_empty_history() {
        let records = load_records("/nonexistent/dir/results.json").unwrap();
        assert!(records.is_empty());
    }
}
