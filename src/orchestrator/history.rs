//! Terminal attempt history, newest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::result::RunId;

/// Terminal status of one extraction attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptStatus {
    Completed,
    Failed,
}

impl AttemptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

impl std::fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One terminal attempt record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub run_id: RunId,
    pub timestamp: DateTime<Utc>,
    pub status: AttemptStatus,
}

/// Session-local attempt history. Append-only; entries are prepended so the
/// newest attempt is first. Nothing here is durably stored.
#[derive(Debug, Default)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a terminal attempt at the front of the log.
    pub fn record(&mut self, run_id: RunId, status: AttemptStatus) {
        self.entries.insert(
            0,
            HistoryEntry {
                run_id,
                timestamp: Utc::now(),
                status,
            },
        );
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_entry_is_first() {
        let mut log = HistoryLog::new();
        log.record(RunId::new("run-1"), AttemptStatus::Completed);
        log.record(RunId::new("run-2"), AttemptStatus::Failed);

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].run_id.as_str(), "run-2");
        assert_eq!(log.entries()[0].status, AttemptStatus::Failed);
        assert_eq!(log.entries()[1].run_id.as_str(), "run-1");
    }

    #[test]
    fn attempt_status_roundtrip() {
        for status in [AttemptStatus::Completed, AttemptStatus::Failed] {
            let s = status.as_str();
            assert_eq!(AttemptStatus::from_str(s), Some(status), "Roundtrip failed for {s}");
        }
        assert_eq!(AttemptStatus::from_str("unknown"), None);
    }

    #[test]
    fn attempt_status_serde_uses_snake_case() {
        let json = serde_json::to_string(&AttemptStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
    }
}
