//! Sync outcome and batch report models.

use serde::{Deserialize, Serialize};

/// Outcome of a sync operation that may legitimately find nothing.
///
/// Failures (transport, storage) are carried by the surrounding `Result`;
/// `NotFound` is a confirmed absence on the remote side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome<T> {
    Synced(T),
    NotFound,
}

impl<T> SyncOutcome<T> {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SyncOutcome::NotFound)
    }

    pub fn synced(self) -> Option<T> {
        match self {
            SyncOutcome::Synced(value) => Some(value),
            SyncOutcome::NotFound => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> SyncOutcome<U> {
        match self {
            SyncOutcome::Synced(value) => SyncOutcome::Synced(f(value)),
            SyncOutcome::NotFound => SyncOutcome::NotFound,
        }
    }
}

/// Per-operation status inside a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SyncStatus {
    /// The operation completed; `touched` is the number of rows written or refreshed.
    Synced { touched: usize },
    /// The student does not exist remotely.
    NotFound,
    /// The operation failed. `transport` is true when the remote service
    /// could not be consulted, i.e. absence was not confirmed.
    Failed { message: String, transport: bool },
}

/// One entry of a batch report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRecord {
    pub student_id: String,
    /// `None` for identity-only operations.
    pub semester_id: Option<String>,
    #[serde(flatten)]
    pub status: SyncStatus,
}

/// Aggregate result of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub success_count: usize,
    pub not_found_count: usize,
    pub failure_count: usize,
    pub records: Vec<SyncRecord>,
}

impl BatchSummary {
    pub fn from_records(records: impl IntoIterator<Item = SyncRecord>) -> Self {
        let mut summary = BatchSummary::default();
        for record in records {
            summary.push(record);
        }
        summary
    }

    pub fn push(&mut self, record: SyncRecord) {
        match record.status {
            SyncStatus::Synced { .. } => self.success_count += 1,
            SyncStatus::NotFound => self.not_found_count += 1,
            SyncStatus::Failed { .. } => self.failure_count += 1,
        }
        self.records.push(record);
    }

    /// `(success_count, not_found_count)`.
    pub fn counts(&self) -> (usize, usize) {
        (self.success_count, self.not_found_count)
    }

    pub fn failures(&self) -> impl Iterator<Item = &SyncRecord> {
        self.records
            .iter()
            .filter(|r| matches!(r.status, SyncStatus::Failed { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(student_id: &str, status: SyncStatus) -> SyncRecord {
        SyncRecord {
            student_id: student_id.to_string(),
            semester_id: Some("221".to_string()),
            status,
        }
    }

    #[test]
    fn test_outcome_helpers() {
        let outcome = SyncOutcome::Synced(3);
        assert!(!outcome.is_not_found());
        assert_eq!(outcome.clone().map(|n| n * 2), SyncOutcome::Synced(6));
        assert_eq!(outcome.synced(), Some(3));

        let outcome: SyncOutcome<i32> = SyncOutcome::NotFound;
        assert!(outcome.is_not_found());
        assert_eq!(outcome.synced(), None);
    }

    #[test]
    fn test_summary_counts() {
        let summary = BatchSummary::from_records(vec![
            record("a", SyncStatus::Synced { touched: 2 }),
            record("b", SyncStatus::NotFound),
            record(
                "c",
                SyncStatus::Failed {
                    message: "timeout".to_string(),
                    transport: true,
                },
            ),
            record("c", SyncStatus::Synced { touched: 0 }),
        ]);

        assert_eq!(summary.counts(), (2, 1));
        assert_eq!(summary.failure_count, 1);
        assert_eq!(summary.records.len(), 4);
        assert_eq!(summary.failures().count(), 1);
    }

    #[test]
    fn test_record_serialization() {
        let value = serde_json::to_value(record("a", SyncStatus::Synced { touched: 2 })).unwrap();
        assert_eq!(value["studentId"], "a");
        assert_eq!(value["status"], "SYNCED");
        assert_eq!(value["touched"], 2);
    }
}
