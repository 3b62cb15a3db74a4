//! Sync service trait.

use async_trait::async_trait;

use super::sync_model::{BatchSummary, SyncOutcome};
use crate::errors::Result;
use crate::semester_results::SemesterResult;
use crate::students::Student;

/// Trait defining the contract for synchronization from the remote service.
#[async_trait]
pub trait SyncServiceTrait: Send + Sync {
    /// Fetches a student's identity and creates or refreshes the stored row.
    ///
    /// Returns `NotFound` without touching storage when the remote service has
    /// no such student.
    async fn sync_student(&self, student_id: &str) -> Result<SyncOutcome<Student>>;

    /// Fetches a student's course lines for one semester and upserts each by
    /// natural key. The owning student is synced first when not stored.
    ///
    /// Returns the touched lines in remote order. An empty semester yields an
    /// empty list; `NotFound` is reserved for a missing student.
    async fn sync_semester_result(
        &self,
        student_id: &str,
        semester_id: &str,
    ) -> Result<SyncOutcome<Vec<SemesterResult>>>;

    /// Syncs every (student, semester) pair. Stops a student's remaining
    /// semesters once it is confirmed absent; never aborts on a failure.
    async fn sync_many(&self, student_ids: &[String], semester_ids: &[String]) -> BatchSummary;

    /// Refreshes identity records for every listed student.
    async fn sync_students(&self, student_ids: &[String]) -> BatchSummary;
}
