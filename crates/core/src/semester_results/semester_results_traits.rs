//! Semester result repository trait.

use async_trait::async_trait;

use super::semester_results_model::{NewSemesterResult, SemesterResult, SemesterResultKey};
use crate::errors::Result;

/// Trait defining the contract for result line persistence.
///
/// Lines are addressed by their natural key (student, semester, course). At
/// most one row may exist per key; concurrent creators of the same key must
/// not produce a duplicate.
#[async_trait]
pub trait SemesterResultRepositoryTrait: Send + Sync {
    /// Retrieves a result line by natural key, `None` if not stored.
    fn find_by_key(&self, key: &SemesterResultKey) -> Result<Option<SemesterResult>>;

    /// Creates a new result line. Fails if the key already exists or the
    /// owning student is not stored.
    async fn create(&self, new_result: NewSemesterResult) -> Result<SemesterResult>;

    /// Overwrites the mutable fields of the stored line `result_id`.
    async fn update(&self, result_id: &str, result: NewSemesterResult) -> Result<SemesterResult>;

    /// Lists a student's stored lines ordered by semester then course.
    fn list_by_student(&self, student_id: &str) -> Result<Vec<SemesterResult>>;

    /// Number of stored result lines.
    fn count(&self) -> Result<i64>;
}
