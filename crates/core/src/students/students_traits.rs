//! Student repository trait.
//!
//! This trait defines the contract for student persistence without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::students_model::{NewStudent, Student};
use crate::errors::Result;

/// Trait defining the contract for Student repository operations.
///
/// Creates must be atomic with respect to concurrent callers using the same
/// `student_id`: a second creator either fails with a unique violation or the
/// caller sees the first row. Never a duplicate.
#[async_trait]
pub trait StudentRepositoryTrait: Send + Sync {
    /// Retrieves a student by identifier, `None` if not stored.
    fn get_by_id(&self, student_id: &str) -> Result<Option<Student>>;

    /// Creates a new student. Fails on a duplicate identifier.
    async fn create(&self, new_student: NewStudent) -> Result<Student>;

    /// Overwrites every mutable field of an existing student.
    ///
    /// Writing values identical to the stored ones leaves the row untouched.
    async fn update(&self, student: NewStudent) -> Result<Student>;

    /// Lists stored students ordered by identifier.
    fn list(&self) -> Result<Vec<Student>>;

    /// Number of stored students.
    fn count(&self) -> Result<i64>;
}
