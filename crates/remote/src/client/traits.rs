//! Result lookup client trait definition.

use async_trait::async_trait;

use crate::errors::RemoteError;
use crate::models::RawRecord;

/// Trait for clients of the result lookup service.
///
/// Both lookups are read-only. Implementations must not translate a missing
/// student or an empty semester into an error: those are reported through the
/// returned payload so callers can tell "confirmed absent" apart from
/// "could not determine".
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use drt_remote::{RawRecord, RemoteError, ResultLookupClient};
///
/// struct FixtureClient;
///
/// #[async_trait]
/// impl ResultLookupClient for FixtureClient {
///     fn id(&self) -> &'static str {
///         "FIXTURE"
///     }
///
///     async fn fetch_student_info(&self, _: &str) -> Result<RawRecord, RemoteError> {
///         Ok(RawRecord::new())
///     }
///
///     async fn fetch_semester_result(&self, _: &str, _: &str) -> Result<Vec<RawRecord>, RemoteError> {
///         Ok(Vec::new())
///     }
/// }
/// ```
#[async_trait]
pub trait ResultLookupClient: Send + Sync {
    /// Identifier of this client, used in logs and error messages.
    fn id(&self) -> &'static str;

    /// Fetch the identity record for a student.
    ///
    /// A student that does not exist is signalled by a record whose
    /// `studentId` is absent, null or empty.
    async fn fetch_student_info(&self, student_id: &str) -> Result<RawRecord, RemoteError>;

    /// Fetch all course result lines of a student for one semester.
    ///
    /// An empty list means the student took no courses that semester.
    async fn fetch_semester_result(
        &self,
        student_id: &str,
        semester_id: &str,
    ) -> Result<Vec<RawRecord>, RemoteError>;
}
