//! Student domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use crate::{errors::ValidationError, Error, Result};

/// Student identity as reported by the remote service, keyed by internal names.
///
/// Every field is optional: the remote side may leave any of them out, and a
/// missing `student_id` means the student does not exist.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StudentInfo {
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub campus_name: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub batch_no: Option<i32>,
    #[serde(default)]
    pub program_short_name: Option<String>,
    #[serde(default)]
    pub department_short_name: Option<String>,
    #[serde(default)]
    pub faculty_short_name: Option<String>,
    #[serde(default)]
    pub shift: Option<String>,
}

impl StudentInfo {
    /// Returns true if the payload identifies an existing student.
    pub fn is_found(&self) -> bool {
        self.student_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty())
    }

    /// Converts the payload into a record ready to persist.
    ///
    /// Returns `None` when the payload carries no identifier.
    pub fn into_new_student(self) -> Option<NewStudent> {
        let student_id = self
            .student_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())?;

        Some(NewStudent {
            student_id,
            student_name: self.student_name,
            campus_name: self.campus_name,
            batch_no: self.batch_no,
            program_short_name: self.program_short_name,
            department_short_name: self.department_short_name,
            faculty_short_name: self.faculty_short_name,
            shift: self.shift,
        })
    }
}

/// Domain model representing a stored student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub student_id: String,
    pub student_name: Option<String>,
    pub campus_name: Option<String>,
    pub batch_no: Option<i32>,
    pub program_short_name: Option<String>,
    pub department_short_name: Option<String>,
    pub faculty_short_name: Option<String>,
    pub shift: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating or refreshing a student.
///
/// Used for both inserts and updates: an update overwrites every field except
/// the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub student_id: String,
    pub student_name: Option<String>,
    pub campus_name: Option<String>,
    pub batch_no: Option<i32>,
    pub program_short_name: Option<String>,
    pub department_short_name: Option<String>,
    pub faculty_short_name: Option<String>,
    pub shift: Option<String>,
}

impl NewStudent {
    /// Validates the student data.
    pub fn validate(&self) -> Result<()> {
        if self.student_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "student_id".to_string(),
            )));
        }
        Ok(())
    }
}
