//! Semester result domain models.

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use crate::{errors::ValidationError, Error, Result};

/// One course result line as reported by the remote service, keyed by
/// internal names.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SemesterResultInfo {
    pub semester_id: Option<String>,
    pub semester_name: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub semester_year: Option<i32>,
    pub student_id: Option<String>,
    pub course_id: Option<String>,
    pub custom_course_id: Option<String>,
    pub course_title: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub total_credit: Option<Decimal>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub point_equivalent: Option<Decimal>,
    pub grade_letter: Option<String>,
}

impl SemesterResultInfo {
    /// Converts the line into a record owned by `student_id`.
    ///
    /// The semester falls back to `requested_semester_id` when the line does
    /// not carry its own. A line without a course identifier cannot be keyed
    /// and is rejected.
    pub fn into_new_result(
        self,
        student_id: &str,
        requested_semester_id: &str,
    ) -> Result<NewSemesterResult> {
        let course_id = non_blank(self.course_id).ok_or_else(|| {
            Error::Validation(ValidationError::MissingField("course_id".to_string()))
        })?;
        let semester_id =
            non_blank(self.semester_id).unwrap_or_else(|| requested_semester_id.to_string());

        Ok(NewSemesterResult {
            student_id: student_id.to_string(),
            semester_id,
            semester_name: self.semester_name,
            semester_year: self.semester_year,
            course_id,
            custom_course_id: self.custom_course_id,
            course_title: self.course_title,
            total_credit: self.total_credit,
            point_equivalent: self.point_equivalent,
            grade_letter: self.grade_letter,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Natural key of a result line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterResultKey {
    pub student_id: String,
    pub semester_id: String,
    pub course_id: String,
}

impl fmt::Display for SemesterResultKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.student_id, self.semester_id, self.course_id)
    }
}

/// Domain model representing a stored result line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterResult {
    pub id: String,
    pub student_id: String,
    pub semester_id: String,
    pub semester_name: Option<String>,
    pub semester_year: Option<i32>,
    pub course_id: String,
    pub custom_course_id: Option<String>,
    pub course_title: Option<String>,
    pub total_credit: Option<Decimal>,
    pub point_equivalent: Option<Decimal>,
    pub grade_letter: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl SemesterResult {
    pub fn key(&self) -> SemesterResultKey {
        SemesterResultKey {
            student_id: self.student_id.clone(),
            semester_id: self.semester_id.clone(),
            course_id: self.course_id.clone(),
        }
    }
}

/// Input model for creating or refreshing a result line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSemesterResult {
    pub student_id: String,
    pub semester_id: String,
    pub semester_name: Option<String>,
    pub semester_year: Option<i32>,
    pub course_id: String,
    pub custom_course_id: Option<String>,
    pub course_title: Option<String>,
    pub total_credit: Option<Decimal>,
    pub point_equivalent: Option<Decimal>,
    pub grade_letter: Option<String>,
}

impl NewSemesterResult {
    pub fn key(&self) -> SemesterResultKey {
        SemesterResultKey {
            student_id: self.student_id.clone(),
            semester_id: self.semester_id.clone(),
            course_id: self.course_id.clone(),
        }
    }

    /// Validates that every natural key component is present.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("student_id", &self.student_id),
            ("semester_id", &self.semester_id),
            ("course_id", &self.course_id),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Validation(ValidationError::MissingField(
                    field.to_string(),
                )));
            }
        }
        Ok(())
    }
}
