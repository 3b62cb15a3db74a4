//! Database models for semester result lines.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::students::StudentDB;
use drt_core::semester_results::{NewSemesterResult, SemesterResult};

/// Parses a stored decimal column. An unreadable value is logged and read as
/// absent.
fn parse_decimal(value: Option<String>, field_name: &str) -> Option<Decimal> {
    let text = value?;
    match Decimal::from_str(&text) {
        Ok(d) => Some(d),
        Err(e) => {
            warn!("Failed to parse {} '{}': {}", field_name, text, e);
            None
        }
    }
}

fn format_decimal(value: Option<Decimal>) -> Option<String> {
    value.map(|d| d.to_string())
}

/// Database model for semester result lines
#[derive(
    Queryable,
    Identifiable,
    Associations,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(StudentDB, foreign_key = student_id))]
#[diesel(table_name = crate::schema::semester_results)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct SemesterResultDB {
    pub id: String,
    pub student_id: String,
    pub semester_id: String,
    pub semester_name: Option<String>,
    pub semester_year: Option<i32>,
    pub course_id: String,
    pub custom_course_id: Option<String>,
    pub course_title: Option<String>,
    pub total_credit: Option<String>,
    pub point_equivalent: Option<String>,
    pub grade_letter: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for inserting a result line
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::semester_results)]
pub struct NewSemesterResultDB {
    pub id: String,
    pub student_id: String,
    pub semester_id: String,
    pub semester_name: Option<String>,
    pub semester_year: Option<i32>,
    pub course_id: String,
    pub custom_course_id: Option<String>,
    pub course_title: Option<String>,
    pub total_credit: Option<String>,
    pub point_equivalent: Option<String>,
    pub grade_letter: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Mutable columns of a result line; the natural key never changes.
#[derive(AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::semester_results)]
#[diesel(treat_none_as_null = true)]
pub struct SemesterResultChangesDB {
    pub semester_name: Option<String>,
    pub semester_year: Option<i32>,
    pub custom_course_id: Option<String>,
    pub course_title: Option<String>,
    pub total_credit: Option<String>,
    pub point_equivalent: Option<String>,
    pub grade_letter: Option<String>,
}

impl SemesterResultDB {
    pub fn changes(&self) -> SemesterResultChangesDB {
        SemesterResultChangesDB {
            semester_name: self.semester_name.clone(),
            semester_year: self.semester_year,
            custom_course_id: self.custom_course_id.clone(),
            course_title: self.course_title.clone(),
            total_credit: self.total_credit.clone(),
            point_equivalent: self.point_equivalent.clone(),
            grade_letter: self.grade_letter.clone(),
        }
    }
}

impl From<SemesterResultDB> for SemesterResult {
    fn from(db: SemesterResultDB) -> Self {
        Self {
            id: db.id,
            student_id: db.student_id,
            semester_id: db.semester_id,
            semester_name: db.semester_name,
            semester_year: db.semester_year,
            course_id: db.course_id,
            custom_course_id: db.custom_course_id,
            course_title: db.course_title,
            total_credit: parse_decimal(db.total_credit, "total_credit"),
            point_equivalent: parse_decimal(db.point_equivalent, "point_equivalent"),
            grade_letter: db.grade_letter,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl NewSemesterResultDB {
    pub fn from_domain(id: String, domain: NewSemesterResult, now: NaiveDateTime) -> Self {
        Self {
            id,
            student_id: domain.student_id,
            semester_id: domain.semester_id,
            semester_name: domain.semester_name,
            semester_year: domain.semester_year,
            course_id: domain.course_id,
            custom_course_id: domain.custom_course_id,
            course_title: domain.course_title,
            total_credit: format_decimal(domain.total_credit),
            point_equivalent: format_decimal(domain.point_equivalent),
            grade_letter: domain.grade_letter,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<NewSemesterResult> for SemesterResultChangesDB {
    fn from(domain: NewSemesterResult) -> Self {
        Self {
            semester_name: domain.semester_name,
            semester_year: domain.semester_year,
            custom_course_id: domain.custom_course_id,
            course_title: domain.course_title,
            total_credit: format_decimal(domain.total_credit),
            point_equivalent: format_decimal(domain.point_equivalent),
            grade_letter: domain.grade_letter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_decimal_columns_round_trip_text() {
        assert_eq!(format_decimal(Some(dec!(3.75))).as_deref(), Some("3.75"));
        assert_eq!(parse_decimal(Some("3.75".to_string()), "x"), Some(dec!(3.75)));
        assert_eq!(parse_decimal(Some("n/a".to_string()), "x"), None);
        assert_eq!(parse_decimal(None, "x"), None);
    }
}
