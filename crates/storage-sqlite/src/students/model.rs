//! Database models for students.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use drt_core::students::{NewStudent, Student};

/// Database model for students
#[derive(
    Queryable,
    Identifiable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::students)]
#[diesel(primary_key(student_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct StudentDB {
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

/// Database model for inserting a student
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::students)]
pub struct NewStudentDB {
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

/// Mutable columns of a student. A `None` clears the stored value.
#[derive(AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::students)]
#[diesel(treat_none_as_null = true)]
pub struct StudentChangesDB {
    pub student_name: Option<String>,
    pub campus_name: Option<String>,
    pub batch_no: Option<i32>,
    pub program_short_name: Option<String>,
    pub department_short_name: Option<String>,
    pub faculty_short_name: Option<String>,
    pub shift: Option<String>,
}

impl StudentDB {
    pub fn changes(&self) -> StudentChangesDB {
        StudentChangesDB {
            student_name: self.student_name.clone(),
            campus_name: self.campus_name.clone(),
            batch_no: self.batch_no,
            program_short_name: self.program_short_name.clone(),
            department_short_name: self.department_short_name.clone(),
            faculty_short_name: self.faculty_short_name.clone(),
            shift: self.shift.clone(),
        }
    }
}

// Conversion to domain models
impl From<StudentDB> for Student {
    fn from(db: StudentDB) -> Self {
        Self {
            student_id: db.student_id,
            student_name: db.student_name,
            campus_name: db.campus_name,
            batch_no: db.batch_no,
            program_short_name: db.program_short_name,
            department_short_name: db.department_short_name,
            faculty_short_name: db.faculty_short_name,
            shift: db.shift,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl NewStudentDB {
    pub fn from_domain(domain: NewStudent, now: NaiveDateTime) -> Self {
        Self {
            student_id: domain.student_id,
            student_name: domain.student_name,
            campus_name: domain.campus_name,
            batch_no: domain.batch_no,
            program_short_name: domain.program_short_name,
            department_short_name: domain.department_short_name,
            faculty_short_name: domain.faculty_short_name,
            shift: domain.shift,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<NewStudent> for StudentChangesDB {
    fn from(domain: NewStudent) -> Self {
        Self {
            student_name: domain.student_name,
            campus_name: domain.campus_name,
            batch_no: domain.batch_no,
            program_short_name: domain.program_short_name,
            department_short_name: domain.department_short_name,
            faculty_short_name: domain.faculty_short_name,
            shift: domain.shift,
        }
    }
}
