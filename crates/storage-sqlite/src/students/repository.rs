use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use drt_core::errors::{DatabaseError, Error, Result};
use drt_core::students::{NewStudent, Student, StudentRepositoryTrait};

use super::model::{NewStudentDB, StudentChangesDB, StudentDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::students;
use crate::schema::students::dsl::*;

pub struct StudentRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl StudentRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        StudentRepository { pool, writer }
    }
}

#[async_trait]
impl StudentRepositoryTrait for StudentRepository {
    fn get_by_id(&self, id_to_find: &str) -> Result<Option<Student>> {
        let mut conn = get_connection(&self.pool)?;
        let student_db = students
            .find(id_to_find)
            .select(StudentDB::as_select())
            .first::<StudentDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(student_db.map(Student::from))
    }

    async fn create(&self, new_student: NewStudent) -> Result<Student> {
        new_student.validate()?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Student> {
                let new_student_db = NewStudentDB::from_domain(new_student, Utc::now().naive_utc());
                let result_db = diesel::insert_into(students::table)
                    .values(&new_student_db)
                    .returning(StudentDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Student::from(result_db))
            })
            .await
    }

    async fn update(&self, student_update: NewStudent) -> Result<Student> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Student> {
                let id_to_update = student_update.student_id.clone();
                let existing = students
                    .find(&id_to_update)
                    .select(StudentDB::as_select())
                    .first::<StudentDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| {
                        Error::Database(DatabaseError::NotFound(format!(
                            "student {}",
                            id_to_update
                        )))
                    })?;

                let changes = StudentChangesDB::from(student_update);
                if changes == existing.changes() {
                    debug!("(update_student) {} [unchanged]", id_to_update);
                    return Ok(Student::from(existing));
                }

                let result_db = diesel::update(students.find(&id_to_update))
                    .set((&changes, updated_at.eq(Utc::now().naive_utc())))
                    .returning(StudentDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Student::from(result_db))
            })
            .await
    }

    fn list(&self) -> Result<Vec<Student>> {
        let mut conn = get_connection(&self.pool)?;
        let students_db = students
            .select(StudentDB::as_select())
            .order(student_id.asc())
            .load::<StudentDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(students_db.into_iter().map(Student::from).collect())
    }

    fn count(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        Ok(students
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?)
    }
}
