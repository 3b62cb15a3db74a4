use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use drt_core::errors::{DatabaseError, Error, Result};
use drt_core::semester_results::{
    NewSemesterResult, SemesterResult, SemesterResultKey, SemesterResultRepositoryTrait,
};

use super::model::{NewSemesterResultDB, SemesterResultChangesDB, SemesterResultDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::semester_results;
use crate::schema::semester_results::dsl::*;

pub struct SemesterResultRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SemesterResultRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SemesterResultRepository { pool, writer }
    }
}

#[async_trait]
impl SemesterResultRepositoryTrait for SemesterResultRepository {
    fn find_by_key(&self, key: &SemesterResultKey) -> Result<Option<SemesterResult>> {
        let mut conn = get_connection(&self.pool)?;
        let result_db = semester_results
            .filter(student_id.eq(&key.student_id))
            .filter(semester_id.eq(&key.semester_id))
            .filter(course_id.eq(&key.course_id))
            .select(SemesterResultDB::as_select())
            .first::<SemesterResultDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(result_db.map(SemesterResult::from))
    }

    async fn create(&self, new_result: NewSemesterResult) -> Result<SemesterResult> {
        new_result.validate()?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SemesterResult> {
                let new_result_db = NewSemesterResultDB::from_domain(
                    Uuid::new_v4().to_string(),
                    new_result,
                    Utc::now().naive_utc(),
                );
                let result_db = diesel::insert_into(semester_results::table)
                    .values(&new_result_db)
                    .returning(SemesterResultDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(SemesterResult::from(result_db))
            })
            .await
    }

    async fn update(&self, result_id: &str, line: NewSemesterResult) -> Result<SemesterResult> {
        let id_to_update = result_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SemesterResult> {
                let existing = semester_results
                    .find(&id_to_update)
                    .select(SemesterResultDB::as_select())
                    .first::<SemesterResultDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| {
                        Error::Database(DatabaseError::NotFound(format!(
                            "semester result {}",
                            id_to_update
                        )))
                    })?;

                let changes = SemesterResultChangesDB::from(line);
                if changes == existing.changes() {
                    debug!("(update_semester_result) {} [unchanged]", id_to_update);
                    return Ok(SemesterResult::from(existing));
                }

                let result_db = diesel::update(semester_results.find(&id_to_update))
                    .set((&changes, updated_at.eq(Utc::now().naive_utc())))
                    .returning(SemesterResultDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(SemesterResult::from(result_db))
            })
            .await
    }

    fn list_by_student(&self, owner_id: &str) -> Result<Vec<SemesterResult>> {
        let mut conn = get_connection(&self.pool)?;
        let results_db = semester_results
            .filter(student_id.eq(owner_id))
            .order((semester_id.asc(), course_id.asc()))
            .select(SemesterResultDB::as_select())
            .load::<SemesterResultDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(results_db.into_iter().map(SemesterResult::from).collect())
    }

    fn count(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        Ok(semester_results
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StorageError::from)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use crate::students::StudentRepository;
    use drt_core::students::{NewStudent, StudentRepositoryTrait};
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    async fn create_test_repositories() -> (
        SemesterResultRepository,
        StudentRepository,
        tempfile::TempDir,
    ) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let pool = create_pool(&db_path.to_string_lossy()).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());
        (
            SemesterResultRepository::new(pool.clone(), writer.clone()),
            StudentRepository::new(pool, writer),
            temp_dir,
        )
    }

    async fn create_test_student(repo: &StudentRepository, sid: &str) {
        repo.create(NewStudent {
            student_id: sid.to_string(),
            student_name: Some("Jane Doe".to_string()),
            campus_name: None,
            batch_no: Some(49),
            program_short_name: None,
            department_short_name: Some("CSE".to_string()),
            faculty_short_name: None,
            shift: None,
        })
        .await
        .expect("Failed to create test student");
    }

    fn line(owner: &str, semester: &str, course: &str, grade: &str) -> NewSemesterResult {
        NewSemesterResult {
            student_id: owner.to_string(),
            semester_id: semester.to_string(),
            semester_name: Some("Spring".to_string()),
            semester_year: Some(2022),
            course_id: course.to_string(),
            custom_course_id: Some(course.to_string()),
            course_title: Some(format!("Course {}", course)),
            total_credit: Some(dec!(3.0)),
            point_equivalent: Some(dec!(3.75)),
            grade_letter: Some(grade.to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_by_key() {
        let (repo, students, _dir) = create_test_repositories().await;
        create_test_student(&students, "181-15-955").await;

        let created = repo.create(line("181-15-955", "221", "CSE111", "A")).await.unwrap();
        let found = repo.find_by_key(&created.key()).unwrap().unwrap();

        assert_eq!(created, found);
        assert_eq!(found.total_credit, Some(dec!(3.0)));
        assert_eq!(found.point_equivalent, Some(dec!(3.75)));
        assert!(Uuid::parse_str(&found.id).is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_key_is_rejected() {
        let (repo, students, _dir) = create_test_repositories().await;
        create_test_student(&students, "181-15-955").await;
        repo.create(line("181-15-955", "221", "CSE111", "A")).await.unwrap();

        let err = repo
            .create(line("181-15-955", "221", "CSE111", "B"))
            .await
            .unwrap_err();

        assert!(err.is_creation_conflict());
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_requires_stored_student() {
        let (repo, _students, _dir) = create_test_repositories().await;

        let err = repo
            .create(line("181-15-955", "221", "CSE111", "A"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Database(DatabaseError::ForeignKeyViolation(_))
        ));
    }

    #[tokio::test]
    async fn test_update_changes_only_mutable_fields() {
        let (repo, students, _dir) = create_test_repositories().await;
        create_test_student(&students, "181-15-955").await;
        let created = repo.create(line("181-15-955", "221", "CSE111", "B")).await.unwrap();

        let same = repo
            .update(&created.id, line("181-15-955", "221", "CSE111", "B"))
            .await
            .unwrap();
        assert_eq!(same, created);

        let mut changed = line("181-15-955", "221", "CSE111", "A");
        changed.point_equivalent = None;
        let updated = repo.update(&created.id, changed).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.key(), created.key());
        assert_eq!(updated.grade_letter.as_deref(), Some("A"));
        assert_eq!(updated.point_equivalent, None);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_list_by_student_is_ordered() {
        let (repo, students, _dir) = create_test_repositories().await;
        create_test_student(&students, "181-15-955").await;
        create_test_student(&students, "181-15-956").await;
        for (semester, course) in [("222", "CSE211"), ("221", "CSE113"), ("221", "CSE111")] {
            repo.create(line("181-15-955", semester, course, "A")).await.unwrap();
        }
        repo.create(line("181-15-956", "221", "CSE111", "A")).await.unwrap();

        let keys: Vec<_> = repo
            .list_by_student("181-15-955")
            .unwrap()
            .into_iter()
            .map(|r| (r.semester_id, r.course_id))
            .collect();

        assert_eq!(
            keys,
            vec![
                ("221".to_string(), "CSE111".to_string()),
                ("221".to_string(), "CSE113".to_string()),
                ("222".to_string(), "CSE211".to_string()),
            ]
        );
        assert_eq!(repo.count().unwrap(), 4);
    }
}
