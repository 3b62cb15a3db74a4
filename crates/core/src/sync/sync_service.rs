use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, error, info, warn};
use std::sync::Arc;

use drt_remote::ResultLookupClient;

use super::sync_model::{BatchSummary, SyncOutcome, SyncRecord, SyncStatus};
use super::sync_traits::SyncServiceTrait;
use crate::errors::{Error, Result};
use crate::mapping::{parse_semester_result, parse_student_info};
use crate::semester_results::{
    NewSemesterResult, SemesterResult, SemesterResultRepositoryTrait,
};
use crate::students::{Student, StudentRepositoryTrait};

/// Service keeping stored students and result lines in step with the remote service.
pub struct SyncService {
    client: Arc<dyn ResultLookupClient>,
    student_repository: Arc<dyn StudentRepositoryTrait>,
    result_repository: Arc<dyn SemesterResultRepositoryTrait>,
    concurrency: usize,
}

impl SyncService {
    /// Creates a new SyncService processing one student at a time.
    pub fn new(
        client: Arc<dyn ResultLookupClient>,
        student_repository: Arc<dyn StudentRepositoryTrait>,
        result_repository: Arc<dyn SemesterResultRepositoryTrait>,
    ) -> Self {
        Self {
            client,
            student_repository,
            result_repository,
            concurrency: 1,
        }
    }

    /// Number of students a batch works on at once, in chunks of this size.
    /// Semesters of one student are always processed in order.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    async fn resolve_student(&self, student_id: &str) -> Result<SyncOutcome<Student>> {
        if let Some(student) = self.student_repository.get_by_id(student_id)? {
            return Ok(SyncOutcome::Synced(student));
        }
        debug!("(resolve_student) {} [not found in db]", student_id);
        self.sync_student(student_id).await
    }

    async fn upsert_result(
        &self,
        line: NewSemesterResult,
    ) -> Result<(SemesterResult, bool)> {
        let key = line.key();
        match self.result_repository.find_by_key(&key)? {
            Some(existing) => {
                let updated = self.result_repository.update(&existing.id, line).await?;
                Ok((updated, false))
            }
            None => {
                let created = self
                    .result_repository
                    .create(line)
                    .await
                    .map_err(|e| Error::ResultCreationFailed {
                        student_id: key.student_id.clone(),
                        semester_id: key.semester_id.clone(),
                        course_id: key.course_id.clone(),
                        source: Box::new(e),
                    })?;
                Ok((created, true))
            }
        }
    }

    /// Runs every semester of one student, stopping once it is confirmed absent.
    async fn sync_student_semesters(
        &self,
        student_id: &str,
        semester_ids: &[String],
    ) -> Vec<SyncRecord> {
        let mut records = Vec::with_capacity(semester_ids.len());

        for semester_id in semester_ids {
            info!("Updating student semester result ({}, {})", student_id, semester_id);
            let status = match self.sync_semester_result(student_id, semester_id).await {
                Ok(SyncOutcome::Synced(lines)) => SyncStatus::Synced {
                    touched: lines.len(),
                },
                Ok(SyncOutcome::NotFound) => SyncStatus::NotFound,
                Err(e) => {
                    error!("(sync_many) {}:{} [{}]", student_id, semester_id, e);
                    failed(&e)
                }
            };

            let stop = status == SyncStatus::NotFound;
            records.push(SyncRecord {
                student_id: student_id.to_string(),
                semester_id: Some(semester_id.clone()),
                status,
            });
            if stop {
                warn!(
                    "(sync_many) {} [student not found, skipping remaining semesters]",
                    student_id
                );
                break;
            }
        }

        records
    }
}

fn failed(e: &Error) -> SyncStatus {
    SyncStatus::Failed {
        message: e.to_string(),
        transport: e.is_transport(),
    }
}

#[async_trait]
impl SyncServiceTrait for SyncService {
    async fn sync_student(&self, student_id: &str) -> Result<SyncOutcome<Student>> {
        let raw = self.client.fetch_student_info(student_id).await?;
        let student_info = parse_student_info(&raw)?;

        let Some(mut new_student) = student_info.into_new_student() else {
            info!("(update_student_info) {} [not found remotely]", student_id);
            return Ok(SyncOutcome::NotFound);
        };

        // Rows are keyed by the identifier they were requested under, so the
        // next lookup of the same student hits the stored row.
        if new_student.student_id != student_id {
            warn!(
                "(update_student_info) {} [remote answered with {}, keeping requested id]",
                student_id, new_student.student_id
            );
            new_student.student_id = student_id.to_string();
        }
        new_student.validate()?;
        let synced_id = new_student.student_id.clone();

        if self.student_repository.get_by_id(&synced_id)?.is_some() {
            let student = self.student_repository.update(new_student).await?;
            debug!("(update_student_info) {} [found in db and updated]", synced_id);
            return Ok(SyncOutcome::Synced(student));
        }

        let student = self
            .student_repository
            .create(new_student)
            .await
            .map_err(|e| {
                error!("(update_student_info) {} [{}]", synced_id, e);
                Error::StudentCreationFailed {
                    student_id: synced_id.clone(),
                    source: Box::new(e),
                }
            })?;
        debug!("(update_student_info) {} [new insert in db]", synced_id);
        Ok(SyncOutcome::Synced(student))
    }

    async fn sync_semester_result(
        &self,
        student_id: &str,
        semester_id: &str,
    ) -> Result<SyncOutcome<Vec<SemesterResult>>> {
        let student = match self.resolve_student(student_id).await? {
            SyncOutcome::Synced(student) => student,
            SyncOutcome::NotFound => {
                warn!(
                    "(update_semester_result) {}:{} [could not find student info, aborting]",
                    student_id, semester_id
                );
                return Ok(SyncOutcome::NotFound);
            }
        };

        let raws = self
            .client
            .fetch_semester_result(&student.student_id, semester_id)
            .await?;
        let lines = parse_semester_result(&raws)?
            .into_iter()
            .map(|info| info.into_new_result(&student.student_id, semester_id))
            .collect::<Result<Vec<_>>>()?;

        if lines.is_empty() {
            info!(
                "(update_semester_result) {}:{} [no courses this semester]",
                student.student_id, semester_id
            );
            return Ok(SyncOutcome::Synced(Vec::new()));
        }

        let mut touched = Vec::with_capacity(lines.len());
        let mut created_count = 0;
        for line in lines {
            let (result, created) = self.upsert_result(line).await?;
            debug!(
                "(update_semester_result) {} [{}]",
                result.key(),
                if created { "created" } else { "updated" }
            );
            if created {
                created_count += 1;
            }
            touched.push(result);
        }

        info!(
            "(update_semester_result) {}:{} [{} created, {} updated]",
            student.student_id,
            semester_id,
            created_count,
            touched.len() - created_count
        );
        Ok(SyncOutcome::Synced(touched))
    }

    async fn sync_many(&self, student_ids: &[String], semester_ids: &[String]) -> BatchSummary {
        let mut records = Vec::with_capacity(student_ids.len() * semester_ids.len());
        for chunk in student_ids.chunks(self.concurrency) {
            let futures: Vec<_> = chunk
                .iter()
                .map(|student_id| self.sync_student_semesters(student_id, semester_ids))
                .collect();
            records.extend(join_all(futures).await.into_iter().flatten());
        }

        let summary = BatchSummary::from_records(records);
        info!(
            "(sync_many) {} students x {} semesters [{} synced, {} not found, {} failed]",
            student_ids.len(),
            semester_ids.len(),
            summary.success_count,
            summary.not_found_count,
            summary.failure_count
        );
        summary
    }

    async fn sync_students(&self, student_ids: &[String]) -> BatchSummary {
        let mut records = Vec::with_capacity(student_ids.len());
        for chunk in student_ids.chunks(self.concurrency) {
            let futures: Vec<_> = chunk
                .iter()
                .map(|student_id| async move {
                    info!("Updating student info ({})", student_id);
                    let status = match self.sync_student(student_id).await {
                        Ok(SyncOutcome::Synced(_)) => SyncStatus::Synced { touched: 1 },
                        Ok(SyncOutcome::NotFound) => SyncStatus::NotFound,
                        Err(e) => {
                            error!("(sync_students) {} [{}]", student_id, e);
                            failed(&e)
                        }
                    };
                    SyncRecord {
                        student_id: student_id.clone(),
                        semester_id: None,
                        status,
                    }
                })
                .collect();
            records.extend(join_all(futures).await);
        }

        BatchSummary::from_records(records)
    }
}
