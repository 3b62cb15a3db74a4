//! Sync-results command implementation.

use drt_core::sync::SyncServiceTrait;

use super::{print_summary, OutputFormat};
use crate::context::AppContext;

/// Syncs every (student, semester) pair, students in the given order.
pub async fn run(
    ctx: &AppContext,
    student_ids: &[String],
    semester_ids: &[String],
    format: OutputFormat,
) -> anyhow::Result<()> {
    let summary = ctx.sync_service.sync_many(student_ids, semester_ids).await;
    print_summary(&summary, format)
}
