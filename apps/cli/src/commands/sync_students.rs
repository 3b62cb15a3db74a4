//! Sync-students command implementation.

use drt_core::sync::SyncServiceTrait;

use super::{print_summary, OutputFormat};
use crate::context::AppContext;

/// Refreshes the identity record of every listed student.
pub async fn run(
    ctx: &AppContext,
    student_ids: &[String],
    format: OutputFormat,
) -> anyhow::Result<()> {
    let summary = ctx.sync_service.sync_students(student_ids).await;
    print_summary(&summary, format)
}
