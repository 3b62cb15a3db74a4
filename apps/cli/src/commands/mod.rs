//! CLI command implementations.

pub mod detect_ranges;
pub mod stats;
pub mod sync_results;
pub mod sync_students;

use clap::ValueEnum;
use drt_core::sync::{BatchSummary, SyncStatus};

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Prints one line per operation followed by the aggregate counts.
pub fn print_summary(summary: &BatchSummary, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    for record in &summary.records {
        let target = match &record.semester_id {
            Some(semester_id) => format!("{} {}", record.student_id, semester_id),
            None => record.student_id.clone(),
        };
        let status = match &record.status {
            SyncStatus::Synced { touched } => format!("synced ({} rows)", touched),
            SyncStatus::NotFound => "not found".to_string(),
            SyncStatus::Failed {
                message,
                transport: true,
            } => format!("unreachable: {}", message),
            SyncStatus::Failed { message, .. } => format!("failed: {}", message),
        };
        println!("{:<24} {}", target, status);
    }

    let (success_count, not_found_count) = summary.counts();
    println!(
        "success: {}, not found: {}, failed: {}",
        success_count, not_found_count, summary.failure_count
    );
    Ok(())
}
