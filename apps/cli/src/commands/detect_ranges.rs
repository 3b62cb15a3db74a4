//! Detect-ranges command implementation.

use anyhow::bail;
use serde::Serialize;

use drt_core::probe::IdentifierRange;
use drt_core::sync::{BatchSummary, SyncServiceTrait};

use super::{print_summary, OutputFormat};
use crate::context::AppContext;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DetectReport<'a> {
    semester_code: &'a str,
    dept_code: &'a str,
    ranges: &'a [IdentifierRange],
    #[serde(skip_serializing_if = "Option::is_none")]
    sync: Option<&'a BatchSummary>,
}

/// Probes `first..=last` and optionally syncs every discovered student for
/// `sync_semesters`.
pub async fn run(
    ctx: &AppContext,
    semester_code: &str,
    dept_code: &str,
    first: u32,
    last: u32,
    sync_semesters: &[String],
    format: OutputFormat,
) -> anyhow::Result<()> {
    if first > last {
        bail!("empty candidate range {}..={}", first, last);
    }
    let candidates: Vec<u32> = (first..=last).collect();
    let ranges = ctx
        .range_prober
        .probe_range(semester_code, dept_code, &candidates)
        .await?;

    let summary = if sync_semesters.is_empty() {
        None
    } else {
        let student_ids: Vec<String> = ranges
            .iter()
            .flat_map(|range| range.student_ids(semester_code, dept_code))
            .collect();
        tracing::info!(
            "Syncing {} discovered students for {} semesters",
            student_ids.len(),
            sync_semesters.len()
        );
        Some(ctx.sync_service.sync_many(&student_ids, sync_semesters).await)
    };

    if format == OutputFormat::Json {
        let report = DetectReport {
            semester_code,
            dept_code,
            ranges: &ranges,
            sync: summary.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if ranges.is_empty() {
        println!("no students found in {}..={}", first, last);
    }
    for range in &ranges {
        println!(
            "{}-{}-{} .. {}-{}-{} ({} students)",
            semester_code, dept_code, range.first, semester_code, dept_code, range.last,
            range.len()
        );
    }
    if let Some(summary) = &summary {
        print_summary(summary, format)?;
    }
    Ok(())
}
