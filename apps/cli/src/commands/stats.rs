//! Stats command implementation.

use serde::Serialize;

use drt_core::semester_results::{SemesterResult, SemesterResultRepositoryTrait};
use drt_core::students::{Student, StudentRepositoryTrait};

use super::OutputFormat;
use crate::context::AppContext;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsReport {
    students: i64,
    semester_results: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    student_list: Option<Vec<Student>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<Vec<SemesterResult>>,
}

/// Prints stored row counts. On request also lists the stored students, or
/// one student's stored lines.
pub fn run(
    ctx: &AppContext,
    list_students: bool,
    student_id: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let student_list = if list_students {
        Some(ctx.student_repository.list()?)
    } else {
        None
    };
    let results = match student_id {
        Some(id) => Some(ctx.result_repository.list_by_student(id)?),
        None => None,
    };
    let report = StatsReport {
        students: ctx.student_repository.count()?,
        semester_results: ctx.result_repository.count()?,
        student_list,
        results,
    };

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("students: {}", report.students);
    println!("semester results: {}", report.semester_results);
    for student in report.student_list.iter().flatten() {
        println!(
            "{:<14} {:<30} {:<6} {}",
            student.student_id,
            student.student_name.as_deref().unwrap_or("-"),
            student.department_short_name.as_deref().unwrap_or("-"),
            student.batch_no.map(|b| b.to_string()).unwrap_or_default(),
        );
    }
    for line in report.results.iter().flatten() {
        println!(
            "{:<8} {:<10} {:<40} {:>5} {:>5} {}",
            line.semester_id,
            line.course_id,
            line.course_title.as_deref().unwrap_or("-"),
            line.total_credit.map(|d| d.to_string()).unwrap_or_default(),
            line.point_equivalent.map(|d| d.to_string()).unwrap_or_default(),
            line.grade_letter.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}
