//! Field name tables between the internal schema and the remote payloads.
//!
//! Each table lists `(internal_name, remote_name)` pairs. The internal names
//! are the column names of the local store.

use drt_remote::RawRecord;
use serde_json::Value;

/// Student info fields.
pub const STUDENT_INFO_KEY_MAP: [(&str, &str); 8] = [
    ("student_id", "studentId"),
    ("student_name", "studentName"),
    ("campus_name", "campusName"),
    ("batch_no", "batchNo"),
    ("program_short_name", "progShortName"),
    ("department_short_name", "deptShortName"),
    ("faculty_short_name", "facShortName"),
    ("shift", "shift"),
];

/// Semester result line fields.
pub const SEMESTER_RESULT_KEY_MAP: [(&str, &str); 10] = [
    ("semester_id", "semesterId"),
    ("semester_name", "semesterName"),
    ("semester_year", "semesterYear"),
    ("student_id", "studentId"),
    ("course_id", "courseId"),
    ("custom_course_id", "customCourseId"),
    ("course_title", "courseTitle"),
    ("total_credit", "totalCredit"),
    ("point_equivalent", "pointEquivalent"),
    ("grade_letter", "gradeLetter"),
];

/// The two record kinds exchanged with the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    StudentInfo,
    SemesterResult,
}

impl EntityKind {
    pub fn key_map(self) -> &'static [(&'static str, &'static str)] {
        match self {
            EntityKind::StudentInfo => &STUDENT_INFO_KEY_MAP,
            EntityKind::SemesterResult => &SEMESTER_RESULT_KEY_MAP,
        }
    }
}

/// Re-keys a remote record by internal field names.
///
/// Remote keys outside the table are dropped. Internal keys whose remote
/// counterpart is absent map to `null`. Values are copied unchanged.
pub fn map_remote_fields(raw: &RawRecord, kind: EntityKind) -> RawRecord {
    kind.key_map()
        .iter()
        .map(|(internal, remote)| {
            (
                (*internal).to_string(),
                raw.get(*remote).cloned().unwrap_or(Value::Null),
            )
        })
        .collect()
}

/// Inverse of [`map_remote_fields`]: re-keys an internal record by remote names.
pub fn map_internal_fields(internal: &RawRecord, kind: EntityKind) -> RawRecord {
    kind.key_map()
        .iter()
        .map(|(internal_key, remote)| {
            (
                (*remote).to_string(),
                internal.get(*internal_key).cloned().unwrap_or(Value::Null),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        value.as_object().cloned().unwrap()
    }

    fn full_student_payload() -> RawRecord {
        record(json!({
            "studentId": "181-15-955",
            "studentName": "Jane Doe",
            "campusName": "Main Campus",
            "batchNo": 49,
            "progShortName": "B.Sc. in CSE",
            "deptShortName": "CSE",
            "facShortName": "FSIT",
            "shift": "Day"
        }))
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(EntityKind::StudentInfo.key_map().len(), 8);
        assert_eq!(EntityKind::SemesterResult.key_map().len(), 10);
    }

    #[test]
    fn test_map_student_info() {
        let mapped = map_remote_fields(&full_student_payload(), EntityKind::StudentInfo);
        assert_eq!(mapped.len(), 8);
        assert_eq!(mapped["student_id"], "181-15-955");
        assert_eq!(mapped["program_short_name"], "B.Sc. in CSE");
        assert_eq!(mapped["department_short_name"], "CSE");
        assert_eq!(mapped["faculty_short_name"], "FSIT");
        assert_eq!(mapped["batch_no"], 49);
    }

    #[test]
    fn test_unmapped_keys_dropped_and_missing_keys_null() {
        let raw = record(json!({
            "studentId": "181-15-955",
            "photoUrl": "http://example.invalid/p.png"
        }));
        let mapped = map_remote_fields(&raw, EntityKind::StudentInfo);
        assert!(!mapped.contains_key("photoUrl"));
        assert!(!mapped.contains_key("photo_url"));
        assert_eq!(mapped["student_id"], "181-15-955");
        assert!(mapped["student_name"].is_null());
        assert!(mapped["shift"].is_null());
    }

    #[test]
    fn test_empty_payload_maps_to_all_null() {
        let mapped = map_remote_fields(&RawRecord::new(), EntityKind::SemesterResult);
        assert_eq!(mapped.len(), 10);
        assert!(mapped.values().all(Value::is_null));
    }

    #[test]
    fn test_round_trip_recovers_remote_record() {
        let raw = full_student_payload();
        let mapped = map_remote_fields(&raw, EntityKind::StudentInfo);
        let back = map_internal_fields(&mapped, EntityKind::StudentInfo);
        assert_eq!(back, raw);
    }

    #[test]
    fn test_round_trip_semester_result() {
        let raw = record(json!({
            "semesterId": "221",
            "semesterName": "Spring",
            "semesterYear": 2022,
            "studentId": "181-15-955",
            "courseId": "CSE111",
            "customCourseId": "CSE 111",
            "courseTitle": "Computer Fundamentals",
            "totalCredit": 3.0,
            "pointEquivalent": 3.75,
            "gradeLetter": "A"
        }));
        let mapped = map_remote_fields(&raw, EntityKind::SemesterResult);
        assert_eq!(mapped["point_equivalent"], 3.75);
        assert_eq!(map_internal_fields(&mapped, EntityKind::SemesterResult), raw);
    }
}
