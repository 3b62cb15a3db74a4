//! Translation of remote payloads into the internal schema.

mod key_maps;

pub use key_maps::{
    map_internal_fields, map_remote_fields, EntityKind, SEMESTER_RESULT_KEY_MAP,
    STUDENT_INFO_KEY_MAP,
};

use drt_remote::{RawRecord, RemoteError};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::semester_results::SemesterResultInfo;
use crate::students::StudentInfo;
use crate::Result;

fn parse_record<T: DeserializeOwned>(raw: &RawRecord, kind: EntityKind) -> Result<T> {
    let mapped = map_remote_fields(raw, kind);
    serde_json::from_value(Value::Object(mapped)).map_err(|e| {
        RemoteError::MalformedPayload(format!("{:?} payload: {}", kind, e)).into()
    })
}

/// Maps a raw student info payload into a typed record.
pub fn parse_student_info(raw: &RawRecord) -> Result<StudentInfo> {
    parse_record(raw, EntityKind::StudentInfo)
}

/// Maps a raw semester result payload into typed lines, preserving order.
pub fn parse_semester_result(raws: &[RawRecord]) -> Result<Vec<SemesterResultInfo>> {
    raws.iter()
        .map(|raw| parse_record(raw, EntityKind::SemesterResult))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use serde_json::json;

    #[test]
    fn test_parse_student_info() {
        let raw = json!({
            "studentId": "181-15-955",
            "studentName": "Jane Doe",
            "batchNo": 49,
            "shift": "Day"
        });
        let info = parse_student_info(raw.as_object().unwrap()).unwrap();
        assert_eq!(info.student_id.as_deref(), Some("181-15-955"));
        assert_eq!(info.batch_no, Some(49));
        assert_eq!(info.campus_name, None);
    }

    #[test]
    fn test_parse_student_info_not_found_payload() {
        let info = parse_student_info(&RawRecord::new()).unwrap();
        assert!(!info.is_found());
    }

    #[test]
    fn test_parse_malformed_is_transport_failure() {
        let raw = json!({ "studentId": "181-15-955", "batchNo": [1, 2] });
        let err = parse_student_info(raw.as_object().unwrap()).unwrap_err();
        assert!(err.is_transport());
        assert!(matches!(err, Error::Remote(RemoteError::MalformedPayload(_))));
    }

    #[test]
    fn test_parse_semester_result_preserves_order() {
        let raws: Vec<RawRecord> = ["CSE113", "CSE111", "CSE112"]
            .iter()
            .map(|course| {
                json!({ "semesterId": "221", "courseId": course })
                    .as_object()
                    .cloned()
                    .unwrap()
            })
            .collect();
        let lines = parse_semester_result(&raws).unwrap();
        let courses: Vec<_> = lines
            .iter()
            .map(|l| l.course_id.as_deref().unwrap())
            .collect();
        assert_eq!(courses, vec!["CSE113", "CSE111", "CSE112"]);
    }
}
