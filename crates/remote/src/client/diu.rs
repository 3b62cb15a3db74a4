//! DIU result service client.
//!
//! Endpoints:
//! - `GET /result/studentInfo?studentId=…` returns one JSON object
//! - `GET /result?studentId=…&semesterId=…` returns a JSON array of objects
//!
//! The service answers unknown students with an object whose `studentId` is
//! null, and semesters without courses with an empty array. Some deployments
//! answer with an empty body or a bare `null` instead; both are read as the
//! same "nothing there" signal.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde_json::Value;

use crate::client::ResultLookupClient;
use crate::errors::RemoteError;
use crate::models::RawRecord;

/// Public result server of Daffodil International University.
pub const DEFAULT_BASE_URL: &str = "http://software.diu.edu.bd:8189";
const CLIENT_ID: &str = "DIU";

const STUDENT_INFO_ENDPOINT: &str = "/result/studentInfo";
const SEMESTER_RESULT_ENDPOINT: &str = "/result";

/// Connection settings for [`DiuResultClient`].
#[derive(Debug, Clone)]
pub struct DiuClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for DiuClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP client for the DIU result service.
pub struct DiuResultClient {
    client: Client,
    base_url: String,
}

impl DiuResultClient {
    /// Create a new client with the given settings.
    pub fn new(config: DiuClientConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!(
                    "{} client builder failed, falling back to defaults without the {:?} timeout: {}",
                    CLIENT_ID, config.timeout, e
                );
                Client::new()
            });

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Make a GET request and return the response body.
    async fn fetch(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<String, RemoteError> {
        let url = format!("{}{}", self.base_url, endpoint);

        debug!("{} request: {} {:?}", CLIENT_ID, endpoint, params);

        let response = self
            .client
            .get(&url)
            .header("Content-Type", "application/json")
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RemoteError::Timeout {
                        client: CLIENT_ID.to_string(),
                    }
                } else {
                    RemoteError::Network(e)
                }
            })?;

        let status = response.status();
        debug!("{} response: {} {}", CLIENT_ID, endpoint, status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::HttpStatus {
                client: CLIENT_ID.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }
}

impl Default for DiuResultClient {
    fn default() -> Self {
        Self::new(DiuClientConfig::default())
    }
}

#[async_trait]
impl ResultLookupClient for DiuResultClient {
    fn id(&self) -> &'static str {
        CLIENT_ID
    }

    async fn fetch_student_info(&self, student_id: &str) -> Result<RawRecord, RemoteError> {
        let body = self
            .fetch(STUDENT_INFO_ENDPOINT, &[("studentId", student_id)])
            .await?;
        parse_student_info_body(&body)
    }

    async fn fetch_semester_result(
        &self,
        student_id: &str,
        semester_id: &str,
    ) -> Result<Vec<RawRecord>, RemoteError> {
        let body = self
            .fetch(
                SEMESTER_RESULT_ENDPOINT,
                &[("studentId", student_id), ("semesterId", semester_id)],
            )
            .await?;
        parse_semester_result_body(&body)
    }
}

fn parse_body(body: &str) -> Result<Value, RemoteError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| RemoteError::MalformedPayload(e.to_string()))
}

/// Interpret a `studentInfo` response body.
pub fn parse_student_info_body(body: &str) -> Result<RawRecord, RemoteError> {
    match parse_body(body)? {
        Value::Null => Ok(RawRecord::new()),
        Value::Object(record) => Ok(record),
        other => Err(RemoteError::MalformedPayload(format!(
            "expected a student info object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Interpret a semester `result` response body.
pub fn parse_semester_result_body(body: &str) -> Result<Vec<RawRecord>, RemoteError> {
    match parse_body(body)? {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(record) => Ok(record),
                other => Err(RemoteError::MalformedPayload(format!(
                    "result line {} is {}, expected an object",
                    index,
                    json_kind(&other)
                ))),
            })
            .collect(),
        other => Err(RemoteError::MalformedPayload(format!(
            "expected a list of result lines, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id() {
        let client = DiuResultClient::default();
        assert_eq!(client.id(), "DIU");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = DiuResultClient::new(DiuClientConfig {
            base_url: "http://localhost:8189/".to_string(),
            timeout: Duration::from_secs(1),
        });
        assert_eq!(client.base_url, "http://localhost:8189");
    }

    #[tokio::test]
    async fn test_configured_timeout_applies() {
        // Accepted by the kernel backlog, never answered.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let client = DiuResultClient::new(DiuClientConfig {
            base_url: format!("http://{}", addr),
            timeout: Duration::from_millis(200),
        });

        let err = client.fetch_student_info("181-15-955").await.unwrap_err();
        assert!(err.is_timeout(), "unexpected error: {}", err);
        drop(listener);
    }

    #[test]
    fn test_default_config() {
        let config = DiuClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_student_info_body_parsing() {
        let body = r#"{
            "studentId": "181-15-955",
            "studentName": "Jane Doe",
            "campusName": "Main Campus",
            "batchNo": 49,
            "progShortName": "B.Sc. in CSE",
            "deptShortName": "CSE",
            "facShortName": "FSIT",
            "shift": "Day"
        }"#;
        let record = parse_student_info_body(body).unwrap();
        assert_eq!(record.len(), 8);
        assert_eq!(record["studentId"], "181-15-955");
        assert_eq!(record["batchNo"], 49);
    }

    #[test]
    fn test_student_info_unknown_student() {
        let record = parse_student_info_body(r#"{"studentId": null, "studentName": null}"#).unwrap();
        assert!(record["studentId"].is_null());

        assert!(parse_student_info_body("").unwrap().is_empty());
        assert!(parse_student_info_body("null").unwrap().is_empty());
    }

    #[test]
    fn test_student_info_rejects_non_object() {
        let err = parse_student_info_body("[1, 2]").unwrap_err();
        assert!(matches!(err, RemoteError::MalformedPayload(_)));

        let err = parse_student_info_body("<html>").unwrap_err();
        assert!(matches!(err, RemoteError::MalformedPayload(_)));
    }

    #[test]
    fn test_semester_result_body_parsing() {
        let body = r#"[
            {"semesterId": "221", "courseId": "CSE111", "totalCredit": 3.0},
            {"semesterId": "221", "courseId": "CSE112", "totalCredit": 1.0}
        ]"#;
        let lines = parse_semester_result_body(body).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["courseId"], "CSE111");
        assert_eq!(lines[1]["courseId"], "CSE112");
    }

    #[test]
    fn test_semester_result_empty() {
        assert!(parse_semester_result_body("[]").unwrap().is_empty());
        assert!(parse_semester_result_body("  ").unwrap().is_empty());
        assert!(parse_semester_result_body("null").unwrap().is_empty());
    }

    #[test]
    fn test_semester_result_rejects_bad_shapes() {
        let err = parse_semester_result_body(r#"{"courseId": "CSE111"}"#).unwrap_err();
        assert!(err.to_string().contains("expected a list"));

        let err = parse_semester_result_body(r#"[{"courseId": "CSE111"}, 7]"#).unwrap_err();
        assert!(err.to_string().contains("result line 1 is a number"));
    }
}
