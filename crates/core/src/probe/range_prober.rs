use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use drt_remote::ResultLookupClient;

use crate::errors::Result;
use crate::mapping::parse_student_info;

/// Builds the identifier probed for one sequence number, e.g. `181-15-955`.
pub fn build_student_id(semester_code: &str, dept_code: &str, sequence: u32) -> String {
    format!("{}-{}-{}", semester_code, dept_code, sequence)
}

/// Inclusive run of sequence numbers confirmed to exist remotely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierRange {
    pub first: u32,
    pub last: u32,
}

impl IdentifierRange {
    pub fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }

    /// Number of sequence numbers spanned.
    pub fn len(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            self.last - self.first + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.last < self.first
    }

    pub fn contains(&self, sequence: u32) -> bool {
        (self.first..=self.last).contains(&sequence)
    }

    /// Full identifiers for every sequence number in the run.
    pub fn student_ids(&self, semester_code: &str, dept_code: &str) -> Vec<String> {
        (self.first..=self.last)
            .map(|n| build_student_id(semester_code, dept_code, n))
            .collect()
    }
}

impl fmt::Display for IdentifierRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.first, self.last)
    }
}

/// Probes candidate identifiers with read-only lookups. Nothing is stored.
pub struct RangeProber {
    client: Arc<dyn ResultLookupClient>,
}

impl RangeProber {
    pub fn new(client: Arc<dyn ResultLookupClient>) -> Self {
        Self { client }
    }

    /// Returns true if the remote service knows `student_id`.
    pub async fn exists(&self, student_id: &str) -> Result<bool> {
        let raw = self.client.fetch_student_info(student_id).await?;
        Ok(parse_student_info(&raw)?.is_found())
    }

    /// Walks `candidates` in the given order and returns the maximal runs of
    /// consecutive hits.
    ///
    /// A run only grows by `last + 1`. A miss closes it, and so does a hit that
    /// does not directly follow it (a gap or a step backwards), which starts a
    /// new run instead. Every number inside an emitted range was looked up and
    /// found. A transport failure aborts
    /// the whole probe: an unreachable identifier is never reported as absent.
    pub async fn probe_range(
        &self,
        semester_code: &str,
        dept_code: &str,
        candidates: &[u32],
    ) -> Result<Vec<IdentifierRange>> {
        let mut ranges = Vec::new();
        let mut open: Option<IdentifierRange> = None;

        for &sequence in candidates {
            let student_id = build_student_id(semester_code, dept_code, sequence);
            let hit = self.exists(&student_id).await?;
            debug!("(probe_range) {} [{}]", student_id, if hit { "hit" } else { "miss" });

            open = match (open, hit) {
                (Some(run), true) if run.last.checked_add(1) == Some(sequence) => {
                    Some(IdentifierRange::new(run.first, sequence))
                }
                (Some(run), true) => {
                    ranges.push(run);
                    Some(IdentifierRange::new(sequence, sequence))
                }
                (None, true) => Some(IdentifierRange::new(sequence, sequence)),
                (Some(run), false) => {
                    ranges.push(run);
                    None
                }
                (None, false) => None,
            };
        }
        ranges.extend(open);

        info!(
            "Detect range for {}-{} over {} candidates -- result: [{}]",
            semester_code,
            dept_code,
            candidates.len(),
            ranges
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(ranges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use drt_remote::{RawRecord, RemoteError};
    use serde_json::json;
    use std::collections::HashSet;
    use std::sync::Mutex;

    struct MockClient {
        existing: HashSet<String>,
        unreachable: Option<String>,
        calls: Mutex<Vec<String>>,
    }

    impl MockClient {
        fn new(sequences: &[u32]) -> Self {
            Self {
                existing: sequences
                    .iter()
                    .map(|n| build_student_id("181", "15", *n))
                    .collect(),
                unreachable: None,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ResultLookupClient for MockClient {
        fn id(&self) -> &'static str {
            "mock"
        }

        async fn fetch_student_info(
            &self,
            student_id: &str,
        ) -> std::result::Result<RawRecord, RemoteError> {
            self.calls.lock().unwrap().push(student_id.to_string());
            if self.unreachable.as_deref() == Some(student_id) {
                return Err(RemoteError::Timeout {
                    client: "mock".to_string(),
                });
            }
            if self.existing.contains(student_id) {
                Ok(json!({ "studentId": student_id, "studentName": "Someone" })
                    .as_object()
                    .cloned()
                    .unwrap())
            } else {
                Ok(json!({ "studentId": null }).as_object().cloned().unwrap())
            }
        }

        async fn fetch_semester_result(
            &self,
            _student_id: &str,
            _semester_id: &str,
        ) -> std::result::Result<Vec<RawRecord>, RemoteError> {
            unimplemented!()
        }
    }

    fn candidates(range: std::ops::RangeInclusive<u32>) -> Vec<u32> {
        range.collect()
    }

    #[test]
    fn test_build_student_id() {
        assert_eq!(build_student_id("181", "15", 955), "181-15-955");
    }

    #[test]
    fn test_range_helpers() {
        let range = IdentifierRange::new(3, 5);
        assert_eq!(range.len(), 3);
        assert!(range.contains(3) && range.contains(5));
        assert!(!range.contains(6));
        assert_eq!(
            range.student_ids("181", "15"),
            vec!["181-15-3", "181-15-4", "181-15-5"]
        );
        assert_eq!(range.to_string(), "3..=5");
    }

    #[tokio::test]
    async fn test_probe_range_emits_maximal_runs() {
        let client = Arc::new(MockClient::new(&[3, 4, 5, 8]));
        let prober = RangeProber::new(client.clone());

        let ranges = prober
            .probe_range("181", "15", &candidates(1..=10))
            .await
            .unwrap();

        assert_eq!(
            ranges,
            vec![IdentifierRange::new(3, 5), IdentifierRange::new(8, 8)]
        );
        assert_eq!(client.calls.lock().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_probe_range_trailing_run_and_no_hits() {
        let prober = RangeProber::new(Arc::new(MockClient::new(&[9, 10])));
        let ranges = prober
            .probe_range("181", "15", &candidates(1..=10))
            .await
            .unwrap();
        assert_eq!(ranges, vec![IdentifierRange::new(9, 10)]);

        let prober = RangeProber::new(Arc::new(MockClient::new(&[])));
        let ranges = prober
            .probe_range("181", "15", &candidates(1..=10))
            .await
            .unwrap();
        assert!(ranges.is_empty());
    }

    #[tokio::test]
    async fn test_gap_in_candidates_splits_runs() {
        let client = Arc::new(MockClient::new(&[1, 2, 3, 4, 5, 6]));
        let prober = RangeProber::new(client.clone());

        let ranges = prober
            .probe_range("181", "15", &[1, 2, 5, 6])
            .await
            .unwrap();

        assert_eq!(
            ranges,
            vec![IdentifierRange::new(1, 2), IdentifierRange::new(5, 6)]
        );
        assert!(!ranges.iter().any(|r| r.contains(3) || r.contains(4)));
        assert_eq!(client.calls.lock().unwrap().len(), 4);

        let ids: Vec<String> = ranges
            .iter()
            .flat_map(|r| r.student_ids("181", "15"))
            .collect();
        assert_eq!(ids, vec!["181-15-1", "181-15-2", "181-15-5", "181-15-6"]);
    }

    #[tokio::test]
    async fn test_descending_candidates_keep_every_hit() {
        let prober = RangeProber::new(Arc::new(MockClient::new(&[3, 4, 5])));

        let ranges = prober
            .probe_range("181", "15", &[5, 4, 3])
            .await
            .unwrap();

        assert_eq!(
            ranges,
            vec![
                IdentifierRange::new(5, 5),
                IdentifierRange::new(4, 4),
                IdentifierRange::new(3, 3),
            ]
        );
        assert!(ranges.iter().all(|r| !r.is_empty() && r.len() == 1));
    }

    #[tokio::test]
    async fn test_probe_range_empty_candidates() {
        let client = Arc::new(MockClient::new(&[1]));
        let prober = RangeProber::new(client.clone());
        let ranges = prober.probe_range("181", "15", &[]).await.unwrap();
        assert!(ranges.is_empty());
        assert!(client.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_probe_range_aborts_on_transport_failure() {
        let mut client = MockClient::new(&[3, 4, 5]);
        client.unreachable = Some(build_student_id("181", "15", 4));
        let client = Arc::new(client);
        let prober = RangeProber::new(client.clone());

        let err = prober
            .probe_range("181", "15", &candidates(1..=10))
            .await
            .unwrap_err();

        assert!(err.is_transport());
        assert_eq!(client.calls.lock().unwrap().len(), 4);
    }
}
