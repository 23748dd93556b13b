//! Bulk and unified ingestion
//!
//! Every upload path funnels into the per-entity handlers in [`records`]:
//! parse the payload, check whether the key already exists, then insert.
//! Items are processed one after another and a failed item never stops the
//! rest of the batch.

pub mod bulk;
pub mod records;
pub mod results;
pub mod test_runs;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::error::ApiError;
use crate::db::DatabaseError;

pub use bulk::{bulk_insert, BulkError, BulkReport};
pub use records::{ingest_payload, RunDefaults};
pub use results::{ingest_results, ResultsEnvelope};
pub use test_runs::{ingest_test_runs, TestRunEvent, TestRunsEnvelope};

/// Failure of a single ingested item
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Unsupported event kind: {0}")]
    UnsupportedKind(String),

    #[error("Invalid payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// Validation failure raised while building the record
    #[error("{0}")]
    Rejected(#[from] ApiError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<IngestError> for DatabaseError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Database(e) => e.into(),
            other => DatabaseError::Other(other.to_string()),
        }
    }
}

/// Entity targeted by an ingestion event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    Requirement,
    TestCase,
    TestRun,
    Defect,
    TestTypeSummary,
    TransitMetric,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Requirement,
        EntityKind::TestCase,
        EntityKind::TestRun,
        EntityKind::Defect,
        EntityKind::TestTypeSummary,
        EntityKind::TransitMetric,
    ];

    /// Parse an event kind, ignoring case and treating `-` and spaces as `_`
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();

        match normalized.as_str() {
            "REQUIREMENT" => Some(EntityKind::Requirement),
            "TEST_CASE" | "TESTCASE" => Some(EntityKind::TestCase),
            "TEST_RUN" | "TESTRUN" => Some(EntityKind::TestRun),
            "DEFECT" => Some(EntityKind::Defect),
            "TEST_TYPE_SUMMARY" | "SUMMARY" => Some(EntityKind::TestTypeSummary),
            "TRANSIT_METRIC" | "METRIC" => Some(EntityKind::TransitMetric),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Requirement => "REQUIREMENT",
            EntityKind::TestCase => "TEST_CASE",
            EntityKind::TestRun => "TEST_RUN",
            EntityKind::Defect => "DEFECT",
            EntityKind::TestTypeSummary => "TEST_TYPE_SUMMARY",
            EntityKind::TransitMetric => "TRANSIT_METRIC",
        }
    }

    /// Human-readable entity name used in messages
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Requirement => "Requirement",
            EntityKind::TestCase => "Test case",
            EntityKind::TestRun => "Test run",
            EntityKind::Defect => "Defect",
            EntityKind::TestTypeSummary => "Test type summary",
            EntityKind::TransitMetric => "Transit metric",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of an existence check followed by an insert
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Created(T),
    /// The key already exists; carries the conflicting ID
    Duplicate(String),
}

impl<T> Outcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Created(value) => Outcome::Created(f(value)),
            Outcome::Duplicate(id) => Outcome::Duplicate(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Accepted,
    Duplicate,
    Failed,
}

/// Per-event entry of an ingestion summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResult {
    pub index: usize,
    pub kind: String,
    pub status: ItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response body of the results endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestSummary {
    pub accepted: usize,
    pub duplicates: usize,
    pub failed: usize,
    pub items: Vec<ItemResult>,
}

impl IngestSummary {
    /// Record the outcome of event `index`
    pub fn record(&mut self, index: usize, kind: impl Into<String>, result: Result<Outcome<String>, IngestError>) {
        let kind = kind.into();
        let item = match result {
            Ok(Outcome::Created(id)) => {
                self.accepted += 1;
                ItemResult {
                    index,
                    kind,
                    status: ItemStatus::Accepted,
                    id: Some(id),
                    error: None,
                }
            }
            Ok(Outcome::Duplicate(id)) => {
                self.duplicates += 1;
                ItemResult {
                    index,
                    kind,
                    status: ItemStatus::Duplicate,
                    id: Some(id),
                    error: None,
                }
            }
            Err(err) => {
                self.failed += 1;
                ItemResult {
                    index,
                    kind,
                    status: ItemStatus::Failed,
                    id: None,
                    error: Some(err.to_string()),
                }
            }
        };
        self.items.push(item);
    }

    /// True when at least one event produced a new row
    pub fn any_accepted(&self) -> bool {
        self.accepted > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_normalization() {
        assert_eq!(EntityKind::parse("test-run"), Some(EntityKind::TestRun));
        assert_eq!(EntityKind::parse("Test Case"), Some(EntityKind::TestCase));
        assert_eq!(EntityKind::parse("TESTCASE"), Some(EntityKind::TestCase));
        assert_eq!(EntityKind::parse(" summary "), Some(EntityKind::TestTypeSummary));
        assert_eq!(EntityKind::parse("metric"), Some(EntityKind::TransitMetric));
        assert_eq!(EntityKind::parse("BUILD"), None);
    }

    #[test]
    fn test_kind_round_trips_through_canonical_name() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = IngestSummary::default();
        summary.record(0, "DEFECT", Ok(Outcome::Created("D-1".into())));
        summary.record(1, "DEFECT", Ok(Outcome::Duplicate("D-1".into())));
        summary.record(2, "BUILD", Err(IngestError::UnsupportedKind("BUILD".into())));

        assert_eq!((summary.accepted, summary.duplicates, summary.failed), (1, 1, 1));
        assert!(summary.any_accepted());

        let body = serde_json::to_value(&summary).unwrap();
        assert_eq!(body["items"][1]["status"], "duplicate");
        assert_eq!(body["items"][2]["error"], "Unsupported event kind: BUILD");
        assert!(body["items"][2].get("id").is_none());
    }
}
