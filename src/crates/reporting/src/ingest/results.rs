//! Unified results ingestion: `{customerId, sourceSystem, events:[{kind, payload}]}`

use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::records::{ingest_payload, RunDefaults};
use super::{EntityKind, IngestError, IngestSummary};
use crate::db::DatabasePool;

/// Batch envelope shared by every event
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsEnvelope {
    #[serde(default, alias = "customer_id", deserialize_with = "crate::api::models::flexible::opt_i64")]
    pub customer_id: Option<i64>,
    #[serde(alias = "source_system")]
    pub source_system: Option<String>,
    #[serde(alias = "test_run_id")]
    pub test_run_id: Option<String>,
    /// Raw events; each is parsed on its own so one bad event cannot reject the batch
    #[serde(default)]
    pub events: Vec<Value>,
}

impl ResultsEnvelope {
    pub fn run_defaults(&self) -> RunDefaults {
        RunDefaults {
            customer_id: self.customer_id,
            source_system: self.source_system.clone(),
            test_run_id: self.test_run_id.clone(),
        }
    }
}

/// Process every event in order and summarize the outcomes
pub async fn ingest_results(pool: &DatabasePool, envelope: ResultsEnvelope) -> IngestSummary {
    let defaults = envelope.run_defaults();
    let mut summary = IngestSummary::default();

    for (index, event) in envelope.events.into_iter().enumerate() {
        let raw_kind = event
            .get("kind")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        match EntityKind::parse(&raw_kind) {
            Some(kind) => {
                let payload = event_payload(event);
                let result = ingest_payload(pool, kind, payload, &defaults).await;
                summary.record(index, kind.as_str(), result);
            }
            None => summary.record(index, raw_kind.clone(), Err(IngestError::UnsupportedKind(raw_kind))),
        }
    }

    info!(
        source_system = envelope.source_system.as_deref().unwrap_or("unknown"),
        accepted = summary.accepted,
        duplicates = summary.duplicates,
        failed = summary.failed,
        "Results batch processed"
    );
    summary
}

/// The event's `payload`, or the event itself without `kind` when absent
fn event_payload(event: Value) -> Value {
    match event {
        Value::Object(mut map) => match map.remove("payload") {
            Some(payload) => payload,
            None => {
                map.remove("kind");
                Value::Object(map)
            }
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::TestRunRepository;
    use crate::db::DatabaseConnection;
    use crate::ingest::ItemStatus;
    use serde_json::json;

    fn envelope(value: Value) -> ResultsEnvelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_event_payload_fallback() {
        assert_eq!(
            event_payload(json!({"kind": "DEFECT", "payload": {"title": "x"}})),
            json!({"title": "x"})
        );
        assert_eq!(event_payload(json!({"kind": "DEFECT", "title": "x"})), json!({"title": "x"}));
    }

    #[tokio::test]
    async fn test_mixed_batch() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let body = envelope(json!({
            "customerId": 12345,
            "sourceSystem": "CRM",
            "events": [
                {"kind": "requirement", "payload": {"requirement_id": "F-FVM-101", "title": "Buy card"}},
                {"kind": "REQUIREMENT", "payload": {"requirement_id": "F-FVM-101", "title": "Buy card"}},
                {"kind": "test-run", "payload": {"result": "Pass"}},
                {"kind": "BUILD", "payload": {}},
                {"kind": "DEFECT", "payload": {"severity": "Low"}}
            ]
        }));

        let summary = ingest_results(conn.pool(), body).await;
        assert_eq!(summary.accepted, 2);
        assert_eq!(summary.duplicates, 1);
        assert_eq!(summary.failed, 2);

        let statuses: Vec<ItemStatus> = summary.items.iter().map(|item| item.status).collect();
        assert_eq!(
            statuses,
            vec![
                ItemStatus::Accepted,
                ItemStatus::Duplicate,
                ItemStatus::Accepted,
                ItemStatus::Failed,
                ItemStatus::Failed
            ]
        );
        assert_eq!(summary.items[2].kind, "TEST_RUN");
        assert_eq!(summary.items[3].kind, "BUILD");

        let runs = TestRunRepository::list_by_customer(conn.pool(), 12345).await.unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].source_system, "CRM");
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let summary = ingest_results(conn.pool(), ResultsEnvelope::default()).await;
        assert!(!summary.any_accepted());
        assert!(summary.items.is_empty());
    }
}
