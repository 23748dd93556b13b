//! Test-run results posted by external runners
//!
//! Each event names its test case inline. A test case that is not stored yet
//! is registered from the event when it carries a title.

use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::records::{create_test_run, RunDefaults};
use super::{EntityKind, IngestError, IngestSummary, Outcome};
use crate::api::models::TestRunPayload;
use crate::db::models::TestCase;
use crate::db::repositories::TestCaseRepository;
use crate::db::DatabasePool;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRunsEnvelope {
    #[serde(default, deserialize_with = "crate::api::models::flexible::opt_i64")]
    pub customer_id: Option<i64>,
    pub test_run_id: Option<String>,
    pub source_system: Option<String>,
    #[serde(default)]
    pub events: Vec<Value>,
}

/// Inline test case reference
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestCaseRef {
    #[serde(default, deserialize_with = "crate::api::models::flexible::opt_id")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub component: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRunEvent {
    pub kind: Option<String>,
    pub test_case: Option<TestCaseRef>,
    pub run_id: Option<String>,
    pub result: Option<String>,
    pub executed_by: Option<String>,
    pub execution_date: Option<String>,
    #[serde(default, deserialize_with = "crate::api::models::flexible::opt_i64")]
    pub observed_time_ms: Option<i64>,
    pub remarks: Option<String>,
    #[serde(default, deserialize_with = "crate::api::models::flexible::opt_text")]
    pub artifacts: Option<String>,
}

impl TestRunEvent {
    fn into_payload(self, defaults: &RunDefaults) -> TestRunPayload {
        let mut payload = TestRunPayload {
            run_id: self.run_id,
            test_case_id: self.test_case.and_then(|tc| tc.id),
            execution_date: self.execution_date,
            result: self.result,
            observed_time: self.observed_time_ms,
            executed_by: self.executed_by,
            remarks: self.remarks,
            artifacts: self.artifacts,
            ..Default::default()
        };
        defaults.fill(&mut payload);
        payload
    }
}

/// Process test-run events in order and summarize the outcomes
pub async fn ingest_test_runs(pool: &DatabasePool, envelope: TestRunsEnvelope) -> IngestSummary {
    let defaults = RunDefaults {
        customer_id: envelope.customer_id,
        source_system: envelope.source_system.clone(),
        test_run_id: envelope.test_run_id.clone(),
    };
    let mut summary = IngestSummary::default();

    for (index, event) in envelope.events.into_iter().enumerate() {
        let result = ingest_event(pool, event, &defaults).await;
        summary.record(index, EntityKind::TestRun.as_str(), result);
    }

    info!(
        test_run_id = envelope.test_run_id.as_deref().unwrap_or("-"),
        accepted = summary.accepted,
        duplicates = summary.duplicates,
        failed = summary.failed,
        "Test-run batch processed"
    );
    summary
}

async fn ingest_event(pool: &DatabasePool, event: Value, defaults: &RunDefaults) -> Result<Outcome<String>, IngestError> {
    let event: TestRunEvent = serde_json::from_value(event)?;
    if let Some(kind) = &event.kind {
        if EntityKind::parse(kind) != Some(EntityKind::TestRun) {
            return Err(IngestError::UnsupportedKind(kind.clone()));
        }
    }

    if let Some(test_case) = &event.test_case {
        register_test_case(pool, test_case).await?;
    }

    let payload = event.into_payload(defaults);
    Ok(create_test_run(pool, payload).await?.map(|run| run.run_id))
}

async fn register_test_case(pool: &DatabasePool, test_case: &TestCaseRef) -> Result<(), sqlx::Error> {
    let (Some(id), Some(title)) = (&test_case.id, &test_case.title) else {
        return Ok(());
    };
    if TestCaseRepository::exists(pool, id).await? {
        return Ok(());
    }

    let mut record = TestCase::new(id.clone(), title.clone());
    record.component = test_case.component.clone();
    TestCaseRepository::create(pool, &record).await?;
    info!(test_case_id = %id, "Test case registered from test-run event");
    Ok(())
}
