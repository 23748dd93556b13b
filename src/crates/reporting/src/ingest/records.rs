//! Per-entity ingestion handlers
//!
//! Each `create_*` function validates a payload, checks for an existing row
//! with the same key and inserts. A unique-constraint failure on insert is
//! reported as a duplicate as well, since another writer may have inserted
//! the key between the check and the insert.

use serde_json::Value;
use sqlx::error::ErrorKind;
use tracing::{info, warn};

use super::{EntityKind, IngestError, Outcome};
use crate::api::models::{
    DefectPayload, RequirementPayload, TestCasePayload, TestRunPayload, TestTypeSummaryPayload, TransitMetricPayload,
};
use crate::db::models::{Defect, Requirement, TestCase, TestRun, TestTypeSummary, TransitMetric};
use crate::db::repositories::{
    DefectRepository, RequirementRepository, TestCaseRepository, TestRunRepository, TestTypeSummaryRepository,
    TransitMetricRepository,
};
use crate::db::DatabasePool;

/// Test-run fields supplied by a batch envelope
#[derive(Debug, Clone, Default)]
pub struct RunDefaults {
    pub customer_id: Option<i64>,
    pub source_system: Option<String>,
    pub test_run_id: Option<String>,
}

impl RunDefaults {
    /// Fill fields the payload left empty
    pub fn fill(&self, payload: &mut TestRunPayload) {
        if payload.customer_id.is_none() {
            payload.customer_id = self.customer_id;
        }
        if payload.source_system.is_none() {
            payload.source_system = self.source_system.clone();
        }
        if payload.test_run_id.is_none() {
            payload.test_run_id = self.test_run_id.clone();
        }
    }
}

/// Parse `payload` as the create request for `kind` and insert it
///
/// Returns the ID of the created row or of the existing duplicate.
pub async fn ingest_payload(
    pool: &DatabasePool,
    kind: EntityKind,
    payload: Value,
    defaults: &RunDefaults,
) -> Result<Outcome<String>, IngestError> {
    match kind {
        EntityKind::Requirement => {
            let payload: RequirementPayload = serde_json::from_value(payload)?;
            Ok(create_requirement(pool, payload).await?.map(|r| r.requirement_id))
        }
        EntityKind::TestCase => {
            let payload: TestCasePayload = serde_json::from_value(payload)?;
            Ok(create_test_case(pool, payload).await?.map(|tc| tc.test_case_id))
        }
        EntityKind::TestRun => {
            let mut payload: TestRunPayload = serde_json::from_value(payload)?;
            defaults.fill(&mut payload);
            Ok(create_test_run(pool, payload).await?.map(|run| run.run_id))
        }
        EntityKind::Defect => {
            let payload: DefectPayload = serde_json::from_value(payload)?;
            Ok(create_defect(pool, payload).await?.map(|d| d.defect_id))
        }
        EntityKind::TestTypeSummary => {
            let payload: TestTypeSummaryPayload = serde_json::from_value(payload)?;
            Ok(create_test_type_summary(pool, payload).await?.map(|s| s.id.to_string()))
        }
        EntityKind::TransitMetric => {
            let payload: TransitMetricPayload = serde_json::from_value(payload)?;
            Ok(create_transit_metric(pool, payload).await?.map(|m| m.id.to_string()))
        }
    }
}

pub async fn create_requirement(
    pool: &DatabasePool,
    payload: RequirementPayload,
) -> Result<Outcome<Requirement>, IngestError> {
    let record = payload.into_record()?;
    if RequirementRepository::exists(pool, &record.requirement_id).await? {
        warn!(requirement_id = %record.requirement_id, "Duplicate requirement skipped");
        return Ok(Outcome::Duplicate(record.requirement_id));
    }

    insert(record.requirement_id.clone(), RequirementRepository::create(pool, &record).await).map(|outcome| {
        if let Outcome::Created(created) = &outcome {
            info!(requirement_id = %created.requirement_id, "Requirement created");
        }
        outcome
    })
}

pub async fn create_test_case(pool: &DatabasePool, payload: TestCasePayload) -> Result<Outcome<TestCase>, IngestError> {
    let record = payload.into_record()?;
    if TestCaseRepository::exists(pool, &record.test_case_id).await? {
        warn!(test_case_id = %record.test_case_id, "Duplicate test case skipped");
        return Ok(Outcome::Duplicate(record.test_case_id));
    }
    if let Some(requirement_id) = &record.requirement_id {
        if !RequirementRepository::exists(pool, requirement_id).await? {
            warn!(
                test_case_id = %record.test_case_id,
                requirement_id = %requirement_id,
                "Test case references unknown requirement"
            );
        }
    }

    insert(record.test_case_id.clone(), TestCaseRepository::create(pool, &record).await).map(|outcome| {
        if let Outcome::Created(created) = &outcome {
            info!(test_case_id = %created.test_case_id, "Test case created");
        }
        outcome
    })
}

pub async fn create_test_run(pool: &DatabasePool, payload: TestRunPayload) -> Result<Outcome<TestRun>, IngestError> {
    let record = payload.into_record()?;
    if TestRunRepository::exists(pool, &record.run_id).await? {
        warn!(run_id = %record.run_id, "Duplicate test run skipped");
        return Ok(Outcome::Duplicate(record.run_id));
    }
    warn_unknown_test_case(pool, record.test_case_id.as_deref(), "Test run").await?;

    insert(record.run_id.clone(), TestRunRepository::create(pool, &record).await).map(|outcome| {
        if let Outcome::Created(created) = &outcome {
            info!(
                run_id = %created.run_id,
                test_run_id = %created.test_run_id,
                source_system = %created.source_system,
                "Test run created"
            );
        }
        outcome
    })
}

pub async fn create_defect(pool: &DatabasePool, payload: DefectPayload) -> Result<Outcome<Defect>, IngestError> {
    let record = payload.into_record()?;
    if DefectRepository::exists(pool, &record.defect_id).await? {
        warn!(defect_id = %record.defect_id, "Duplicate defect skipped");
        return Ok(Outcome::Duplicate(record.defect_id));
    }
    warn_unknown_test_case(pool, record.test_case_id.as_deref(), "Defect").await?;

    insert(record.defect_id.clone(), DefectRepository::create(pool, &record).await).map(|outcome| {
        if let Outcome::Created(created) = &outcome {
            info!(defect_id = %created.defect_id, "Defect created");
        }
        outcome
    })
}

/// Summaries are keyed by `(test_type, metrics, test_date)`
pub async fn create_test_type_summary(
    pool: &DatabasePool,
    payload: TestTypeSummaryPayload,
) -> Result<Outcome<TestTypeSummary>, IngestError> {
    let record = payload.into_record()?;
    let existing =
        TestTypeSummaryRepository::find_duplicate(pool, &record.test_type, &record.metrics, record.test_date.as_deref())
            .await?;
    if let Some(existing) = existing {
        warn!(id = existing.id, test_type = %record.test_type, metrics = %record.metrics, "Duplicate test type summary skipped");
        return Ok(Outcome::Duplicate(existing.id.to_string()));
    }

    let created = TestTypeSummaryRepository::create(pool, &record).await?;
    info!(id = created.id, test_type = %created.test_type, "Test type summary created");
    Ok(Outcome::Created(created))
}

/// Daily metrics are keyed by `date`
pub async fn create_transit_metric(
    pool: &DatabasePool,
    payload: TransitMetricPayload,
) -> Result<Outcome<TransitMetric>, IngestError> {
    let record = payload.into_record()?;
    if let Some(existing) = TransitMetricRepository::get_by_date(pool, &record.date).await? {
        warn!(id = existing.id, date = %record.date, "Duplicate transit metric skipped");
        return Ok(Outcome::Duplicate(existing.id.to_string()));
    }

    let created = TransitMetricRepository::create(pool, &record).await?;
    info!(id = created.id, date = %created.date, "Transit metric created");
    Ok(Outcome::Created(created))
}

async fn warn_unknown_test_case(pool: &DatabasePool, test_case_id: Option<&str>, entity: &str) -> Result<(), sqlx::Error> {
    if let Some(test_case_id) = test_case_id {
        if !TestCaseRepository::exists(pool, test_case_id).await? {
            warn!(test_case_id = %test_case_id, "{} references unknown test case", entity);
        }
    }
    Ok(())
}

fn insert<T>(id: String, result: Result<T, sqlx::Error>) -> Result<Outcome<T>, IngestError> {
    match result {
        Ok(created) => Ok(Outcome::Created(created)),
        Err(err) if is_unique_violation(&err) => {
            warn!(id = %id, "Insert hit an existing key");
            Ok(Outcome::Duplicate(id))
        }
        Err(err) => Err(err.into()),
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.kind() == ErrorKind::UniqueViolation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DatabaseConnection;
    use serde_json::json;

    #[tokio::test]
    async fn test_requirement_duplicate_detected() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let payload = json!({"requirement_id": "F-FVM-101", "title": "Purchase card"});

        let first = ingest_payload(conn.pool(), EntityKind::Requirement, payload.clone(), &RunDefaults::default())
            .await
            .unwrap();
        assert_eq!(first, Outcome::Created("F-FVM-101".to_string()));

        let second = ingest_payload(conn.pool(), EntityKind::Requirement, payload, &RunDefaults::default())
            .await
            .unwrap();
        assert_eq!(second, Outcome::Duplicate("F-FVM-101".to_string()));
        assert_eq!(RequirementRepository::count(conn.pool()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_dangling_reference_is_accepted() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let payload = json!({"Test_Case_ID": "TC-1", "Title": "Tap card", "Requirement_ID": "MISSING"});

        let outcome = ingest_payload(conn.pool(), EntityKind::TestCase, payload, &RunDefaults::default())
            .await
            .unwrap();
        assert!(matches!(outcome, Outcome::Created(_)));

        let stored = TestCaseRepository::get_by_id(conn.pool(), "TC-1").await.unwrap().unwrap();
        assert_eq!(stored.requirement_id.as_deref(), Some("MISSING"));
    }

    #[tokio::test]
    async fn test_run_defaults_fill_missing_fields() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let defaults = RunDefaults {
            customer_id: Some(12),
            source_system: Some("robot-lab".into()),
            test_run_id: Some("nightly-42".into()),
        };

        let outcome = ingest_payload(conn.pool(), EntityKind::TestRun, json!({"result": "Pass", "customerId": 3}), &defaults)
            .await
            .unwrap();
        let Outcome::Created(run_id) = outcome else {
            panic!("expected a created run");
        };

        let run = TestRunRepository::get_by_id(conn.pool(), &run_id).await.unwrap().unwrap();
        assert_eq!(run.customer_id, 3);
        assert_eq!(run.source_system, "robot-lab");
        assert_eq!(run.test_run_id, "nightly-42");
    }

    #[tokio::test]
    async fn test_summary_natural_key_duplicate() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let payload = json!({"Test_Type": "Performance", "Metrics": "Avg. Transaction Time"});

        let first = ingest_payload(conn.pool(), EntityKind::TestTypeSummary, payload.clone(), &RunDefaults::default())
            .await
            .unwrap();
        let second = ingest_payload(conn.pool(), EntityKind::TestTypeSummary, payload, &RunDefaults::default())
            .await
            .unwrap();

        let Outcome::Created(id) = first else {
            panic!("expected a created summary");
        };
        assert_eq!(second, Outcome::Duplicate(id));
    }

    #[tokio::test]
    async fn test_metric_date_duplicate() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let payload = json!({"Date": "2025-03-14", "Gate_Taps": 100});

        ingest_payload(conn.pool(), EntityKind::TransitMetric, payload.clone(), &RunDefaults::default())
            .await
            .unwrap();
        let second = ingest_payload(conn.pool(), EntityKind::TransitMetric, payload, &RunDefaults::default())
            .await
            .unwrap();
        assert!(matches!(second, Outcome::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_validation_failure_is_rejected() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let err = ingest_payload(conn.pool(), EntityKind::Defect, json!({"severity": "High"}), &RunDefaults::default())
            .await
            .unwrap_err();
        assert!(matches!(err, IngestError::Rejected(_)));
        assert_eq!(err.to_string(), "title is required");
    }
}
