//! Test run API models

use serde::{Deserialize, Serialize};

use super::merge;
use crate::api::middleware::validation::validate_not_empty;
use crate::api::error::ApiResult;
use crate::db::models::TestRun;

/// Test run create/update body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestRunPayload {
    #[serde(alias = "Run_ID", alias = "runId")]
    pub run_id: Option<String>,
    #[serde(alias = "Test_Run_ID", alias = "testRunId")]
    pub test_run_id: Option<String>,
    #[serde(default, alias = "Customer_ID", alias = "customerId", deserialize_with = "super::flexible::opt_i64")]
    pub customer_id: Option<i64>,
    #[serde(alias = "Source_System", alias = "sourceSystem")]
    pub source_system: Option<String>,
    #[serde(default, alias = "Test_Case_ID", alias = "testCaseId", deserialize_with = "super::flexible::opt_id")]
    pub test_case_id: Option<String>,
    #[serde(alias = "Execution_Date", alias = "executionDate")]
    pub execution_date: Option<String>,
    #[serde(alias = "Result")]
    pub result: Option<String>,
    #[serde(
        default,
        alias = "Observed_Time",
        alias = "observedTime",
        alias = "observedTimeMs",
        deserialize_with = "super::flexible::opt_i64"
    )]
    pub observed_time: Option<i64>,
    #[serde(alias = "Executed_By", alias = "executedBy")]
    pub executed_by: Option<String>,
    #[serde(alias = "Remarks")]
    pub remarks: Option<String>,
    #[serde(default, alias = "Artifacts", deserialize_with = "super::flexible::opt_text")]
    pub artifacts: Option<String>,
}

impl TestRunPayload {
    /// Build a new row
    ///
    /// `run_id` is generated when absent, `test_run_id` defaults to the run
    /// ID, `customer_id` to 0 and `source_system` to `manual`.
    pub fn into_record(self) -> ApiResult<TestRun> {
        let mut record = TestRun::new(self.test_case_id);
        if let Some(run_id) = self.run_id {
            validate_not_empty(&run_id, "run_id")?;
            record.run_id = run_id;
        }
        record.test_run_id = self.test_run_id.unwrap_or_else(|| record.run_id.clone());
        if let Some(customer_id) = self.customer_id {
            record.customer_id = customer_id;
        }
        if let Some(source_system) = self.source_system {
            record.source_system = source_system;
        }
        record.execution_date = self.execution_date;
        record.result = self.result;
        record.observed_time = self.observed_time;
        record.executed_by = self.executed_by;
        record.remarks = self.remarks;
        record.artifacts = self.artifacts;
        Ok(record)
    }

    /// Check if any non-key field is being updated
    pub fn has_updates(&self) -> bool {
        self.test_run_id.is_some()
            || self.customer_id.is_some()
            || self.source_system.is_some()
            || self.test_case_id.is_some()
            || self.execution_date.is_some()
            || self.result.is_some()
            || self.observed_time.is_some()
            || self.executed_by.is_some()
            || self.remarks.is_some()
            || self.artifacts.is_some()
    }

    /// Apply the supplied fields to a stored row; the key is never changed
    pub fn apply_to(self, record: &mut TestRun) {
        if let Some(test_run_id) = self.test_run_id {
            record.test_run_id = test_run_id;
        }
        if let Some(customer_id) = self.customer_id {
            record.customer_id = customer_id;
        }
        if let Some(source_system) = self.source_system {
            record.source_system = source_system;
        }
        merge(&mut record.test_case_id, self.test_case_id);
        merge(&mut record.execution_date, self.execution_date);
        merge(&mut record.result, self.result);
        merge(&mut record.observed_time, self.observed_time);
        merge(&mut record.executed_by, self.executed_by);
        merge(&mut record.remarks, self.remarks);
        merge(&mut record.artifacts, self.artifacts);
    }
}

/// Query parameters for GET /api/testruns
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestRunListQuery {
    pub test_run_id: Option<String>,
    pub customer_id: Option<i64>,
    pub source_system: Option<String>,
}

impl TestRunListQuery {
    pub fn matches(&self, run: &TestRun) -> bool {
        self.test_run_id.as_ref().map_or(true, |id| &run.test_run_id == id)
            && self.customer_id.map_or(true, |id| run.customer_id == id)
            && self.source_system.as_ref().map_or(true, |s| &run.source_system == s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::test_run::MANUAL_SOURCE;
    use serde_json::json;

    #[test]
    fn test_defaults_for_manual_runs() {
        let record = TestRunPayload::default().into_record().unwrap();
        assert!(uuid::Uuid::parse_str(&record.run_id).is_ok());
        assert_eq!(record.test_run_id, record.run_id);
        assert_eq!(record.customer_id, 0);
        assert_eq!(record.source_system, MANUAL_SOURCE);
    }

    #[test]
    fn test_runner_payload_shape() {
        let payload: TestRunPayload = serde_json::from_value(json!({
            "runId": "r-1",
            "customerId": "42",
            "sourceSystem": "robot-lab",
            "observedTimeMs": "1200",
            "artifacts": ["log.html"]
        }))
        .unwrap();

        let record = payload.into_record().unwrap();
        assert_eq!(record.run_id, "r-1");
        assert_eq!(record.customer_id, 42);
        assert_eq!(record.observed_time, Some(1200));
        assert_eq!(record.artifacts.as_deref(), Some(r#"["log.html"]"#));
    }

    #[test]
    fn test_list_query_filters() {
        let mut run = TestRunPayload::default().into_record().unwrap();
        run.customer_id = 7;

        let query = TestRunListQuery {
            customer_id: Some(7),
            ..Default::default()
        };
        assert!(query.matches(&run));

        let query = TestRunListQuery {
            source_system: Some("jenkins".into()),
            ..Default::default()
        };
        assert!(!query.matches(&run));
    }
}
