//! Test run model for database persistence

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Source system recorded for runs entered through the CRUD API
pub const MANUAL_SOURCE: &str = "manual";

/// One execution of a test case
///
/// `run_id` identifies the row; `test_run_id` groups the rows uploaded
/// together by an external system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TestRun {
    pub run_id: String,
    pub test_run_id: String,
    pub customer_id: i64,
    pub source_system: String,
    pub test_case_id: Option<String>,
    pub execution_date: Option<String>,

    /// Pass or Fail
    pub result: Option<String>,

    /// Observed execution time in milliseconds
    pub observed_time: Option<i64>,

    pub executed_by: Option<String>,
    pub remarks: Option<String>,

    /// Artifact references (JSON array string when uploaded by a runner)
    pub artifacts: Option<String>,
}

impl TestRun {
    /// Create a manual run with a generated identifier
    pub fn new(test_case_id: Option<String>) -> Self {
        let run_id = uuid::Uuid::new_v4().to_string();
        Self {
            test_run_id: run_id.clone(),
            run_id,
            customer_id: 0,
            source_system: MANUAL_SOURCE.to_string(),
            test_case_id,
            execution_date: None,
            result: None,
            observed_time: None,
            executed_by: None,
            remarks: None,
            artifacts: None,
        }
    }
}
