//! Test-type summary API models

use serde::{Deserialize, Serialize};

use super::merge;
use crate::api::error::ApiResult;
use crate::api::middleware::validation::require_field;
use crate::db::models::NewTestTypeSummary;

/// Summary create/update body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestTypeSummaryPayload {
    #[serde(alias = "Test_Type", alias = "testType")]
    pub test_type: Option<String>,
    #[serde(alias = "Metrics")]
    pub metrics: Option<String>,
    #[serde(alias = "Expected")]
    pub expected: Option<String>,
    #[serde(alias = "Actual")]
    pub actual: Option<String>,
    #[serde(alias = "Status")]
    pub status: Option<String>,
    #[serde(alias = "Test_Date", alias = "testDate")]
    pub test_date: Option<String>,
}

impl TestTypeSummaryPayload {
    /// Build new column values; `test_type` and `metrics` are required
    pub fn into_record(self) -> ApiResult<NewTestTypeSummary> {
        Ok(NewTestTypeSummary {
            test_type: require_field(self.test_type.as_deref(), "test_type")?.to_string(),
            metrics: require_field(self.metrics.as_deref(), "metrics")?.to_string(),
            expected: self.expected,
            actual: self.actual,
            status: self.status,
            test_date: self.test_date,
        })
    }

    pub fn has_updates(&self) -> bool {
        self.test_type.is_some()
            || self.metrics.is_some()
            || self.expected.is_some()
            || self.actual.is_some()
            || self.status.is_some()
            || self.test_date.is_some()
    }

    pub fn apply_to(self, record: &mut NewTestTypeSummary) {
        if let Some(test_type) = self.test_type {
            record.test_type = test_type;
        }
        if let Some(metrics) = self.metrics {
            record.metrics = metrics;
        }
        merge(&mut record.expected, self.expected);
        merge(&mut record.actual, self.actual);
        merge(&mut record.status, self.status);
        merge(&mut record.test_date, self.test_date);
    }
}
