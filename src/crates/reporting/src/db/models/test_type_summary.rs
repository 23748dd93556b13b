//! Test-type summary model for database persistence

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Expected vs. actual value of one metric for one kind of test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TestTypeSummary {
    pub id: i64,

    /// e.g. `Load Test - Gate Readers`
    pub test_type: String,

    /// e.g. `Average Response Time`
    pub metrics: String,

    pub expected: Option<String>,
    pub actual: Option<String>,
    pub status: Option<String>,
    pub test_date: Option<String>,
}

/// Column values for inserting or rewriting a summary row
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewTestTypeSummary {
    pub test_type: String,
    pub metrics: String,
    pub expected: Option<String>,
    pub actual: Option<String>,
    pub status: Option<String>,
    pub test_date: Option<String>,
}

impl From<TestTypeSummary> for NewTestTypeSummary {
    fn from(summary: TestTypeSummary) -> Self {
        Self {
            test_type: summary.test_type,
            metrics: summary.metrics,
            expected: summary.expected,
            actual: summary.actual,
            status: summary.status,
            test_date: summary.test_date,
        }
    }
}
