//! Test case model for database persistence

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A structured test case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TestCase {
    /// Test case identifier, e.g. `TC-F-FVM-012-04`
    pub test_case_id: String,

    pub title: String,

    /// Feature, Regression, ...
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub test_type: Option<String>,

    pub component: Option<String>,

    /// Requirement this case covers. Not enforced against `requirements`.
    pub requirement_id: Option<String>,

    pub status: Option<String>,
    pub created_by: Option<String>,
    pub created_at: Option<String>,
    pub pre_condition: Option<String>,
    pub test_steps: Option<String>,
    pub expected_result: Option<String>,

    /// When the case was recorded by this service
    pub uploaded_at: Option<String>,
}

impl TestCase {
    /// Create a test case with only the required fields set
    pub fn new(test_case_id: impl Into<String>, title: impl Into<String>) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            test_case_id: test_case_id.into(),
            title: title.into(),
            test_type: None,
            component: None,
            requirement_id: None,
            status: None,
            created_by: None,
            created_at: Some(now.clone()),
            pre_condition: None,
            test_steps: None,
            expected_result: None,
            uploaded_at: Some(now),
        }
    }
}

/// Test case joined with the description of its requirement
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TestCaseWithDescription {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub test_case: TestCase,

    /// `requirements.description`, absent when the reference dangles
    pub requirement_description: Option<String>,
}
