//! Test case API models

use serde::{Deserialize, Serialize};

use super::{merge, now_rfc3339};
use crate::api::error::ApiResult;
use crate::api::middleware::validation::require_field;
use crate::db::models::TestCase;

/// Test case create/update body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestCasePayload {
    #[serde(default, alias = "Test_Case_ID", alias = "testCaseId", deserialize_with = "super::flexible::opt_id")]
    pub test_case_id: Option<String>,
    #[serde(alias = "Title")]
    pub title: Option<String>,
    #[serde(rename = "type", alias = "Type", alias = "test_type")]
    pub test_type: Option<String>,
    #[serde(alias = "Component")]
    pub component: Option<String>,
    #[serde(default, alias = "Requirement_ID", alias = "requirementId", deserialize_with = "super::flexible::opt_id")]
    pub requirement_id: Option<String>,
    #[serde(alias = "Status")]
    pub status: Option<String>,
    #[serde(alias = "Created_by", alias = "createdBy")]
    pub created_by: Option<String>,
    #[serde(alias = "Created_at", alias = "createdAt")]
    pub created_at: Option<String>,
    #[serde(alias = "PreCondition", alias = "precondition")]
    pub pre_condition: Option<String>,
    #[serde(alias = "Test_Steps", alias = "testSteps")]
    pub test_steps: Option<String>,
    #[serde(alias = "Expected_Result", alias = "expectedResult")]
    pub expected_result: Option<String>,
}

impl TestCasePayload {
    /// Build a new row; `test_case_id` and `title` are required
    pub fn into_record(self) -> ApiResult<TestCase> {
        let test_case_id = require_field(self.test_case_id.as_deref(), "test_case_id")?.to_string();
        let title = require_field(self.title.as_deref(), "title")?.to_string();
        let mut record = TestCase::new(test_case_id, title);
        record.test_type = self.test_type;
        record.component = self.component;
        record.requirement_id = self.requirement_id;
        record.status = self.status;
        record.created_by = self.created_by;
        merge(&mut record.created_at, self.created_at);
        record.pre_condition = self.pre_condition;
        record.test_steps = self.test_steps;
        record.expected_result = self.expected_result;
        Ok(record)
    }

    /// Check if any non-key field is being updated
    pub fn has_updates(&self) -> bool {
        self.title.is_some()
            || self.test_type.is_some()
            || self.component.is_some()
            || self.requirement_id.is_some()
            || self.status.is_some()
            || self.created_by.is_some()
            || self.created_at.is_some()
            || self.pre_condition.is_some()
            || self.test_steps.is_some()
            || self.expected_result.is_some()
    }

    /// Apply the supplied fields to a stored row; the key is never changed
    pub fn apply_to(self, record: &mut TestCase) {
        if let Some(title) = self.title {
            record.title = title;
        }
        merge(&mut record.test_type, self.test_type);
        merge(&mut record.component, self.component);
        merge(&mut record.requirement_id, self.requirement_id);
        merge(&mut record.status, self.status);
        merge(&mut record.created_by, self.created_by);
        merge(&mut record.created_at, self.created_at);
        merge(&mut record.pre_condition, self.pre_condition);
        merge(&mut record.test_steps, self.test_steps);
        merge(&mut record.expected_result, self.expected_result);
        record.uploaded_at = Some(now_rfc3339());
    }
}

/// Query parameters for GET /api/testcases
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestCaseListQuery {
    pub requirement_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dashboard_export_shape() {
        let payload: TestCasePayload = serde_json::from_value(json!({
            "Test_Case_ID": "TC-F-FVM-012-04",
            "Title": "Verify: FVM should accept Cash as payment method.",
            "Type": "Feature",
            "Requirement_ID": "F-FVM-101",
            "PreCondition": "FVM is on and ready to accept input."
        }))
        .unwrap();

        let record = payload.into_record().unwrap();
        assert_eq!(record.test_type.as_deref(), Some("Feature"));
        assert_eq!(record.requirement_id.as_deref(), Some("F-FVM-101"));
        assert!(record.uploaded_at.is_some());
    }

    #[test]
    fn test_type_field_serializes_as_type() {
        let payload = TestCasePayload {
            test_type: Some("Regression".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["type"], "Regression");
    }
}
