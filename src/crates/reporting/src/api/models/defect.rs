//! Defect API models

use serde::{Deserialize, Serialize};

use super::merge;
use crate::api::error::ApiResult;
use crate::api::middleware::validation::{require_field, validate_not_empty};
use crate::db::models::Defect;

/// Defect create/update body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefectPayload {
    #[serde(default, alias = "DefectID", alias = "Defect_ID", alias = "defectId", deserialize_with = "super::flexible::opt_id")]
    pub defect_id: Option<String>,
    #[serde(alias = "Title")]
    pub title: Option<String>,
    #[serde(alias = "Severity")]
    pub severity: Option<String>,
    #[serde(alias = "Status")]
    pub status: Option<String>,
    #[serde(default, alias = "Test_Case_ID", alias = "testCaseId", deserialize_with = "super::flexible::opt_id")]
    pub test_case_id: Option<String>,
    #[serde(alias = "Reported_By", alias = "reportedBy")]
    pub reported_by: Option<String>,
    #[serde(alias = "Created_At", alias = "createdAt")]
    pub created_at: Option<String>,
    #[serde(alias = "Fixed_At", alias = "fixedAt")]
    pub fixed_at: Option<String>,
}

impl DefectPayload {
    /// Build a new row; `title` is required and `defect_id` generated when absent
    pub fn into_record(self) -> ApiResult<Defect> {
        let title = require_field(self.title.as_deref(), "title")?.to_string();
        let mut record = Defect::new(title);
        if let Some(defect_id) = self.defect_id {
            validate_not_empty(&defect_id, "defect_id")?;
            record.defect_id = defect_id;
        }
        record.severity = self.severity;
        record.status = self.status;
        record.test_case_id = self.test_case_id;
        record.reported_by = self.reported_by;
        merge(&mut record.created_at, self.created_at);
        record.fixed_at = self.fixed_at;
        Ok(record)
    }

    /// Check if any non-key field is being updated
    pub fn has_updates(&self) -> bool {
        self.title.is_some()
            || self.severity.is_some()
            || self.status.is_some()
            || self.test_case_id.is_some()
            || self.reported_by.is_some()
            || self.created_at.is_some()
            || self.fixed_at.is_some()
    }

    /// Apply the supplied fields to a stored row; the key is never changed
    pub fn apply_to(self, record: &mut Defect) {
        if let Some(title) = self.title {
            record.title = title;
        }
        merge(&mut record.severity, self.severity);
        merge(&mut record.status, self.status);
        merge(&mut record.test_case_id, self.test_case_id);
        merge(&mut record.reported_by, self.reported_by);
        merge(&mut record.created_at, self.created_at);
        merge(&mut record.fixed_at, self.fixed_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generated_defect_id() {
        let payload: DefectPayload = serde_json::from_value(json!({
            "Title": "Card Tap Not registered",
            "Test_Case_ID": "TC-F-GATE-READER-001-02"
        }))
        .unwrap();

        let record = payload.into_record().unwrap();
        assert!(uuid::Uuid::parse_str(&record.defect_id).is_ok());
        assert_eq!(record.test_case_id.as_deref(), Some("TC-F-GATE-READER-001-02"));
    }

    #[test]
    fn test_supplied_defect_id_is_kept() {
        let payload: DefectPayload =
            serde_json::from_value(json!({"DefectID": "RT-00042", "title": "Receipt Not Printed"})).unwrap();
        assert_eq!(payload.into_record().unwrap().defect_id, "RT-00042");
    }
}
