//! Requirement API models

use serde::{Deserialize, Serialize};

use super::merge;
use crate::api::error::ApiResult;
use crate::api::middleware::validation::require_field;
use crate::db::models::Requirement;

/// Requirement create/update body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequirementPayload {
    #[serde(default, alias = "Requirement_ID", alias = "requirementId", deserialize_with = "super::flexible::opt_id")]
    pub requirement_id: Option<String>,
    #[serde(alias = "Title")]
    pub title: Option<String>,
    #[serde(alias = "Description")]
    pub description: Option<String>,
    #[serde(alias = "Component")]
    pub component: Option<String>,
    #[serde(alias = "Priority")]
    pub priority: Option<String>,
    #[serde(alias = "Status")]
    pub status: Option<String>,
    #[serde(alias = "Jira_ID", alias = "jiraId")]
    pub jira_id: Option<String>,
    #[serde(alias = "Created_at", alias = "createdAt")]
    pub created_at: Option<String>,
}

impl RequirementPayload {
    /// Build a new row; `requirement_id` and `title` are required
    pub fn into_record(self) -> ApiResult<Requirement> {
        let requirement_id = require_field(self.requirement_id.as_deref(), "requirement_id")?.to_string();
        let title = require_field(self.title.as_deref(), "title")?.to_string();
        let mut record = Requirement::new(requirement_id, title);
        record.description = self.description;
        record.component = self.component;
        record.priority = self.priority;
        record.status = self.status;
        record.jira_id = self.jira_id;
        if let Some(created_at) = self.created_at {
            record.created_at = created_at;
        }
        Ok(record)
    }

    /// Check if any non-key field is being updated
    pub fn has_updates(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || self.component.is_some()
            || self.priority.is_some()
            || self.status.is_some()
            || self.jira_id.is_some()
            || self.created_at.is_some()
    }

    /// Apply the supplied fields to a stored row; the key is never changed
    pub fn apply_to(self, record: &mut Requirement) {
        if let Some(title) = self.title {
            record.title = title;
        }
        merge(&mut record.description, self.description);
        merge(&mut record.component, self.component);
        merge(&mut record.priority, self.priority);
        merge(&mut record.status, self.status);
        merge(&mut record.jira_id, self.jira_id);
        if let Some(created_at) = self.created_at {
            record.created_at = created_at;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_legacy_field_names() {
        let payload: RequirementPayload = serde_json::from_value(json!({
            "Requirement_ID": "F-FVM-101",
            "Title": "Purchase TransitCard using FVM",
            "Priority": "High"
        }))
        .unwrap();

        let record = payload.into_record().unwrap();
        assert_eq!(record.requirement_id, "F-FVM-101");
        assert_eq!(record.priority.as_deref(), Some("High"));
        assert!(!record.created_at.is_empty());
    }

    #[test]
    fn test_missing_title_is_rejected() {
        let payload = RequirementPayload {
            requirement_id: Some("F-FVM-101".into()),
            ..Default::default()
        };
        assert_eq!(payload.into_record().unwrap_err().to_string(), "title is required");
    }

    #[test]
    fn test_apply_keeps_unsupplied_fields() {
        let mut record = Requirement::new("F-GATE-202", "Reject invalid card");
        record.status = Some("In Review".into());

        let update = RequirementPayload {
            status: Some("Done".into()),
            requirement_id: Some("OTHER".into()),
            ..Default::default()
        };
        assert!(update.has_updates());
        update.apply_to(&mut record);

        assert_eq!(record.requirement_id, "F-GATE-202");
        assert_eq!(record.title, "Reject invalid card");
        assert_eq!(record.status.as_deref(), Some("Done"));
        assert!(!RequirementPayload::default().has_updates());
    }
}
