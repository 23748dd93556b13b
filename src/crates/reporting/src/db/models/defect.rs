//! Defect model for database persistence

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A defect raised against a test case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Defect {
    pub defect_id: String,
    pub title: String,

    /// Low, Medium, High
    pub severity: Option<String>,

    /// Open, Closed, In-Progress, Resolved
    pub status: Option<String>,

    pub test_case_id: Option<String>,
    pub reported_by: Option<String>,
    pub created_at: Option<String>,
    pub fixed_at: Option<String>,
}

impl Defect {
    /// Create a defect with a generated identifier
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            defect_id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            severity: None,
            status: None,
            test_case_id: None,
            reported_by: None,
            created_at: Some(chrono::Utc::now().to_rfc3339()),
            fixed_at: None,
        }
    }
}
