//! Requirement model for database persistence

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A product requirement that test cases are written against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Requirement {
    /// Requirement identifier, e.g. `F-FVM-101`
    pub requirement_id: String,

    /// Short title
    pub title: String,

    /// Longer description
    pub description: Option<String>,

    /// Device or subsystem: FVM, Gate Reader, Bus Reader, ALL
    pub component: Option<String>,

    /// Low, Medium, High
    pub priority: Option<String>,

    /// Lifecycle status (Accepted, In Review, Done, ...)
    pub status: Option<String>,

    /// Linked JIRA ticket
    pub jira_id: Option<String>,

    /// Creation timestamp
    pub created_at: String,
}

impl Requirement {
    /// Create a requirement with only the required fields set
    pub fn new(requirement_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            requirement_id: requirement_id.into(),
            title: title.into(),
            description: None,
            component: None,
            priority: None,
            status: None,
            jira_id: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
