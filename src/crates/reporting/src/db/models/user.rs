//! User model for database persistence

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A dashboard account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub username: String,

    /// bcrypt hash, never serialized
    #[serde(skip_serializing)]
    pub password: String,

    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub country_code: Option<String>,
    pub created_at: String,
}
