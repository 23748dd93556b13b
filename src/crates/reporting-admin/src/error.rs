//! Error types for admin commands

use thiserror::Error;

use reporting::config::ServerConfigError;
use reporting::db::DatabaseError;

pub type Result<T> = std::result::Result<T, AdminError>;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Configuration error: {0}")]
    Config(#[from] ServerConfigError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} deployment check(s) failed")]
    ChecksFailed(usize),

    /// Operation declined at the confirmation prompt
    #[error("Aborted")]
    Aborted,
}

impl From<sqlx::Error> for AdminError {
    fn from(err: sqlx::Error) -> Self {
        AdminError::Database(err.into())
    }
}
