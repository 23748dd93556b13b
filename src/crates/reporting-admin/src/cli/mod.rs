//! CLI command implementations
//!
//! Provides command handlers for the reporting-admin binary.

pub mod data;
pub mod deploy;
pub mod integration;
pub mod schema;

use std::io::{self, BufRead, Write};
use std::path::Path;

use reporting::db::{DatabaseConnection, DatabaseError};
use reporting::ServerConfig;

use crate::error::Result;

/// Load the server configuration from `path`, or search the usual locations
pub fn load_config(path: Option<&Path>) -> Result<ServerConfig> {
    let config = match path {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::load()?,
    };
    Ok(config)
}

/// Open the database named by `database_url`
pub async fn connect(database_url: &str) -> Result<DatabaseConnection> {
    let db = DatabaseConnection::new(database_url)
        .await
        .map_err(DatabaseError::from)?;
    tracing::debug!(url = %db.masked_url(), "Connected to database");
    Ok(db)
}

/// Ask for confirmation on stdin unless `assume_yes` is set
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    let stdin = io::stdin();
    let stdout = io::stdout();
    Ok(confirm_with(prompt, &mut stdin.lock(), &mut stdout.lock())?)
}

fn confirm_with<R: BufRead, W: Write>(prompt: &str, input: &mut R, output: &mut W) -> io::Result<bool> {
    write!(output, "{} [y/N]: ", prompt)?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
