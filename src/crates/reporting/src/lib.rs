//! REST backend for the transit test-reporting dashboard
//!
//! This crate provides the HTTP API, SQLite data access, account
//! authentication, bulk and unified result ingestion and dummy-data seeding
//! used by the `reporting-server` and `reporting-admin` binaries.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod ingest;
pub mod seed;
pub mod version;

pub use api::{create_router, AppState};
pub use config::ServerConfig;
pub use db::DatabaseConnection;
