//! Database module for the reporting backend
//!
//! Provides database connectivity, models, repositories, maintenance helpers
//! and error handling for the dashboard tables.

pub mod connection;
pub mod error;
pub mod maintenance;
pub mod models;
pub mod repositories;

pub use connection::{DatabaseConnection, DatabasePool, PoolStatistics};
pub use error::{DatabaseError, DbResult};
