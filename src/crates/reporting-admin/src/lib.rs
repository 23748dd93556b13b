//! Operational tooling for the reporting backend
//!
//! Command handlers behind the `reporting-admin` binary: schema inspection,
//! seeding, clearing, integration statistics and deployment checks.

pub mod cli;
pub mod error;

pub use error::{AdminError, Result};
