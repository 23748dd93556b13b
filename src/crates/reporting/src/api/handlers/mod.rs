//! API request handlers

pub mod admin;
pub mod auth;
pub mod defects;
pub mod docs;
pub mod health;
pub mod requirements;
pub mod results;
pub mod test_cases;
pub mod test_runs;
pub mod test_type_summary;
pub mod transit_metrics;
