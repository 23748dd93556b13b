//! REST API layer
//!
//! HTTP endpoints for the reporting dashboard:
//! - CRUD over requirements, test cases, test runs, defects, summaries and metrics
//! - Bulk and unified result ingestion
//! - Account signup, login and password reset
//! - Health, admin and OpenAPI document

pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;

pub use error::{ApiError, ApiErrorResponse, ApiResult};
pub use routes::{create_router, AppState};
