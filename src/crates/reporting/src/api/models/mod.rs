//! API request and response models
//!
//! Each entity has one payload type used for create, bulk, ingestion and
//! update requests: create requires the entity's key fields, update applies
//! whatever is present on top of the stored row.

pub mod auth;
pub mod defect;
pub mod flexible;
pub mod health;
pub mod requirement;
pub mod test_case;
pub mod test_run;
pub mod test_type_summary;
pub mod transit_metric;

pub use auth::{
    AuthResponse, ForgotPasswordRequest, ForgotPasswordResponse, LoginRequest, ResetPasswordRequest,
    SignupRequest, UserResponse,
};
pub use defect::DefectPayload;
pub use health::HealthResponse;
pub use requirement::RequirementPayload;
pub use test_case::{TestCaseListQuery, TestCasePayload};
pub use test_run::{TestRunListQuery, TestRunPayload};
pub use test_type_summary::TestTypeSummaryPayload;
pub use transit_metric::TransitMetricPayload;

/// Overwrite `target` only when a new value was supplied
pub(crate) fn merge<T>(target: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *target = value;
    }
}

pub(crate) fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}
