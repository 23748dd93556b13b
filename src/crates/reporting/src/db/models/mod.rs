//! Database models
//!
//! One struct per table. Timestamps are kept as TEXT: server-generated values
//! are RFC 3339, client-supplied values are stored as sent.

pub mod defect;
pub mod requirement;
pub mod test_case;
pub mod test_run;
pub mod test_type_summary;
pub mod transit_metric;
pub mod user;

pub use defect::Defect;
pub use requirement::Requirement;
pub use test_case::{TestCase, TestCaseWithDescription};
pub use test_run::TestRun;
pub use test_type_summary::{NewTestTypeSummary, TestTypeSummary};
pub use transit_metric::{NewTransitMetric, TransitMetric};
pub use user::User;
