//! Database repositories
//!
//! Data-access functions for each table. Repositories are stateless; every
//! function takes the pool it runs against.

pub mod defect_repo;
pub mod requirement_repo;
pub mod test_case_repo;
pub mod test_run_repo;
pub mod test_type_summary_repo;
pub mod transit_metric_repo;
pub mod user_repo;

pub use defect_repo::DefectRepository;
pub use requirement_repo::RequirementRepository;
pub use test_case_repo::TestCaseRepository;
pub use test_run_repo::TestRunRepository;
pub use test_type_summary_repo::TestTypeSummaryRepository;
pub use transit_metric_repo::TransitMetricRepository;
pub use user_repo::UserRepository;
