//! API route definitions
//!
//! Data, ingestion and admin write routes sit behind the security
//! middleware. Auth, health, admin info and docs routes are always reachable.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers;
use crate::api::middleware::{cors_layer, logging_layer};
use crate::auth::AuthService;
use crate::config::{security_middleware, SecurityState, ServerConfig};
use crate::db::DatabaseConnection;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<ServerConfig>,
    pub auth: AuthService,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: ServerConfig) -> Self {
        let auth = AuthService::new(&config.auth);
        Self {
            db,
            config: Arc::new(config),
            auth,
        }
    }
}

/// CRUD and bulk routes for the six entities
fn data_routes() -> Router<AppState> {
    use handlers::{defects, requirements, results, test_cases, test_runs, test_type_summary, transit_metrics};

    Router::new()
        // Requirements
        .route(
            "/api/requirements",
            get(requirements::list_requirements).post(requirements::create_requirement),
        )
        .route("/api/requirements/bulk", post(results::bulk_requirements))
        .route(
            "/api/requirements/:id",
            get(requirements::get_requirement)
                .put(requirements::update_requirement)
                .delete(requirements::delete_requirement),
        )
        // Test cases
        .route(
            "/api/testcases",
            get(test_cases::list_test_cases).post(test_cases::create_test_case),
        )
        .route("/api/testcases/bulk", post(results::bulk_test_cases))
        .route(
            "/api/testcases/with-descriptions",
            get(test_cases::list_test_cases_with_descriptions),
        )
        .route(
            "/api/testcases/:id",
            get(test_cases::get_test_case)
                .put(test_cases::update_test_case)
                .delete(test_cases::delete_test_case),
        )
        // Test runs
        .route(
            "/api/testruns",
            get(test_runs::list_test_runs).post(test_runs::create_test_run),
        )
        .route("/api/testruns/bulk", post(results::bulk_test_runs))
        .route(
            "/api/testruns/:id",
            get(test_runs::get_test_run)
                .put(test_runs::update_test_run)
                .delete(test_runs::delete_test_run),
        )
        // Defects
        .route("/api/defects", get(defects::list_defects).post(defects::create_defect))
        .route("/api/defects/bulk", post(results::bulk_defects))
        .route(
            "/api/defects/:id",
            get(defects::get_defect)
                .put(defects::update_defect)
                .delete(defects::delete_defect),
        )
        // Test type summaries
        .route(
            "/api/testtypesummary",
            get(test_type_summary::list_summaries).post(test_type_summary::create_summary),
        )
        .route("/api/testtypesummary/bulk", post(results::bulk_summaries))
        .route(
            "/api/testtypesummary/:id",
            get(test_type_summary::get_summary)
                .put(test_type_summary::update_summary)
                .delete(test_type_summary::delete_summary),
        )
        // Transit metrics
        .route(
            "/api/transitmetricsdaily",
            get(transit_metrics::list_metrics).post(transit_metrics::create_metric),
        )
        .route("/api/transitmetricsdaily/bulk", post(results::bulk_metrics))
        .route(
            "/api/transitmetricsdaily/:id",
            get(transit_metrics::get_metric)
                .put(transit_metrics::update_metric)
                .delete(transit_metrics::delete_metric),
        )
        // Unified ingestion
        .route("/api/v1/results", post(results::post_results))
        .route(
            "/api/v1/results/test-runs",
            get(results::list_test_runs).post(results::post_test_runs),
        )
        .route("/api/v1/results/test-runs/:test_run_id", get(results::get_test_run_group))
        .route(
            "/api/v1/results/customers/:customer_id/test-runs",
            get(results::list_customer_test_runs),
        )
}

/// Admin routes that write to or drop the database
fn admin_write_routes() -> Router<AppState> {
    use handlers::admin;

    Router::new()
        .route("/admin/generate-data", post(admin::generate_data))
        .route("/admin/reset-db", post(admin::reset_db))
        .route("/admin/delete-db", post(admin::delete_db))
}

/// Auth, health, admin info and docs routes
fn open_routes() -> Router<AppState> {
    use handlers::{admin, auth, docs, health};

    Router::new()
        // Health
        .route("/health", get(health::health))
        .route("/api/health", get(health::health))
        .route("/api/v1/health", get(health::health))
        .route("/api/startup", get(health::startup))
        .route("/api/check-schema", get(health::check_schema))
        .route("/api/test-db", get(health::test_db))
        // Auth
        .route("/api/signup", post(auth::signup))
        .route("/api/login", post(auth::login))
        .route("/api/me", get(auth::me))
        .route("/api/forgot-password", post(auth::forgot_password))
        .route("/api/reset-password", post(auth::reset_password))
        // Admin
        .route("/admin/db-info", get(admin::db_info))
        .route("/admin/db-test", get(admin::db_test))
        .route("/admin/schema-info", get(admin::schema_info))
        // Docs
        .route("/static/swagger.json", get(docs::swagger))
}

/// Build the complete API router
pub fn create_router(state: AppState) -> Router {
    let security = SecurityState::new(state.config.security.clone(), state.auth.tokens().clone());
    let cors = cors_layer(&state.config.cors);

    let gated = data_routes()
        .merge(admin_write_routes())
        .route_layer(middleware::from_fn_with_state(security, security_middleware));

    Router::new()
        .merge(open_routes())
        .merge(gated)
        .with_state(state)
        .layer(cors)
        .layer(logging_layer())
}
