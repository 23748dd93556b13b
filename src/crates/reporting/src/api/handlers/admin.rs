//! Database administration endpoint handlers

use axum::{extract::State, response::IntoResponse};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

use crate::api::{error::ApiResult, response, routes::AppState};
use crate::db::maintenance;
use crate::seed;

const DATABASE_TYPE: &str = "SQLite";

/// GET /admin/db-info
pub async fn db_info(State(state): State<AppState>) -> impl IntoResponse {
    response::ok(json!({
        "status": "success",
        "database_type": DATABASE_TYPE,
        "connection_string": state.db.masked_url(),
        "pool": state.db.get_pool_statistics(),
    }))
}

/// GET /admin/db-test
pub async fn db_test(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let version = state.db.sqlite_version().await?;
    Ok(response::ok(json!({
        "status": "success",
        "database_type": DATABASE_TYPE,
        "version": version,
    })))
}

/// GET /admin/schema-info
pub async fn schema_info(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let pool = state.db.pool();
    let tables = maintenance::list_tables(pool).await?;
    let users_schema = if tables.iter().any(|t| t == "users") {
        maintenance::table_columns(pool, "users").await?
    } else {
        Vec::new()
    };

    Ok(response::ok(json!({
        "status": "success",
        "users_schema": users_schema,
        "all_tables": tables,
    })))
}

/// POST /admin/generate-data
pub async fn generate_data(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let mut rng = StdRng::from_entropy();
    let report = seed::generate(state.db.pool(), &mut rng).await?;

    tracing::info!(inserted = report.total_inserted(), skipped = report.total_skipped(), "Test data generated");
    Ok(response::ok(json!({
        "status": "success",
        "message": "Test data generated successfully",
        "report": report,
    })))
}

/// POST /admin/reset-db
pub async fn reset_db(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    maintenance::reset(&state.db).await?;

    tracing::warn!("Database schema reset");
    Ok(response::ok(json!({
        "status": "success",
        "message": "Database schema reset successfully",
    })))
}

/// POST /admin/delete-db
pub async fn delete_db(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let deleted = maintenance::clear_all(state.db.pool()).await?;

    tracing::warn!(deleted, "All data deleted");
    Ok(response::ok(json!({
        "status": "success",
        "message": "All data deleted successfully",
        "rows_deleted": deleted,
    })))
}
