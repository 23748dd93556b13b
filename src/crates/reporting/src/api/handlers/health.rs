//! Health check endpoint handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::api::{error::ApiResult, models::HealthResponse, response, routes::AppState};
use crate::db::maintenance;

/// Handler for GET /health, /api/health and /api/v1/health
///
/// Returns 503 when the database does not answer `SELECT 1`.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let health = match state.db.health_check().await {
        Ok(()) => HealthResponse::new(true),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            HealthResponse::new(false)
        }
    };

    let status = if health.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(health))
}

/// Handler for GET /api/startup
///
/// Liveness only; the database is not touched.
pub async fn startup() -> impl IntoResponse {
    response::ok(json!({
        "status": "success",
        "message": "Reporting server is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Handler for GET /api/test-db
///
/// Runs `SELECT 1`, then a user insert that is rolled back.
pub async fn test_db(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    if let Err(e) = state.db.health_check().await {
        tracing::warn!(error = %e, "Database connection test failed");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "database_connection": "failed",
                "user_creation": "failed",
                "error": e.to_string(),
            })),
        );
    }

    match maintenance::check_user_insert(state.db.pool()).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "database_connection": "working",
                "user_creation": "success",
            })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "User creation test failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "database_connection": "working",
                    "user_creation": "failed",
                    "error": e.to_string(),
                })),
            )
        }
    }
}

/// Handler for GET /api/check-schema
pub async fn check_schema(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let pool = state.db.pool();
    if !maintenance::table_exists(pool, "users").await? {
        return Ok((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "status": "error",
                "users_table_exists": false,
                "message": "Users table does not exist",
            })),
        ));
    }

    let columns = maintenance::table_columns(pool, "users").await?;
    Ok((
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "users_table_exists": true,
            "columns": columns,
        })),
    ))
}
