//! Test run CRUD endpoint handlers

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::api::{
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiQuery},
    models::{TestRunListQuery, TestRunPayload},
    response,
    routes::AppState,
};
use crate::db::repositories::TestRunRepository;
use crate::ingest::{records, Outcome};

/// List test runs with optional filters
///
/// GET /api/testruns?test_run_id=&customer_id=&source_system=
pub async fn list_test_runs(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<TestRunListQuery>,
) -> ApiResult<impl IntoResponse> {
    let pool = state.db.pool();
    let runs = match (&query.test_run_id, query.customer_id) {
        (Some(test_run_id), _) => TestRunRepository::list_by_test_run_id(pool, test_run_id).await?,
        (None, Some(customer_id)) => TestRunRepository::list_by_customer(pool, customer_id).await?,
        (None, None) => TestRunRepository::list(pool).await?,
    };

    let filtered: Vec<_> = runs.into_iter().filter(|run| query.matches(run)).collect();
    Ok(response::ok(filtered))
}

/// Create a test run
///
/// POST /api/testruns
pub async fn create_test_run(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<TestRunPayload>,
) -> ApiResult<impl IntoResponse> {
    match records::create_test_run(state.db.pool(), req).await? {
        Outcome::Created(created) => Ok(response::created("Test run created successfully", created)),
        Outcome::Duplicate(id) => Err(ApiError::Conflict(format!("Test run {} already exists", id))),
    }
}

/// Get a single test run
///
/// GET /api/testruns/:id
pub async fn get_test_run(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<impl IntoResponse> {
    let run = TestRunRepository::get_by_id(state.db.pool(), &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Test run not found".to_string()))?;
    Ok(response::ok(run))
}

/// Update a test run
///
/// PUT /api/testruns/:id
pub async fn update_test_run(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<TestRunPayload>,
) -> ApiResult<impl IntoResponse> {
    if !req.has_updates() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }

    let pool = state.db.pool();
    let mut run = TestRunRepository::get_by_id(pool, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Test run not found".to_string()))?;
    req.apply_to(&mut run);

    let updated = TestRunRepository::update(pool, &run)
        .await?
        .ok_or_else(|| ApiError::NotFound("Test run not found".to_string()))?;

    tracing::info!(run_id = %id, "Test run updated");
    Ok(response::updated("Test run updated successfully", updated))
}

/// Delete a test run
///
/// DELETE /api/testruns/:id
pub async fn delete_test_run(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<impl IntoResponse> {
    if !TestRunRepository::delete(state.db.pool(), &id).await? {
        return Err(ApiError::NotFound("Test run not found".to_string()));
    }

    tracing::info!(run_id = %id, "Test run deleted");
    Ok(response::message("Test run deleted successfully"))
}
