//! Test-type summary CRUD endpoint handlers
//!
//! Summaries have integer IDs; a non-numeric path ID is a 400.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::api::{
    error::{ApiError, ApiResult},
    extract::ApiJson,
    middleware::parse_integer_id,
    models::TestTypeSummaryPayload,
    response,
    routes::AppState,
};
use crate::db::models::NewTestTypeSummary;
use crate::db::repositories::TestTypeSummaryRepository;

/// GET /api/testtypesummary
pub async fn list_summaries(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let summaries = TestTypeSummaryRepository::list(state.db.pool()).await?;
    Ok(response::ok(summaries))
}

/// POST /api/testtypesummary
pub async fn create_summary(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<TestTypeSummaryPayload>,
) -> ApiResult<impl IntoResponse> {
    let record = req.into_record()?;
    let created = TestTypeSummaryRepository::create(state.db.pool(), &record).await?;

    tracing::info!(id = created.id, test_type = %created.test_type, "Test type summary created");
    Ok(response::created("Test type summary created successfully", created))
}

/// GET /api/testtypesummary/:id
pub async fn get_summary(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<impl IntoResponse> {
    let id = parse_integer_id(&id)?;
    let summary = TestTypeSummaryRepository::get_by_id(state.db.pool(), id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Test type summary not found".to_string()))?;
    Ok(response::ok(summary))
}

/// PUT /api/testtypesummary/:id
pub async fn update_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<TestTypeSummaryPayload>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_integer_id(&id)?;
    if !req.has_updates() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }

    let pool = state.db.pool();
    let existing = TestTypeSummaryRepository::get_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Test type summary not found".to_string()))?;
    let mut record = NewTestTypeSummary::from(existing);
    req.apply_to(&mut record);

    let updated = TestTypeSummaryRepository::update(pool, id, &record)
        .await?
        .ok_or_else(|| ApiError::NotFound("Test type summary not found".to_string()))?;

    tracing::info!(id, "Test type summary updated");
    Ok(response::updated("Test type summary updated successfully", updated))
}

/// DELETE /api/testtypesummary/:id
pub async fn delete_summary(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<impl IntoResponse> {
    let id = parse_integer_id(&id)?;
    if !TestTypeSummaryRepository::delete(state.db.pool(), id).await? {
        return Err(ApiError::NotFound("Test type summary not found".to_string()));
    }

    tracing::info!(id, "Test type summary deleted");
    Ok(response::message("Test type summary deleted successfully"))
}
