//! Test case CRUD endpoint handlers

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::api::{
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiQuery},
    models::{TestCaseListQuery, TestCasePayload},
    response,
    routes::AppState,
};
use crate::db::repositories::TestCaseRepository;
use crate::ingest::{records, Outcome};

/// List test cases, optionally for one requirement
///
/// GET /api/testcases?requirement_id=
pub async fn list_test_cases(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<TestCaseListQuery>,
) -> ApiResult<impl IntoResponse> {
    let pool = state.db.pool();
    let test_cases = match query.requirement_id.as_deref() {
        Some(requirement_id) => TestCaseRepository::list_by_requirement(pool, requirement_id).await?,
        None => TestCaseRepository::list(pool).await?,
    };
    Ok(response::ok(test_cases))
}

/// List test cases joined with their requirement's description
///
/// GET /api/testcases/with-descriptions
pub async fn list_test_cases_with_descriptions(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let rows = TestCaseRepository::list_with_requirement_description(state.db.pool()).await?;
    Ok(response::ok(rows))
}

/// Create a test case
///
/// POST /api/testcases
pub async fn create_test_case(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<TestCasePayload>,
) -> ApiResult<impl IntoResponse> {
    match records::create_test_case(state.db.pool(), req).await? {
        Outcome::Created(created) => Ok(response::created("Test case created successfully", created)),
        Outcome::Duplicate(id) => Err(ApiError::Conflict(format!("Test case {} already exists", id))),
    }
}

/// Get a single test case
///
/// GET /api/testcases/:id
pub async fn get_test_case(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<impl IntoResponse> {
    let test_case = TestCaseRepository::get_by_id(state.db.pool(), &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Test case not found".to_string()))?;
    Ok(response::ok(test_case))
}

/// Update a test case
///
/// PUT /api/testcases/:id
pub async fn update_test_case(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<TestCasePayload>,
) -> ApiResult<impl IntoResponse> {
    if !req.has_updates() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }

    let pool = state.db.pool();
    let mut test_case = TestCaseRepository::get_by_id(pool, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Test case not found".to_string()))?;
    req.apply_to(&mut test_case);

    let updated = TestCaseRepository::update(pool, &test_case)
        .await?
        .ok_or_else(|| ApiError::NotFound("Test case not found".to_string()))?;

    tracing::info!(test_case_id = %id, "Test case updated");
    Ok(response::updated("Test case updated successfully", updated))
}

/// Delete a test case
///
/// DELETE /api/testcases/:id
pub async fn delete_test_case(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<impl IntoResponse> {
    if !TestCaseRepository::delete(state.db.pool(), &id).await? {
        return Err(ApiError::NotFound("Test case not found".to_string()));
    }

    tracing::info!(test_case_id = %id, "Test case deleted");
    Ok(response::message("Test case deleted successfully"))
}
