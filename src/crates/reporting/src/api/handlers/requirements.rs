//! Requirement CRUD endpoint handlers

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::api::{
    error::{ApiError, ApiResult},
    extract::ApiJson,
    models::RequirementPayload,
    response,
    routes::AppState,
};
use crate::db::repositories::RequirementRepository;
use crate::ingest::{records, Outcome};

/// List all requirements
///
/// GET /api/requirements
pub async fn list_requirements(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let requirements = RequirementRepository::list(state.db.pool()).await?;
    Ok(response::ok(requirements))
}

/// Create a requirement
///
/// POST /api/requirements
pub async fn create_requirement(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RequirementPayload>,
) -> ApiResult<impl IntoResponse> {
    match records::create_requirement(state.db.pool(), req).await? {
        Outcome::Created(created) => Ok(response::created("Requirement created successfully", created)),
        Outcome::Duplicate(id) => Err(ApiError::Conflict(format!("Requirement {} already exists", id))),
    }
}

/// Get a single requirement
///
/// GET /api/requirements/:id
pub async fn get_requirement(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<impl IntoResponse> {
    let requirement = RequirementRepository::get_by_id(state.db.pool(), &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Requirement not found".to_string()))?;
    Ok(response::ok(requirement))
}

/// Update a requirement
///
/// PUT /api/requirements/:id
pub async fn update_requirement(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<RequirementPayload>,
) -> ApiResult<impl IntoResponse> {
    if !req.has_updates() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }

    let pool = state.db.pool();
    let mut requirement = RequirementRepository::get_by_id(pool, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Requirement not found".to_string()))?;
    req.apply_to(&mut requirement);

    let updated = RequirementRepository::update(pool, &requirement)
        .await?
        .ok_or_else(|| ApiError::NotFound("Requirement not found".to_string()))?;

    tracing::info!(requirement_id = %id, "Requirement updated");
    Ok(response::updated("Requirement updated successfully", updated))
}

/// Delete a requirement
///
/// DELETE /api/requirements/:id
pub async fn delete_requirement(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<impl IntoResponse> {
    if !RequirementRepository::delete(state.db.pool(), &id).await? {
        return Err(ApiError::NotFound("Requirement not found".to_string()));
    }

    tracing::info!(requirement_id = %id, "Requirement deleted");
    Ok(response::message("Requirement deleted successfully"))
}
