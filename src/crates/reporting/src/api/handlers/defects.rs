//! Defect CRUD endpoint handlers

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::api::{
    error::{ApiError, ApiResult},
    extract::ApiJson,
    models::DefectPayload,
    response,
    routes::AppState,
};
use crate::db::repositories::DefectRepository;
use crate::ingest::{records, Outcome};

/// GET /api/defects
pub async fn list_defects(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let defects = DefectRepository::list(state.db.pool()).await?;
    Ok(response::ok(defects))
}

/// POST /api/defects
pub async fn create_defect(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<DefectPayload>,
) -> ApiResult<impl IntoResponse> {
    match records::create_defect(state.db.pool(), req).await? {
        Outcome::Created(created) => Ok(response::created("Defect created successfully", created)),
        Outcome::Duplicate(id) => Err(ApiError::Conflict(format!("Defect {} already exists", id))),
    }
}

/// GET /api/defects/:id
pub async fn get_defect(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<impl IntoResponse> {
    let defect = DefectRepository::get_by_id(state.db.pool(), &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Defect not found".to_string()))?;
    Ok(response::ok(defect))
}

/// PUT /api/defects/:id
pub async fn update_defect(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<DefectPayload>,
) -> ApiResult<impl IntoResponse> {
    if !req.has_updates() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }

    let pool = state.db.pool();
    let mut defect = DefectRepository::get_by_id(pool, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Defect not found".to_string()))?;
    req.apply_to(&mut defect);

    let updated = DefectRepository::update(pool, &defect)
        .await?
        .ok_or_else(|| ApiError::NotFound("Defect not found".to_string()))?;

    tracing::info!(defect_id = %id, "Defect updated");
    Ok(response::updated("Defect updated successfully", updated))
}

/// DELETE /api/defects/:id
pub async fn delete_defect(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<impl IntoResponse> {
    if !DefectRepository::delete(state.db.pool(), &id).await? {
        return Err(ApiError::NotFound("Defect not found".to_string()));
    }

    tracing::info!(defect_id = %id, "Defect deleted");
    Ok(response::message("Defect deleted successfully"))
}
