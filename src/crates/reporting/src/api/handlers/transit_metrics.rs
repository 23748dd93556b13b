//! Daily transit metric CRUD endpoint handlers

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::api::{
    error::{ApiError, ApiResult},
    extract::ApiJson,
    middleware::parse_integer_id,
    models::TransitMetricPayload,
    response,
    routes::AppState,
};
use crate::db::models::NewTransitMetric;
use crate::db::repositories::TransitMetricRepository;

/// GET /api/transitmetricsdaily
pub async fn list_metrics(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let metrics = TransitMetricRepository::list(state.db.pool()).await?;
    Ok(response::ok(metrics))
}

/// POST /api/transitmetricsdaily
pub async fn create_metric(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<TransitMetricPayload>,
) -> ApiResult<impl IntoResponse> {
    let record = req.into_record()?;
    let created = TransitMetricRepository::create(state.db.pool(), &record).await?;

    tracing::info!(id = created.id, date = %created.date, "Transit metric created");
    Ok(response::created("Transit metric created successfully", created))
}

/// GET /api/transitmetricsdaily/:id
pub async fn get_metric(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<impl IntoResponse> {
    let id = parse_integer_id(&id)?;
    let metric = TransitMetricRepository::get_by_id(state.db.pool(), id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Transit metric not found".to_string()))?;
    Ok(response::ok(metric))
}

/// PUT /api/transitmetricsdaily/:id
pub async fn update_metric(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<TransitMetricPayload>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_integer_id(&id)?;
    if !req.has_updates() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }

    let pool = state.db.pool();
    let existing = TransitMetricRepository::get_by_id(pool, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Transit metric not found".to_string()))?;
    let mut record = NewTransitMetric::from(existing);
    req.apply_to(&mut record);

    let updated = TransitMetricRepository::update(pool, id, &record)
        .await?
        .ok_or_else(|| ApiError::NotFound("Transit metric not found".to_string()))?;

    tracing::info!(id, "Transit metric updated");
    Ok(response::updated("Transit metric updated successfully", updated))
}

/// DELETE /api/transitmetricsdaily/:id
pub async fn delete_metric(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<impl IntoResponse> {
    let id = parse_integer_id(&id)?;
    if !TransitMetricRepository::delete(state.db.pool(), id).await? {
        return Err(ApiError::NotFound("Transit metric not found".to_string()));
    }

    tracing::info!(id, "Transit metric deleted");
    Ok(response::message("Transit metric deleted successfully"))
}
