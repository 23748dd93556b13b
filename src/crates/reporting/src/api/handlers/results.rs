//! Ingestion endpoint handlers: unified results, runner test-runs and bulk uploads

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use crate::api::{
    error::{ApiError, ApiResult},
    extract::ApiJson,
    response,
    routes::AppState,
};
use crate::db::repositories::TestRunRepository;
use crate::ingest::{self, EntityKind, IngestSummary, ResultsEnvelope, TestRunsEnvelope};

fn summary_response(summary: IngestSummary) -> (StatusCode, Json<IngestSummary>) {
    let status = if summary.any_accepted() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    (status, Json(summary))
}

/// POST /api/v1/results
pub async fn post_results(
    State(state): State<AppState>,
    ApiJson(envelope): ApiJson<ResultsEnvelope>,
) -> impl IntoResponse {
    summary_response(ingest::ingest_results(state.db.pool(), envelope).await)
}

/// POST /api/v1/results/test-runs
pub async fn post_test_runs(
    State(state): State<AppState>,
    ApiJson(envelope): ApiJson<TestRunsEnvelope>,
) -> impl IntoResponse {
    summary_response(ingest::ingest_test_runs(state.db.pool(), envelope).await)
}

/// GET /api/v1/results/test-runs
pub async fn list_test_runs(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let runs = TestRunRepository::list(state.db.pool()).await?;
    Ok(response::ok(json!({ "testRuns": runs })))
}

/// GET /api/v1/results/customers/:customer_id/test-runs
pub async fn list_customer_test_runs(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let customer_id: i64 = customer_id
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid customer id: {}", customer_id)))?;
    let runs = TestRunRepository::list_by_customer(state.db.pool(), customer_id).await?;
    Ok(response::ok(json!({ "testRuns": runs })))
}

/// GET /api/v1/results/test-runs/:test_run_id
pub async fn get_test_run_group(
    State(state): State<AppState>,
    Path(test_run_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let runs = TestRunRepository::list_by_test_run_id(state.db.pool(), &test_run_id).await?;
    Ok(response::ok(json!({ "testRunId": test_run_id, "testRuns": runs })))
}

async fn bulk(state: &AppState, kind: EntityKind, body: Value) -> ApiResult<impl IntoResponse> {
    let Value::Array(items) = body else {
        return Err(ApiError::BadRequest("Expected a JSON array of records".to_string()));
    };
    Ok(response::ok(ingest::bulk_insert(state.db.pool(), kind, items).await))
}

/// POST /api/requirements/bulk
pub async fn bulk_requirements(State(state): State<AppState>, ApiJson(body): ApiJson<Value>) -> ApiResult<impl IntoResponse> {
    bulk(&state, EntityKind::Requirement, body).await
}

/// POST /api/testcases/bulk
pub async fn bulk_test_cases(State(state): State<AppState>, ApiJson(body): ApiJson<Value>) -> ApiResult<impl IntoResponse> {
    bulk(&state, EntityKind::TestCase, body).await
}

/// POST /api/testruns/bulk
pub async fn bulk_test_runs(State(state): State<AppState>, ApiJson(body): ApiJson<Value>) -> ApiResult<impl IntoResponse> {
    bulk(&state, EntityKind::TestRun, body).await
}

/// POST /api/defects/bulk
pub async fn bulk_defects(State(state): State<AppState>, ApiJson(body): ApiJson<Value>) -> ApiResult<impl IntoResponse> {
    bulk(&state, EntityKind::Defect, body).await
}

/// POST /api/testtypesummary/bulk
pub async fn bulk_summaries(State(state): State<AppState>, ApiJson(body): ApiJson<Value>) -> ApiResult<impl IntoResponse> {
    bulk(&state, EntityKind::TestTypeSummary, body).await
}

/// POST /api/transitmetricsdaily/bulk
pub async fn bulk_metrics(State(state): State<AppState>, ApiJson(body): ApiJson<Value>) -> ApiResult<impl IntoResponse> {
    bulk(&state, EntityKind::TransitMetric, body).await
}
