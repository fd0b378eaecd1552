// HTTP request handlers
use crate::domain::sensor::{AnalysisScope, MeasurementKind};
use crate::domain::structure::StructureType;
use crate::domain::thresholds::{Bound, ThresholdConfig};
use crate::domain::time_series::DateRange;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::infrastructure::notification_stream::stream_from_receiver;
use crate::presentation::app_state::AppState;
use crate::presentation::error::{ApiError, ApiResult};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct FileRequest {
    pub name: String,
    pub size: u64,
}

#[derive(Deserialize)]
pub struct StructureRequest {
    pub structure: StructureType,
}

#[derive(Deserialize)]
pub struct LocationRequest {
    pub lat: String,
    pub lng: String,
    pub address: Option<String>,
}

#[derive(Deserialize)]
pub struct ScopeRequest {
    pub scope: AnalysisScope,
}

#[derive(Deserialize)]
pub struct BoundRequest {
    pub value: String,
}

#[derive(Serialize)]
struct StructureInfo {
    id: &'static str,
    name: &'static str,
    description: &'static str,
}

async fn respond<T: Serialize>(headers: &HeaderMap, status: StatusCode, data: &T) -> Response {
    match json_response(status, data, accepts_brotli(headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn list_structures(headers: HeaderMap) -> Response {
    let structures: Vec<StructureInfo> = StructureType::ALL
        .iter()
        .map(|s| StructureInfo {
            id: s.id(),
            name: s.name(),
            description: s.description(),
        })
        .collect();

    respond(&headers, StatusCode::OK, &structures).await
}

pub async fn session_status(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let status = state.dashboard_service.status().await;
    respond(&headers, StatusCode::OK, &status).await
}

pub async fn upload_file(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(request): Json<FileRequest>,
) -> ApiResult<Response> {
    let file = state
        .dashboard_service
        .upload_file(&request.name, request.size)
        .await?;
    Ok(respond(&headers, StatusCode::OK, &file).await)
}

pub async fn remove_file(State(state): State<Arc<AppState>>) -> StatusCode {
    state.dashboard_service.remove_file().await;
    StatusCode::NO_CONTENT
}

pub async fn select_structure(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StructureRequest>,
) -> StatusCode {
    state
        .dashboard_service
        .select_structure(request.structure)
        .await;
    StatusCode::NO_CONTENT
}

pub async fn set_location(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(request): Json<LocationRequest>,
) -> ApiResult<Response> {
    let location = state
        .dashboard_service
        .set_location(&request.lat, &request.lng, request.address.as_deref())
        .await?;
    Ok(respond(&headers, StatusCode::OK, &location).await)
}

/// Run the analysis and return the resulting dashboard.
pub async fn run_analysis(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Response> {
    state.dashboard_service.run_analysis().await?;
    let view = state.dashboard_service.dashboard().await?;
    Ok(respond(&headers, StatusCode::OK, &view).await)
}

pub async fn get_dashboard(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Response> {
    let view = state.dashboard_service.dashboard().await?;
    Ok(respond(&headers, StatusCode::OK, &view).await)
}

pub async fn apply_date_range(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(range): Json<DateRange>,
) -> ApiResult<Response> {
    state.dashboard_service.apply_date_range(range).await?;
    let view = state.dashboard_service.dashboard().await?;
    Ok(respond(&headers, StatusCode::OK, &view).await)
}

pub async fn clear_date_range(State(state): State<Arc<AppState>>) -> StatusCode {
    state.dashboard_service.clear_date_range().await;
    StatusCode::NO_CONTENT
}

pub async fn set_scope(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ScopeRequest>,
) -> StatusCode {
    state.dashboard_service.set_scope(request.scope).await;
    StatusCode::NO_CONTENT
}

pub async fn get_thresholds(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let view = state.dashboard_service.thresholds().await;
    respond(&headers, StatusCode::OK, &view).await
}

pub async fn save_thresholds(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(config): Json<ThresholdConfig>,
) -> Response {
    let view = state.dashboard_service.save_thresholds(config).await;
    respond(&headers, StatusCode::OK, &view).await
}

/// Edit one bound from raw text. Non-numeric input is accepted and ignored.
pub async fn set_threshold_bound(
    headers: HeaderMap,
    Path((kind, bound)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<BoundRequest>,
) -> ApiResult<Response> {
    let kind: MeasurementKind = kind.parse().map_err(ApiError::BadRequest)?;
    let bound: Bound = bound.parse().map_err(ApiError::BadRequest)?;

    let view = state
        .dashboard_service
        .set_threshold(kind, bound, &request.value)
        .await;
    Ok(respond(&headers, StatusCode::OK, &view).await)
}

pub async fn reset_thresholds(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let view = state.dashboard_service.reset_thresholds().await;
    respond(&headers, StatusCode::OK, &view).await
}

/// Stream notifications as newline-delimited JSON
pub async fn stream_notifications(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    stream_from_receiver(state.notifier.subscribe())
}
