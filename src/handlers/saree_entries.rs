use crate::auth::Caller;
use crate::errors::ServiceError;
use crate::handlers::AppState;
use crate::services::production::{
    CreateSareeEntryRequest, ProductionService, SareeEntryResponse,
};
use crate::ApiResponse;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct CompleteEntryRequest {
    pub completion_date: Option<NaiveDate>,
}

async fn add_saree_entry(
    State(state): State<AppState>,
    Path(loom_id): Path<i32>,
    caller: Caller,
    Json(request): Json<CreateSareeEntryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SareeEntryResponse>>), ServiceError> {
    let service = ProductionService::new(state.db.clone());
    let entry = service.add_saree_entry(&caller, loom_id, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(entry))))
}

async fn list_entries(
    State(state): State<AppState>,
    Path(loom_id): Path<i32>,
    caller: Caller,
) -> Result<Json<ApiResponse<Vec<SareeEntryResponse>>>, ServiceError> {
    let service = ProductionService::new(state.db.clone());
    let entries = service.list_entries(&caller, loom_id).await?;
    Ok(Json(ApiResponse::success(entries)))
}

async fn mark_complete(
    State(state): State<AppState>,
    Path(entry_id): Path<i32>,
    caller: Caller,
    Json(request): Json<CompleteEntryRequest>,
) -> Result<Json<ApiResponse<SareeEntryResponse>>, ServiceError> {
    let service = ProductionService::new(state.db.clone());
    let entry = service
        .mark_complete(&caller, entry_id, request.completion_date)
        .await?;
    Ok(Json(ApiResponse::success(entry)))
}

async fn delete_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<i32>,
    caller: Caller,
) -> Result<Json<ApiResponse<()>>, ServiceError> {
    let service = ProductionService::new(state.db.clone());
    service.delete_entry(&caller, entry_id).await?;
    Ok(Json(ApiResponse::success(())))
}

/// Entry routes mounted under `/looms`.
pub fn loom_entry_routes() -> Router<AppState> {
    Router::new()
        .route("/:id/entries", post(add_saree_entry))
        .route("/:id/entries", get(list_entries))
}

/// Entry routes mounted under `/entries`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/:id/complete", post(mark_complete))
        .route("/:id", delete(delete_entry))
}
