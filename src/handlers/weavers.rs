use crate::auth::Caller;
use crate::entities::weaver;
use crate::errors::ServiceError;
use crate::handlers::AppState;
use crate::services::weavers::{CreateWeaverRequest, UpdateWeaverRequest, WeaverService};
use crate::ApiResponse;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Router,
};

async fn create_weaver(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<CreateWeaverRequest>,
) -> Result<(StatusCode, Json<ApiResponse<weaver::Model>>), ServiceError> {
    let service = WeaverService::new(state.db.clone());
    let weaver = service.create_weaver(&caller, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(weaver))))
}

async fn list_weavers(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<ApiResponse<Vec<weaver::Model>>>, ServiceError> {
    let service = WeaverService::new(state.db.clone());
    let weavers = service.list_weavers(&caller).await?;
    Ok(Json(ApiResponse::success(weavers)))
}

async fn get_weaver(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    caller: Caller,
) -> Result<Json<ApiResponse<weaver::Model>>, ServiceError> {
    let service = WeaverService::new(state.db.clone());
    let weaver = service.get_weaver(&caller, id).await?;
    Ok(Json(ApiResponse::success(weaver)))
}

async fn update_weaver(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    caller: Caller,
    Json(request): Json<UpdateWeaverRequest>,
) -> Result<Json<ApiResponse<weaver::Model>>, ServiceError> {
    let service = WeaverService::new(state.db.clone());
    let weaver = service.update_weaver(&caller, id, request).await?;
    Ok(Json(ApiResponse::success(weaver)))
}

async fn toggle_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    caller: Caller,
) -> Result<Json<ApiResponse<weaver::Model>>, ServiceError> {
    let service = WeaverService::new(state.db.clone());
    let weaver = service.toggle_status(&caller, id).await?;
    Ok(Json(ApiResponse::success(weaver)))
}

async fn delete_weaver(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    caller: Caller,
) -> Result<Json<ApiResponse<()>>, ServiceError> {
    let service = WeaverService::new(state.db.clone());
    service.delete_weaver(&caller, id).await?;
    Ok(Json(ApiResponse::success(())))
}

/// Weaver routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_weaver))
        .route("/", get(list_weavers))
        .route("/:id", get(get_weaver))
        .route("/:id", put(update_weaver))
        .route("/:id/toggle-status", post(toggle_status))
        .route("/:id", delete(delete_weaver))
}
