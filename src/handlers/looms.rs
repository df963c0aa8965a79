use crate::auth::Caller;
use crate::errors::ServiceError;
use crate::handlers::AppState;
use crate::services::looms::{
    ColorConfigRequest, CreateLoomRequest, LoomResponse, LoomService, UpdateLoomRequest,
    WarpConfigRequest, WeftConfigRequest,
};
use crate::ApiResponse;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Router,
};

async fn create_loom(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<CreateLoomRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LoomResponse>>), ServiceError> {
    let service = LoomService::new(state.db.clone());
    let loom = service.create_loom(&caller, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(loom))))
}

async fn list_looms(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<ApiResponse<Vec<LoomResponse>>>, ServiceError> {
    let service = LoomService::new(state.db.clone());
    let looms = service.list_looms(&caller).await?;
    Ok(Json(ApiResponse::success(looms)))
}

async fn get_loom(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    caller: Caller,
) -> Result<Json<ApiResponse<LoomResponse>>, ServiceError> {
    let service = LoomService::new(state.db.clone());
    let loom = service.get_loom(&caller, id).await?;
    Ok(Json(ApiResponse::success(loom)))
}

async fn update_loom(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    caller: Caller,
    Json(request): Json<UpdateLoomRequest>,
) -> Result<Json<ApiResponse<LoomResponse>>, ServiceError> {
    let service = LoomService::new(state.db.clone());
    let loom = service.update_loom(&caller, id, request).await?;
    Ok(Json(ApiResponse::success(loom)))
}

async fn delete_loom(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    caller: Caller,
) -> Result<Json<ApiResponse<()>>, ServiceError> {
    let service = LoomService::new(state.db.clone());
    service.delete_loom(&caller, id).await?;
    Ok(Json(ApiResponse::success(())))
}

async fn add_warp(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    caller: Caller,
    Json(request): Json<WarpConfigRequest>,
) -> Result<(
    StatusCode,
    Json<ApiResponse<crate::entities::warp::Model>>,
), ServiceError> {
    let service = LoomService::new(state.db.clone());
    let warp = service.add_warp(&caller, id, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(warp))))
}

async fn list_warps(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    caller: Caller,
) -> Result<Json<ApiResponse<Vec<crate::entities::warp::Model>>>, ServiceError> {
    let service = LoomService::new(state.db.clone());
    let warps = service.list_warps(&caller, id).await?;
    Ok(Json(ApiResponse::success(warps)))
}

async fn add_weft(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    caller: Caller,
    Json(request): Json<WeftConfigRequest>,
) -> Result<(
    StatusCode,
    Json<ApiResponse<crate::entities::weft::Model>>,
), ServiceError> {
    let service = LoomService::new(state.db.clone());
    let weft = service.add_weft(&caller, id, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(weft))))
}

async fn list_wefts(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    caller: Caller,
) -> Result<Json<ApiResponse<Vec<crate::entities::weft::Model>>>, ServiceError> {
    let service = LoomService::new(state.db.clone());
    let wefts = service.list_wefts(&caller, id).await?;
    Ok(Json(ApiResponse::success(wefts)))
}

async fn add_warp_color(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    caller: Caller,
    Json(request): Json<ColorConfigRequest>,
) -> Result<(
    StatusCode,
    Json<ApiResponse<crate::entities::warp_color::Model>>,
), ServiceError> {
    let service = LoomService::new(state.db.clone());
    let color = service.add_warp_color(&caller, id, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(color))))
}

async fn list_warp_colors(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    caller: Caller,
) -> Result<Json<ApiResponse<Vec<crate::entities::warp_color::Model>>>, ServiceError> {
    let service = LoomService::new(state.db.clone());
    let colors = service.list_warp_colors(&caller, id).await?;
    Ok(Json(ApiResponse::success(colors)))
}

async fn add_weft_color(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    caller: Caller,
    Json(request): Json<ColorConfigRequest>,
) -> Result<(
    StatusCode,
    Json<ApiResponse<crate::entities::weft_color::Model>>,
), ServiceError> {
    let service = LoomService::new(state.db.clone());
    let color = service.add_weft_color(&caller, id, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(color))))
}

async fn list_weft_colors(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    caller: Caller,
) -> Result<Json<ApiResponse<Vec<crate::entities::weft_color::Model>>>, ServiceError> {
    let service = LoomService::new(state.db.clone());
    let colors = service.list_weft_colors(&caller, id).await?;
    Ok(Json(ApiResponse::success(colors)))
}

/// Loom routes, including structural sub-records and saree entries.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_loom))
        .route("/", get(list_looms))
        .route("/:id", get(get_loom))
        .route("/:id", put(update_loom))
        .route("/:id", delete(delete_loom))
        .route("/:id/warps", post(add_warp))
        .route("/:id/warps", get(list_warps))
        .route("/:id/wefts", post(add_weft))
        .route("/:id/wefts", get(list_wefts))
        .route("/:id/warp-colors", post(add_warp_color))
        .route("/:id/warp-colors", get(list_warp_colors))
        .route("/:id/weft-colors", post(add_weft_color))
        .route("/:id/weft-colors", get(list_weft_colors))
        .merge(super::saree_entries::loom_entry_routes())
}
