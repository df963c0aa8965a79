use crate::auth::Caller;
use crate::errors::ServiceError;
use crate::handlers::AppState;
use crate::services::dashboard::{DashboardService, DashboardSummary};
use crate::ApiResponse;
use axum::{
    extract::{Json, State},
    routing::get,
    Router,
};

async fn summary(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<ApiResponse<DashboardSummary>>, ServiceError> {
    let service = DashboardService::new(state.db.clone());
    let summary = service.summary(&caller).await?;
    Ok(Json(ApiResponse::success(summary)))
}

/// Dashboard routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(summary))
}
