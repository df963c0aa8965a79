use crate::errors::ServiceError;
use crate::handlers::AppState;
use crate::services::notifications::{NotificationService, WarpAlert};
use crate::ApiResponse;
use axum::{
    extract::{Json, State},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct NotificationsPayload {
    pub count: usize,
    pub notifications: Vec<WarpAlert>,
}

async fn get_notifications(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<NotificationsPayload>>, ServiceError> {
    let service = NotificationService::new(state.db.clone());
    let notifications = service.get_notifications().await?;

    Ok(Json(ApiResponse::success(NotificationsPayload {
        count: notifications.len(),
        notifications,
    })))
}

/// Notification routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(get_notifications))
}
