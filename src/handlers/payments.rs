use crate::auth::Caller;
use crate::errors::ServiceError;
use crate::handlers::AppState;
use crate::services::payments::{
    PaymentResponse, PaymentService, PaymentsByDateResponse, RecordPaymentRequest,
};
use crate::ApiResponse;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;

async fn record_payment(
    State(state): State<AppState>,
    caller: Caller,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PaymentResponse>>), ServiceError> {
    let service = PaymentService::new(state.db.clone());
    let payment = service.record_payment(&caller, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(payment))))
}

async fn list_payment_dates(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<ApiResponse<Vec<NaiveDate>>>, ServiceError> {
    let service = PaymentService::new(state.db.clone());
    let dates = service.list_payment_dates(&caller).await?;
    Ok(Json(ApiResponse::success(dates)))
}

async fn payments_by_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
    caller: Caller,
) -> Result<Json<ApiResponse<PaymentsByDateResponse>>, ServiceError> {
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| ServiceError::ValidationError("Invalid date format".to_string()))?;

    let service = PaymentService::new(state.db.clone());
    let payments = service.payments_by_date(&caller, date).await?;
    Ok(Json(ApiResponse::success(payments)))
}

async fn list_loom_payments(
    State(state): State<AppState>,
    Path(loom_id): Path<i32>,
    caller: Caller,
) -> Result<Json<ApiResponse<Vec<PaymentResponse>>>, ServiceError> {
    let service = PaymentService::new(state.db.clone());
    let payments = service.list_loom_payments(&caller, loom_id).await?;
    Ok(Json(ApiResponse::success(payments)))
}

/// Payment routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(record_payment))
        .route("/dates", get(list_payment_dates))
        .route("/by-date/:date", get(payments_by_date))
        .route("/loom/:id", get(list_loom_payments))
}
