use axum::extract::{Json, State};
use axum::response::IntoResponse;
use http::StatusCode;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::dtos::payment_dto::{InitiatePaymentRequest, InitiatePaymentResponse};
use crate::models::AppState;
use crate::services::PaymentService;

#[utoipa::path(
    post,
    path = "/api/payments/initiate",
    request_body = InitiatePaymentRequest,
    responses(
        (status = 201, description = "Payment initiated", body = InitiatePaymentResponse),
        (status = 400, description = "Invalid input or gateway rejected the transaction"),
        (status = 502, description = "Payment gateway unreachable")
    ),
    tag = "Payments"
)]
pub async fn initiate_payment(
    State(state): State<Arc<AppState>>,
    Json(req): Json<InitiatePaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let resp = PaymentService::initiate(&state, req).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
