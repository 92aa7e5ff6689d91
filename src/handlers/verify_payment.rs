use axum::extract::{Json, Path, Query, State};
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::dtos::payment_dto::{VerifyPaymentResponse, VerifyQuery};
use crate::models::AppState;
use crate::services::PaymentService;

#[utoipa::path(
    get,
    path = "/api/payments/verify/{tx_ref}",
    params(
        ("tx_ref" = String, Path, description = "Transaction reference"),
        ("email" = Option<String>, Query, description = "Fallback confirmation recipient")
    ),
    responses(
        (status = 200, description = "Verification outcome", body = VerifyPaymentResponse),
        (status = 404, description = "Unknown tx_ref"),
        (status = 502, description = "Payment gateway unreachable")
    ),
    tag = "Payments"
)]
pub async fn verify_payment(
    State(state): State<Arc<AppState>>,
    Path(tx_ref): Path<String>,
    Query(query): Query<VerifyQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let resp = PaymentService::verify(&state, &tx_ref, query.email.as_deref()).await?;
    Ok(Json(resp))
}
