use axum::extract::{Query, State};
use axum::response::IntoResponse;
use http::{header::LOCATION, StatusCode};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::dtos::payment_dto::CallbackQuery;
use crate::models::AppState;
use crate::services::PaymentService;

#[utoipa::path(
    get,
    path = "/api/payments/callback",
    params(("tx_ref" = Option<String>, Query, description = "Transaction reference")),
    responses(
        (status = 302, description = "Redirect to the verification endpoint"),
        (status = 400, description = "tx_ref missing")
    ),
    tag = "Payments"
)]
pub async fn chapa_callback(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CallbackQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let target = PaymentService::callback_target(&state, query.tx_ref.as_deref())?;
    Ok((StatusCode::FOUND, [(LOCATION, target)]))
}
