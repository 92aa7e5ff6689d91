use crate::models::dtos::{not_blank, valid_amount};
use crate::models::entities::enum_types::PaymentStatus;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct InitiatePaymentRequest {
    #[validate(custom(function = "not_blank"))]
    pub booking_reference: String,

    /// Decimal amount as a string, e.g. "100.00".
    #[validate(custom(function = "valid_amount"))]
    pub amount: String,

    #[validate(email)]
    pub email: String,

    #[validate(custom(function = "not_blank"))]
    pub first_name: String,

    #[validate(custom(function = "not_blank"))]
    pub last_name: String,

    #[schema(example = "ETB")]
    pub currency: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InitiatePaymentResponse {
    pub tx_ref: String,
    pub checkout_url: String,
    pub status: PaymentStatus,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyPaymentResponse {
    pub tx_ref: String,
    pub status: PaymentStatus,
    /// Raw gateway verification payload, returned verbatim for diagnostics.
    pub gateway: Value,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyQuery {
    /// Fallback recipient for the confirmation email when the init payload
    /// did not capture one.
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CallbackQuery {
    pub tx_ref: Option<String>,
}
