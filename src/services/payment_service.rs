use bigdecimal::BigDecimal;
use diesel::Connection;
use serde_json::Value;
use std::str::FromStr;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::models::dtos::chapa::{ChapaCustomization, ChapaInitRequest};
use crate::models::dtos::payment_dto::{
    InitiatePaymentRequest, InitiatePaymentResponse, VerifyPaymentResponse,
};
use crate::models::entities::enum_types::PaymentStatus;
use crate::models::entities::payment::NewPayment;
use crate::models::AppState;
use crate::repositories::PaymentRepository;

/// Gateway response fields that may carry the transaction id, in
/// preference order.
const TXN_ID_FIELDS: &[&str] = &["reference", "id"];

const DEFAULT_CURRENCY: &str = "ETB";

pub struct PaymentService;

impl PaymentService {
    /// Initiates a gateway transaction and persists a Pending payment.
    /// Exactly one durable write on success; none on any failure path.
    pub async fn initiate(
        state: &AppState,
        req: InitiatePaymentRequest,
    ) -> Result<InitiatePaymentResponse, ApiError> {
        req.validate()?;

        let booking_reference = req.booking_reference.trim().to_string();
        let amount = req.amount.trim().to_string();
        let currency = req
            .currency
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CURRENCY)
            .to_string();

        let tx_ref = generate_tx_ref();
        let redirect = return_url(&state.config.chapa.return_url, &tx_ref);

        let payload = ChapaInitRequest {
            amount: amount.clone(),
            currency: currency.clone(),
            email: req.email.trim().to_string(),
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            tx_ref: tx_ref.clone(),
            callback_url: redirect.clone(),
            return_url: redirect,
            customization: ChapaCustomization {
                title: "Wayfarer Travel Booking".to_string(),
                description: format!("Booking {booking_reference}"),
            },
        };

        let raw = state.chapa.initialize(&payload).await?;

        let checkout_url = raw
            .pointer("/data/checkout_url")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        if raw.get("status").and_then(Value::as_str) != Some("success") || checkout_url.is_empty()
        {
            warn!(%tx_ref, "gateway rejected payment initialization");
            return Err(ApiError::GatewayRejected(raw));
        }

        let gateway_txn_id = extract_txn_id(&raw);

        // Re-parse is safe: the validator already accepted this string.
        let amount_decimal = BigDecimal::from_str(&amount)
            .map_err(|_| ApiError::Internal("Unparseable amount after validation".into()))?;

        let conn = &mut state.db.get()?;
        let payment = PaymentRepository::create(
            conn,
            NewPayment {
                booking_reference: &booking_reference,
                amount: &amount_decimal,
                currency: &currency,
                tx_ref: &tx_ref,
                gateway_txn_id: &gateway_txn_id,
                checkout_url: &checkout_url,
                status: PaymentStatus::Pending,
                raw_init_response: &raw,
            },
        )?;

        info!(
            %tx_ref,
            booking = %booking_reference,
            %amount,
            %currency,
            "payment initiated"
        );

        Ok(InitiatePaymentResponse {
            tx_ref,
            checkout_url,
            status: payment.status,
        })
    }

    /// Verifies a transaction with the gateway and records the outcome in
    /// one atomic write. Terminal states are sticky: a Completed or Failed
    /// payment keeps its status on re-verification, so a flaky gateway
    /// answer cannot regress a settled payment.
    pub async fn verify(
        state: &AppState,
        tx_ref: &str,
        fallback_email: Option<&str>,
    ) -> Result<VerifyPaymentResponse, ApiError> {
        // The existence check gives its pool slot back before the gateway
        // call, which may run for the full gateway timeout.
        {
            let conn = &mut state.db.get()?;
            PaymentRepository::find_by_tx_ref(conn, tx_ref)?
                .ok_or_else(|| ApiError::NotFound(format!("No payment with tx_ref {tx_ref}")))?;
        }

        // Gateway first: a transport failure must leave the row untouched.
        let raw = state.chapa.verify_transaction(tx_ref).await?;
        let paid = is_paid(&raw);

        let conn = &mut state.db.get()?;
        let (payment, status, completed_now) = conn.transaction::<_, ApiError, _>(|conn| {
            let payment = PaymentRepository::find_by_tx_ref_for_update(conn, tx_ref)?
                .ok_or_else(|| ApiError::NotFound(format!("No payment with tx_ref {tx_ref}")))?;

            let status = if payment.status.is_terminal() {
                payment.status
            } else if paid {
                PaymentStatus::Completed
            } else {
                PaymentStatus::Failed
            };

            let txn_id = extract_txn_id(&raw);
            let backfill = (payment.gateway_txn_id.is_empty() && !txn_id.is_empty())
                .then_some(txn_id.as_str());

            PaymentRepository::record_verification(conn, payment.id, status, backfill, &raw)?;

            let completed_now =
                !payment.status.is_terminal() && status == PaymentStatus::Completed;
            Ok((payment, status, completed_now))
        })?;

        if completed_now {
            Self::queue_confirmation(state, &payment, fallback_email);
            info!(%tx_ref, "payment verified completed");
        } else if status == PaymentStatus::Failed {
            warn!(%tx_ref, "payment verification failed");
        } else {
            info!(%tx_ref, status = %status, "payment re-verified, status unchanged");
        }

        Ok(VerifyPaymentResponse {
            tx_ref: tx_ref.to_string(),
            status,
            gateway: raw,
        })
    }

    /// Translation only: the gateway callback becomes a redirect to the
    /// verification endpoint for the same tx_ref.
    pub fn callback_target(state: &AppState, tx_ref: Option<&str>) -> Result<String, ApiError> {
        let tx_ref = tx_ref
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::BadRequest("Missing tx_ref".into()))?;

        Ok(format!(
            "{}/api/payments/verify/{}",
            state.config.app_url.trim_end_matches('/'),
            tx_ref
        ))
    }

    fn queue_confirmation(
        state: &AppState,
        payment: &crate::models::entities::payment::Payment,
        fallback_email: Option<&str>,
    ) {
        let to_email = payment
            .raw_init_response
            .pointer("/data/email")
            .and_then(Value::as_str)
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .or_else(|| {
                fallback_email
                    .map(str::trim)
                    .filter(|e| !e.is_empty())
                    .map(str::to_string)
            });

        match to_email {
            Some(to_email) => state.notifier.enqueue(crate::tasks::PaymentConfirmation {
                to_email,
                booking_reference: payment.booking_reference.clone(),
                amount: payment.amount.to_string(),
                currency: payment.currency.clone(),
                tx_ref: payment.tx_ref.clone(),
            }),
            // No recipient anywhere: skip silently, not an error.
            None => info!(tx_ref = %payment.tx_ref, "no recipient email, skipping confirmation"),
        }
    }
}

/// `TRX_` plus the first 24 hex chars of a v4 UUID: 96 bits of entropy,
/// with the store's unique constraint as the backstop.
pub fn generate_tx_ref() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("TRX_{}", &hex[..24])
}

/// Both the gateway-side redirect and the server-side webhook use the same
/// URL shape: base return URL + `?tx_ref=<tx_ref>`.
pub fn return_url(base: &str, tx_ref: &str) -> String {
    format!("{}?tx_ref={}", base.trim_end_matches('/'), tx_ref)
}

/// Paid only when the top-level status is "success" AND the nested
/// transaction status agrees (case-insensitively).
pub fn is_paid(body: &Value) -> bool {
    let top = body.get("status").and_then(Value::as_str) == Some("success");
    let nested = body
        .pointer("/data/status")
        .and_then(Value::as_str)
        .is_some_and(|s| s.eq_ignore_ascii_case("success"));
    top && nested
}

/// Best-effort transaction-id extraction: first non-empty candidate wins.
/// Numeric ids are stringified.
pub fn extract_txn_id(body: &Value) -> String {
    let Some(data) = body.get("data") else {
        return String::new();
    };

    for field in TXN_ID_FIELDS {
        match data.get(field) {
            Some(Value::String(s)) if !s.is_empty() => return s.clone(),
            Some(Value::Number(n)) => return n.to_string(),
            _ => {}
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn tx_refs_have_prefix_and_24_hex_chars() {
        let tx_ref = generate_tx_ref();
        let suffix = tx_ref.strip_prefix("TRX_").expect("TRX_ prefix");
        assert_eq!(suffix.len(), 24);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn ten_thousand_tx_refs_are_pairwise_unique() {
        let refs: HashSet<String> = (0..10_000).map(|_| generate_tx_ref()).collect();
        assert_eq!(refs.len(), 10_000);
    }

    #[test]
    fn return_url_appends_tx_ref_and_strips_trailing_slash() {
        assert_eq!(
            return_url("https://app.example.com/callback/", "TRX_abc"),
            "https://app.example.com/callback?tx_ref=TRX_abc"
        );
        assert_eq!(
            return_url("https://app.example.com/callback", "TRX_abc"),
            "https://app.example.com/callback?tx_ref=TRX_abc"
        );
    }

    #[test]
    fn paid_requires_both_status_fields() {
        assert!(is_paid(&json!({
            "status": "success",
            "data": { "status": "success" }
        })));
        assert!(is_paid(&json!({
            "status": "success",
            "data": { "status": "SUCCESS" }
        })));
        assert!(!is_paid(&json!({
            "status": "success",
            "data": { "status": "failed" }
        })));
        assert!(!is_paid(&json!({
            "status": "failed",
            "data": { "status": "success" }
        })));
        assert!(!is_paid(&json!({ "status": "success" })));
    }

    #[test]
    fn txn_id_prefers_reference_over_id() {
        let body = json!({ "data": { "reference": "G1", "id": "other" } });
        assert_eq!(extract_txn_id(&body), "G1");
    }

    #[test]
    fn txn_id_falls_back_to_id_and_stringifies_numbers() {
        assert_eq!(extract_txn_id(&json!({ "data": { "id": "X9" } })), "X9");
        assert_eq!(extract_txn_id(&json!({ "data": { "id": 42 } })), "42");
    }

    #[test]
    fn txn_id_empty_when_nothing_usable() {
        assert_eq!(extract_txn_id(&json!({ "data": { "reference": "" } })), "");
        assert_eq!(extract_txn_id(&json!({})), "");
    }
}
