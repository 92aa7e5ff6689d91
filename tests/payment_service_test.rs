// Service-level tests that stop before the persistence write: validation
// and gateway-rejection paths must produce zero side effects, so no
// database is needed to exercise them.
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wayfarer::error::ApiError;
use wayfarer::models::dtos::payment_dto::InitiatePaymentRequest;
use wayfarer::services::PaymentService;

mod common;

fn valid_request() -> InitiatePaymentRequest {
    InitiatePaymentRequest {
        booking_reference: "BK1".into(),
        amount: "100.00".into(),
        email: "a@b.com".into(),
        first_name: "A".into(),
        last_name: "B".into(),
        currency: None,
    }
}

#[tokio::test]
async fn blank_required_field_fails_validation_without_a_gateway_call() {
    let server = MockServer::start().await;
    let (state, _rx) = common::create_test_state(&server.uri());

    let req = InitiatePaymentRequest {
        booking_reference: "   ".into(),
        ..valid_request()
    };

    let err = PaymentService::initiate(&state, req).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn non_decimal_amount_fails_validation() {
    let server = MockServer::start().await;
    let (state, _rx) = common::create_test_state(&server.uri());

    let req = InitiatePaymentRequest {
        amount: "lots".into(),
        ..valid_request()
    };

    let err = PaymentService::initiate(&state, req).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn gateway_logical_failure_is_rejected_with_the_raw_body() {
    let server = MockServer::start().await;
    let (state, _rx) = common::create_test_state(&server.uri());

    Mock::given(method("POST"))
        .and(path("/v1/transaction/initialize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "failed" })))
        .mount(&server)
        .await;

    let err = PaymentService::initiate(&state, valid_request())
        .await
        .unwrap_err();

    match err {
        ApiError::GatewayRejected(raw) => assert_eq!(raw["status"], "failed"),
        other => panic!("expected GatewayRejected, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_checkout_url_is_rejected_even_when_status_is_success() {
    let server = MockServer::start().await;
    let (state, _rx) = common::create_test_state(&server.uri());

    Mock::given(method("POST"))
        .and(path("/v1/transaction/initialize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": { "reference": "G1" }
        })))
        .mount(&server)
        .await;

    let err = PaymentService::initiate(&state, valid_request())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::GatewayRejected(_)));
}

#[tokio::test]
async fn unreachable_gateway_fails_initiation_with_502_class_error() {
    let (state, _rx) = common::create_test_state("http://127.0.0.1:9");

    let err = PaymentService::initiate(&state, valid_request())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::GatewayUnavailable(_)));
}

#[tokio::test]
async fn callback_target_points_at_the_verify_endpoint() {
    let server = MockServer::start().await;
    let (state, _rx) = common::create_test_state(&server.uri());

    let target = PaymentService::callback_target(&state, Some("TRX_abc")).unwrap();
    assert_eq!(target, "http://localhost:8080/api/payments/verify/TRX_abc");
}

#[tokio::test]
async fn callback_without_tx_ref_is_a_bad_request() {
    let server = MockServer::start().await;
    let (state, _rx) = common::create_test_state(&server.uri());

    assert!(matches!(
        PaymentService::callback_target(&state, None),
        Err(ApiError::BadRequest(_))
    ));
    assert!(matches!(
        PaymentService::callback_target(&state, Some("  ")),
        Err(ApiError::BadRequest(_))
    ));
}
