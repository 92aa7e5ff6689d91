use reqwest::Client;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{bearer_token, body_json_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wayfarer::clients::ChapaClient;
use wayfarer::error::ApiError;
use wayfarer::models::dtos::chapa::{ChapaCustomization, ChapaInitRequest};

fn client(base_url: &str) -> ChapaClient {
    ChapaClient::new(
        Client::new(),
        base_url,
        SecretString::from("test_chapa_secret"),
    )
    .unwrap()
}

fn init_payload() -> ChapaInitRequest {
    ChapaInitRequest {
        amount: "100.00".into(),
        currency: "ETB".into(),
        email: "a@b.com".into(),
        first_name: "A".into(),
        last_name: "B".into(),
        tx_ref: "TRX_abc123".into(),
        callback_url: "http://localhost:8080/api/payments/callback?tx_ref=TRX_abc123".into(),
        return_url: "http://localhost:8080/api/payments/callback?tx_ref=TRX_abc123".into(),
        customization: ChapaCustomization {
            title: "Wayfarer Travel Booking".into(),
            description: "Booking BK1".into(),
        },
    }
}

#[tokio::test]
async fn initialize_posts_bearer_authenticated_json_and_returns_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/transaction/initialize"))
        .and(bearer_token("test_chapa_secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": { "checkout_url": "https://pay/x", "reference": "G1" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let body = client(&server.uri())
        .initialize(&init_payload())
        .await
        .unwrap();

    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["checkout_url"], "https://pay/x");
}

#[tokio::test]
async fn verify_hits_the_tx_ref_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/transaction/verify/TRX_abc123"))
        .and(bearer_token("test_chapa_secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": { "status": "success" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let body = client(&server.uri())
        .verify_transaction("TRX_abc123")
        .await
        .unwrap();

    assert_eq!(body["data"]["status"], "success");
}

#[tokio::test]
async fn http_error_status_maps_to_gateway_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client(&server.uri())
        .verify_transaction("TRX_abc123")
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::GatewayUnavailable(_)));
}

#[tokio::test]
async fn unreachable_gateway_maps_to_gateway_unavailable() {
    // Nothing listens on this port.
    let err = client("http://127.0.0.1:9")
        .initialize(&init_payload())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::GatewayUnavailable(_)));
}

#[tokio::test]
async fn non_json_body_maps_to_gateway_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = client(&server.uri())
        .initialize(&init_payload())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::GatewayUnavailable(_)));
}

#[tokio::test]
async fn initialize_sends_the_exact_request_shape() {
    let server = MockServer::start().await;

    let expected = serde_json::to_string(&init_payload()).unwrap();
    Mock::given(method("POST"))
        .and(path("/v1/transaction/initialize"))
        .and(body_json_string(expected))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server.uri())
        .initialize(&init_payload())
        .await
        .unwrap();
}
