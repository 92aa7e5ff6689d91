use crate::error::ApiError;
use crate::models::dtos::chapa::ChapaInitRequest;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::time::Duration;
use tracing::error;

/// Hard cap on either gateway call; expiry maps to `GatewayUnavailable`.
const GATEWAY_TIMEOUT: Duration = Duration::from_secs(20);

/// Thin wrapper over Chapa's transaction endpoints. No internal retries;
/// body interpretation is left to the caller.
#[derive(Clone)]
pub struct ChapaClient {
    http: Client,
    base_url: Url,
    secret_key: SecretString,
}

impl ChapaClient {
    pub fn new(http: Client, base_url: &str, secret_key: SecretString) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|_| ApiError::Internal("Invalid Chapa base URL".into()))?;

        Ok(Self {
            http,
            base_url,
            secret_key,
        })
    }

    pub async fn initialize(&self, payload: &ChapaInitRequest) -> Result<Value, ApiError> {
        let url = self.endpoint("v1/transaction/initialize");

        let resp = self
            .http
            .post(url)
            .bearer_auth(self.secret_key.expose_secret())
            .timeout(GATEWAY_TIMEOUT)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, tx_ref = %payload.tx_ref, "Chapa initialize unreachable");
                ApiError::GatewayUnavailable(e.to_string())
            })?;

        Self::read_json(resp).await
    }

    pub async fn verify_transaction(&self, tx_ref: &str) -> Result<Value, ApiError> {
        let url = self.endpoint(&format!("v1/transaction/verify/{tx_ref}"));

        let resp = self
            .http
            .get(url)
            .bearer_auth(self.secret_key.expose_secret())
            .timeout(GATEWAY_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, tx_ref, "Chapa verify unreachable");
                ApiError::GatewayUnavailable(e.to_string())
            })?;

        Self::read_json(resp).await
    }

    /// A non-2xx status is treated the same as a transport failure: the
    /// gateway gave us nothing we can act on.
    async fn read_json(resp: reqwest::Response) -> Result<Value, ApiError> {
        let resp = resp
            .error_for_status()
            .map_err(|e| ApiError::GatewayUnavailable(e.to_string()))?;

        resp.json::<Value>()
            .await
            .map_err(|e| ApiError::GatewayUnavailable(format!("invalid gateway response: {e}")))
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(path);
        url
    }
}
