use eyre::{eyre, Report};
use secrecy::SecretString;
use std::env;

#[derive(Debug, Clone)]
pub struct ChapaInfo {
    pub secret_key: SecretString,
    pub base_url: String,
    /// Public base URL the payer is redirected back to after checkout.
    /// `?tx_ref=...` is appended per transaction.
    pub return_url: String,
}

impl ChapaInfo {
    pub fn new() -> Result<Self, Report> {
        Ok(Self {
            secret_key: SecretString::new(
                env::var("CHAPA_SECRET_KEY")
                    .map_err(|_| eyre!("CHAPA_SECRET_KEY must be set"))?
                    .into(),
            ),
            base_url: env::var("CHAPA_BASE_URL")
                .unwrap_or_else(|_| "https://api.chapa.co".into()),
            return_url: env::var("CHAPA_RETURN_URL")
                .unwrap_or_else(|_| "http://localhost:8080/api/payments/callback".into()),
        })
    }
}
