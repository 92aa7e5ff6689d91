use eyre::{eyre, Report};
use secrecy::SecretString;
use std::env;

#[derive(Debug, Clone)]
pub struct SmtpInfo {
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    pub from_email: String,
}

impl SmtpInfo {
    pub fn new() -> Result<Self, Report> {
        Ok(Self {
            server: env::var("SMTP_SERVER").unwrap_or_else(|_| "localhost".into()),
            port: env::var("SMTP_PORT").unwrap_or_else(|_| "587".into()).parse()?,
            username: env::var("SMTP_USERNAME").unwrap_or_default(),
            password: SecretString::new(
                env::var("SMTP_PASSWORD").unwrap_or_default().into(),
            ),
            from_email: env::var("DEFAULT_FROM_EMAIL")
                .map_err(|_| eyre!("DEFAULT_FROM_EMAIL must be set"))?,
        })
    }
}
