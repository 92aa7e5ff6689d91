use crate::config::chapa_details::ChapaInfo;
use crate::config::smtp_details::SmtpInfo;
use eyre::Report;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL this service is reachable at, used to build the
    /// verification redirect target for the gateway callback.
    pub app_url: String,

    pub chapa: ChapaInfo,

    pub smtp: SmtpInfo,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Report> {
        Ok(Self {
            app_url: env::var("APP_URL").unwrap_or_else(|_| "http://localhost:8080".into()),

            chapa: ChapaInfo::new()?,

            smtp: SmtpInfo::new()?,
        })
    }
}
