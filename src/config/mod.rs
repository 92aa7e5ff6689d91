pub mod app_config;
pub mod chapa_details;
pub mod smtp_details;
pub mod swagger_config;

pub use app_config::AppConfig;
pub use chapa_details::ChapaInfo;
pub use smtp_details::SmtpInfo;
