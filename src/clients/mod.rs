pub mod chapa;
pub mod email;

pub use chapa::ChapaClient;
pub use email::EmailClient;
