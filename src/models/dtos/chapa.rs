use serde::Serialize;

/// Body for Chapa's `POST /v1/transaction/initialize`.
#[derive(Debug, Serialize)]
pub struct ChapaInitRequest {
    pub amount: String,
    pub currency: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub tx_ref: String,
    pub callback_url: String,
    pub return_url: String,
    pub customization: ChapaCustomization,
}

#[derive(Debug, Serialize)]
pub struct ChapaCustomization {
    pub title: String,
    pub description: String,
}
