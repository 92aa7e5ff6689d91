use crate::models::entities::enum_types::PaymentStatus;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::{Identifiable, Insertable, Queryable};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// One payment attempt against the gateway. Several rows may share a
/// `booking_reference`; `tx_ref` is the unique correlation key.
#[derive(Debug, Clone, Queryable, Identifiable, Serialize)]
#[diesel(table_name = crate::schema::payments)]
pub struct Payment {
    pub id: Uuid,
    pub booking_reference: String,
    pub amount: BigDecimal,
    pub currency: String,

    pub tx_ref: String,
    pub gateway_txn_id: String,
    pub checkout_url: String,
    pub status: PaymentStatus,

    pub raw_init_response: Value,
    pub raw_verify_response: Value,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::payments)]
pub struct NewPayment<'a> {
    pub booking_reference: &'a str,
    pub amount: &'a BigDecimal,
    pub currency: &'a str,
    pub tx_ref: &'a str,
    pub gateway_txn_id: &'a str,
    pub checkout_url: &'a str,
    pub status: PaymentStatus,
    pub raw_init_response: &'a Value,
}
