use chrono::Utc;
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::entities::payment::{NewPayment, Payment};
use crate::models::entities::enum_types::PaymentStatus;
use crate::schema::payments;

pub struct PaymentRepository;

impl PaymentRepository {
    pub fn find_by_tx_ref(
        conn: &mut PgConnection,
        tx_ref: &str,
    ) -> Result<Option<Payment>, ApiError> {
        payments::table
            .filter(payments::tx_ref.eq(tx_ref))
            .first::<Payment>(conn)
            .optional()
            .map_err(ApiError::from)
    }

    /// Row-locked lookup; serializes concurrent verifications of the same
    /// tx_ref. Must run inside a transaction.
    pub fn find_by_tx_ref_for_update(
        conn: &mut PgConnection,
        tx_ref: &str,
    ) -> Result<Option<Payment>, ApiError> {
        payments::table
            .filter(payments::tx_ref.eq(tx_ref))
            .for_update()
            .first::<Payment>(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn create(conn: &mut PgConnection, new_payment: NewPayment) -> Result<Payment, ApiError> {
        diesel::insert_into(payments::table)
            .values(&new_payment)
            .get_result::<Payment>(conn)
            .map_err(ApiError::from)
    }

    /// The single verify-write: raw response, status, optional txn-id
    /// back-fill, and the updated timestamp, all in one statement.
    pub fn record_verification(
        conn: &mut PgConnection,
        id: Uuid,
        status: PaymentStatus,
        gateway_txn_id: Option<&str>,
        raw_verify_response: &Value,
    ) -> Result<(), ApiError> {
        match gateway_txn_id {
            Some(txn_id) => diesel::update(payments::table.find(id))
                .set((
                    payments::raw_verify_response.eq(raw_verify_response),
                    payments::status.eq(status),
                    payments::gateway_txn_id.eq(txn_id),
                    payments::updated_at.eq(Utc::now()),
                ))
                .execute(conn),
            None => diesel::update(payments::table.find(id))
                .set((
                    payments::raw_verify_response.eq(raw_verify_response),
                    payments::status.eq(status),
                    payments::updated_at.eq(Utc::now()),
                ))
                .execute(conn),
        }
        .map_err(ApiError::from)?;

        Ok(())
    }
}
