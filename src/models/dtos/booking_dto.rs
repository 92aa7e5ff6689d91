use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    pub listing_id: Uuid,

    #[validate(email)]
    pub guest_email: String,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BookingQuery {
    pub listing_id: Option<Uuid>,
}
