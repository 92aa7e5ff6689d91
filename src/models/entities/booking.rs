use crate::models::entities::enum_types::BookingStatus;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::{Associations, Identifiable, Insertable, Queryable};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Queryable, Identifiable, Associations, Serialize)]
#[diesel(table_name = crate::schema::bookings)]
#[diesel(belongs_to(crate::models::entities::listing::Listing))]
pub struct Booking {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub guest_email: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::bookings)]
pub struct NewBooking<'a> {
    pub listing_id: Uuid,
    pub guest_email: &'a str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: BookingStatus,
}
