use chrono::{DateTime, Utc};
use diesel::{Associations, Identifiable, Insertable, Queryable};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Queryable, Identifiable, Associations, Serialize)]
#[diesel(table_name = crate::schema::reviews)]
#[diesel(belongs_to(crate::models::entities::listing::Listing))]
pub struct Review {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub guest_email: String,
    pub rating: i16,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::reviews)]
pub struct NewReview<'a> {
    pub listing_id: Uuid,
    pub guest_email: &'a str,
    pub rating: i16,
    pub comment: &'a str,
}
