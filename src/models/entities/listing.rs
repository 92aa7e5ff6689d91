use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::{Identifiable, Insertable, Queryable};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Queryable, Identifiable, Serialize)]
#[diesel(table_name = crate::schema::listings)]
pub struct Listing {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price_per_night: BigDecimal,
    pub max_guests: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::listings)]
pub struct NewListing<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub price_per_night: &'a BigDecimal,
    pub max_guests: i32,
}
