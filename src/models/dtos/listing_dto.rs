use crate::models::dtos::{not_blank, valid_amount};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateListingRequest {
    #[validate(custom(function = "not_blank"))]
    pub title: String,

    pub description: String,

    #[validate(custom(function = "valid_amount"))]
    pub price_per_night: String,

    #[validate(range(min = 1, max = 100))]
    pub max_guests: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListingQuery {
    /// Only return listings at or below this nightly price.
    pub max_price: Option<String>,
}
