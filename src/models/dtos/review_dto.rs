use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReviewRequest {
    pub listing_id: Uuid,

    #[validate(email)]
    pub guest_email: String,

    #[validate(range(min = 1, max = 5))]
    pub rating: i16,

    pub comment: Option<String>,
}
