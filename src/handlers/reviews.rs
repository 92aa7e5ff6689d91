use axum::extract::{Json, State};
use axum::response::IntoResponse;
use diesel::prelude::*;
use http::StatusCode;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::models::dtos::review_dto::CreateReviewRequest;
use crate::models::entities::{NewReview, Review};
use crate::models::AppState;
use crate::schema::{listings, reviews};

#[utoipa::path(
    post,
    path = "/api/reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created"),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Unknown listing")
    ),
    tag = "Reviews"
)]
pub async fn create_review(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateReviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let conn = &mut state.db.get()?;

    let listing_exists: Option<Uuid> = listings::table
        .find(req.listing_id)
        .select(listings::id)
        .first(conn)
        .optional()?;
    if listing_exists.is_none() {
        return Err(ApiError::NotFound(format!("No listing {}", req.listing_id)));
    }

    let review: Review = diesel::insert_into(reviews::table)
        .values(NewReview {
            listing_id: req.listing_id,
            guest_email: req.guest_email.trim(),
            rating: req.rating,
            comment: req.comment.as_deref().unwrap_or("").trim(),
        })
        .get_result(conn)?;

    Ok((StatusCode::CREATED, Json(review)))
}
