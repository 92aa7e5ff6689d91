use axum::extract::{Json, Path, Query, State};
use axum::response::IntoResponse;
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use http::StatusCode;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::models::dtos::listing_dto::{CreateListingRequest, ListingQuery};
use crate::models::entities::{Listing, NewListing, Review};
use crate::models::AppState;
use crate::schema::{listings, reviews};

#[utoipa::path(
    post,
    path = "/api/listings",
    request_body = CreateListingRequest,
    responses(
        (status = 201, description = "Listing created"),
        (status = 400, description = "Invalid input")
    ),
    tag = "Listings"
)]
pub async fn create_listing(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateListingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let price = BigDecimal::from_str(req.price_per_night.trim())
        .map_err(|_| ApiError::BadRequest("price_per_night must be a decimal".into()))?;

    let conn = &mut state.db.get()?;
    let listing: Listing = diesel::insert_into(listings::table)
        .values(NewListing {
            title: req.title.trim(),
            description: req.description.trim(),
            price_per_night: &price,
            max_guests: req.max_guests,
        })
        .get_result(conn)?;

    Ok((StatusCode::CREATED, Json(listing)))
}

#[utoipa::path(
    get,
    path = "/api/listings",
    params(("max_price" = Option<String>, Query, description = "Maximum nightly price")),
    responses((status = 200, description = "Listings, newest first")),
    tag = "Listings"
)]
pub async fn list_listings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListingQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let conn = &mut state.db.get()?;

    let mut q = listings::table
        .order(listings::created_at.desc())
        .into_boxed();

    if let Some(max_price) = query.max_price.as_deref() {
        let cap = BigDecimal::from_str(max_price.trim())
            .map_err(|_| ApiError::BadRequest("max_price must be a decimal".into()))?;
        q = q.filter(listings::price_per_night.le(cap));
    }

    let rows: Vec<Listing> = q.load(conn)?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/listings/{id}",
    params(("id" = Uuid, Path, description = "Listing id")),
    responses(
        (status = 200, description = "The listing"),
        (status = 404, description = "Unknown listing")
    ),
    tag = "Listings"
)]
pub async fn get_listing(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let conn = &mut state.db.get()?;

    let listing: Listing = listings::table
        .find(id)
        .first(conn)
        .optional()?
        .ok_or_else(|| ApiError::NotFound(format!("No listing {id}")))?;

    Ok(Json(listing))
}

#[utoipa::path(
    get,
    path = "/api/listings/{id}/reviews",
    params(("id" = Uuid, Path, description = "Listing id")),
    responses(
        (status = 200, description = "Reviews for the listing"),
        (status = 404, description = "Unknown listing")
    ),
    tag = "Listings"
)]
pub async fn listing_reviews(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let conn = &mut state.db.get()?;

    let exists: Option<Uuid> = listings::table
        .find(id)
        .select(listings::id)
        .first(conn)
        .optional()?;
    if exists.is_none() {
        return Err(ApiError::NotFound(format!("No listing {id}")));
    }

    let rows: Vec<Review> = reviews::table
        .filter(reviews::listing_id.eq(id))
        .order(reviews::created_at.desc())
        .load(conn)?;

    Ok(Json(rows))
}
