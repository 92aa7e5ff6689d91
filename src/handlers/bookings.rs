use axum::extract::{Json, Path, Query, State};
use axum::response::IntoResponse;
use diesel::prelude::*;
use http::StatusCode;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::models::dtos::booking_dto::{BookingQuery, CreateBookingRequest};
use crate::models::entities::{Booking, NewBooking};
use crate::models::{AppState, BookingStatus};
use crate::schema::{bookings, listings};

#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created"),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Unknown listing")
    ),
    tag = "Bookings"
)]
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    if req.end_date <= req.start_date {
        return Err(ApiError::BadRequest("end_date must be after start_date".into()));
    }

    let conn = &mut state.db.get()?;

    let listing_exists: Option<Uuid> = listings::table
        .find(req.listing_id)
        .select(listings::id)
        .first(conn)
        .optional()?;
    if listing_exists.is_none() {
        return Err(ApiError::NotFound(format!("No listing {}", req.listing_id)));
    }

    let booking: Booking = diesel::insert_into(bookings::table)
        .values(NewBooking {
            listing_id: req.listing_id,
            guest_email: req.guest_email.trim(),
            start_date: req.start_date,
            end_date: req.end_date,
            status: BookingStatus::Pending,
        })
        .get_result(conn)?;

    Ok((StatusCode::CREATED, Json(booking)))
}

#[utoipa::path(
    get,
    path = "/api/bookings",
    params(("listing_id" = Option<Uuid>, Query, description = "Filter by listing")),
    responses((status = 200, description = "Bookings, newest first")),
    tag = "Bookings"
)]
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BookingQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let conn = &mut state.db.get()?;

    let mut q = bookings::table
        .order(bookings::created_at.desc())
        .into_boxed();

    if let Some(listing_id) = query.listing_id {
        q = q.filter(bookings::listing_id.eq(listing_id));
    }

    let rows: Vec<Booking> = q.load(conn)?;
    Ok(Json(rows))
}

#[utoipa::path(
    delete,
    path = "/api/bookings/{id}",
    params(("id" = Uuid, Path, description = "Booking id")),
    responses(
        (status = 204, description = "Booking deleted"),
        (status = 400, description = "Confirmed bookings cannot be deleted"),
        (status = 404, description = "Unknown booking")
    ),
    tag = "Bookings"
)]
pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let conn = &mut state.db.get()?;

    let booking: Booking = bookings::table
        .find(id)
        .first(conn)
        .optional()?
        .ok_or_else(|| ApiError::NotFound(format!("No booking {id}")))?;

    if booking.status == BookingStatus::Confirmed {
        return Err(ApiError::BadRequest("Cannot delete a confirmed booking".into()));
    }

    diesel::delete(bookings::table.find(id)).execute(conn)?;
    Ok(StatusCode::NO_CONTENT)
}
