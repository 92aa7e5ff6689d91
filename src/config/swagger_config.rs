use crate::models::dtos::booking_dto::CreateBookingRequest;
use crate::models::dtos::listing_dto::CreateListingRequest;
use crate::models::dtos::payment_dto::{
    InitiatePaymentRequest, InitiatePaymentResponse, VerifyPaymentResponse,
};
use crate::models::dtos::review_dto::CreateReviewRequest;
use crate::models::entities::enum_types::{BookingStatus, PaymentStatus};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health,
        crate::handlers::initiate_payment::initiate_payment,
        crate::handlers::verify_payment::verify_payment,
        crate::handlers::chapa_callback::chapa_callback,
        crate::handlers::listings::create_listing,
        crate::handlers::listings::list_listings,
        crate::handlers::listings::get_listing,
        crate::handlers::listings::listing_reviews,
        crate::handlers::bookings::create_booking,
        crate::handlers::bookings::list_bookings,
        crate::handlers::bookings::delete_booking,
        crate::handlers::reviews::create_review,
    ),
    components(schemas(
        InitiatePaymentRequest,
        InitiatePaymentResponse,
        VerifyPaymentResponse,
        CreateListingRequest,
        CreateBookingRequest,
        CreateReviewRequest,
        PaymentStatus,
        BookingStatus,
    )),
    tags(
        (name = "Payments", description = "Payment initiation and verification"),
        (name = "Listings", description = "Travel listings"),
        (name = "Bookings", description = "Listing bookings"),
        (name = "Reviews", description = "Listing reviews"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;
