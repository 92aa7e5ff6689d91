use axum::Router;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::swagger_config::ApiDoc;
use crate::handlers::{
    bookings::{create_booking, delete_booking, list_bookings},
    chapa_callback::chapa_callback,
    health::health,
    initiate_payment::initiate_payment,
    listings::{create_listing, get_listing, list_listings, listing_reviews},
    reviews::create_review,
    verify_payment::verify_payment,
};
use crate::models::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", axum::routing::get(health))
        .route(
            "/api/payments/initiate",
            axum::routing::post(initiate_payment),
        )
        .route(
            "/api/payments/verify/{tx_ref}",
            axum::routing::get(verify_payment),
        )
        .route(
            "/api/payments/callback",
            axum::routing::get(chapa_callback),
        )
        .route(
            "/api/listings",
            axum::routing::post(create_listing).get(list_listings),
        )
        .route("/api/listings/{id}", axum::routing::get(get_listing))
        .route(
            "/api/listings/{id}/reviews",
            axum::routing::get(listing_reviews),
        )
        .route(
            "/api/bookings",
            axum::routing::post(create_booking).get(list_bookings),
        )
        .route("/api/bookings/{id}", axum::routing::delete(delete_booking))
        .route("/api/reviews", axum::routing::post(create_review))
        .with_state(state)
}
