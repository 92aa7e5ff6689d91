pub mod booking;
pub mod enum_types;
pub mod listing;
pub mod payment;
pub mod review;

pub use booking::{Booking, NewBooking};
pub use listing::{Listing, NewListing};
pub use payment::{NewPayment, Payment};
pub use review::{NewReview, Review};
