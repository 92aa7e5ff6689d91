pub mod bookings;
pub mod chapa_callback;
pub mod health;
pub mod initiate_payment;
pub mod listings;
pub mod reviews;
pub mod verify_payment;
