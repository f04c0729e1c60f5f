//! Shared types for CineXerve
//!
//! Domain models used across crates: movies, showtimes, seats, bookings
//! and users. JSON field names are camelCase where they are multi-word,
//! matching the public API wire format.

pub mod models;

// Re-exports
pub use models::{
    Booking, BookingConfirmation, BookingView, Movie, MovieCreate, MovieUpdate,
    ReservationRequest, Seat, SeatStatus, Showtime, ShowtimeCreate, ShowtimeUpdate,
    ShowtimeWithMovie, User, UserPublic,
};
