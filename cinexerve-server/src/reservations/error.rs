use shared::models::BookingConfirmation;
use thiserror::Error;

/// Reservation errors
///
/// Failures are always local to one queued request: they resolve that
/// request's outcome handle and never abort the drain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReservationError {
    #[error("seat not found: {seat_number} (showtime {showtime_id})")]
    SeatNotFound { showtime_id: i64, seat_number: String },

    #[error("seat already reserved: {seat_number} (showtime {showtime_id})")]
    SeatNotAvailable { showtime_id: i64, seat_number: String },

    /// The processor is gone (channel closed). Submitters should treat the
    /// reservation as failed with unknown state.
    #[error("reservation processor unavailable")]
    Unavailable,
}

impl ReservationError {
    pub fn seat_not_found(showtime_id: i64, seat_number: impl Into<String>) -> Self {
        Self::SeatNotFound {
            showtime_id,
            seat_number: seat_number.into(),
        }
    }

    pub fn seat_not_available(showtime_id: i64, seat_number: impl Into<String>) -> Self {
        Self::SeatNotAvailable {
            showtime_id,
            seat_number: seat_number.into(),
        }
    }
}

/// The outcome delivered through a request's oneshot channel
pub type ReservationOutcome = Result<BookingConfirmation, ReservationError>;
