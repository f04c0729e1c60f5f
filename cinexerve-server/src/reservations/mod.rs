//! Seat Reservation Module
//!
//! The one place in this codebase where correctness depends on ordering and
//! mutual exclusion rather than plain request/response mapping. Booking a
//! seat is a read-check-mutate sequence; this module serializes it:
//!
//! - **queue**: strict FIFO queue of pending requests, each carrying a
//!   oneshot outcome channel
//! - **seat_map**: fast seat-status index for the optimistic pre-check
//!   (a cache, never the commit authority)
//! - **processor**: the single worker task that owns the queue, drains it
//!   in arrival order and is the only writer of seats and bookings on the
//!   booking path
//! - **service**: the submission facade handed to the HTTP layer
//!
//! # Data Flow
//!
//! ```text
//! submit(request)
//!     ├─ index pre-check ── known reserved ──► immediate rejection
//!     └─ mpsc ──► ReservationProcessor (single owner)
//!                     ├─ re-validate against Database   ◄── the actual
//!                     ├─ mutate seat + append booking       correctness
//!                     ├─ update SeatStatusIndex             mechanism
//!                     └─ oneshot ──► OutcomeHandle::wait()
//! ```
//!
//! There is exactly one receiver, so at most one drain pass ever runs;
//! overlapping submissions join the active drain through the channel
//! instead of spawning a second one. No seat can be sold twice because
//! every commit re-reads the authoritative store immediately before
//! mutating it, and only this worker mutates it.
//!
//! Cancellation is the documented exception: it edits the store and the
//! index directly (see the bookings API) and is not serialized against
//! the drain.

pub mod error;
pub mod processor;
pub mod queue;
pub mod seat_map;
pub mod service;

#[cfg(test)]
mod tests;

// Re-exports
pub use error::{ReservationError, ReservationOutcome};
pub use processor::ReservationProcessor;
pub use queue::{QueueItem, ReservationQueue};
pub use seat_map::SeatStatusIndex;
pub use service::{OutcomeHandle, ReservationService};

// Re-export shared types for convenience
pub use shared::models::{BookingConfirmation, ReservationRequest, SeatStatus};
