//! Data models
//!
//! Shared between the server and the frontend (via API).
//! All IDs are `i64`, allocated sequentially by the in-memory store.

pub mod booking;
pub mod movie;
pub mod seat;
pub mod showtime;
pub mod user;

// Re-exports
pub use booking::*;
pub use movie::*;
pub use seat::*;
pub use showtime::*;
pub use user::*;
