//! Seat Model

use serde::{Deserialize, Serialize};

/// Seat status: a seat is either free or sold, nothing in between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Reserved,
}

/// Seat entity (座位：属于一个场次，如 "A1")
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub id: i64,
    pub showtime_id: i64,
    pub seat_number: String,
    pub status: SeatStatus,
}
