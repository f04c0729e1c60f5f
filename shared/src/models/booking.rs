//! Booking Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Booking entity (一个用户对一个场次一个座位的已确认预订)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub user_name: String,
    pub showtime_id: i64,
    pub seat_number: String,
    pub created_at: DateTime<Utc>,
}

/// The immutable input to one queued booking attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub user_name: String,
    pub showtime_id: i64,
    pub seat_number: String,
}

/// Successful booking confirmation returned to the submitter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub booking_id: i64,
}

/// Booking enriched with showtime/movie context (for history and admin views)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingView {
    pub id: i64,
    pub user_name: String,
    pub seat_number: String,
    pub created_at: DateTime<Utc>,
    pub showtime_id: i64,
    pub movie_title: Option<String>,
    pub cinema: Option<String>,
    pub datetime: Option<DateTime<Utc>>,
}
