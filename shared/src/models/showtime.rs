//! Showtime Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Movie;

/// Showtime entity (场次：一部影片在某个影厅的一次放映)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Showtime {
    pub id: i64,
    pub movie_id: i64,
    pub datetime: DateTime<Utc>,
    pub cinema: String,
}

/// Create showtime payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowtimeCreate {
    pub movie_id: i64,
    pub datetime: DateTime<Utc>,
    pub cinema: String,
}

/// Update showtime payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowtimeUpdate {
    pub datetime: Option<DateTime<Utc>>,
    pub cinema: Option<String>,
}

/// Showtime with its movie (for detail views)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowtimeWithMovie {
    #[serde(flatten)]
    pub showtime: Showtime,
    pub movie: Option<Movie>,
}
