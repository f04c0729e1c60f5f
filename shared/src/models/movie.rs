//! Movie Model

use serde::{Deserialize, Serialize};

/// Movie entity (影片)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub genre: Option<String>,
    /// Runtime in minutes
    pub duration: Option<i32>,
    pub description: Option<String>,
    pub rating: Option<String>,
    /// Screening formats, e.g. ["2D", "IMAX"]
    pub formats: Option<Vec<String>>,
}

/// Create movie payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieCreate {
    pub title: String,
    pub genre: Option<String>,
    pub duration: Option<i32>,
    pub description: Option<String>,
    pub rating: Option<String>,
    pub formats: Option<Vec<String>>,
}

/// Update movie payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieUpdate {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub duration: Option<i32>,
    pub description: Option<String>,
    pub rating: Option<String>,
    pub formats: Option<Vec<String>>,
}
