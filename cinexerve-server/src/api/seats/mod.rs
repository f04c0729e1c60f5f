//! 座位 API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/seats/{showtime_id}", get(handler::list_for_showtime))
}
