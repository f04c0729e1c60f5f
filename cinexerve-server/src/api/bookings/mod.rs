//! 预订 API 模块
//!
//! 预订接口挂载在根路径而非 `/bookings` 下。

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/book", post(handler::book))
        .route("/cancel/{booking_id}", delete(handler::cancel))
        .route("/history/me", get(handler::history_me))
        .route("/history/{user}", get(handler::history_for_user))
        .route("/reservations", get(handler::reservations))
}
