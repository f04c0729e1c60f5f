//! Seat API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::Seat;

use crate::core::ServerState;

/// GET /seats/{showtime_id} - 场次座位图，按座位号排序
///
/// 读取权威存储而非索引；座位图用于购票前展示，必须与真实状态一致。
pub async fn list_for_showtime(
    State(state): State<ServerState>,
    Path(showtime_id): Path<i64>,
) -> Json<Vec<Seat>> {
    Json(state.db.seats_for_showtime(showtime_id))
}
