//! Showtime API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};
use shared::models::{
    SeatStatus, Showtime, ShowtimeCreate, ShowtimeUpdate, ShowtimeWithMovie,
};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// GET /showtimes/{movie_id} - 影片的场次列表，按放映时间升序
pub async fn list_for_movie(
    State(state): State<ServerState>,
    Path(movie_id): Path<i64>,
) -> Json<Vec<Showtime>> {
    Json(state.db.showtimes_for_movie(movie_id))
}

/// GET /showtimes/by-id/{id} - 场次详情及其影片
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ShowtimeWithMovie>> {
    let showtime = state
        .db
        .showtime(id)
        .ok_or_else(|| AppError::not_found(format!("Showtime {} not found", id)))?;
    let movie = state.db.movie(showtime.movie_id);
    Ok(Json(ShowtimeWithMovie { showtime, movie }))
}

/// POST /showtimes - 创建场次并批量生成座位
///
/// 座位布局 A-D × 1-10，全部 available，并同步写入座位状态索引。
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ShowtimeCreate>,
) -> AppResult<(StatusCode, Json<Showtime>)> {
    if payload.cinema.trim().is_empty() {
        return Err(AppError::validation("invalid payload"));
    }

    let showtime = state.db.create_showtime(payload);
    for seat in state.db.create_seats_for_showtime(showtime.id) {
        state
            .seat_index()
            .set(showtime.id, &seat.seat_number, SeatStatus::Available);
    }

    tracing::info!(showtime_id = showtime.id, movie_id = showtime.movie_id, "Showtime created");
    Ok((StatusCode::CREATED, Json(showtime)))
}

/// PATCH /showtimes/{id} - 更新放映时间或影厅
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ShowtimeUpdate>,
) -> AppResult<Json<Showtime>> {
    let showtime = state
        .db
        .update_showtime(id, payload)
        .ok_or_else(|| AppError::not_found(format!("Showtime {} not found", id)))?;
    Ok(Json(showtime))
}

/// DELETE /showtimes/{id} - 删除场次及其座位
///
/// 存在预订时拒绝删除。
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    if state.db.showtime(id).is_none() {
        return Err(AppError::not_found(format!("Showtime {} not found", id)));
    }
    if state.db.showtime_has_bookings(id) {
        return Err(AppError::conflict(
            "cannot delete showtime with existing bookings",
        ));
    }

    let removed = state.db.delete_showtime(id);
    for (showtime_id, seat_number) in &removed {
        state.seat_index().delete(*showtime_id, seat_number);
    }

    Ok(Json(json!({ "ok": true })))
}
