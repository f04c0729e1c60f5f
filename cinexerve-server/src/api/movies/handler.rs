//! Movie API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use shared::models::{Movie, MovieCreate, MovieUpdate, Showtime};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// 影片列表查询参数
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// 按类型精确过滤
    pub genre: Option<String>,
}

/// 影片详情 (含场次)
#[derive(Debug, Serialize)]
pub struct MovieWithShowtimes {
    #[serde(flatten)]
    pub movie: Movie,
    pub showtimes: Vec<Showtime>,
}

/// GET /movies - 影片列表，支持 ?genre= 过滤
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Movie>> {
    Json(state.db.movies(query.genre.as_deref()))
}

/// GET /movies/{id} - 影片详情及其场次
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MovieWithShowtimes>> {
    let movie = state
        .db
        .movie(id)
        .ok_or_else(|| AppError::not_found(format!("Movie {} not found", id)))?;
    let showtimes = state.db.showtimes_for_movie(id);
    Ok(Json(MovieWithShowtimes { movie, showtimes }))
}

/// POST /movies - 创建影片
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MovieCreate>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    if payload.title.trim().is_empty() {
        return Err(AppError::validation("title required"));
    }
    let movie = state.db.create_movie(payload);
    Ok((StatusCode::CREATED, Json(movie)))
}

/// PATCH /movies/{id} - 更新影片
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MovieUpdate>,
) -> AppResult<Json<Movie>> {
    let movie = state
        .db
        .update_movie(id, payload)
        .ok_or_else(|| AppError::not_found(format!("Movie {} not found", id)))?;
    Ok(Json(movie))
}

/// DELETE /movies/{id} - 删除影片 (级联场次和座位)
///
/// 存在预订时拒绝删除。
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    if state.db.movie(id).is_none() {
        return Err(AppError::not_found(format!("Movie {} not found", id)));
    }
    if state.db.movie_has_bookings(id) {
        return Err(AppError::conflict(
            "cannot delete movie with existing bookings",
        ));
    }

    let removed = state.db.delete_movie(id);
    for (showtime_id, seat_number) in &removed {
        state.seat_index().delete(*showtime_id, seat_number);
    }

    tracing::info!(movie_id = id, seats_removed = removed.len(), "Movie deleted");
    Ok(Json(json!({ "ok": true })))
}
