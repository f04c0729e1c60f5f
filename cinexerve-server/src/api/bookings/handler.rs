//! Booking API Handlers
//!
//! `/book` 是唯一经过预订队列的写路径；取消直接修改存储和索引，
//! 只有预订之间相互串行。

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use shared::models::{
    Booking, BookingConfirmation, BookingView, ReservationRequest, SeatStatus,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// 预订请求体
///
/// `user_name` 仅为兼容保留；实际使用令牌中的邮箱。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    #[allow(dead_code)]
    pub user_name: Option<String>,
    pub showtime_id: i64,
    pub seat_number: String,
}

/// POST /book - 预订一个座位
///
/// 提交到预订队列并等待结果。乐观预检的拒绝和处理器的拒绝
/// 对调用方是同一种 409。
pub async fn book(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<BookRequest>,
) -> AppResult<Json<BookingConfirmation>> {
    if payload.seat_number.trim().is_empty() {
        return Err(AppError::validation("invalid payload"));
    }

    let request = ReservationRequest {
        user_name: current.email.clone(),
        showtime_id: payload.showtime_id,
        seat_number: payload.seat_number,
    };

    let handle = state.reservations.submit(request).await?;
    let confirmation = handle.wait().await?;
    Ok(Json(confirmation))
}

/// DELETE /cancel/{booking_id} - 取消预订
///
/// 直接将座位翻回 available 并删除预订记录；只有预订之间相互串行，
/// 取消不经过队列。
pub async fn cancel(
    State(state): State<ServerState>,
    Extension(_current): Extension<CurrentUser>,
    Path(booking_id): Path<i64>,
) -> AppResult<Json<Value>> {
    let booking = state
        .db
        .booking(booking_id)
        .ok_or_else(|| AppError::not_found("not found"))?;

    if state
        .db
        .set_seat_status(booking.showtime_id, &booking.seat_number, SeatStatus::Available)
    {
        state
            .seat_index()
            .set(booking.showtime_id, &booking.seat_number, SeatStatus::Available);
    }
    state.db.remove_booking(booking_id);

    tracing::info!(
        booking_id,
        showtime_id = booking.showtime_id,
        seat = %booking.seat_number,
        "Booking cancelled"
    );
    Ok(Json(json!({ "ok": true })))
}

/// GET /history/me - 当前用户的预订历史，最新在前
pub async fn history_me(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
) -> Json<Vec<BookingView>> {
    let bookings = state.db.bookings_for_user(&current.email);
    Json(to_views(&state, bookings))
}

/// GET /history/{user} - 任意用户的预订历史 (公开)
pub async fn history_for_user(
    State(state): State<ServerState>,
    Path(user): Path<String>,
) -> Json<Vec<BookingView>> {
    let bookings = state.db.bookings_for_user(&user);
    Json(to_views(&state, bookings))
}

/// GET /reservations - 全部预订，最新在前 (管理面板数据源)
pub async fn reservations(State(state): State<ServerState>) -> Json<Vec<BookingView>> {
    let bookings = state.db.all_bookings();
    Json(to_views(&state, bookings))
}

/// 用场次和影片信息充实预订记录
fn to_views(state: &ServerState, bookings: Vec<Booking>) -> Vec<BookingView> {
    bookings
        .into_iter()
        .map(|b| {
            let showtime = state.db.showtime(b.showtime_id);
            let movie_title = showtime
                .as_ref()
                .and_then(|s| state.db.movie(s.movie_id))
                .map(|m| m.title);
            BookingView {
                id: b.id,
                user_name: b.user_name,
                seat_number: b.seat_number,
                created_at: b.created_at,
                showtime_id: b.showtime_id,
                movie_title,
                cinema: showtime.as_ref().map(|s| s.cinema.clone()),
                datetime: showtime.as_ref().map(|s| s.datetime),
            }
        })
        .collect()
}
