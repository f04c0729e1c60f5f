//! 场次 API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/showtimes", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/by-id/{id}", get(handler::get_by_id))
        // GET 按影片查场次，PATCH/DELETE 按场次 ID 操作
        .route(
            "/{id}",
            get(handler::list_for_movie)
                .patch(handler::update)
                .delete(handler::delete),
        )
}
