//! 健康检查接口

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

/// GET /health - 存活检查
async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}
