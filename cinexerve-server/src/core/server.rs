//! Server Implementation
//!
//! HTTP 服务器启动和路由装配

use axum::{Router, middleware};
use tokio_util::sync::CancellationToken;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api;
use crate::auth;
use crate::core::{Config, ServerState};
use crate::reservations::ReservationProcessor;

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
    processor: Option<ReservationProcessor>,
}

impl Server {
    /// Create server with existing state and the (not yet running) reservation processor
    pub fn with_state(
        config: Config,
        state: ServerState,
        processor: ReservationProcessor,
    ) -> Self {
        Self {
            config,
            state,
            processor: Some(processor),
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        let shutdown = CancellationToken::new();

        // Start the reservation processor, the single writer for bookings
        if let Some(processor) = self.processor.take() {
            let token = shutdown.clone();
            tokio::spawn(async move {
                processor.run(token).await;
            });
        }

        let app = router(self.state.clone());

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(
            "🎬 CineXerve API listening on http://localhost:{}",
            self.config.http_port
        );

        let token = shutdown.clone();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
                token.cancel();
            })
            .await?;

        Ok(())
    }
}

/// 装配应用路由
///
/// - `/health`、`/auth/*`、`/movies/*`、`/showtimes/*`、`/seats/*`
/// - 预订接口挂载在根路径 (`/book`、`/cancel/*`、`/history/*`、`/reservations`)
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(api::health::router())
        .merge(api::auth::router())
        .merge(api::movies::router())
        .merge(api::showtimes::router())
        .merge(api::seats::router())
        .merge(api::bookings::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
