use anyhow::Result;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
};
use tracing::info;

use super::scores::{self, ScoresState};
use crate::leaderboard::Leaderboard;

pub fn build_router(leaderboard: Arc<Leaderboard>, web_dir: Option<&str>) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = ScoresState { leaderboard };

    let mut app = Router::new()
        .route("/submit", post(scores::submit_score))
        .route("/scores", get(scores::get_scores))
        .with_state(state)
        .layer(cors);

    // Every other path serves the static game page.
    if let Some(dir) = web_dir {
        let index_path = format!("{}/index.html", dir);
        let serve_dir = ServeDir::new(dir).not_found_service(ServeFile::new(&index_path));
        app = app.fallback_service(serve_dir);
        info!("Serving static files from: {}", dir);
    }

    app
}

pub async fn run_api_server(
    addr: &str,
    leaderboard: Arc<Leaderboard>,
    web_dir: Option<&str>,
) -> Result<()> {
    let app = build_router(leaderboard, web_dir);

    let listener = TcpListener::bind(addr).await?;
    info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("API server error: {}", e))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Received shutdown signal. Shutting down gracefully...");
}
