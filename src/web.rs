//! Web server wiring: CORS, API mounting, listener

use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::api;
use crate::evaluation::Evaluator;

/// Serve the API on the given port until the process is stopped.
pub async fn run(port: u16, evaluator: Arc<Evaluator>) -> Result<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new().nest("/api", api::router(evaluator)).layer(cors);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Locale API server running at http://localhost:{}", port);
    axum::serve(listener, app)
        .await
        .with_context(|| "Server error")?;
    Ok(())
}
