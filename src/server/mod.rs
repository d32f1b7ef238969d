//! HTTP trigger endpoint
//!
//! A minimal axum service exposing `GET /crawl-now`, which runs one full
//! crawl pass and reports success or failure in the response body. Crawls
//! run inline with the request, so the response arrives when the run ends.

use crate::config::{Config, StoreCredentials};
use crate::crawler::run_crawl_once;
use crate::Result;
use axum::extract::Extension;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

/// Shared state handed to request handlers
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
    credentials: Arc<StoreCredentials>,
}

/// Builds the trigger router
fn build_router(config: Arc<Config>, credentials: Arc<StoreCredentials>) -> Router {
    let state = AppState {
        config,
        credentials,
    };

    Router::new()
        .route("/crawl-now", get(crawl_now))
        .layer(Extension(state))
}

async fn crawl_now(Extension(state): Extension<AppState>) -> (StatusCode, String) {
    tracing::info!("Crawl triggered via /crawl-now");
    match run_crawl_once(state.config.clone(), &state.credentials).await {
        Ok(summary) => (
            StatusCode::OK,
            format!("Crawl triggered successfully: {}", summary.describe()),
        ),
        Err(e) => {
            tracing::error!("Triggered crawl failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error triggering crawl: {}", e),
            )
        }
    }
}

/// Binds the trigger endpoint and serves until the process exits
pub async fn serve(config: Arc<Config>, credentials: StoreCredentials) -> Result<()> {
    let port = config.server.port;
    let router = build_router(config, Arc::new(credentials));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("Trigger endpoint listening on port {}", port);
    axum::serve(listener, router).await?;
    Ok(())
}
