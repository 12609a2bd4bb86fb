// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::handlers::{health_handler, index_handler, script_handler};
use super::predict::predict_handler;
use crate::config::ServerConfig;
use crate::vision::{ModelCache, Predictor};

#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<Predictor>,
}

impl AppState {
    pub fn new(predictor: Arc<Predictor>) -> Self {
        Self { predictor }
    }

    pub fn from_cache(cache: Arc<ModelCache>) -> Self {
        Self::new(Arc::new(Predictor::new(cache)))
    }
}

/// Build the application router
pub fn create_app(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/static/js/script.js", get(script_handler))
        .route("/predict", post(predict_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(config: ServerConfig) -> Result<()> {
    let cache = Arc::new(ModelCache::onnx(
        config.resolved_model_dir(),
        config.intra_threads,
    ));
    info!("Using model directory {}", cache.model_dir().display());

    let missing = cache.missing_models();
    for model in &missing {
        warn!(
            "Model {} has no artifact at {}",
            model,
            cache.model_path(*model).display()
        );
    }
    if config.require_models {
        cache
            .validate()
            .context("Model directory is incomplete")?;
    }

    let app = create_app(AppState::from_cache(cache), config.max_body_bytes);

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
