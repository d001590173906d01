use std::sync::Arc;

mod core;
mod error_handler;
mod middleware_layer;
mod routes;

pub use crate::core::{
    app_state::{AppConfig, AppState},
    session_cookie::SESSION_COOKIE,
};
pub use crate::error_handler::{AppError, AppResult};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use tokio::signal;
use tracing::{error, info};

use crate::routes::{
    autocomplete::autocomplete_route::autocomplete_route,
    chat::chat_route::chat_route,
    clear::{clear_all_route::clear_all_route, clear_chat_route::clear_chat_route},
    health_route::health_route,
    upload::upload_route::upload_route,
};

/// Builds the router with all routes and layers.
pub fn create_app(state: Arc<AppState>) -> Router {
    let body_limit = state.config.upload_max_bytes;

    Router::new()
        .route("/upload", post(upload_route))
        .route("/chat", post(chat_route))
        .route("/clear_chat", post(clear_chat_route))
        .route("/clear_all", post(clear_all_route))
        .route("/autocomplete", get(autocomplete_route))
        .route("/health", get(health_route))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(middleware_layer::request_id::request_id))
        .with_state(state)
}

/// Loads state from the environment and serves until Ctrl+C.
pub async fn start() -> AppResult<()> {
    let state = AppState::from_env()?;
    let host_url = state.config.address.clone();
    let app = create_app(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;
    info!(address = %host_url, "api: listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("api: stopped");
    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "api: failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
