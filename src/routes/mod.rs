// src/routes/mod.rs
pub mod chat;

use std::path::Path;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use chat::{chat_handler, method_not_allowed};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Router for `/api/chat` and `/health`, with the portfolio page served
/// from `site_dir` for everything else.
pub fn create_router(site_dir: impl AsRef<Path>) -> Router<SharedState> {
    Router::new()
        .route("/api/chat", post(chat_handler).fallback(method_not_allowed))
        .route("/health", get(|| async { "OK" }))
        .fallback_service(ServeDir::new(site_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
}
