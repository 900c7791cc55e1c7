pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;
use crate::web;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Browser form
        .route("/", get(web::handle_index))
        .route("/generate", post(web::handle_submit))
        .route("/download/:kind", post(web::handle_download))
        // JSON API
        .route("/api/v1/extract", post(handlers::handle_extract))
        .route("/api/v1/generate", post(handlers::handle_generate))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
