pub mod estimate;
pub mod form;
pub mod format;
pub mod health;
pub mod pages;
pub mod printers;

use crate::middleware;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.max_upload_bytes;
    let static_dir = ServeDir::new(&state.config.static_dir);

    Router::new()
        // Pages
        .route("/", get(pages::home))
        .route("/estimate", post(estimate::estimate_page))
        // API
        .route("/api/v1/estimate", post(estimate::estimate_api))
        .route("/api/v1/printers", get(printers::list_printers))
        // Health
        .route("/health", get(health::health_check))
        // Static files
        .nest_service("/static", static_dir)
        // Middleware layers (applied bottom-up)
        .layer(CompressionLayer::new())
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload))
        .layer(axum::middleware::from_fn(
            middleware::security_headers::security_headers,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
