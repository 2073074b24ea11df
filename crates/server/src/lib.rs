//! HTTP front end: the article form, PDF generation and a liveness check.

pub mod api;
pub mod config;
pub mod error;
pub mod flash;
pub mod pages;
pub mod state;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use state::AppState;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub fn app(state: AppState) -> Router {
    let body_limit = state.config.max_request_bytes();

    Router::new()
        .route("/", get(api::root))
        .route(api::pdf::INDEX_PATH, get(api::index))
        .route(api::pdf::GENERATE_PATH, post(api::generate))
        .route("/health", get(api::health_check))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
