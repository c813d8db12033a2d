//! Route configuration and setup

use crate::constants::{HEALTH_PATH, QUOTES_PATH, SUBMISSIONS_PATH};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use intake_core::Config;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router {
    build_router(state, config.max_body_size_bytes())
}

/// Router with the submission, quote listing and health routes.
pub fn build_router(state: Arc<AppState>, max_body_size_bytes: usize) -> Router {
    tracing::info!(max_body_size_bytes, "Request body limit configured");

    let submit = post(handlers::submission::submit).options(handlers::submission::submit);

    Router::new()
        .route(SUBMISSIONS_PATH, submit.clone())
        .route(QUOTES_PATH, submit.get(handlers::quotes::list_quotes))
        .route(HEALTH_PATH, get(handlers::health::health_check))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(max_body_size_bytes))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
}
