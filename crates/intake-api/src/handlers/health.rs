use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub environment: String,
    pub storage: String,
    pub email_enabled: bool,
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        environment: state.config.environment().to_string(),
        storage: state.intake.storage_backend().to_string(),
        email_enabled: state.intake.notifications_enabled(),
    })
}
