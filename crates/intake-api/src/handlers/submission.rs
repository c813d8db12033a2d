use crate::request::IntakeRequest;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, Method},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use std::sync::Arc;

/// `POST`/`OPTIONS` on the submission routes.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = IntakeRequest::from_http(&method, &headers, body);
    state.intake.handle(request).await.into_response()
}
