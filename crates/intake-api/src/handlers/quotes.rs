use crate::request::RequestHeaders;
use crate::services::QuoteScope;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// `GET /quotes`, optionally narrowed by `tpaId`, `brokerId` and `employerId`.
pub async fn list_quotes(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(scope): Query<QuoteScope>,
) -> Response {
    let headers = RequestHeaders::from(&headers);
    state.intake.list_quotes(&headers, &scope).await.into_response()
}
