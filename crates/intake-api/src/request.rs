//! Transport-neutral request and response model
//!
//! `IntakeRequest` mirrors the API Gateway proxy event so the same pipeline can
//! be driven from a raw event document or from the axum adapter below.

use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Header map with case-insensitive lookup. Names are lowercased on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Option<BTreeMap<String, String>>")]
pub struct RequestHeaders(BTreeMap<String, String>);

impl RequestHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_ascii_lowercase(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

impl From<Option<BTreeMap<String, String>>> for RequestHeaders {
    fn from(headers: Option<BTreeMap<String, String>>) -> Self {
        let mut result = RequestHeaders::new();
        for (name, value) in headers.unwrap_or_default() {
            result.insert(&name, value);
        }
        result
    }
}

impl From<&HeaderMap> for RequestHeaders {
    fn from(headers: &HeaderMap) -> Self {
        let mut result = RequestHeaders::new();
        for (name, value) in headers {
            // Non-UTF-8 header values carry nothing the pipeline reads
            if let Ok(value) = value.to_str() {
                result.insert(name.as_str(), value);
            }
        }
        result
    }
}

/// Inbound request in API Gateway proxy-event shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeRequest {
    pub http_method: String,
    #[serde(default)]
    pub headers: RequestHeaders,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl IntakeRequest {
    /// Build from a raw HTTP request. Binary bodies travel base64-encoded, the
    /// same way API Gateway forwards binary media.
    pub fn from_http(method: &Method, headers: &HeaderMap, body: Bytes) -> Self {
        let (body, is_base64_encoded) = match std::str::from_utf8(&body) {
            Ok(text) => (text.to_string(), false),
            Err(_) => (STANDARD.encode(&body), true),
        };

        IntakeRequest {
            http_method: method.as_str().to_string(),
            headers: RequestHeaders::from(headers),
            body: Some(body),
            is_base64_encoded,
        }
    }

    pub fn is_preflight(&self) -> bool {
        self.http_method.eq_ignore_ascii_case("OPTIONS")
    }
}

/// Outbound response in API Gateway proxy-response shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl IntakeResponse {
    pub fn json(status_code: u16, body: &serde_json::Value) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        IntakeResponse {
            status_code,
            headers,
            body: body.to_string(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}

impl IntoResponse for IntakeResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.body).into_response();
        for (name, value) in &self.headers {
            match (HeaderName::try_from(name.as_str()), HeaderValue::try_from(value.as_str())) {
                (Ok(name), Ok(value)) => {
                    response.headers_mut().insert(name, value);
                }
                _ => tracing::warn!(header = %name, "Dropping invalid response header"),
            }
        }
        response
    }
}
