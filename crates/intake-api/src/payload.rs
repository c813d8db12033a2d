//! Request body normalization
//!
//! Turns a JSON or multipart body into named scalar fields plus named file
//! attachments.

use crate::error::IntakeError;
use axum::body::Body;
use axum::extract::{DefaultBodyLimit, FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use intake_core::constants::DEFAULT_ATTACHMENT_CONTENT_TYPE;
use intake_core::Attachment;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::convert::Infallible;
use tower::{service_fn, Layer, ServiceExt};

/// Parsed body: scalar fields and file parts keyed by form field name.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedPayload {
    pub fields: Map<String, Value>,
    pub files: BTreeMap<String, Attachment>,
}

/// Decode and parse a request body according to its declared content type.
///
/// Base64 transport encoding is undone first. A repeated file field name keeps
/// the last part.
pub async fn parse_payload(
    body: &str,
    content_type: &str,
    is_base64_encoded: bool,
) -> Result<ParsedPayload, IntakeError> {
    let raw = if is_base64_encoded {
        Bytes::from(
            STANDARD
                .decode(body.trim())
                .map_err(|e| IntakeError::Decode(format!("Invalid base64 body: {}", e)))?,
        )
    } else {
        Bytes::copy_from_slice(body.as_bytes())
    };

    let normalized = content_type.to_ascii_lowercase();
    if normalized.contains("multipart/form-data") {
        parse_multipart(raw, content_type).await
    } else if normalized.contains("application/json") {
        parse_json(&raw)
    } else {
        Err(IntakeError::UnsupportedMediaType(content_type.to_string()))
    }
}

fn parse_json(raw: &[u8]) -> Result<ParsedPayload, IntakeError> {
    let value: Value = serde_json::from_slice(raw)
        .map_err(|e| IntakeError::Decode(format!("Invalid JSON body: {}", e)))?;

    match value {
        Value::Object(fields) => Ok(ParsedPayload {
            fields,
            files: BTreeMap::new(),
        }),
        other => Err(IntakeError::Decode(format!(
            "JSON body must be an object, got {}",
            json_kind(&other)
        ))),
    }
}

async fn parse_multipart(raw: Bytes, content_type: &str) -> Result<ParsedPayload, IntakeError> {
    let mut multipart = multipart_reader(raw, content_type).await?;
    let mut payload = ParsedPayload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| IntakeError::Decode(format!("Failed to read multipart: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            tracing::debug!("Skipping multipart part without a name");
            continue;
        };

        // Browsers send `filename=""` for a file input left empty
        match field
            .file_name()
            .filter(|filename| !filename.is_empty())
            .map(str::to_string)
        {
            Some(filename) => {
                let content_type = field
                    .content_type()
                    .map(str::to_string)
                    .unwrap_or_else(|| DEFAULT_ATTACHMENT_CONTENT_TYPE.to_string());
                let content = field.bytes().await.map_err(|e| {
                    IntakeError::Decode(format!("Failed to read file part '{}': {}", name, e))
                })?;

                payload.files.insert(
                    name.clone(),
                    Attachment {
                        field_name: name,
                        filename,
                        content,
                        content_type,
                    },
                );
            }
            None => {
                let value = field.text().await.map_err(|e| {
                    IntakeError::Decode(format!("Failed to read field '{}': {}", name, e))
                })?;
                payload.fields.insert(name, Value::String(value));
            }
        }
    }

    Ok(payload)
}

/// Run axum's multipart extractor over an in-memory body.
async fn multipart_reader(raw: Bytes, content_type: &str) -> Result<Multipart, IntakeError> {
    let request = Request::builder()
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(raw))
        .map_err(|e| IntakeError::Decode(format!("Invalid multipart content type: {}", e)))?;

    // The HTTP layer already bounded the body; lift the extractor's own limit.
    let extractor = DefaultBodyLimit::disable().layer(service_fn(|request: Request| async move {
        Ok::<_, Infallible>(Multipart::from_request(request, &()).await)
    }));

    let extracted = match extractor.oneshot(request).await {
        Ok(extracted) => extracted,
        Err(never) => match never {},
    };

    extracted.map_err(|e| IntakeError::Decode(e.body_text()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
