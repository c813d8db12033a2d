//! Submission intake pipeline
//!
//! One request runs start to finish: preflight short-circuit, API key check,
//! body parsing, identity resolution, attachment writes, metadata write and a
//! best-effort notification. Every failure after the key check becomes the
//! generic 500 response.

use crate::auth::{authorize, extract_tpa_id};
use crate::constants::{
    CONTENT_TYPE_HEADER, CORS_ALLOW_CREDENTIALS, CORS_ALLOW_HEADERS, CORS_ALLOW_METHODS,
    CORS_ALLOW_ORIGIN, MSG_CORS_OK, MSG_FORBIDDEN, MSG_INTERNAL_ERROR, MSG_LIST_FAILED,
    MSG_SUBMITTED,
};
use crate::error::IntakeError;
use crate::payload::parse_payload;
use crate::request::{IntakeRequest, IntakeResponse, RequestHeaders};
use crate::services::notifier::Notifier;
use bytes::Bytes;
use chrono::Utc;
use intake_core::{Attachment, Identifiers, Submission, UploadResult};
use intake_storage::{
    attachment_metadata, listing_prefix, ObjectMetadata, StorageBackend, StorageWriter,
    SubmissionKeys,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;

/// Body of a successful submission response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub success: bool,
    pub message: String,
    pub quote_id: String,
    pub upload_results: BTreeMap<String, UploadResult>,
    pub email_sent: bool,
    pub identifiers: Identifiers,
}

/// Tenant scope of a quote listing. Levels apply in order: `brokerId` only
/// narrows the listing when `tpaId` is also given, and so on.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteScope {
    pub tpa_id: Option<String>,
    pub broker_id: Option<String>,
    pub employer_id: Option<String>,
}

impl QuoteScope {
    fn segments(&self) -> Vec<&str> {
        [&self.tpa_id, &self.broker_id, &self.employer_id]
            .into_iter()
            .map_while(|segment| segment.as_deref().filter(|value| !value.is_empty()))
            .collect()
    }
}

pub struct IntakeService {
    api_key: String,
    writer: StorageWriter,
    notifier: Notifier,
}

impl IntakeService {
    pub fn new(api_key: impl Into<String>, writer: StorageWriter, notifier: Notifier) -> Self {
        Self {
            api_key: api_key.into(),
            writer,
            notifier,
        }
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.writer.backend_type()
    }

    pub fn notifications_enabled(&self) -> bool {
        self.notifier.is_enabled()
    }

    /// Run one request through the pipeline. Never fails; errors become responses.
    pub async fn handle(&self, request: IntakeRequest) -> IntakeResponse {
        if request.is_preflight() {
            return cors_preflight();
        }

        if authorize(&request.headers, &self.api_key).is_err() {
            return IntakeResponse::json(403, &json!({ "message": MSG_FORBIDDEN }));
        }

        let start = std::time::Instant::now();
        match self.process(&request).await {
            Ok(receipt) => {
                tracing::info!(
                    submission_id = %receipt.quote_id,
                    tpa_id = %receipt.identifiers.tpa_id,
                    broker_id = %receipt.identifiers.broker_id,
                    employer_id = %receipt.identifiers.employer_id,
                    files = receipt.upload_results.len(),
                    email_sent = receipt.email_sent,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Submission stored"
                );
                match serde_json::to_value(&receipt) {
                    Ok(body) => with_cors(IntakeResponse::json(200, &body)),
                    Err(e) => internal_error(&IntakeError::from(e)),
                }
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Submission failed"
                );
                internal_error(&e)
            }
        }
    }

    /// List the stored prefixes one level below the given scope: TPA ids with
    /// no scope, submission ids once the full triple is known.
    pub async fn list_quotes(&self, headers: &RequestHeaders, scope: &QuoteScope) -> IntakeResponse {
        if authorize(headers, &self.api_key).is_err() {
            return IntakeResponse::json(403, &json!({ "message": MSG_FORBIDDEN }));
        }

        let prefix = listing_prefix(&scope.segments());
        match self.writer.list_prefixes(&prefix).await {
            Ok(quotes) => {
                tracing::info!(prefix = %prefix, count = quotes.len(), "Quotes listed");
                with_cors(IntakeResponse::json(
                    200,
                    &json!({ "success": true, "quotes": quotes }),
                ))
            }
            Err(e) => {
                tracing::error!(error = %e, prefix = %prefix, "Quote listing failed");
                with_cors(IntakeResponse::json(
                    500,
                    &json!({ "success": false, "message": MSG_LIST_FAILED, "error": e.to_string() }),
                ))
            }
        }
    }

    async fn process(&self, request: &IntakeRequest) -> Result<SubmissionReceipt, IntakeError> {
        let content_type = request.headers.get(CONTENT_TYPE_HEADER).unwrap_or_default();
        let body = request.body.as_deref().unwrap_or_default();
        let payload = parse_payload(body, content_type, request.is_base64_encoded).await?;

        let tpa_id = extract_tpa_id(&request.headers);
        let submission = Submission::new(Utc::now(), tpa_id, &payload.fields);
        let identifiers = submission.identifiers();
        let keys = SubmissionKeys::new(&identifiers, &submission.submission_id);

        tracing::debug!(
            submission_id = %submission.submission_id,
            prefix = %keys.prefix(),
            fields = payload.fields.len(),
            files = payload.files.len(),
            "Submission parsed"
        );

        let upload_results = self.persist_attachments(&keys, payload.files).await?;
        self.persist_metadata(&keys, &submission).await?;
        let email_sent = self.notifier.notify(&submission, &upload_results).await;

        Ok(SubmissionReceipt {
            success: true,
            message: MSG_SUBMITTED.to_string(),
            quote_id: submission.submission_id,
            upload_results,
            email_sent,
            identifiers,
        })
    }

    /// Write each file under the submission prefix, by field name. Empty
    /// files are skipped and do not appear in the results.
    async fn persist_attachments(
        &self,
        keys: &SubmissionKeys,
        files: BTreeMap<String, Attachment>,
    ) -> Result<BTreeMap<String, UploadResult>, IntakeError> {
        let mut results = BTreeMap::new();

        for (field_name, attachment) in files {
            let key = keys.attachment(&attachment.filename);
            let size = attachment.size();
            let metadata =
                attachment_metadata(&attachment.filename, &attachment.content_type, size);

            let stored = self
                .writer
                .store(attachment.content, &attachment.content_type, &key, &metadata)
                .await?;

            if let Some(url) = stored {
                results.insert(
                    field_name.clone(),
                    UploadResult {
                        field_name,
                        filename: attachment.filename,
                        url,
                        size,
                    },
                );
            }
        }

        Ok(results)
    }

    async fn persist_metadata(
        &self,
        keys: &SubmissionKeys,
        submission: &Submission,
    ) -> Result<(), IntakeError> {
        let document = serde_json::to_vec(submission)?;
        self.writer
            .store(
                Bytes::from(document),
                "application/json",
                &keys.metadata_document(),
                &ObjectMetadata::new(),
            )
            .await?;
        Ok(())
    }
}

fn cors_preflight() -> IntakeResponse {
    with_cors(IntakeResponse::json(200, &json!({ "message": MSG_CORS_OK })))
        .with_header("Access-Control-Allow-Headers", CORS_ALLOW_HEADERS)
        .with_header("Access-Control-Allow-Methods", CORS_ALLOW_METHODS)
        .with_header("Access-Control-Allow-Credentials", CORS_ALLOW_CREDENTIALS)
}

fn with_cors(response: IntakeResponse) -> IntakeResponse {
    response.with_header("Access-Control-Allow-Origin", CORS_ALLOW_ORIGIN)
}

fn internal_error(error: &IntakeError) -> IntakeResponse {
    with_cors(IntakeResponse::json(
        500,
        &json!({ "message": MSG_INTERNAL_ERROR, "error": error.to_string() }),
    ))
}
