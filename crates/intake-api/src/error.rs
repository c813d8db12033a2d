//! Intake pipeline errors
//!
//! Everything after the API key check funnels into `IntakeError`; the
//! orchestrator turns any of these into the generic 500 response.

use intake_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Forbidden")]
    Unauthorized,

    #[error("Unexpected mimetype in content-type: '{0}'")]
    UnsupportedMediaType(String),

    #[error("Failed to decode request body: {0}")]
    Decode(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to serialize submission: {0}")]
    Serialization(#[from] serde_json::Error),
}
