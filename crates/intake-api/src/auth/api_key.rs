use crate::constants::API_KEY_HEADER;
use crate::error::IntakeError;
use crate::request::RequestHeaders;
use subtle::ConstantTimeEq;

/// Constant-time comparison of two secrets.
pub fn secure_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Check the `x-api-key` header against the configured key.
pub fn authorize(headers: &RequestHeaders, expected: &str) -> Result<(), IntakeError> {
    match headers.get(API_KEY_HEADER) {
        Some(provided) if secure_compare(provided, expected) => Ok(()),
        Some(_) => {
            tracing::warn!("Rejected request with invalid API key");
            Err(IntakeError::Unauthorized)
        }
        None => {
            tracing::warn!("Rejected request without API key");
            Err(IntakeError::Unauthorized)
        }
    }
}
