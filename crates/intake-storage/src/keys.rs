//! Shared key generation for submission objects.

use intake_core::constants::{SUBMISSIONS_PREFIX, SUBMISSION_DATA_FILENAME};
use intake_core::Identifiers;

/// Key prefix of one submission: `submissions/{tpa}/{broker}/{employer}/{submission_id}`.
///
/// Uniquely determined by the tenant triple and the submission id; a repeated
/// id within the same triple maps onto the same keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionKeys {
    prefix: String,
}

impl SubmissionKeys {
    pub fn new(identifiers: &Identifiers, submission_id: &str) -> Self {
        Self {
            prefix: format!(
                "{}/{}/{}/{}/{}",
                SUBMISSIONS_PREFIX,
                identifiers.tpa_id,
                identifiers.broker_id,
                identifiers.employer_id,
                submission_id
            ),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Key of an uploaded file, named after its original filename.
    pub fn attachment(&self, filename: &str) -> String {
        format!("{}/{}", self.prefix, filename)
    }

    /// Key of the submission's metadata document.
    pub fn metadata_document(&self) -> String {
        self.attachment(SUBMISSION_DATA_FILENAME)
    }
}

/// Prefix listed for a partially known tenant triple, e.g. `submissions/{tpa}`
/// for a single segment. No segments lists the TPA level.
pub fn listing_prefix(segments: &[&str]) -> String {
    std::iter::once(SUBMISSIONS_PREFIX)
        .chain(segments.iter().copied())
        .collect::<Vec<_>>()
        .join("/")
}
