//! Fixed values shared by the intake pipeline.

/// Tenant identifier used when the bearer token is absent or carries no TPA claim.
pub const UNKNOWN_TPA: &str = "unknown-tpa";

/// Broker identifier used when the form omits `brokerId`.
pub const UNKNOWN_BROKER: &str = "unknown-broker";

/// Employer identifier used when the form omits `employerId`.
pub const UNKNOWN_EMPLOYER: &str = "unknown-employer";

/// Root prefix of every object written by the service.
pub const SUBMISSIONS_PREFIX: &str = "submissions";

/// Filename of the per-submission metadata document.
pub const SUBMISSION_DATA_FILENAME: &str = "submission-data.json";

/// Content type recorded for file parts that do not declare one.
pub const DEFAULT_ATTACHMENT_CONTENT_TYPE: &str = "application/octet-stream";

// Object metadata attribute names attached to each stored attachment
pub const META_ORIGINAL_FILENAME: &str = "original-filename";
pub const META_CONTENT_TYPE: &str = "content-type";
pub const META_FILE_SIZE: &str = "file-size";
