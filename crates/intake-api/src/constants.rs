//! HTTP surface constants

/// Primary submission route
pub const SUBMISSIONS_PATH: &str = "/submissions";

/// Alias kept for clients that post quotes directly; `GET` lists stored quotes
pub const QUOTES_PATH: &str = "/quotes";

pub const HEALTH_PATH: &str = "/health";

// Request headers, looked up case-insensitively
pub const API_KEY_HEADER: &str = "x-api-key";
pub const AUTHORIZATION_HEADER: &str = "authorization";
pub const CONTENT_TYPE_HEADER: &str = "content-type";

// Cross-origin headers returned on preflight and on every submission response
pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_HEADERS: &str = "Content-Type,Authorization,X-Api-Key";
pub const CORS_ALLOW_METHODS: &str = "POST,OPTIONS";
pub const CORS_ALLOW_CREDENTIALS: &str = "true";

// Response messages
pub const MSG_CORS_OK: &str = "CORS OK";
pub const MSG_FORBIDDEN: &str = "Forbidden";
pub const MSG_SUBMITTED: &str = "Quote submitted successfully";
pub const MSG_INTERNAL_ERROR: &str = "Internal server error";
pub const MSG_LIST_FAILED: &str = "Error listing quotes";
