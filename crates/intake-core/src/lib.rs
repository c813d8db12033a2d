//! Quote Intake Core Library
//!
//! This crate provides the domain models, configuration and shared constants
//! used by the storage and API crates.

pub mod config;
pub mod constants;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{BaseConfig, Config, EmailProvider, IntakeConfig};
pub use models::{Attachment, Identifiers, Submission, UploadResult};
pub use storage_types::StorageBackend;
