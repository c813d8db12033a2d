//! Quote Intake Storage Library
//!
//! This crate provides the storage abstraction used to persist submission
//! attachments and metadata documents, with S3 and local filesystem backends.
//!
//! # Storage key format
//!
//! Every object of a submission lives under one prefix:
//!
//! `submissions/{tpa_id}/{broker_id}/{employer_id}/{submission_id}/{filename}`
//!
//! The metadata document uses the fixed filename `submission-data.json`. Key
//! generation is centralized in the `keys` module so all callers agree.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;
pub mod writer;

// Re-export commonly used types
pub use factory::create_storage;
pub use intake_core::StorageBackend;
pub use keys::{listing_prefix, SubmissionKeys};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{ObjectMetadata, Storage, StorageError, StorageResult};
pub use writer::{attachment_metadata, StorageWriter};
