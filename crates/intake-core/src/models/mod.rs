//! Domain models for one intake request.

pub mod attachment;
pub mod submission;

pub use attachment::{Attachment, UploadResult};
pub use submission::{Identifiers, Submission};
