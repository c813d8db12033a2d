use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// One uploaded file part, held in memory until it is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub field_name: String,
    pub filename: String,
    pub content: Bytes,
    pub content_type: String,
}

impl Attachment {
    pub fn size(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Where an attachment ended up after a successful write.
///
/// Serialized as `{filename, url, size}`; the field name is the key of the
/// surrounding map in responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadResult {
    #[serde(skip)]
    pub field_name: String,
    pub filename: String,
    pub url: String,
    pub size: usize,
}
