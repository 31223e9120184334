//! Post and attachment types

use serde::{Deserialize, Serialize};

/// A single post (message) in a channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier for this post
    pub id: String,
    /// Author's user id
    pub user_id: String,
    /// Creation time in milliseconds since the Unix epoch
    pub create_at: i64,
    /// Message text
    pub message: String,
    /// Ids of attached files
    pub file_ids: Vec<String>,
}

impl Post {
    /// Create a new post without attachments
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        create_at: i64,
        message: impl Into<String>,
    ) -> Self {
        Post {
            id: id.into(),
            user_id: user_id.into(),
            create_at,
            message: message.into(),
            file_ids: Vec::new(),
        }
    }

    /// Attach file ids
    pub fn with_files(mut self, file_ids: Vec<String>) -> Self {
        self.file_ids = file_ids;
        self
    }
}

/// Metadata for an uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub id: String,
    pub name: String,
    /// Extension without the leading dot (may be empty)
    pub extension: String,
    /// Size in bytes as reported by the server
    pub size: i64,
}

/// Body of a downloaded file.
///
/// The server answers some file types with a JSON content type; those are
/// parsed and kept as a value, everything else stays raw bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadedContent {
    Bytes(Vec<u8>),
    StructuredJson(serde_json::Value),
}

impl DownloadedContent {
    /// Bytes to write to disk for this content
    pub fn to_file_bytes(&self) -> crate::error::Result<Vec<u8>> {
        match self {
            DownloadedContent::Bytes(bytes) => Ok(bytes.clone()),
            DownloadedContent::StructuredJson(value) => Ok(serde_json::to_vec(value)?),
        }
    }
}
