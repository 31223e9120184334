//! The per-channel JSON document

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Team name recorded when the channel's team cannot be found
pub const UNKNOWN_TEAM: &str = "unknown";

/// Snapshot of the channel at export time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    pub name: String,
    pub display_name: String,
    pub header: String,
    pub id: String,
    /// Team display name, or [`UNKNOWN_TEAM`]
    pub team: String,
    pub team_id: String,
    /// `YYYY-MM-DDTHH:MM:SSZ`
    pub exported_at: String,
}

/// A post as written to the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedPost {
    /// Chronological position among all of the channel's posts, counting
    /// posts left out by the date filter
    pub idx: usize,
    /// Original post id
    pub id: String,
    /// `YYYY-MM-DDTHH:MM:SSZ`
    pub created: String,
    pub username: String,
    pub message: String,
    /// Attachment ids, whether or not they were downloaded
    pub files: Vec<String>,
}

/// One channel's export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub channel: ChannelInfo,
    pub posts: Vec<ExportedPost>,
}

impl ExportDocument {
    /// Pretty-printed JSON (two-space indent, non-ASCII kept as UTF-8)
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the document to `path`
    pub async fn write(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        tokio::fs::write(path, json)
            .await
            .map_err(|e| Error::filesystem(format!("Failed to write {}: {e}", path.display())))
    }
}
