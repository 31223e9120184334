//! File downloads for Mattermost
//!
//! This module fetches attachment metadata and content from a Mattermost
//! server.

use reqwest::header::CONTENT_TYPE;

use crate::error::{Error, Result};
use crate::types::DownloadedContent;

use super::client::MattermostClient;
use super::types::MattermostFileInfo;

/// Whether a `Content-Type` header value denotes a JSON body
pub(crate) fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

impl MattermostClient {
    /// Download a file by its ID
    ///
    /// # Arguments
    /// * `file_id` - The ID of the file to download
    ///
    /// # Returns
    /// The file body. JSON responses come back parsed as
    /// `DownloadedContent::StructuredJson`, all others as raw bytes. Transport
    /// failures while reading the body are `ErrorCode::Transfer`.
    pub async fn download_file(&self, file_id: &str) -> Result<DownloadedContent> {
        let endpoint = format!("/files/{file_id}");
        let response = self
            .get(&endpoint)
            .await
            .map_err(|e| Error::transfer(format!("Failed to download file {file_id}: {}", e.message)))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(is_json_content_type);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::transfer(format!("Failed to read file data: {e}")))?;

        if is_json {
            if let Ok(value) = serde_json::from_slice(&bytes) {
                return Ok(DownloadedContent::StructuredJson(value));
            }
        }
        Ok(DownloadedContent::Bytes(bytes.to_vec()))
    }

    /// Get file metadata without downloading the file
    ///
    /// # Arguments
    /// * `file_id` - The ID of the file
    ///
    /// # Returns
    /// A Result containing the file metadata
    pub async fn get_file_info(&self, file_id: &str) -> Result<MattermostFileInfo> {
        let endpoint = format!("/files/{file_id}/info");
        let response = self.get(&endpoint).await?;
        self.handle_response(response).await
    }
}
