//! Attachment downloads with bounded retry

use std::time::Duration;

use super::content::sanitize_file_name;
use crate::error::{Error, Result};
use crate::platforms::ExportSource;
use crate::types::{DownloadedContent, FileInfo};

/// How often and how patiently a failed download is retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Wait before the second attempt; doubles after every failure
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Retry immediately; used by tests
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            initial_backoff: Duration::ZERO,
        }
    }

    /// Wait before attempt `attempt` (1-based, so attempt 2 waits the initial backoff)
    pub fn backoff(&self, attempt: u32) -> Duration {
        let doublings = attempt.saturating_sub(2).min(16);
        self.initial_backoff.saturating_mul(1 << doublings)
    }
}

/// A downloaded attachment
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub info: FileInfo,
    pub content: DownloadedContent,
}

/// Name of an attachment's file next to the document:
/// `{idx:03}_{file_id}.{extension}`, without the dot when there is no extension.
///
/// Id and extension come from the server and are stripped of path
/// separators, so the result is always a single path component.
pub fn attachment_file_name(idx: usize, file_id: &str, extension: &str) -> String {
    let file_id = sanitize_file_name(file_id);
    let extension = sanitize_file_name(extension);
    if extension.is_empty() {
        format!("{idx:03}_{file_id}")
    } else {
        format!("{idx:03}_{file_id}.{extension}")
    }
}

/// Fetch an attachment's metadata and content, retrying failures
/// according to `policy`. The last error is returned as a transfer error.
pub async fn download_with_retry(
    source: &dyn ExportSource,
    file_id: &str,
    policy: RetryPolicy,
) -> Result<Attachment> {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match fetch(source, file_id).await {
            Ok(attachment) => return Ok(attachment),
            Err(e) if attempt >= max_attempts => {
                return Err(Error::transfer(format!(
                    "Giving up on file {file_id} after {attempt} attempts: {}",
                    e.message
                )));
            }
            Err(e) => {
                attempt += 1;
                let wait = policy.backoff(attempt);
                tracing::warn!(
                    file_id,
                    attempt,
                    wait_ms = wait.as_millis() as u64,
                    "Download failed, retrying: {e}"
                );
                tokio::time::sleep(wait).await;
            }
        }
    }
}

async fn fetch(source: &dyn ExportSource, file_id: &str) -> Result<Attachment> {
    let info = source.get_file_info(file_id).await?;
    tracing::info!("Downloading {} ({} bytes)", info.name, info.size);
    let content = source.download_file(file_id).await?;
    Ok(Attachment { info, content })
}
