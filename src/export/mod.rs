//! Channel export
//!
//! Pages through a channel's complete history, writes one JSON document per
//! channel and puts extracted code blocks and downloaded attachments next to
//! it:
//!
//! ```text
//! {output_root}/{channel}/{channel}.json
//! {output_root}/{channel}/{idx:03}_code.txt
//! {output_root}/{channel}/{idx:03}_{file_id}.{extension}
//! ```

mod attachments;
mod content;
mod document;
mod filter;

use std::path::{Path, PathBuf};

use chrono::Utc;

pub use attachments::{attachment_file_name, download_with_retry, Attachment, RetryPolicy};
pub use content::{extract_code_block, format_timestamp, sanitize_dir_name, sanitize_file_name, CODE_FENCE};
pub use document::{ChannelInfo, ExportDocument, ExportedPost, UNKNOWN_TEAM};
pub use filter::DateRange;

use crate::directory::{collect_pages, UsernameCache};
use crate::error::{Error, Result};
use crate::logging::Timer;
use crate::platforms::{ExportSource, PAGE_SIZE};
use crate::types::{Channel, Post};

/// Settings shared by all channel exports of a run
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Directory the per-channel directories are created in
    pub output_root: PathBuf,
    /// Fetch attachment content, not just list attachment ids
    pub download_files: bool,
    pub date_range: DateRange,
    pub retry: RetryPolicy,
}

impl ExportOptions {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            download_files: false,
            date_range: DateRange::unbounded(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_downloads(mut self, download_files: bool) -> Self {
        self.download_files = download_files;
        self
    }

    pub fn with_date_range(mut self, date_range: DateRange) -> Self {
        self.date_range = date_range;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// What one channel export produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub channel: String,
    /// Path of the JSON document
    pub document: PathBuf,
    /// Posts in the channel's history
    pub posts_total: usize,
    /// Posts within the date range
    pub posts_exported: usize,
    pub code_blocks: usize,
    pub attachments_saved: usize,
    pub attachments_failed: usize,
}

/// Names that would not give a directory of their own below the output root
fn is_unusable_name(name: &str) -> bool {
    name.trim().chars().all(|c| c == '.')
}

/// Directory and document base name for a channel.
///
/// Falls back to the channel id when nothing usable of the display name
/// survives sanitizing, including names made only of dots.
pub fn output_names(channel: &Channel) -> (String, String) {
    let fallback = || sanitize_file_name(&channel.id);
    let dir_name = sanitize_dir_name(&channel.display_name);
    let dir_name = if is_unusable_name(&dir_name) {
        fallback()
    } else {
        dir_name
    };
    let file_name = sanitize_file_name(&dir_name);
    let file_name = if is_unusable_name(&file_name) {
        fallback()
    } else {
        file_name
    };
    (dir_name, file_name)
}

/// Every post of a channel, oldest first
pub async fn fetch_history(source: &dyn ExportSource, channel_id: &str) -> Result<Vec<Post>> {
    let mut posts = collect_pages(move |page| {
        tracing::info!("Requesting channel page {page}");
        source.list_posts(channel_id, page, PAGE_SIZE)
    })
    .await?;
    posts.reverse();
    Ok(posts)
}

/// Display name of the channel's team, or [`UNKNOWN_TEAM`] when the channel
/// has no team or the server does not know it
pub async fn team_name(source: &dyn ExportSource, team_id: &str) -> Result<String> {
    if team_id.is_empty() {
        return Ok(UNKNOWN_TEAM.to_string());
    }
    match source.get_team(team_id).await {
        Ok(team) => Ok(team.label().to_string()),
        Err(e) if e.is_not_found() => {
            tracing::warn!("Team {team_id} not found");
            Ok(UNKNOWN_TEAM.to_string())
        }
        Err(e) => Err(e),
    }
}

/// Download one attachment and write it next to the document
async fn save_attachment(
    source: &dyn ExportSource,
    output_dir: &Path,
    idx: usize,
    file_id: &str,
    retry: RetryPolicy,
) -> Result<()> {
    let attachment = download_with_retry(source, file_id, retry).await?;
    let path = output_dir.join(attachment_file_name(idx, file_id, &attachment.info.extension));
    tokio::fs::write(&path, attachment.content.to_file_bytes()?)
        .await
        .map_err(|e| Error::filesystem(format!("Failed to write {}: {e}", path.display())))
}

/// Export one channel to disk
pub async fn export_channel(
    source: &dyn ExportSource,
    channel: &Channel,
    usernames: &mut UsernameCache,
    options: &ExportOptions,
) -> Result<ExportSummary> {
    let _timer = Timer::new(format!("export {}", channel.display_name));
    let (dir_name, file_name) = output_names(channel);
    tracing::info!("Exporting channel {dir_name}");

    let output_dir = options.output_root.join(&dir_name);
    tokio::fs::create_dir_all(&output_dir).await.map_err(|e| {
        Error::filesystem(format!("Failed to create {}: {e}", output_dir.display()))
    })?;

    let history = fetch_history(source, &channel.id).await?;
    tracing::info!("Found {} posts", history.len());

    let mut summary = ExportSummary {
        channel: channel.display_name.clone(),
        document: output_dir.join(format!("{file_name}.json")),
        posts_total: history.len(),
        ..Default::default()
    };

    let mut posts = Vec::new();
    // idx counts every post, including those outside the date range
    for (idx, post) in history.into_iter().enumerate() {
        if !options.date_range.contains(post.create_at) {
            continue;
        }

        let username = usernames.resolve(source, &post.user_id).await?;
        let created = format_timestamp(post.create_at)?;

        match extract_code_block(&post.message) {
            Some(code) if code.trim().is_empty() => {
                tracing::warn!("Code block of post {idx} is empty, nothing written");
            }
            Some(code) => {
                let path = output_dir.join(format!("{idx:03}_code.txt"));
                tokio::fs::write(&path, code).await.map_err(|e| {
                    Error::filesystem(format!("Failed to write {}: {e}", path.display()))
                })?;
                summary.code_blocks += 1;
            }
            None => {}
        }

        for file_id in &post.file_ids {
            if !options.download_files {
                continue;
            }
            match save_attachment(source, &output_dir, idx, file_id, options.retry).await {
                Ok(()) => summary.attachments_saved += 1,
                Err(e) => {
                    tracing::error!(file_id = %file_id, "Attachment not saved: {e}");
                    summary.attachments_failed += 1;
                }
            }
        }

        posts.push(ExportedPost {
            idx,
            id: post.id,
            created,
            username,
            message: post.message,
            files: post.file_ids,
        });
    }
    summary.posts_exported = posts.len();

    let document = ExportDocument {
        channel: ChannelInfo {
            name: channel.name.clone(),
            display_name: channel.display_name.clone(),
            header: channel.header.clone(),
            id: channel.id.clone(),
            team: team_name(source, &channel.team_id).await?,
            team_id: channel.team_id.clone(),
            exported_at: Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        },
        posts,
    };
    document.write(&summary.document).await?;
    tracing::info!("Dumped channel texts to {}", summary.document.display());

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChannelType;

    #[test]
    fn test_output_names() {
        let channel = Channel::new("c1", "dev", "dev/ops: \"live\"", ChannelType::Public);
        let (dir, file) = output_names(&channel);
        assert_eq!(dir, "devops: \"live\"");
        assert_eq!(file, "devops live");
    }

    #[test]
    fn test_output_names_fall_back_to_id() {
        let channel = Channel::new("c1", "x", "//", ChannelType::Public);
        assert_eq!(output_names(&channel), ("c1".to_string(), "c1".to_string()));

        let channel = Channel::new("c2", "x", "??", ChannelType::Public);
        assert_eq!(output_names(&channel), ("??".to_string(), "c2".to_string()));
    }

    #[test]
    fn test_output_names_reject_dot_names() {
        for name in [".", "..", " ... ", "./..", "..\\"] {
            let channel = Channel::new("c3", "x", name, ChannelType::Public);
            assert_eq!(output_names(&channel), ("c3".to_string(), "c3".to_string()), "{name:?}");
        }

        let channel = Channel::new("c4", "x", "..hidden", ChannelType::Public);
        assert_eq!(output_names(&channel).0, "..hidden");
    }

    #[test]
    fn test_options_builder() {
        let options = ExportOptions::new("out")
            .with_downloads(true)
            .with_retry(RetryPolicy::immediate(2));
        assert!(options.download_files);
        assert_eq!(options.retry.max_attempts, 2);
        assert!(options.date_range.is_unbounded());
    }
}
