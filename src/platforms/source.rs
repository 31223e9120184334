//! The remote calls the export workflow depends on

use crate::error::Result;
use crate::types::{Channel, DownloadedContent, FileInfo, Post, Team, User};
use async_trait::async_trait;

/// Page size used for every paginated listing
pub const PAGE_SIZE: u32 = 200;

/// Read-only view of a chat server, as needed to export channel history.
///
/// The Mattermost client implements this for real servers; tests substitute
/// an in-memory implementation.
#[async_trait]
pub trait ExportSource: Send + Sync {
    /// The authenticated user
    async fn current_user(&self) -> Result<User>;

    /// One page of all users on the server (0-based page index)
    async fn list_users(&self, page: u32, per_page: u32) -> Result<Vec<User>>;

    /// A single user by id
    async fn get_user(&self, user_id: &str) -> Result<User>;

    /// Teams the given user belongs to
    async fn list_teams_for_user(&self, user_id: &str) -> Result<Vec<Team>>;

    /// Channels of a team the given user is a member of, including direct
    /// and group messages
    async fn list_channels_for_user(&self, user_id: &str, team_id: &str) -> Result<Vec<Channel>>;

    /// A single team by id; fails with `ErrorCode::NotFound` if it does not exist
    async fn get_team(&self, team_id: &str) -> Result<Team>;

    /// One page of a channel's posts, newest first (0-based page index)
    async fn list_posts(&self, channel_id: &str, page: u32, per_page: u32) -> Result<Vec<Post>>;

    /// Metadata of an uploaded file
    async fn get_file_info(&self, file_id: &str) -> Result<FileInfo>;

    /// Content of an uploaded file
    async fn download_file(&self, file_id: &str) -> Result<DownloadedContent>;
}
