use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mattermost channel type
/// Shapes follow the Mattermost REST API v4 responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MattermostChannelType {
    /// Open/Public channel - "O"
    #[serde(rename = "O")]
    Open,
    /// Private channel - "P"
    #[serde(rename = "P")]
    Private,
    /// Direct message channel - "D"
    #[serde(rename = "D")]
    Direct,
    /// Group message channel - "G"
    #[serde(rename = "G")]
    Group,
}

/// Mattermost User object from API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MattermostUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub create_at: i64,
    #[serde(default)]
    pub update_at: i64,
    #[serde(default)]
    pub delete_at: i64,
}

/// Mattermost Channel object from API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MattermostChannel {
    pub id: String,
    #[serde(default)]
    pub create_at: i64,
    #[serde(default)]
    pub update_at: i64,
    #[serde(default)]
    pub delete_at: i64,
    #[serde(default)]
    pub team_id: String,
    #[serde(rename = "type")]
    pub channel_type: MattermostChannelType,
    #[serde(default)]
    pub display_name: String,
    pub name: String,
    #[serde(default)]
    pub header: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub last_post_at: i64,
    #[serde(default)]
    pub total_msg_count: i64,
}

/// Mattermost Post (message) object from API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MattermostPost {
    pub id: String,
    pub create_at: i64,
    #[serde(default)]
    pub update_at: i64,
    #[serde(default)]
    pub delete_at: i64,
    #[serde(default)]
    pub edit_at: i64,
    pub user_id: String,
    pub channel_id: String,
    #[serde(default)]
    pub root_id: String,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type")]
    #[serde(default)]
    pub post_type: String,
    #[serde(default)]
    pub file_ids: Vec<String>,
    #[serde(default)]
    pub metadata: PostMetadata,
}

/// Metadata for a Mattermost Post
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostMetadata {
    #[serde(default)]
    pub files: Vec<MattermostFileInfo>,
}

/// Mattermost File information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MattermostFileInfo {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub post_id: String,
    #[serde(default)]
    pub create_at: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub extension: String,
    #[serde(default)]
    pub size: i64,
}

/// Mattermost Team (workspace) object from API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MattermostTeam {
    pub id: String,
    #[serde(default)]
    pub create_at: i64,
    #[serde(default)]
    pub update_at: i64,
    #[serde(default)]
    pub delete_at: i64,
    #[serde(default)]
    pub display_name: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    #[serde(default)]
    pub team_type: String, // "O" (Open), "I" (Invite only)
}

/// Login request payload
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub login_id: String,
    pub password: String,
}

/// Response containing a list of posts
#[derive(Debug, Clone, Deserialize)]
pub struct PostList {
    /// Post ids, newest first
    #[serde(default)]
    pub order: Vec<String>,
    #[serde(default)]
    pub posts: HashMap<String, MattermostPost>,
    #[serde(default)]
    pub next_post_id: String,
    #[serde(default)]
    pub prev_post_id: String,
}

impl PostList {
    /// Posts in server order (newest first), skipping ids without a body
    pub fn into_ordered(mut self) -> Vec<MattermostPost> {
        self.order
            .iter()
            .filter_map(|id| self.posts.remove(id))
            .collect()
    }
}

/// Error body returned by the Mattermost API on failure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub status_code: u16,
}
