//! Channel types

use serde::{Deserialize, Serialize};

/// Represents a channel the authenticated user belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Unique identifier for this channel
    pub id: String,
    /// Channel name (for direct messages: `{user_id}__{user_id}`)
    pub name: String,
    /// Name shown to the operator and used for output files.
    ///
    /// Starts as the server's display name; for direct messages it is replaced
    /// by the other participant's username once the directory is resolved.
    pub display_name: String,
    /// Team the channel belongs to (empty for direct and group messages)
    pub team_id: String,
    /// Channel header text
    pub header: String,
    /// Type of channel (public, private, direct message, etc.)
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
}

/// Type of channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelType {
    /// Public channel (anyone can join)
    Public,
    /// Private channel (invite-only)
    Private,
    /// Direct message between two users
    DirectMessage,
    /// Group direct message (multiple users)
    GroupMessage,
}

impl Channel {
    /// Create a new channel
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        display_name: impl Into<String>,
        channel_type: ChannelType,
    ) -> Self {
        let name = name.into();
        let display_name = display_name.into();
        Channel {
            id: id.into(),
            display_name: if display_name.is_empty() {
                name.clone()
            } else {
                display_name
            },
            name,
            team_id: String::new(),
            header: String::new(),
            channel_type,
        }
    }

    /// Set the owning team
    pub fn with_team(mut self, team_id: impl Into<String>) -> Self {
        self.team_id = team_id.into();
        self
    }

    /// Set the channel header
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Check if this is a one-to-one direct message channel
    pub fn is_direct_message(&self) -> bool {
        self.channel_type == ChannelType::DirectMessage
    }

    /// The other participant of a direct message channel.
    ///
    /// Direct message names join the two user ids with a double underscore.
    /// When `my_user_id` is the first id the second is returned, otherwise
    /// the first (this also covers a channel with oneself).
    pub fn dm_partner_id(&self, my_user_id: &str) -> Option<&str> {
        if !self.is_direct_message() {
            return None;
        }
        let (first, second) = self.name.split_once("__")?;
        if second.contains("__") {
            return None;
        }
        if first == my_user_id {
            Some(second)
        } else {
            Some(first)
        }
    }
}
