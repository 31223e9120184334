//! Core types for mattermost-dl
//!
//! Platform-neutral records the export workflow operates on. The Mattermost
//! adapter converts its raw API objects into these.

pub mod channel;
pub mod post;
pub mod team;
pub mod user;

// Re-export for convenience
pub use channel::{Channel, ChannelType};
pub use post::{DownloadedContent, FileInfo, Post};
pub use team::Team;
pub use user::User;
