//! Export Mattermost channel histories to JSON documents on disk.
//!
//! The flow of a run: [`config`] is loaded and completed interactively,
//! [`session`] authenticates against the server, [`directory`] resolves
//! users, teams and channels, [`selector`] lets the operator pick what to
//! export and [`export`] writes one directory per channel.

// Core modules
pub mod error;
pub mod logging;
pub mod platforms;
pub mod types;

// Run stages
pub mod config;
pub mod cookies;
pub mod directory;
pub mod export;
pub mod prompt;
pub mod selector;
pub mod session;

// Re-exports for convenience
pub use config::{ExportConfig, LoginMode};
pub use directory::{Directory, UsernameCache};
pub use error::{Error, ErrorCode, Result};
pub use export::{export_channel, DateRange, ExportOptions, ExportSummary};
pub use platforms::mattermost::MattermostClient;
pub use platforms::ExportSource;
pub use types::{Channel, ChannelType, DownloadedContent, FileInfo, Post, Team, User};
