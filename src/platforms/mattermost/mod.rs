//! Mattermost platform adapter
//!
//! This module implements the read side of the Mattermost REST API (v4)
//! that the exporter needs: login, users, teams, channels, posts and files.

mod auth;
mod channels;
mod client;
mod convert;
mod files;
mod platform_impl;
mod posts;
mod teams;
mod types;
mod users;

pub use client::MattermostClient;
pub use types::*;
