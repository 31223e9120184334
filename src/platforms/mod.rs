//! Remote chat servers the exporter can read from
//!
//! The workflow only talks to the [`ExportSource`] trait; each platform
//! module provides an adapter implementing it.

mod source;

pub mod mattermost;

pub use source::{ExportSource, PAGE_SIZE};
