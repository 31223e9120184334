//! Session token discovery from the browser's cookie store
//!
//! Mattermost's web client keeps its session token in the `MMAUTHTOKEN`
//! cookie. Firefox stores cookies unencrypted in a per-profile
//! `cookies.sqlite`, so a logged-in browser session can be reused without
//! asking the operator for credentials.

use std::path::{Path, PathBuf};

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Row};
use walkdir::WalkDir;

use crate::error::Result;

/// Name of the cookie holding the Mattermost session token
pub const AUTH_COOKIE_NAME: &str = "MMAUTHTOKEN";

const COOKIE_DB_FILE: &str = "cookies.sqlite";

/// A cookie found in one of the stores
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieMatch {
    /// Cookie host as stored by the browser (may start with a dot)
    pub host: String,
    pub value: String,
    /// Database the cookie was read from
    pub source: PathBuf,
}

/// Directories that contain Firefox profiles on this machine
pub fn default_profile_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Some(home) = dirs::home_dir() {
        roots.push(home.join(".mozilla").join("firefox"));
        roots.push(home.join("snap").join("firefox").join("common").join(".mozilla").join("firefox"));
        roots.push(home.join("Library").join("Application Support").join("Firefox").join("Profiles"));
    }
    if let Some(config) = dirs::config_dir() {
        roots.push(config.join("Mozilla").join("Firefox").join("Profiles"));
    }
    roots.dedup();
    roots
}

/// Every `cookies.sqlite` at most two levels below the given roots
pub fn find_cookie_databases(roots: &[PathBuf]) -> Vec<PathBuf> {
    let mut databases = Vec::new();
    for root in roots.iter().filter(|r| r.is_dir()) {
        let mut found: Vec<PathBuf> = WalkDir::new(root)
            .max_depth(2)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file() && entry.file_name() == COOKIE_DB_FILE)
            .map(|entry| entry.into_path())
            .collect();
        found.sort();
        databases.extend(found);
    }
    databases
}

/// The part of a configured host cookies are stored under: cookie hosts
/// never carry a port
pub fn cookie_domain(host: &str) -> &str {
    match host.rsplit_once(':') {
        Some((domain, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => domain,
        _ => host,
    }
}

/// Read the named cookie for `host` from one Firefox cookie database
pub async fn read_cookie(db_path: &Path, cookie_name: &str, host: &str) -> Result<Vec<CookieMatch>> {
    // immutable: the browser holds a lock on the file while it runs
    let mut conn = SqliteConnectOptions::new()
        .filename(db_path)
        .read_only(true)
        .immutable(true)
        .connect()
        .await?;

    let rows = sqlx::query(
        "SELECT host, value FROM moz_cookies WHERE name = ?1 AND instr(host, ?2) > 0 ORDER BY id",
    )
    .bind(cookie_name)
    .bind(cookie_domain(host))
    .fetch_all(&mut conn)
    .await?;

    rows.iter()
        .map(|row| {
            Ok(CookieMatch {
                host: row.try_get("host")?,
                value: row.try_get("value")?,
                source: db_path.to_path_buf(),
            })
        })
        .collect()
}

/// Look for a Mattermost session token for `host` in the given databases.
///
/// Databases that cannot be read are skipped. When several cookies match,
/// the first one wins and the rest are reported.
pub async fn find_auth_token(databases: &[PathBuf], host: &str) -> Option<CookieMatch> {
    let mut matches = Vec::new();
    for db in databases {
        match read_cookie(db, AUTH_COOKIE_NAME, host).await {
            Ok(found) => matches.extend(found),
            Err(e) => tracing::warn!("Skipping cookie store {}: {e}", db.display()),
        }
    }

    let mut matches = matches.into_iter();
    let first = matches.next()?;
    for ignored in matches {
        tracing::warn!(
            "Ignoring additional {AUTH_COOKIE_NAME} cookie for {} in {}",
            ignored.host,
            ignored.source.display()
        );
    }
    tracing::info!("Using {AUTH_COOKIE_NAME} cookie for {} from {}", first.host, first.source.display());
    Some(first)
}
