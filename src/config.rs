//! Local configuration file
//!
//! The configuration is a small JSON object. Every key is optional; whatever
//! is missing is asked for interactively, and the result can be written back.
//! A password is never part of the configuration.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, ErrorCode, Result};
use crate::export::DateRange;
use crate::prompt::Prompter;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Default root directory for exported channels
pub const DEFAULT_OUTPUT_DIR: &str = "results";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// How to authenticate against the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginMode {
    Password,
    Token,
}

impl LoginMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginMode::Password => "password",
            LoginMode::Token => "token",
        }
    }
}

/// Contents of the configuration file
///
/// For `after` and `before` a missing key means "ask", while `null` or an
/// empty string means "no bound".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Server host without scheme, e.g. `chat.example.com`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_mode: Option<LoginMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_files: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_date_bound",
        serialize_with = "serialize_date_bound"
    )]
    pub after: Option<Option<NaiveDate>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_date_bound",
        serialize_with = "serialize_date_bound"
    )]
    pub before: Option<Option<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

fn deserialize_date_bound<'de, D>(deserializer: D) -> std::result::Result<Option<Option<NaiveDate>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(Some(None)),
        Some(text) => parse_date(text)
            .map(|d| Some(Some(d)))
            .map_err(|e| serde::de::Error::custom(e.message)),
    }
}

fn serialize_date_bound<S>(value: &Option<Option<NaiveDate>>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(Some(date)) => serializer.serialize_str(&date.format(DATE_FORMAT).to_string()),
        _ => serializer.serialize_none(),
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).map_err(|e| {
        Error::new(
            ErrorCode::Config,
            format!("Invalid date \"{text}\" (expected YYYY-MM-DD): {e}"),
        )
    })
}

/// Strip any scheme and trailing slashes from a host
pub fn normalize_host(host: &str) -> String {
    let host = host.trim();
    let host = host
        .strip_prefix("https://")
        .or_else(|| host.strip_prefix("http://"))
        .unwrap_or(host);
    host.trim_end_matches('/').to_string()
}

impl ExportConfig {
    /// Load the configuration file; a missing file yields an empty config
    pub async fn load(path: &Path) -> Result<Self> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}, all settings will be asked", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(Error::new(
                    ErrorCode::Config,
                    format!("Failed to read {}: {e}", path.display()),
                ))
            }
        };

        let mut config: Self = serde_json::from_str(&content).map_err(|e| {
            Error::new(ErrorCode::Config, format!("Failed to parse {}: {e}", path.display()))
        })?;
        config.host = config.host.as_deref().map(normalize_host);
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub async fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json + "\n").await.map_err(|e| {
            Error::new(ErrorCode::Config, format!("Failed to write {}: {e}", path.display()))
        })?;
        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Ask for every setting the file did not provide.
    ///
    /// Returns true when at least one value was asked for. The token is not
    /// asked here; the session establisher looks for it in the browser first.
    pub fn fill_missing<R: BufRead, W: Write>(&mut self, prompter: &mut Prompter<R, W>) -> Result<bool> {
        let mut asked = false;

        if self.host.as_deref().map_or(true, str::is_empty) {
            let host = prompter.ask_required("Server host (e.g. chat.example.com): ")?;
            self.host = Some(normalize_host(&host));
            asked = true;
        }

        if self.login_mode.is_none() {
            let mode = prompter.choose("Login mode", &[LoginMode::Password.as_str(), LoginMode::Token.as_str()])?;
            self.login_mode = Some(if mode == LoginMode::Token.as_str() {
                LoginMode::Token
            } else {
                LoginMode::Password
            });
            asked = true;
        }

        if self.login_mode == Some(LoginMode::Password) && self.username.as_deref().map_or(true, str::is_empty) {
            self.username = Some(prompter.ask_required("Username: ")?);
            asked = true;
        }

        if self.download_files.is_none() {
            self.download_files = Some(prompter.confirm("Download attached files?")?);
            asked = true;
        }

        if self.after.is_none() {
            self.after = Some(ask_date(prompter, "Export posts on or after (YYYY-MM-DD, empty for no limit): ")?);
            asked = true;
        }

        if self.before.is_none() {
            self.before = Some(ask_date(prompter, "Export posts up to (YYYY-MM-DD, empty for no limit): ")?);
            asked = true;
        }

        Ok(asked)
    }

    /// Offer to write the configuration back to `path`
    pub async fn offer_save<R: BufRead, W: Write>(
        &self,
        path: &Path,
        prompter: &mut Prompter<R, W>,
    ) -> Result<bool> {
        if prompter.confirm(&format!("Save these settings to {}?", path.display()))? {
            self.save(path).await?;
            return Ok(true);
        }
        Ok(false)
    }

    /// The host, which must have been set
    pub fn host(&self) -> Result<&str> {
        self.host
            .as_deref()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| Error::new(ErrorCode::Config, "No host configured"))
    }

    pub fn login_mode(&self) -> LoginMode {
        self.login_mode.unwrap_or(LoginMode::Password)
    }

    pub fn download_files(&self) -> bool {
        self.download_files.unwrap_or(false)
    }

    /// Date bounds for the export
    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.after.flatten(), self.before.flatten())
    }

    /// Output root, falling back to [`DEFAULT_OUTPUT_DIR`]
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }
}

fn ask_date<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>, question: &str) -> Result<Option<NaiveDate>> {
    loop {
        let answer = prompter.ask(question)?;
        if answer.is_empty() {
            return Ok(None);
        }
        match parse_date(&answer) {
            Ok(date) => return Ok(Some(date)),
            Err(e) => prompter.say(e.message)?,
        }
    }
}
