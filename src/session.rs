//! Session establishment
//!
//! Produces an authenticated [`MattermostClient`] from the configuration,
//! using either a password or a session token. A token that is not
//! configured is looked up in the browser's cookie store before the operator
//! is asked for it.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{ExportConfig, LoginMode};
use crate::cookies;
use crate::error::{Error, ErrorCode, Result};
use crate::platforms::mattermost::MattermostClient;
use crate::prompt::Prompter;
use crate::types::User;

/// An authenticated connection to the server
pub struct Session {
    pub client: MattermostClient,
    /// The user the session belongs to
    pub user: User,
}

/// Authenticate against the configured host.
///
/// In token mode a token found or entered here is stored in `config` so it
/// can be saved with it. Any failure is an `AuthenticationFailed` error.
pub async fn establish<R: BufRead, W: Write>(
    config: &mut ExportConfig,
    prompter: &mut Prompter<R, W>,
    cookie_databases: &[PathBuf],
) -> Result<Session> {
    let host = config.host()?.to_string();
    let client = MattermostClient::for_host(&host)?;

    let mm_user = match config.login_mode() {
        LoginMode::Password => {
            let username = match config.username.as_deref().filter(|u| !u.is_empty()) {
                Some(username) => username.to_string(),
                None => prompter.ask_required("Username: ")?,
            };
            let password = prompter.password(&format!("Password for {username}@{host}: "))?;
            tracing::info!("Logging in to {host} as {username}");
            client.login(&username, &password).await?
        }
        LoginMode::Token => {
            let token = resolve_token(config, prompter, cookie_databases, &host).await?;
            tracing::info!("Logging in to {host} with token");
            let user = client.login_with_token(&token).await?;
            config.token = Some(token);
            user
        }
    };

    let user: User = mm_user.into();
    tracing::info!("Logged in as {}", user.username);
    Ok(Session { client, user })
}

/// The token to log in with: configured, else from the cookie store, else asked
pub async fn resolve_token<R: BufRead, W: Write>(
    config: &ExportConfig,
    prompter: &mut Prompter<R, W>,
    cookie_databases: &[PathBuf],
    host: &str,
) -> Result<String> {
    if let Some(token) = config.token.as_deref().filter(|t| !t.is_empty()) {
        return Ok(token.to_string());
    }

    if let Some(cookie) = cookies::find_auth_token(cookie_databases, host).await {
        return Ok(cookie.value);
    }

    tracing::info!("No {} cookie found for {host}", cookies::AUTH_COOKIE_NAME);
    let token = prompter.ask(&format!("Access token for {host}: "))?;
    if token.is_empty() {
        return Err(Error::new(ErrorCode::AuthenticationFailed, "No token given"));
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[tokio::test]
    async fn test_configured_token_wins() {
        let config = ExportConfig {
            token: Some("configured".to_string()),
            ..Default::default()
        };
        let mut p = prompter("");
        let token = resolve_token(&config, &mut p, &[], "chat.example.com").await.unwrap();
        assert_eq!(token, "configured");
    }

    #[tokio::test]
    async fn test_token_asked_when_no_cookie() {
        let mut p = prompter("typed-token\n");
        let token = resolve_token(&ExportConfig::default(), &mut p, &[], "chat.example.com")
            .await
            .unwrap();
        assert_eq!(token, "typed-token");
    }

    #[tokio::test]
    async fn test_empty_token_is_authentication_error() {
        let mut p = prompter("\n");
        let err = resolve_token(&ExportConfig::default(), &mut p, &[], "chat.example.com")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthenticationFailed);
    }

    #[tokio::test]
    async fn test_establish_without_host_fails() {
        let mut config = ExportConfig::default();
        let mut p = prompter("");
        let err = establish(&mut config, &mut p, &[]).await.err().unwrap();
        assert_eq!(err.code, ErrorCode::Config);
    }
}
