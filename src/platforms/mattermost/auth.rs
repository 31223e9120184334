use crate::error::{Error, ErrorCode, Result};

use super::client::MattermostClient;
use super::types::{LoginRequest, MattermostUser};

impl MattermostClient {
    /// Authenticate with Mattermost using email/username and password
    ///
    /// # Arguments
    /// * `login_id` - The user's email or username
    /// * `password` - The user's password
    ///
    /// # Returns
    /// A Result containing the authenticated user information or an Error
    ///
    /// # Note
    /// This method will extract the session token from the response headers
    /// and store it for future API calls.
    pub async fn login(&self, login_id: &str, password: &str) -> Result<MattermostUser> {
        let login_request = LoginRequest {
            login_id: login_id.to_string(),
            password: password.to_string(),
        };

        let url = self.api_url("/users/login");
        let response = self
            .http_client
            .post(&url)
            .json(&login_request)
            .send()
            .await
            .map_err(|e| {
                Error::new(
                    ErrorCode::AuthenticationFailed,
                    format!("Login request failed: {e}"),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let error = Self::error_from_response(response).await;
            return Err(Error {
                code: ErrorCode::AuthenticationFailed,
                message: format!("Login failed: {}", error.message),
                ..error
            });
        }

        // Extract the session token from the response headers
        let token = response
            .headers()
            .get("Token")
            .ok_or_else(|| Error::new(ErrorCode::AuthenticationFailed, "No token in login response"))?
            .to_str()
            .map_err(|e| {
                Error::new(
                    ErrorCode::AuthenticationFailed,
                    format!("Invalid token header: {e}"),
                )
            })?
            .to_string();
        self.set_token(token).await;

        let user = response.json::<MattermostUser>().await.map_err(|e| {
            Error::new(ErrorCode::Serialization, format!("Failed to parse user: {e}"))
        })?;

        Ok(user)
    }

    /// Authenticate with Mattermost using a session token or Personal Access Token
    ///
    /// # Arguments
    /// * `token` - The token value (e.g. the `MMAUTHTOKEN` cookie)
    ///
    /// # Returns
    /// A Result containing the authenticated user information or an Error
    ///
    /// # Note
    /// After setting the token, this method fetches the current user to verify
    /// the token is valid.
    pub async fn login_with_token(&self, token: &str) -> Result<MattermostUser> {
        self.set_token(token.to_string()).await;

        match self.get_current_user().await {
            Ok(user) => Ok(user),
            Err(e) => {
                self.clear_token().await;
                Err(Error {
                    code: ErrorCode::AuthenticationFailed,
                    message: format!("Token authentication failed: {}", e.message),
                    ..e
                })
            }
        }
    }
}
