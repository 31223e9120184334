use reqwest::Client;
use std::sync::Arc;
use tokio::sync::RwLock;
use url::Url;

use crate::error::{Error, ErrorCode, Result};

use super::types::ApiError;

/// Mattermost client for interacting with Mattermost servers
pub struct MattermostClient {
    /// HTTP client for REST API calls
    pub(crate) http_client: Client,
    /// Base URL for the Mattermost server (e.g., "https://mattermost.example.com")
    base_url: Url,
    /// Authentication token (session token or Personal Access Token)
    token: Arc<RwLock<Option<String>>>,
}

impl MattermostClient {
    /// Create a new Mattermost client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the Mattermost server (e.g., "https://mattermost.example.com")
    ///
    /// # Returns
    /// A Result containing the MattermostClient or an Error
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::new(ErrorCode::InvalidArgument, format!("Invalid URL: {e}")))?;

        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| Error::new(ErrorCode::NetworkError, format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url,
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Create a client for a bare host name such as `chat.example.com`.
    ///
    /// The server is always reached over HTTPS on the default port.
    pub fn for_host(host: &str) -> Result<Self> {
        let host = host.trim().trim_end_matches('/');
        if host.is_empty() {
            return Err(Error::invalid_argument("Host must not be empty"));
        }
        Self::new(&format!("https://{host}"))
    }

    /// Set the authentication token (session token or Personal Access Token)
    pub async fn set_token(&self, token: String) {
        let mut t = self.token.write().await;
        *t = Some(token);
    }

    /// Forget the authentication token
    pub async fn clear_token(&self) {
        let mut t = self.token.write().await;
        *t = None;
    }

    /// Get the current authentication token
    pub async fn get_token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Build the full API URL for a given endpoint
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint path (e.g., "/users/me")
    ///
    /// # Returns
    /// The full URL string
    pub fn api_url(&self, endpoint: &str) -> String {
        let endpoint = endpoint.trim_start_matches('/');
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/api/v4/{endpoint}")
    }

    /// Make a GET request to the Mattermost API
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint path
    ///
    /// # Returns
    /// A Result containing the reqwest::Response or an Error
    pub async fn get(&self, endpoint: &str) -> Result<reqwest::Response> {
        let url = self.api_url(endpoint);
        tracing::debug!(%url, "GET");
        let mut request = self.http_client.get(&url);

        if let Some(token) = self.get_token().await {
            request = request.bearer_auth(token);
        }

        request
            .send()
            .await
            .map_err(|e| Error::new(ErrorCode::NetworkError, format!("GET request failed: {e}")))
    }

    /// Check if the response is successful and extract the JSON body
    ///
    /// # Arguments
    /// * `response` - The HTTP response from the API
    ///
    /// # Returns
    /// A Result containing the deserialized response body or an Error
    pub async fn handle_response<T: serde::de::DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| Error::new(ErrorCode::Serialization, format!("Failed to parse response: {e}")))
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    /// Turn a failed response into an Error, keeping the server's error id
    /// and request id when the body carries them
    pub(crate) async fn error_from_response(response: reqwest::Response) -> Error {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        let mut error = Error::new(
            ErrorCode::from_http_status(status.as_u16()),
            format!("API request failed with status {status}: {error_text}"),
        )
        .with_http_status(status.as_u16());

        if let Ok(body) = serde_json::from_str::<ApiError>(&error_text) {
            if !body.message.is_empty() {
                error.message = format!("API request failed with status {status}: {}", body.message);
            }
            if !body.id.is_empty() {
                error = error.with_mattermost_error_id(body.id);
            }
            if !body.request_id.is_empty() {
                error = error.with_request_id(body.request_id);
            }
        }

        error
    }
}
