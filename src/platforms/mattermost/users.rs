use crate::error::Result;

use super::client::MattermostClient;
use super::types::MattermostUser;

impl MattermostClient {
    /// Get a user by ID
    ///
    /// # Arguments
    /// * `user_id` - The ID of the user to retrieve
    ///
    /// # Returns
    /// A Result containing the user information or an Error
    pub async fn get_user(&self, user_id: &str) -> Result<MattermostUser> {
        let endpoint = format!("/users/{user_id}");
        let response = self.get(&endpoint).await?;
        self.handle_response(response).await
    }

    /// Get the current authenticated user
    ///
    /// # Returns
    /// A Result containing the current user's information or an Error
    pub async fn get_current_user(&self) -> Result<MattermostUser> {
        let response = self.get("/users/me").await?;
        self.handle_response(response).await
    }

    /// Get one page of all users on the server
    ///
    /// # Arguments
    /// * `page` - Page number to retrieve (0-indexed)
    /// * `per_page` - Number of users per page (max 200)
    ///
    /// # Returns
    /// A Result containing the users of that page; an empty page marks the end
    pub async fn get_users(&self, page: u32, per_page: u32) -> Result<Vec<MattermostUser>> {
        let endpoint = format!("/users?page={page}&per_page={per_page}");
        let response = self.get(&endpoint).await?;
        self.handle_response(response).await
    }
}
