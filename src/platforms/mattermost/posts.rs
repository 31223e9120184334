use crate::error::Result;

use super::client::MattermostClient;
use super::types::PostList;

impl MattermostClient {
    /// Get posts for a channel
    ///
    /// # Arguments
    /// * `channel_id` - The ID of the channel
    /// * `page` - Page number to retrieve (0-indexed)
    /// * `per_page` - Number of posts per page (default 60, max 200)
    ///
    /// # Returns
    /// A Result containing a PostList (newest post first) or an Error
    pub async fn get_posts_for_channel(
        &self,
        channel_id: &str,
        page: u32,
        per_page: u32,
    ) -> Result<PostList> {
        let endpoint = format!("/channels/{}/posts?page={}&per_page={}", channel_id, page, per_page);
        let response = self.get(&endpoint).await?;
        self.handle_response(response).await
    }
}
