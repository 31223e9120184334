use crate::error::Result;

use super::client::MattermostClient;
use super::types::MattermostChannel;

impl MattermostClient {
    /// Get all channels a user is a member of in a specific team
    ///
    /// The result includes the user's direct and group message channels.
    ///
    /// # Arguments
    /// * `user_id` - The ID of the member
    /// * `team_id` - The ID of the team to get channels from
    ///
    /// # Returns
    /// A Result containing a list of channels or an Error
    pub async fn get_channels_for_user(&self, user_id: &str, team_id: &str) -> Result<Vec<MattermostChannel>> {
        let endpoint = format!("/users/{user_id}/teams/{team_id}/channels");
        let response = self.get(&endpoint).await?;
        self.handle_response(response).await
    }
}
