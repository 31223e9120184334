//! Team lookups for Mattermost

use crate::error::Result;
use super::client::MattermostClient;
use super::types::MattermostTeam;

impl MattermostClient {
    /// Get all teams a user belongs to
    ///
    /// # Arguments
    /// * `user_id` - The user whose teams to list
    ///
    /// # API Endpoint
    /// GET /users/{user_id}/teams
    pub async fn get_teams_for_user(&self, user_id: &str) -> Result<Vec<MattermostTeam>> {
        let endpoint = format!("/users/{user_id}/teams");
        let response = self.get(&endpoint).await?;
        self.handle_response(response).await
    }

    /// Get a specific team by ID
    ///
    /// # Arguments
    /// * `team_id` - The unique identifier of the team
    ///
    /// # Returns
    /// A Result containing the MattermostTeam object; `ErrorCode::NotFound`
    /// if the server does not know the team
    ///
    /// # API Endpoint
    /// GET /teams/{team_id}
    pub async fn get_team(&self, team_id: &str) -> Result<MattermostTeam> {
        let endpoint = format!("/teams/{team_id}");
        let response = self.get(&endpoint).await?;
        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_endpoints() {
        let client = MattermostClient::new("https://mattermost.example.com").unwrap();
        assert_eq!(
            client.api_url(&format!("/users/{}/teams", "user123")),
            "https://mattermost.example.com/api/v4/users/user123/teams"
        );
        assert_eq!(format!("/teams/{}", "team123"), "/teams/team123");
    }
}
