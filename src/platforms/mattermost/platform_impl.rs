//! `ExportSource` implementation backed by the Mattermost REST API

use async_trait::async_trait;

use crate::error::Result;
use crate::platforms::ExportSource;
use crate::types::{Channel, DownloadedContent, FileInfo, Post, Team, User};

use super::client::MattermostClient;

#[async_trait]
impl ExportSource for MattermostClient {
    async fn current_user(&self) -> Result<User> {
        Ok(self.get_current_user().await?.into())
    }

    async fn list_users(&self, page: u32, per_page: u32) -> Result<Vec<User>> {
        let users = self.get_users(page, per_page).await?;
        Ok(users.into_iter().map(User::from).collect())
    }

    async fn get_user(&self, user_id: &str) -> Result<User> {
        Ok(MattermostClient::get_user(self, user_id).await?.into())
    }

    async fn list_teams_for_user(&self, user_id: &str) -> Result<Vec<Team>> {
        let teams = self.get_teams_for_user(user_id).await?;
        Ok(teams.into_iter().map(Team::from).collect())
    }

    async fn list_channels_for_user(&self, user_id: &str, team_id: &str) -> Result<Vec<Channel>> {
        let channels = self.get_channels_for_user(user_id, team_id).await?;
        Ok(channels.into_iter().map(Channel::from).collect())
    }

    async fn get_team(&self, team_id: &str) -> Result<Team> {
        Ok(MattermostClient::get_team(self, team_id).await?.into())
    }

    async fn list_posts(&self, channel_id: &str, page: u32, per_page: u32) -> Result<Vec<Post>> {
        let list = self.get_posts_for_channel(channel_id, page, per_page).await?;
        Ok(list.into_ordered().into_iter().map(Post::from).collect())
    }

    async fn get_file_info(&self, file_id: &str) -> Result<FileInfo> {
        Ok(MattermostClient::get_file_info(self, file_id).await?.into())
    }

    async fn download_file(&self, file_id: &str) -> Result<DownloadedContent> {
        MattermostClient::download_file(self, file_id).await
    }
}
