//! In-memory server used by the workflow tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use mattermost_dl::{
    Channel, DownloadedContent, Error, ExportSource, FileInfo, Post, Result, Team, User,
};

/// Fake server state. Posts are kept oldest first and served newest first,
/// like the real API.
#[derive(Default)]
pub struct FakeSource {
    pub me: Option<User>,
    pub users: Vec<User>,
    /// Users only reachable by id, not through the listing
    pub hidden_users: Vec<User>,
    pub teams: Vec<Team>,
    pub channels: Vec<Channel>,
    pub posts: HashMap<String, Vec<Post>>,
    pub files: HashMap<String, (FileInfo, DownloadedContent)>,
    /// Failures left before a file download succeeds
    pub file_failures: Mutex<HashMap<String, u32>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new(me: User) -> Self {
        Self {
            users: vec![me.clone()],
            me: Some(me),
            ..Default::default()
        }
    }

    pub fn add_file(&mut self, id: &str, name: &str, extension: &str, content: DownloadedContent) {
        let info = FileInfo {
            id: id.to_string(),
            name: name.to_string(),
            extension: extension.to_string(),
            size: 0,
        };
        self.files.insert(id.to_string(), (info, content));
    }

    pub fn fail_file(&self, id: &str, times: u32) {
        self.file_failures
            .lock()
            .unwrap()
            .insert(id.to_string(), times);
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    /// Recorded calls starting with `prefix`
    pub fn calls_to(&self, prefix: &str) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .cloned()
            .collect()
    }
}

fn page_of<T: Clone>(items: &[T], page: u32, per_page: u32) -> Vec<T> {
    items
        .iter()
        .skip((page * per_page) as usize)
        .take(per_page as usize)
        .cloned()
        .collect()
}

#[async_trait]
impl ExportSource for FakeSource {
    async fn current_user(&self) -> Result<User> {
        self.record("current_user".to_string());
        self.me
            .clone()
            .ok_or_else(|| Error::not_found("not logged in"))
    }

    async fn list_users(&self, page: u32, per_page: u32) -> Result<Vec<User>> {
        self.record(format!("list_users {page}"));
        Ok(page_of(&self.users, page, per_page))
    }

    async fn get_user(&self, user_id: &str) -> Result<User> {
        self.record(format!("get_user {user_id}"));
        self.users
            .iter()
            .chain(&self.hidden_users)
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("user {user_id}")))
    }

    async fn list_teams_for_user(&self, user_id: &str) -> Result<Vec<Team>> {
        self.record(format!("list_teams_for_user {user_id}"));
        Ok(self.teams.clone())
    }

    async fn list_channels_for_user(&self, user_id: &str, team_id: &str) -> Result<Vec<Channel>> {
        self.record(format!("list_channels_for_user {user_id} {team_id}"));
        Ok(self.channels.clone())
    }

    async fn get_team(&self, team_id: &str) -> Result<Team> {
        self.record(format!("get_team {team_id}"));
        self.teams
            .iter()
            .find(|t| t.id == team_id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("team {team_id}")))
    }

    async fn list_posts(&self, channel_id: &str, page: u32, per_page: u32) -> Result<Vec<Post>> {
        self.record(format!("list_posts {channel_id} {page}"));
        let mut newest_first = self.posts.get(channel_id).cloned().unwrap_or_default();
        newest_first.reverse();
        Ok(page_of(&newest_first, page, per_page))
    }

    async fn get_file_info(&self, file_id: &str) -> Result<FileInfo> {
        self.record(format!("get_file_info {file_id}"));
        self.files
            .get(file_id)
            .map(|(info, _)| info.clone())
            .ok_or_else(|| Error::not_found(format!("file {file_id}")))
    }

    async fn download_file(&self, file_id: &str) -> Result<DownloadedContent> {
        self.record(format!("download_file {file_id}"));
        if let Some(left) = self.file_failures.lock().unwrap().get_mut(file_id) {
            if *left > 0 {
                *left -= 1;
                return Err(Error::transfer("connection reset"));
            }
        }
        self.files
            .get(file_id)
            .map(|(_, content)| content.clone())
            .ok_or_else(|| Error::not_found(format!("file {file_id}")))
    }
}
