//! Directory resolution: users, teams and channels reachable by the
//! authenticated user

use std::collections::HashMap;
use std::future::Future;

use crate::error::Result;
use crate::platforms::{ExportSource, PAGE_SIZE};
use crate::types::{Channel, Team, User};

/// Fetch pages `0, 1, 2, …` until one comes back empty and return all items.
///
/// Termination is on the empty page only, so a final page that is exactly
/// full costs one extra request.
pub async fn collect_pages<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let mut items = Vec::new();
    let mut page = 0;
    loop {
        let batch = fetch_page(page).await?;
        if batch.is_empty() {
            return Ok(items);
        }
        items.extend(batch);
        page += 1;
    }
}

/// User id to username mapping for the duration of a run.
///
/// Filled in bulk at start-up and extended on demand. An entry never changes
/// once set.
#[derive(Debug, Clone, Default)]
pub struct UsernameCache {
    names: HashMap<String, String>,
}

impl UsernameCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a user unless its id is already known
    pub fn insert(&mut self, user: User) {
        self.names.entry(user.id).or_insert(user.username);
    }

    pub fn get(&self, user_id: &str) -> Option<&str> {
        self.names.get(user_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Username for `user_id`, fetching and caching the user on a miss
    pub async fn resolve(&mut self, source: &dyn ExportSource, user_id: &str) -> Result<String> {
        if let Some(name) = self.get(user_id) {
            return Ok(name.to_string());
        }

        tracing::debug!(user_id, "Fetching unknown user");
        let user = source.get_user(user_id).await?;
        let username = user.username.clone();
        self.names.insert(user_id.to_string(), username.clone());
        Ok(username)
    }
}

impl FromIterator<User> for UsernameCache {
    fn from_iter<I: IntoIterator<Item = User>>(iter: I) -> Self {
        let mut cache = Self::new();
        for user in iter {
            cache.insert(user);
        }
        cache
    }
}

/// What the authenticated user can see on the server
#[derive(Debug, Clone)]
pub struct Directory {
    /// The authenticated user
    pub me: User,
    pub usernames: UsernameCache,
}

impl Directory {
    /// Fetch every user on the server and identify the authenticated user
    pub async fn resolve(source: &dyn ExportSource) -> Result<Self> {
        tracing::info!("Downloading all user data");
        let users = collect_pages(move |page| source.list_users(page, PAGE_SIZE)).await?;
        let mut usernames: UsernameCache = users.into_iter().collect();
        tracing::info!("Found {} users", usernames.len());

        let me = source.current_user().await?;
        usernames.insert(me.clone());
        tracing::info!("Id of logged in user: {}", me.id);

        Ok(Self { me, usernames })
    }

    /// Teams the authenticated user belongs to
    pub async fn teams(&self, source: &dyn ExportSource) -> Result<Vec<Team>> {
        source.list_teams_for_user(&self.me.id).await
    }

    /// Channels of `team` the authenticated user is in, with display names
    /// resolved and sorted case-insensitively by display name
    pub async fn channels(&mut self, source: &dyn ExportSource, team: &Team) -> Result<Vec<Channel>> {
        let channels = source.list_channels_for_user(&self.me.id, &team.id).await?;
        let mut channels = self.with_display_names(source, channels).await?;
        sort_by_display_name(&mut channels);
        Ok(channels)
    }

    /// Name direct message channels after the other participant
    pub async fn with_display_names(
        &mut self,
        source: &dyn ExportSource,
        mut channels: Vec<Channel>,
    ) -> Result<Vec<Channel>> {
        for channel in &mut channels {
            let Some(partner_id) = channel.dm_partner_id(&self.me.id).map(str::to_string) else {
                continue;
            };
            channel.display_name = self.usernames.resolve(source, &partner_id).await?;
        }
        Ok(channels)
    }
}

/// Case-insensitive sort by display name
pub fn sort_by_display_name(channels: &mut [Channel]) {
    channels.sort_by_cached_key(|c| c.display_name.to_lowercase());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChannelType;
    use std::cell::RefCell;

    #[tokio::test]
    async fn test_collect_pages_stops_on_empty_page() {
        let calls = RefCell::new(Vec::new());
        let items = collect_pages(|page| {
            calls.borrow_mut().push(page);
            let len = if page < 2 { 200 } else { 0 };
            async move { Ok(vec![page; len]) }
        })
        .await
        .unwrap();

        assert_eq!(*calls.borrow(), vec![0, 1, 2]);
        assert_eq!(items.len(), 400);
    }

    #[tokio::test]
    async fn test_collect_pages_short_last_page_still_requests_next() {
        let calls = RefCell::new(0);
        let items = collect_pages(|page| {
            *calls.borrow_mut() += 1;
            let len = if page == 0 { 7 } else { 0 };
            async move { Ok(vec![(); len]) }
        })
        .await
        .unwrap();

        assert_eq!(*calls.borrow(), 2);
        assert_eq!(items.len(), 7);
    }

    #[tokio::test]
    async fn test_collect_pages_propagates_error() {
        let result: Result<Vec<u8>> = collect_pages(|_| async {
            Err(crate::error::Error::not_found("gone"))
        })
        .await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn test_cache_entries_never_change() {
        let mut cache = UsernameCache::new();
        cache.insert(User::new("u1", "alice"));
        cache.insert(User::new("u1", "mallory"));
        assert_eq!(cache.get("u1"), Some("alice"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_sort_by_display_name_ignores_case() {
        let mut channels = vec![
            Channel::new("1", "b", "bravo", ChannelType::Public),
            Channel::new("2", "a", "Alpha", ChannelType::Public),
            Channel::new("3", "c", "charlie", ChannelType::Public),
        ];
        sort_by_display_name(&mut channels);
        let names: Vec<_> = channels.iter().map(|c| c.display_name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "bravo", "charlie"]);
    }
}
