use crate::types::{Channel, ChannelType, FileInfo, Post, Team, User};

use super::types::{
    MattermostChannel, MattermostChannelType, MattermostFileInfo, MattermostPost, MattermostTeam,
    MattermostUser,
};

/// Convert Mattermost User to our internal User type
impl From<MattermostUser> for User {
    fn from(mm_user: MattermostUser) -> Self {
        User::new(mm_user.id, mm_user.username)
    }
}

impl From<MattermostTeam> for Team {
    fn from(mm_team: MattermostTeam) -> Self {
        Team::new(mm_team.id, mm_team.name, mm_team.display_name)
    }
}

impl From<MattermostChannelType> for ChannelType {
    fn from(channel_type: MattermostChannelType) -> Self {
        match channel_type {
            MattermostChannelType::Open => ChannelType::Public,
            MattermostChannelType::Private => ChannelType::Private,
            MattermostChannelType::Direct => ChannelType::DirectMessage,
            MattermostChannelType::Group => ChannelType::GroupMessage,
        }
    }
}

impl From<MattermostChannel> for Channel {
    fn from(mm_channel: MattermostChannel) -> Self {
        Channel::new(
            mm_channel.id,
            mm_channel.name,
            mm_channel.display_name,
            mm_channel.channel_type.into(),
        )
        .with_team(mm_channel.team_id)
        .with_header(mm_channel.header)
    }
}

/// Convert Mattermost Post to our internal Post type
///
/// Older servers only list attachments in `metadata.files`; their ids are
/// used when `file_ids` is empty.
impl From<MattermostPost> for Post {
    fn from(mm_post: MattermostPost) -> Self {
        let file_ids = if mm_post.file_ids.is_empty() {
            mm_post.metadata.files.into_iter().map(|f| f.id).collect()
        } else {
            mm_post.file_ids
        };

        Post::new(mm_post.id, mm_post.user_id, mm_post.create_at, mm_post.message)
            .with_files(file_ids)
    }
}

impl From<MattermostFileInfo> for FileInfo {
    fn from(file: MattermostFileInfo) -> Self {
        FileInfo {
            id: file.id,
            name: file.name,
            extension: file.extension.trim_start_matches('.').to_string(),
            size: file.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mm_post(file_ids: Vec<String>, meta_files: Vec<&str>) -> MattermostPost {
        let json = serde_json::json!({
            "id": "p1",
            "create_at": 1_700_000_000_000_i64,
            "user_id": "u1",
            "channel_id": "c1",
            "message": "hello",
            "file_ids": file_ids,
            "metadata": {
                "files": meta_files.iter().map(|id| serde_json::json!({"id": id})).collect::<Vec<_>>()
            }
        });
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_post_conversion() {
        let post: Post = mm_post(vec!["f1".to_string()], vec!["f1"]).into();
        assert_eq!(post.id, "p1");
        assert_eq!(post.user_id, "u1");
        assert_eq!(post.create_at, 1_700_000_000_000);
        assert_eq!(post.message, "hello");
        assert_eq!(post.file_ids, vec!["f1".to_string()]);
    }

    #[test]
    fn test_post_files_from_metadata() {
        let post: Post = mm_post(vec![], vec!["f2", "f3"]).into();
        assert_eq!(post.file_ids, vec!["f2".to_string(), "f3".to_string()]);
    }

    #[test]
    fn test_channel_conversion() {
        let json = serde_json::json!({
            "id": "c1",
            "team_id": "t1",
            "type": "P",
            "name": "secret",
            "display_name": "Secret Plans",
            "header": "shh"
        });
        let mm_channel: MattermostChannel = serde_json::from_value(json).unwrap();
        let channel: Channel = mm_channel.into();
        assert_eq!(channel.channel_type, ChannelType::Private);
        assert_eq!(channel.display_name, "Secret Plans");
        assert_eq!(channel.team_id, "t1");
        assert_eq!(channel.header, "shh");
    }

    #[test]
    fn test_file_info_extension() {
        let json = serde_json::json!({"id": "f1", "name": "a.tar.gz", "extension": ".gz"});
        let info: FileInfo = serde_json::from_value::<MattermostFileInfo>(json).unwrap().into();
        assert_eq!(info.extension, "gz");
    }
}
