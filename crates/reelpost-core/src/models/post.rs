use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use uuid::Uuid;

use super::user::AuthUser;

/// Who can see a published video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Unlisted,
}

impl FromStr for Visibility {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            "unlisted" => Ok(Visibility::Unlisted),
            _ => Err(anyhow::anyhow!("Invalid visibility: {}", s)),
        }
    }
}

impl Display for Visibility {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Private => write!(f, "private"),
            Visibility::Unlisted => write!(f, "unlisted"),
        }
    }
}

/// A published video record before the store has stamped its creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPublishRecord {
    #[serde(rename = "postId")]
    pub post_id: Uuid,
    #[serde(rename = "postVideoUrl")]
    pub video_url: String,
    #[serde(rename = "postThumbnailUrl")]
    pub thumbnail_url: String,
    #[serde(rename = "postTitle")]
    pub title: String,
    pub description: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub username: String,
    #[serde(rename = "user_profile_pic_url")]
    pub user_profile_pic_url: Option<String>,
    pub likes: Vec<String>,
    pub comments: Vec<JsonValue>,
    pub visibility: Visibility,
}

impl NewPublishRecord {
    /// Assemble a record with empty engagement collections.
    pub fn new(
        post_id: Uuid,
        video_url: impl Into<String>,
        thumbnail_url: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        author: &AuthUser,
        visibility: Visibility,
    ) -> Self {
        Self {
            post_id,
            video_url: video_url.into(),
            thumbnail_url: thumbnail_url.into(),
            title: title.into(),
            description: description.into(),
            user_id: author.uid.clone(),
            username: author.username.clone(),
            user_profile_pic_url: author.profile_picture_url.clone(),
            likes: Vec::new(),
            comments: Vec::new(),
            visibility,
        }
    }

    pub fn into_record(self, created_at: DateTime<Utc>) -> PublishRecord {
        PublishRecord {
            post_id: self.post_id,
            video_url: self.video_url,
            thumbnail_url: self.thumbnail_url,
            created_at,
            title: self.title,
            description: self.description,
            user_id: self.user_id,
            username: self.username,
            user_profile_pic_url: self.user_profile_pic_url,
            likes: self.likes,
            comments: self.comments,
            visibility: self.visibility,
        }
    }
}

/// The persisted document describing one published video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishRecord {
    #[serde(rename = "postId")]
    pub post_id: Uuid,
    #[serde(rename = "postVideoUrl")]
    pub video_url: String,
    #[serde(rename = "postThumbnailUrl")]
    pub thumbnail_url: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "postTitle")]
    pub title: String,
    pub description: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub username: String,
    #[serde(rename = "user_profile_pic_url")]
    pub user_profile_pic_url: Option<String>,
    pub likes: Vec<String>,
    pub comments: Vec<JsonValue>,
    pub visibility: Visibility,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_parsing() {
        assert_eq!(" Private ".parse::<Visibility>().unwrap(), Visibility::Private);
        assert_eq!("UNLISTED".parse::<Visibility>().unwrap(), Visibility::Unlisted);
        assert!("friends".parse::<Visibility>().is_err());
        assert_eq!(Visibility::default(), Visibility::Public);
    }

    #[test]
    fn test_record_uses_document_field_names() {
        let author = AuthUser::new("uid-1", "ada").with_profile_picture("https://cdn/ada.png");
        let record = NewPublishRecord::new(
            Uuid::nil(),
            "https://cdn/video.mp4",
            "https://cdn/thumb",
            "My clip",
            "desc",
            &author,
            Visibility::Public,
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["postId"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["postVideoUrl"], "https://cdn/video.mp4");
        assert_eq!(json["postThumbnailUrl"], "https://cdn/thumb");
        assert_eq!(json["postTitle"], "My clip");
        assert_eq!(json["userId"], "uid-1");
        assert_eq!(json["user_profile_pic_url"], "https://cdn/ada.png");
        assert_eq!(json["likes"], serde_json::json!([]));
        assert_eq!(json["comments"], serde_json::json!([]));
        assert_eq!(json["visibility"], "public");
        assert!(json.get("createdAt").is_none());
    }

    #[test]
    fn test_into_record_keeps_fields() {
        let author = AuthUser::new("uid-2", "grace");
        let created_at = Utc::now();
        let record = NewPublishRecord::new(
            Uuid::new_v4(),
            "v",
            "t",
            "title",
            "",
            &author,
            Visibility::Private,
        )
        .into_record(created_at);

        assert_eq!(record.created_at, created_at);
        assert_eq!(record.username, "grace");
        assert_eq!(record.visibility, Visibility::Private);
        assert!(record.likes.is_empty() && record.comments.is_empty());
    }
}
