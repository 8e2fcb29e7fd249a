//! Stored documents and query projections.

use std::{fmt, str::FromStr, sync::LazyLock};

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

#[cfg(feature = "utoipa")]
use utoipa::ToSchema;

use crate::{
    errors::{ValidationError, ValidationIssue, ValidationResult},
    validators::is_valid_media_url,
};

static VIDEO_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(mp4|mov|m4v|webm)$").expect("static regex"));

pub type UserId = String;
pub type PostId = String;
pub type CommentId = String;
pub type LikeId = String;

/// Profile stored for an identity-provider subject.
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub created_at: DateTime<Utc>,
    pub name: String,
    #[serde(default)]
    pub username: Option<String>,
    pub token_identifier: String,
    #[serde(default)]
    pub profile_image: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Name shown next to the user's content.
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.name)
    }
}

/// Field changes applied to an existing user. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub username: Option<String>,
    pub profile_image: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.username.is_none() && self.profile_image.is_none()
    }

    pub fn apply(&self, user: &mut User, at: DateTime<Utc>) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(username) = &self.username {
            user.username = Some(username.clone());
        }
        if let Some(image) = &self.profile_image {
            user.profile_image = Some(image.clone());
        }
        user.updated_at = at;
    }
}

#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Guesses the kind from a file name or URI extension.
    pub fn from_uri(uri: &str) -> Self {
        if VIDEO_EXTENSION.is_match(uri) {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "image" => Ok(MediaKind::Image),
            "video" => Ok(MediaKind::Video),
            other => Err(ValidationError::single(
                "media.kind",
                "media.kind",
                format!("media kind must be \"image\" or \"video\", got {other:?}"),
            )),
        }
    }
}

/// One item of a post's media carousel.
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub kind: MediaKind,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

impl Media {
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Image,
            url: url.into(),
            poster: None,
        }
    }

    pub fn video(url: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Video,
            url: url.into(),
            poster: None,
        }
    }

    /// Media item whose kind is inferred from the URL.
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            kind: MediaKind::from_uri(&url),
            url,
            poster: None,
        }
    }

    pub fn with_poster(mut self, poster: impl Into<String>) -> Self {
        self.poster = Some(poster.into());
        self
    }

    fn collect_issues(&self, index: usize, issues: &mut Vec<ValidationIssue>) {
        if !is_valid_media_url(&self.url) {
            issues.push(ValidationIssue::new(
                format!("media[{index}].url"),
                "media.url",
                "media url must be an absolute http(s) or file url",
            ));
        }
        if let Some(poster) = &self.poster
            && !is_valid_media_url(poster)
        {
            issues.push(ValidationIssue::new(
                format!("media[{index}].poster"),
                "media.poster",
                "poster must be an absolute http(s) or file url",
            ));
        }
    }
}

/// Input to `create_post`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub media: Vec<Media>,
    #[serde(default)]
    pub caption: Option<String>,
}

impl NewPost {
    pub fn new(media: Vec<Media>) -> Self {
        Self { media, caption: None }
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Checks that the post carries at least one item and that every URL is usable.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.media.is_empty() {
            return Err(ValidationError::single(
                "media",
                "post.media_required",
                "a post must include at least one media item (image or video)",
            ));
        }
        let mut issues = Vec::new();
        for (index, item) in self.media.iter().enumerate() {
            item.collect_issues(index, &mut issues);
        }
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(issues))
        }
    }

    /// Caption as stored: blank captions are dropped.
    pub fn normalized_caption(&self) -> Option<String> {
        self.caption
            .as_deref()
            .map(str::trim)
            .filter(|caption| !caption.is_empty())
            .map(str::to_string)
    }
}

#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub created_at: DateTime<Utc>,
    /// Owning user.
    pub author: UserId,
    /// Author display name captured at creation time.
    pub author_name: String,
    #[serde(default)]
    pub author_profile_image: Option<String>,
    pub media: Vec<Media>,
    #[serde(default)]
    pub caption: Option<String>,
}

#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub created_at: DateTime<Utc>,
    pub post_id: PostId,
    pub author_id: UserId,
    pub author_name: String,
    #[serde(default)]
    pub author_profile_image: Option<String>,
    pub text: String,
}

#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Like {
    pub id: LikeId,
    pub created_at: DateTime<Utc>,
    pub post_id: PostId,
    pub user_id: UserId,
}

/// A like joined with the liking user's display fields.
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Liker {
    pub like_id: LikeId,
    pub user_id: UserId,
    pub username: String,
    pub profile_image: Option<String>,
    pub liked_at: DateTime<Utc>,
}

/// Outcome of a like toggle.
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeToggle {
    pub liked: bool,
}

/// Outcome of a successful delete.
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
    pub deleted: bool,
}
