//! Post types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// A tag attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostTag {
    #[serde(default)]
    pub id: String,
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl PostTag {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            slug: slug.into(),
            name: name.into(),
            description: None,
            feature_image: None,
            url: None,
        }
    }
}

/// A post exactly as the Content API returns it.
///
/// Every field except `id` may be trimmed away by a `fields` query, so
/// they all carry defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPost {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub feature_image: Option<String>,
    #[serde(default)]
    pub primary_tag: Option<PostTag>,
    #[serde(default)]
    pub tags: Vec<PostTag>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comment_id: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
}

/// Metadata derived from a post's tag list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagInfo {
    pub post_type: String,
    pub post_category: String,
    pub post_series: String,
    pub post_general_tags: Vec<String>,
}

/// A post adapted for the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    /// Frontend URL of the post, not the CMS one.
    pub url: Url,
    pub feature_image: Option<String>,
    pub primary_tag: Option<PostTag>,
    pub tags: Vec<PostTag>,
    pub published_at: Option<DateTime<Utc>>,
    pub comment_id: Option<String>,
    pub excerpt: Option<String>,
    pub html: Option<String>,
    #[serde(flatten)]
    pub tag_info: TagInfo,
}

/// `{ "posts": [...] }` wrapper used by the posts endpoint.
///
/// The `posts` key is required: a body without it is not a post listing.
#[derive(Debug, Clone, Deserialize)]
pub struct PostsEnvelope {
    posts: Vec<RawPost>,
}

impl PostsEnvelope {
    pub fn into_posts(self) -> Vec<RawPost> {
        self.posts
    }
}
