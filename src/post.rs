//! Blog post data model.
//!
//! [`Post`] is what the blog service returns; [`Draft`] is the editable
//! value the editor holds and sends back. The JSON field names follow the
//! service (`content`, `image_url`, ...), not the Rust names.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Number of body characters shown in list excerpts.
pub const EXCERPT_CHARS: usize = 150;

/// Server-assigned post identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(i64);

impl PostId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PostId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Publication status of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Published => "Published",
        }
    }
}

/// A server-assigned timestamp.
///
/// The service emits ISO-8601 without an offset; values with an offset are
/// accepted too and normalized to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    pub const fn new(value: NaiveDateTime) -> Self {
        Self(value)
    }

    pub const fn naive(self) -> NaiveDateTime {
        self.0
    }

    /// Parse any of the timestamp shapes the service is known to emit.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
            return Some(Self(with_offset.naive_utc()));
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(Self)
    }

    /// Date as shown in post lists, e.g. `Mar 4, 2024`.
    pub fn short_date(self) -> String {
        self.0.format("%b %-d, %Y").to_string()
    }

    /// Date as shown on the post page, e.g. `March 4, 2024`.
    pub fn long_date(self) -> String {
        self.0.format("%B %-d, %Y").to_string()
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognized timestamp: {raw}")))
    }
}

/// A persisted blog post as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "content", default)]
    pub body: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Post {
    pub fn is_draft(&self) -> bool {
        self.status == PostStatus::Draft
    }

    /// Body paragraphs, one per source line.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.body.split('\n')
    }
}

/// The editable part of a post: everything except the timestamps.
///
/// A draft without an `id` has never been persisted. When present the id is
/// sent along so the service updates instead of creating.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Draft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<PostId>,
    pub title: String,
    #[serde(rename = "content")]
    pub body: String,
    pub tags: Vec<String>,
    pub status: PostStatus,
    pub image_url: Option<String>,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

impl From<Post> for Draft {
    fn from(post: Post) -> Self {
        Self {
            id: Some(post.id),
            title: post.title,
            body: post.body,
            tags: post.tags,
            status: post.status,
            image_url: post.image_url,
        }
    }
}

/// Split posts into `(published, drafts)`, keeping server order.
pub fn partition_by_status(posts: &[Post]) -> (Vec<&Post>, Vec<&Post>) {
    posts.iter().partition(|post| post.status == PostStatus::Published)
}

/// First [`EXCERPT_CHARS`] characters of `body`, with `...` when cut.
pub fn excerpt(body: &str) -> String {
    let mut chars = body.chars();
    let head: String = chars.by_ref().take(EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

fn blank_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.filter(|url| !url.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "id": 7,
            "title": "Hello",
            "content": "first\nsecond",
            "tags": ["rust", "tui"],
            "status": "published",
            "image_url": "",
            "created_at": "2024-03-04T10:15:30.123456",
            "updated_at": "2024-03-05T08:00:00+00:00"
        }"#
    }

    #[test]
    fn test_post_deserializes_service_shape() {
        let post: Post = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(post.id, PostId::new(7));
        assert_eq!(post.body, "first\nsecond");
        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.image_url, None, "empty image url means no image");
        assert_eq!(post.created_at.unwrap().short_date(), "Mar 4, 2024");
        assert_eq!(post.updated_at.unwrap().long_date(), "March 5, 2024");
    }

    #[test]
    fn test_null_tags_read_as_empty() {
        let post: Post =
            serde_json::from_str(r#"{"id": 1, "title": "t", "content": "", "tags": null}"#)
                .unwrap();
        assert!(post.tags.is_empty());
        assert!(post.is_draft());
    }

    #[test]
    fn test_draft_serializes_without_id_when_unsaved() {
        let draft = Draft {
            title: "T".into(),
            body: "B".into(),
            ..Draft::default()
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["content"], "B");
        assert_eq!(value["status"], "draft");
        assert!(value["image_url"].is_null());
    }

    #[test]
    fn test_draft_from_post_keeps_identifier() {
        let post: Post = serde_json::from_str(sample_json()).unwrap();
        let draft = Draft::from(post);
        assert_eq!(draft.id, Some(PostId::new(7)));
        assert!(draft.is_persisted());
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["id"], 7);
    }

    #[test]
    fn test_excerpt_truncates_long_bodies() {
        let body = "a".repeat(EXCERPT_CHARS + 10);
        let short = excerpt(&body);
        assert!(short.ends_with("..."));
        assert_eq!(short.chars().count(), EXCERPT_CHARS + 3);
        assert_eq!(excerpt("tiny"), "tiny");
        assert_eq!(excerpt(&"b".repeat(EXCERPT_CHARS)), "b".repeat(EXCERPT_CHARS));
    }

    #[test]
    fn test_partition_keeps_order() {
        let posts: Vec<Post> = serde_json::from_str(
            r#"[
                {"id": 1, "title": "a", "content": "", "status": "draft"},
                {"id": 2, "title": "b", "content": "", "status": "published"},
                {"id": 3, "title": "c", "content": "", "status": "draft"}
            ]"#,
        )
        .unwrap();
        let (published, drafts) = partition_by_status(&posts);
        assert_eq!(published.iter().map(|p| p.id.get()).collect::<Vec<_>>(), vec![2]);
        assert_eq!(drafts.iter().map(|p| p.id.get()).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_timestamp_rejects_garbage() {
        assert!(Timestamp::parse("yesterday").is_none());
        assert!(Timestamp::parse("2024-01-02 03:04:05").is_some());
    }

    #[test]
    fn test_post_id_parses_from_text() {
        assert_eq!(" 42 ".parse::<PostId>().unwrap(), PostId::new(42));
        assert!("abc".parse::<PostId>().is_err());
    }
}
