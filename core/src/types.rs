//! Domain records for the wall API.
//!
//! # Design
//! Records are immutable snapshots decoded from one response; nothing here is
//! cached or mutated by the client. Older field names (`to_id` for the wall
//! owner, `cid` for a comment id) are accepted so the same types decode both
//! the pinned comments version and the ambient one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serde_util::{flag, timestamp_secs};
use crate::token::wire_enum;

/// Which posts `WallClient::get` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WallFilter {
    /// Every post on the wall.
    #[default]
    All,
    /// Posts written by the wall owner.
    Owner,
    /// Posts written by anyone except the owner.
    Others,
    /// Scheduled posts. Requires write access to the wall.
    Postponed,
    /// Suggested community posts.
    Suggests,
}

wire_enum!(WallFilter {
    All,
    Owner,
    Others,
    Postponed,
    Suggests
});

/// Comment ordering. The server orders chronologically when unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentsSort {
    Asc,
    Desc,
}

wire_enum!(CommentsSort { Asc, Desc });

/// A paginated result: one page of items plus the server-side total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub total_count: u32,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Likes {
    #[serde(default)]
    pub count: u32,
    #[serde(default, with = "flag")]
    pub user_likes: bool,
    #[serde(default, with = "flag")]
    pub can_like: bool,
    #[serde(default, with = "flag")]
    pub can_publish: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reposts {
    #[serde(default)]
    pub count: u32,
    #[serde(default, with = "flag")]
    pub user_reposted: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentsInfo {
    #[serde(default)]
    pub count: u32,
    #[serde(default, with = "flag")]
    pub can_post: bool,
}

/// A media or link attachment. `payload` keeps the type-specific object as
/// sent (for a photo: `{"photo": {...}}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub payload: serde_json::Map<String, serde_json::Value>,
}

/// A wall entry, identified by `(owner_id, id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPost")]
pub struct Post {
    pub id: i64,
    /// Wall owner. Negative for communities.
    pub owner_id: i64,
    /// Author.
    pub from_id: i64,
    #[serde(with = "timestamp_secs")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub likes: Likes,
    #[serde(default)]
    pub reposts: Reposts,
    #[serde(default)]
    pub comments: CommentsInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy_owner_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy_post_id: Option<i64>,
}

/// Wire form of `Post`. Older versions name the owner `to_id`, and some send
/// both keys; `owner_id` wins when both are present.
#[derive(Deserialize)]
struct RawPost {
    id: i64,
    #[serde(default)]
    owner_id: Option<i64>,
    #[serde(default)]
    to_id: Option<i64>,
    from_id: i64,
    #[serde(with = "timestamp_secs")]
    date: DateTime<Utc>,
    #[serde(default)]
    text: String,
    #[serde(default)]
    attachments: Vec<Attachment>,
    #[serde(default)]
    likes: Likes,
    #[serde(default)]
    reposts: Reposts,
    #[serde(default)]
    comments: CommentsInfo,
    #[serde(default)]
    post_type: Option<String>,
    #[serde(default)]
    signer_id: Option<i64>,
    #[serde(default)]
    copy_owner_id: Option<i64>,
    #[serde(default)]
    copy_post_id: Option<i64>,
}

impl TryFrom<RawPost> for Post {
    type Error = String;

    fn try_from(raw: RawPost) -> Result<Self, Self::Error> {
        let owner_id = raw
            .owner_id
            .or(raw.to_id)
            .ok_or_else(|| "missing field `owner_id`".to_string())?;
        Ok(Post {
            id: raw.id,
            owner_id,
            from_id: raw.from_id,
            date: raw.date,
            text: raw.text,
            attachments: raw.attachments,
            likes: raw.likes,
            reposts: raw.reposts,
            comments: raw.comments,
            post_type: raw.post_type,
            signer_id: raw.signer_id,
            copy_owner_id: raw.copy_owner_id,
            copy_post_id: raw.copy_post_id,
        })
    }
}

impl Post {
    /// `<owner_id>_<id>`, the form accepted by `WallClient::get_by_id`.
    pub fn composite_id(&self) -> String {
        format!("{}_{}", self.owner_id, self.id)
    }

    pub fn is_community_post(&self) -> bool {
        self.owner_id < 0
    }
}

/// A reply to a post, identified by `(owner_id, post_id, id)`.
///
/// The comment endpoint does not echo the owner and post ids; the client fills
/// them in from the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(alias = "cid")]
    pub id: i64,
    #[serde(default)]
    pub owner_id: i64,
    #[serde(default)]
    pub post_id: i64,
    /// Author.
    pub from_id: i64,
    #[serde(with = "timestamp_secs")]
    pub date: DateTime<Utc>,
    /// Possibly truncated server-side when a preview length was requested.
    #[serde(default)]
    pub text: String,
    /// Present only when likes were requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<Likes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_uid: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_cid: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_decodes_legacy_shape() {
        let post: Post = serde_json::from_str(
            r#"{"id":21539,"to_id":93388,"from_id":93388,"date":1383673232,
                "text":"hello","likes":{"count":3,"user_likes":1,"can_like":0,"can_publish":1},
                "reposts":{"count":1,"user_reposted":0},"comments":{"count":2,"can_post":1},
                "attachments":[{"type":"photo","photo":{"pid":1,"src":"a.jpg"}}],
                "post_type":"post"}"#,
        )
        .unwrap();

        assert_eq!(post.owner_id, 93388);
        assert_eq!(post.composite_id(), "93388_21539");
        assert_eq!(post.likes.count, 3);
        assert!(post.likes.user_likes);
        assert!(!post.likes.can_like);
        assert_eq!(post.comments.count, 2);
        assert_eq!(post.attachments[0].kind, "photo");
        assert_eq!(post.attachments[0].payload["photo"]["src"], "a.jpg");
        assert!(!post.is_community_post());
    }

    #[test]
    fn post_aggregates_default_when_missing() {
        let post: Post =
            serde_json::from_str(r#"{"id":1,"owner_id":-1,"from_id":-1,"date":0}"#).unwrap();
        assert_eq!(post.likes, Likes::default());
        assert!(post.attachments.is_empty());
        assert!(post.text.is_empty());
        assert!(post.is_community_post());
    }

    #[test]
    fn post_owner_from_either_key() {
        let legacy: Post =
            serde_json::from_str(r#"{"id":1,"to_id":-7,"from_id":-7,"date":0}"#).unwrap();
        let modern: Post =
            serde_json::from_str(r#"{"id":1,"owner_id":-7,"from_id":-7,"date":0}"#).unwrap();
        assert_eq!(legacy.owner_id, -7);
        assert_eq!(modern.owner_id, -7);
    }

    #[test]
    fn post_with_both_owner_keys_decodes() {
        let post: Post = serde_json::from_str(
            r#"{"id":1,"owner_id":-1,"to_id":-1,"from_id":-1,"date":1383673232,"text":"x"}"#,
        )
        .unwrap();
        assert_eq!(post.owner_id, -1);
        assert_eq!(post.composite_id(), "-1_1");

        let prefers_owner_id: Post =
            serde_json::from_str(r#"{"id":1,"owner_id":-1,"to_id":5,"from_id":5,"date":0}"#)
                .unwrap();
        assert_eq!(prefers_owner_id.owner_id, -1);
    }

    #[test]
    fn post_without_owner_is_rejected() {
        let err = serde_json::from_str::<Post>(r#"{"id":1,"from_id":1,"date":0}"#).unwrap_err();
        assert!(err.to_string().contains("owner_id"));
    }

    #[test]
    fn post_serializes_owner_id_only() {
        let post: Post =
            serde_json::from_str(r#"{"id":2,"to_id":3,"from_id":3,"date":10}"#).unwrap();
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["owner_id"], 3);
        assert!(json.get("to_id").is_none());
        assert_eq!(serde_json::from_value::<Post>(json).unwrap(), post);
    }

    #[test]
    fn comment_decodes_cid_shape_without_ids() {
        let comment: Comment = serde_json::from_str(
            r#"{"cid":7,"from_id":5,"date":1383673232,"text":"first","reply_to_uid":3}"#,
        )
        .unwrap();
        assert_eq!(comment.id, 7);
        assert_eq!(comment.from_id, 5);
        assert_eq!(comment.owner_id, 0);
        assert!(comment.likes.is_none());
        assert_eq!(comment.reply_to_uid, Some(3));
    }

    #[test]
    fn page_iterates_items_in_order() {
        let page = Page {
            total_count: 10,
            items: vec![1, 2, 3],
        };
        assert_eq!(page.len(), 3);
        assert_eq!(page.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
