//! Comment data models

use crate::types::{CommentId, PlaceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An anonymous comment on a place. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub place_id: PlaceId,
    pub nickname: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Stamp a new comment with a fresh id and the current time
    pub fn new(place_id: PlaceId, nickname: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: CommentId::new(),
            place_id,
            nickname: nickname.into(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// Body of a comment submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    #[serde(default)]
    pub place_id: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub content: String,
}

/// Body of a delete request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteComment {
    pub place_id: String,
    pub id: CommentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_wire_shape() {
        let comment = Comment::new(PlaceId::from_string("p1"), "배고픈 수달#123", "맛있어요");
        let json = serde_json::to_value(&comment).unwrap();

        assert_eq!(json["place_id"], "p1");
        assert_eq!(json["nickname"], "배고픈 수달#123");
        assert_eq!(json["id"], comment.id.to_string());
        assert!(json["created_at"].is_string());

        let back: Comment = serde_json::from_value(json).unwrap();
        assert_eq!(back, comment);
    }

    #[test]
    fn test_requests_tolerate_missing_fields() {
        let submit: NewComment = serde_json::from_str(r#"{"place_id":"p1"}"#).unwrap();
        assert_eq!(submit.nickname, "");

        let id = CommentId::new();
        let delete: DeleteComment =
            serde_json::from_str(&format!(r#"{{"place_id":"p1","id":"{}"}}"#, id)).unwrap();
        assert_eq!(delete.id, id);
        assert!(delete.admin_password.is_none());
    }
}
