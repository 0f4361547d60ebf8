//! Comment moderation: content policy and admin-gated deletion

use super::model::{Comment, DeleteComment, NewComment};
use super::store::CommentStore;
use super::validator::CommentValidator;
use crate::config::Config;
use crate::error::{LunchPickerError, Result};
use crate::types::{CommentId, PlaceId};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Who may delete comments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminPolicy {
    /// No secret configured: anyone may delete
    Open,
    /// Deletes must present this exact secret
    Secret(String),
}

impl AdminPolicy {
    /// A blank secret counts as unset
    pub fn from_secret(secret: Option<&str>) -> Self {
        match secret {
            Some(secret) if !secret.is_empty() => AdminPolicy::Secret(secret.to_string()),
            _ => AdminPolicy::Open,
        }
    }

    pub fn authorize(&self, supplied: Option<&str>) -> Result<()> {
        match self {
            AdminPolicy::Open => Ok(()),
            AdminPolicy::Secret(secret) if supplied == Some(secret.as_str()) => Ok(()),
            AdminPolicy::Secret(_) => Err(LunchPickerError::Authorization),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, AdminPolicy::Open)
    }
}

/// Applies the comment policy in front of a [`CommentStore`]
#[derive(Clone)]
pub struct CommentModerator {
    store: Arc<dyn CommentStore>,
    validator: CommentValidator,
    admin: AdminPolicy,
}

impl CommentModerator {
    pub fn new(store: impl CommentStore + 'static, validator: CommentValidator, admin: AdminPolicy) -> Self {
        Self::with_store(Arc::new(store), validator, admin)
    }

    /// Create a moderator over shared storage
    pub fn with_store(store: Arc<dyn CommentStore>, validator: CommentValidator, admin: AdminPolicy) -> Self {
        if admin.is_open() {
            warn!("No admin secret configured; comment deletion is open to everyone");
        }
        Self {
            store,
            validator,
            admin,
        }
    }

    /// Moderator using the configured length limit and admin secret
    pub fn from_config(config: &Config, store: impl CommentStore + 'static) -> Self {
        Self::new(
            store,
            CommentValidator::with_max_length(config.comments.max_length),
            AdminPolicy::from_secret(config.comments.admin_secret.as_deref()),
        )
    }

    pub fn admin_policy(&self) -> &AdminPolicy {
        &self.admin
    }

    /// Comments on a place, newest first
    pub fn list_comments(&self, place_id: &str) -> Result<Vec<Comment>> {
        if place_id.is_empty() {
            return Err(LunchPickerError::MissingField("place_id"));
        }
        let comments = self.store.list(&PlaceId::from_string(place_id))?;
        debug!("Listed {} comments for {}", comments.len(), place_id);
        Ok(comments)
    }

    /// Validate and store a new comment
    pub fn add_comment(&self, place_id: &str, nickname: &str, content: &str) -> Result<Comment> {
        self.validator.validate(place_id, nickname, content)?;

        let comment = Comment::new(PlaceId::from_string(place_id), nickname, content);
        self.store.prepend(comment.clone())?;

        info!("Added comment {} on {}", comment.id, place_id);
        Ok(comment)
    }

    /// [`add_comment`](Self::add_comment) from a request body
    pub fn submit(&self, request: NewComment) -> Result<Comment> {
        self.add_comment(&request.place_id, &request.nickname, &request.content)
    }

    /// Remove a comment if the admin check passes.
    ///
    /// Removing a comment that does not exist succeeds.
    pub fn delete_comment(&self, place_id: &str, id: &CommentId, supplied_secret: Option<&str>) -> Result<()> {
        if place_id.is_empty() {
            return Err(LunchPickerError::MissingField("place_id"));
        }
        if let Err(err) = self.admin.authorize(supplied_secret) {
            warn!("Rejected delete of comment {} on {}", id, place_id);
            return Err(err);
        }

        let removed = self.store.remove(&PlaceId::from_string(place_id), id)?;
        if removed {
            info!("Deleted comment {} on {}", id, place_id);
        } else {
            debug!("Comment {} on {} already gone", id, place_id);
        }
        Ok(())
    }

    /// [`delete_comment`](Self::delete_comment) from a request body
    pub fn delete(&self, request: &DeleteComment) -> Result<()> {
        self.delete_comment(&request.place_id, &request.id, request.admin_password.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::store::MemoryCommentStore;

    fn moderator(secret: Option<&str>) -> CommentModerator {
        CommentModerator::new(
            MemoryCommentStore::new(),
            CommentValidator::new(),
            AdminPolicy::from_secret(secret),
        )
    }

    #[test]
    fn test_add_and_list() {
        let moderator = moderator(None);
        let first = moderator.add_comment("p1", "수달", "first").unwrap();
        let second = moderator.add_comment("p1", "토끼", "second").unwrap();

        assert_eq!(first.place_id.as_str(), "p1");
        assert_ne!(first.id, second.id);

        let list = moderator.list_comments("p1").unwrap();
        assert_eq!(list, vec![second, first]);
        assert!(moderator.list_comments("p2").unwrap().is_empty());
    }

    #[test]
    fn test_rejected_comments_are_not_stored() {
        let moderator = moderator(None);
        assert!(matches!(
            moderator.add_comment("p1", "", "hi"),
            Err(LunchPickerError::MissingField("nickname"))
        ));
        assert!(matches!(
            moderator.add_comment("p1", "nick", &"x".repeat(201)),
            Err(LunchPickerError::ContentTooLong { .. })
        ));
        assert!(matches!(
            moderator.add_comment("p1", "nick", "check http://x.co"),
            Err(LunchPickerError::LinkNotAllowed)
        ));
        assert!(moderator.add_comment("p1", "nick", &"x".repeat(200)).is_ok());
        assert_eq!(moderator.list_comments("p1").unwrap().len(), 1);
    }

    #[test]
    fn test_submit_request() {
        let moderator = moderator(None);
        let comment = moderator
            .submit(NewComment {
                place_id: "p1".into(),
                nickname: "nick".into(),
                content: "good".into(),
            })
            .unwrap();
        assert_eq!(comment.content, "good");
        assert!(moderator.submit(NewComment::default()).is_err());
    }

    #[test]
    fn test_delete_without_secret_is_open() {
        let moderator = moderator(None);
        let comment = moderator.add_comment("p1", "nick", "bye").unwrap();

        moderator.delete_comment("p1", &comment.id, Some("anything")).unwrap();
        assert!(moderator.list_comments("p1").unwrap().is_empty());

        let other = moderator.add_comment("p1", "nick", "again").unwrap();
        moderator.delete_comment("p1", &other.id, None).unwrap();
    }

    #[test]
    fn test_delete_with_secret() {
        let moderator = moderator(Some("abc"));
        let comment = moderator.add_comment("p1", "nick", "bye").unwrap();

        assert!(matches!(
            moderator.delete_comment("p1", &comment.id, Some("xyz")),
            Err(LunchPickerError::Authorization)
        ));
        assert!(matches!(
            moderator.delete_comment("p1", &comment.id, None),
            Err(LunchPickerError::Authorization)
        ));
        assert_eq!(moderator.list_comments("p1").unwrap().len(), 1);

        moderator.delete_comment("p1", &comment.id, Some("abc")).unwrap();
        assert!(moderator.list_comments("p1").unwrap().is_empty());
    }

    #[test]
    fn test_delete_missing_comment_is_noop() {
        let moderator = moderator(None);
        let kept = moderator.add_comment("p1", "nick", "keep").unwrap();
        moderator
            .delete(&DeleteComment {
                place_id: "p1".into(),
                id: CommentId::new(),
                admin_password: None,
            })
            .unwrap();
        assert_eq!(moderator.list_comments("p1").unwrap(), vec![kept]);
    }

    #[test]
    fn test_blank_secret_counts_as_unset() {
        assert!(AdminPolicy::from_secret(Some("")).is_open());
        assert!(!AdminPolicy::from_secret(Some("abc")).is_open());
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.comments.admin_secret = Some("abc".into());
        config.comments.max_length = 5;
        let moderator = CommentModerator::from_config(&config, MemoryCommentStore::new());

        assert_eq!(moderator.admin_policy(), &AdminPolicy::Secret("abc".into()));
        assert!(moderator.add_comment("p1", "nick", "too long").is_err());
    }
}
