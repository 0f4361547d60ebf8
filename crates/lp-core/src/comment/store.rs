//! Comment storage trait and the in-memory implementation

use super::model::Comment;
use crate::error::Result;
use crate::types::{CommentId, PlaceId};
use std::collections::{HashMap, VecDeque};
use std::sync::{PoisonError, RwLock};

/// Keyed storage of comment lists, newest first.
///
/// Implementations must apply `prepend` and `remove` atomically with
/// respect to each other for the same place.
pub trait CommentStore: Send + Sync {
    /// Comments for a place, newest first; empty for unknown places
    fn list(&self, place_id: &PlaceId) -> Result<Vec<Comment>>;

    /// Insert a comment at the front of its place's list
    fn prepend(&self, comment: Comment) -> Result<()>;

    /// Remove a comment; returns whether anything was removed
    fn remove(&self, place_id: &PlaceId, id: &CommentId) -> Result<bool>;

    /// Number of comments on a place
    fn count(&self, place_id: &PlaceId) -> Result<usize> {
        Ok(self.list(place_id)?.len())
    }
}

/// Process-lifetime comment storage
#[derive(Debug, Default)]
pub struct MemoryCommentStore {
    comments: RwLock<HashMap<PlaceId, VecDeque<Comment>>>,
}

impl MemoryCommentStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

impl CommentStore for MemoryCommentStore {
    fn list(&self, place_id: &PlaceId) -> Result<Vec<Comment>> {
        let comments = self.comments.read().unwrap_or_else(PoisonError::into_inner);
        Ok(comments
            .get(place_id)
            .map(|list| list.iter().cloned().collect())
            .unwrap_or_default())
    }

    fn prepend(&self, comment: Comment) -> Result<()> {
        let mut comments = self.comments.write().unwrap_or_else(PoisonError::into_inner);
        comments
            .entry(comment.place_id.clone())
            .or_default()
            .push_front(comment);
        Ok(())
    }

    fn remove(&self, place_id: &PlaceId, id: &CommentId) -> Result<bool> {
        let mut comments = self.comments.write().unwrap_or_else(PoisonError::into_inner);
        let Some(list) = comments.get_mut(place_id) else {
            return Ok(false);
        };
        let before = list.len();
        list.retain(|comment| &comment.id != id);
        Ok(list.len() != before)
    }

    fn count(&self, place_id: &PlaceId) -> Result<usize> {
        let comments = self.comments.read().unwrap_or_else(PoisonError::into_inner);
        Ok(comments.get(place_id).map_or(0, VecDeque::len))
    }
}
