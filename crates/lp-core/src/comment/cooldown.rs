//! Client-side comment cooldown
//!
//! After a successful submission the client blocks further comments on the
//! same place for a fixed window. This is advisory: the moderator does not
//! check it, so it only slows down well-behaved clients.

use crate::config::Config;
use crate::error::Result;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Default cooldown window
pub const DEFAULT_COOLDOWN_SECS: u64 = 20;

/// Storage key for a place's cooldown deadline
pub fn cooldown_key(place_id: &str) -> String {
    format!("commentCooldown:{}", place_id)
}

/// Client-local persistence of cooldown deadlines
pub trait CooldownStore: Send + Sync {
    /// Deadline stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<DateTime<Utc>>>;

    /// Store a deadline under `key`
    fn set(&self, key: &str, until: DateTime<Utc>) -> Result<()>;
}

/// Cooldown deadlines that live as long as the process
#[derive(Debug, Default)]
pub struct MemoryCooldownStore {
    deadlines: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl MemoryCooldownStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CooldownStore for MemoryCooldownStore {
    fn get(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        let deadlines = self.deadlines.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(deadlines.get(key).copied())
    }

    fn set(&self, key: &str, until: DateTime<Utc>) -> Result<()> {
        let mut deadlines = self.deadlines.lock().unwrap_or_else(PoisonError::into_inner);
        deadlines.insert(key.to_string(), until);
        Ok(())
    }
}

/// Per-place submission cooldown over a [`CooldownStore`]
pub struct CommentCooldown<S> {
    store: S,
    window: Duration,
}

impl<S: CooldownStore> CommentCooldown<S> {
    pub fn new(store: S, window: Duration) -> Self {
        Self { store, window }
    }

    /// Cooldown using the configured window
    pub fn from_config(config: &Config, store: S) -> Self {
        let secs = config.comments.cooldown_secs.min(u64::from(u32::MAX));
        Self::new(store, Duration::seconds(secs as i64))
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Time left before the place accepts another comment.
    ///
    /// `None` once `now` is strictly past the stored deadline.
    pub fn remaining(&self, place_id: &str, now: DateTime<Utc>) -> Result<Option<Duration>> {
        Ok(self
            .store
            .get(&cooldown_key(place_id))?
            .filter(|until| now <= *until)
            .map(|until| until - now))
    }

    pub fn can_submit(&self, place_id: &str, now: DateTime<Utc>) -> Result<bool> {
        Ok(self.remaining(place_id, now)?.is_none())
    }

    /// Start the cooldown after a successful submission; returns the deadline
    pub fn record_submission(&self, place_id: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let until = now + self.window;
        self.store.set(&cooldown_key(place_id), until)?;
        Ok(until)
    }
}
