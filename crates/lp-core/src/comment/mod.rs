//! Comment system module
//!
//! Anonymous per-place comments: storage, content policy, admin-gated
//! deletion, and the client-side submission cooldown.

pub mod model;
pub mod validator;
pub mod store;
pub mod moderator;
pub mod cooldown;
pub mod nickname;

pub use model::*;
pub use validator::CommentValidator;
pub use store::{CommentStore, MemoryCommentStore};
pub use moderator::{AdminPolicy, CommentModerator};
pub use cooldown::{CommentCooldown, CooldownStore, MemoryCooldownStore};
pub use nickname::random_nickname;
