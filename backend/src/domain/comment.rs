//! Comments: authored replies that only exist under their parent post.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Identity, PostId, UserId};

/// Storage-assigned comment identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(i64);

impl CommentId {
    /// Wrap a raw storage identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw storage identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stored comment joined with its author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub text: String,
    pub author: Identity,
    pub post: PostId,
    pub created: DateTime<Utc>,
}

impl Comment {
    /// Whether `user` wrote this comment.
    #[must_use]
    pub fn is_authored_by(&self, user: UserId) -> bool {
        self.author.id() == user
    }
}

/// Comment about to be inserted under `post`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub text: String,
    pub author: UserId,
    pub post: PostId,
    pub created: DateTime<Utc>,
}

/// Complete writable state of a comment after an update is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentChanges {
    pub text: String,
}
