//! Posts: authored articles, optionally filed under a group.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{GroupId, Identity, UserId};

/// Storage-assigned post identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(i64);

impl PostId {
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

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Group reference carried by a post, resolved to its title for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRef {
    pub id: GroupId,
    pub title: String,
}

/// Stored post joined with its author and group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub text: String,
    pub author: Identity,
    pub group: Option<GroupRef>,
    pub pub_date: DateTime<Utc>,
}

impl Post {
    /// Whether `user` wrote this post.
    #[must_use]
    pub fn is_authored_by(&self, user: UserId) -> bool {
        self.author.id() == user
    }
}

/// Post about to be inserted, with every server-assigned field stamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub text: String,
    pub author: UserId,
    pub group: Option<GroupId>,
    pub pub_date: DateTime<Utc>,
}

/// Complete writable state of a post after an update is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostChanges {
    pub text: String,
    pub group: Option<GroupId>,
}
