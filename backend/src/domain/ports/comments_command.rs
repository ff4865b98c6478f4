//! Driving port for writing comments under a post.

use async_trait::async_trait;
use crate::domain::fields::{WriteBody, WriteMode};
use crate::domain::{Caller, Comment, CommentId, Error, PostId};

/// Write-side comment use-cases, always scoped by parent post.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsCommand: Send + Sync {
    /// Create a comment under `post` authored by the caller.
    async fn create(&self, caller: &Caller, post: PostId, payload: &WriteBody)
    -> Result<Comment, Error>;

    /// Replace or patch a comment under `post`.
    async fn update(
        &self,
        caller: &Caller,
        post: PostId,
        id: CommentId,
        payload: &WriteBody,
        mode: WriteMode,
    ) -> Result<Comment, Error>;

    /// Delete a comment under `post`.
    async fn delete(&self, caller: &Caller, post: PostId, id: CommentId) -> Result<(), Error>;
}
