//! Driving port for reading comments under a post.

use async_trait::async_trait;

use crate::domain::{Caller, Comment, CommentId, Error, PostId};

/// Read-side comment use-cases, always scoped by parent post.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsQuery: Send + Sync {
    /// Comments under `post`.
    async fn list(&self, caller: &Caller, post: PostId) -> Result<Vec<Comment>, Error>;

    /// One comment under `post`.
    async fn retrieve(
        &self,
        caller: &Caller,
        post: PostId,
        id: CommentId,
    ) -> Result<Comment, Error>;
}
