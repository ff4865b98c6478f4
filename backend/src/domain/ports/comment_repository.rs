//! Port for comment persistence. Every lookup is scoped by parent post.

use async_trait::async_trait;

use crate::domain::{Comment, CommentChanges, CommentId, NewComment, PostId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by comment repository adapters.
    pub enum CommentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "comment repository query failed: {message}",
    }
}

/// Driven port over stored comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Comments of `post` ordered by id.
    async fn list_for_post(&self, post: PostId) -> Result<Vec<Comment>, CommentRepositoryError>;

    /// Find comment `id` only if it belongs to `post`.
    async fn find_for_post(
        &self,
        post: PostId,
        id: CommentId,
    ) -> Result<Option<Comment>, CommentRepositoryError>;

    /// Store a new comment.
    async fn insert(&self, comment: &NewComment) -> Result<Comment, CommentRepositoryError>;

    /// Overwrite the writable fields of a comment; `None` when it vanished.
    async fn update(
        &self,
        id: CommentId,
        changes: &CommentChanges,
    ) -> Result<Option<Comment>, CommentRepositoryError>;

    /// Remove a comment; `false` when nothing was removed.
    async fn delete(&self, id: CommentId) -> Result<bool, CommentRepositoryError>;
}
