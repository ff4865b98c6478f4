//! Port for post persistence.

use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostChanges, PostId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by post repository adapters.
    pub enum PostRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "post repository query failed: {message}",
    }
}

/// Driven port over stored posts. Returned posts are joined with their
/// author's username and their group's title.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts ordered by id.
    async fn list(&self) -> Result<Vec<Post>, PostRepositoryError>;

    /// Find a post by id.
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostRepositoryError>;

    /// Store a new post.
    async fn insert(&self, post: &NewPost) -> Result<Post, PostRepositoryError>;

    /// Overwrite the writable fields of a post; `None` when it vanished.
    async fn update(
        &self,
        id: PostId,
        changes: &PostChanges,
    ) -> Result<Option<Post>, PostRepositoryError>;

    /// Remove a post and its comments; `false` when nothing was removed.
    async fn delete(&self, id: PostId) -> Result<bool, PostRepositoryError>;
}
