//! Driving port for writing posts.

use async_trait::async_trait;
use crate::domain::fields::{WriteBody, WriteMode};
use crate::domain::{Caller, Error, Post, PostId};

/// Write-side post use-cases. Payloads are the raw request bodies; field
/// screening happens inside the domain.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsCommand: Send + Sync {
    /// Create a post authored by the caller.
    async fn create(&self, caller: &Caller, payload: &WriteBody) -> Result<Post, Error>;

    /// Replace (`WriteMode::Replace`) or patch (`WriteMode::Partial`) a post.
    async fn update(
        &self,
        caller: &Caller,
        id: PostId,
        payload: &WriteBody,
        mode: WriteMode,
    ) -> Result<Post, Error>;

    /// Delete a post.
    async fn delete(&self, caller: &Caller, id: PostId) -> Result<(), Error>;
}
