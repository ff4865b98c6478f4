//! Driving port for reading posts.

use async_trait::async_trait;

use crate::domain::{Caller, Error, Post, PostId};

/// Read-side post use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsQuery: Send + Sync {
    /// All posts.
    async fn list(&self, caller: &Caller) -> Result<Vec<Post>, Error>;

    /// One post by id.
    async fn retrieve(&self, caller: &Caller, id: PostId) -> Result<Post, Error>;
}
