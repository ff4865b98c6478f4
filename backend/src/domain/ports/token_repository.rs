//! Port for the token table linking opaque tokens to users.

use async_trait::async_trait;

use crate::domain::{AuthToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token repository adapters.
    pub enum TokenRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "token repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "token repository query failed: {message}",
        /// The user already holds a token.
        Conflict { user_id: i64 } =>
            "user {user_id} already holds a token",
    }
}

/// Driven port over issued tokens. Each user holds at most one token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Resolve a token to the user it was issued to.
    async fn find_user_id(&self, token: &AuthToken) -> Result<Option<UserId>, TokenRepositoryError>;

    /// Return the token already issued to `user`, if any.
    async fn find_for_user(&self, user: UserId) -> Result<Option<AuthToken>, TokenRepositoryError>;

    /// Record `token` as the token of `user`.
    async fn insert(&self, user: UserId, token: &AuthToken) -> Result<(), TokenRepositoryError>;
}
