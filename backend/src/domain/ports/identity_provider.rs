//! Driving port for token issuance and token resolution.
//!
//! Inbound adapters call it to exchange credentials for a token and to turn
//! a presented token back into the acting identity, without knowing how
//! tokens or accounts are stored.

use async_trait::async_trait;

use crate::domain::{AuthToken, Error, Identity, LoginCredentials};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify credentials and return the user's token, issuing one on first
    /// use. Wrong credentials are an [`ErrorCode::InvalidRequest`].
    ///
    /// [`ErrorCode::InvalidRequest`]: crate::domain::ErrorCode::InvalidRequest
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AuthToken, Error>;

    /// Resolve a presented token. Unknown tokens yield `Ok(None)`; the
    /// caller is then treated as anonymous.
    async fn resolve(&self, token: &AuthToken) -> Result<Option<Identity>, Error>;
}
