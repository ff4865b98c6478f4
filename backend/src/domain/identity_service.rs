//! Token-based identity service.
//!
//! Each user holds a single opaque token; authenticating again hands back
//! the same token so clients on several devices share it.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::fields::{FieldErrors, NON_FIELD_ERRORS};
use crate::domain::ports::{IdentityProvider, TokenRepository, TokenRepositoryError, UserRepository};
use crate::domain::{AuthToken, Error, Identity, LoginCredentials, User, UserId, Username};

use super::repository_errors::{map_token_error, map_user_error};

const BAD_CREDENTIALS: &str = "Unable to log in with provided credentials.";

fn invalid_credentials() -> Error {
    FieldErrors::single(NON_FIELD_ERRORS, BAD_CREDENTIALS).into()
}

/// [`IdentityProvider`] backed by the user and token repositories.
#[derive(Clone)]
pub struct TokenIdentityService<U, T> {
    users: Arc<U>,
    tokens: Arc<T>,
}

impl<U, T> TokenIdentityService<U, T> {
    /// Create the service over its repositories.
    pub fn new(users: Arc<U>, tokens: Arc<T>) -> Self {
        Self { users, tokens }
    }
}

impl<U, T> TokenIdentityService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    async fn verified_user(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Ok(username) = Username::new(credentials.username()) else {
            return Err(invalid_credentials());
        };
        let user = self
            .users
            .find_by_username(&username)
            .await
            .map_err(map_user_error)?;
        match user {
            Some(user) if user.password().verify(credentials.password()) => Ok(user),
            _ => {
                info!(username = %username, "rejected login attempt");
                Err(invalid_credentials())
            }
        }
    }

    async fn token_for(&self, user: UserId) -> Result<AuthToken, Error> {
        if let Some(existing) = self
            .tokens
            .find_for_user(user)
            .await
            .map_err(map_token_error)?
        {
            return Ok(existing);
        }
        let token = AuthToken::generate();
        match self.tokens.insert(user, &token).await {
            Ok(()) => Ok(token),
            // A concurrent login won the race; hand out its token.
            Err(TokenRepositoryError::Conflict { .. }) => self
                .tokens
                .find_for_user(user)
                .await
                .map_err(map_token_error)?
                .ok_or_else(|| Error::internal("token vanished after conflicting insert")),
            Err(err) => Err(map_token_error(err)),
        }
    }
}

#[async_trait]
impl<U, T> IdentityProvider for TokenIdentityService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AuthToken, Error> {
        let user = self.verified_user(credentials).await?;
        let token = self.token_for(user.id()).await?;
        info!(user_id = %user.id(), username = %user.username(), "issued token");
        Ok(token)
    }

    async fn resolve(&self, token: &AuthToken) -> Result<Option<Identity>, Error> {
        let Some(user_id) = self
            .tokens
            .find_user_id(token)
            .await
            .map_err(map_token_error)?
        else {
            debug!("presented token is unknown");
            return Ok(None);
        };
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(map_user_error)?;
        if user.is_none() {
            warn!(user_id = %user_id, "token refers to a missing user");
        }
        Ok(user.as_ref().map(User::identity))
    }
}

#[cfg(test)]
#[path = "identity_service_tests.rs"]
mod tests;
