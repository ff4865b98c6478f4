//! Seed data for accounts and groups.
//!
//! Users and groups have no write endpoints, so a seed file is the only way
//! to create them. Applying a seed is idempotent: entries whose username or
//! slug already exist are skipped.

use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::ports::{
    GroupRepository, GroupRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{
    Error, GroupValidationError, NewGroup, NewUser, PasswordDigest, UserValidationError, Username,
};

use super::repository_errors::{map_group_error, map_user_error};

/// Account entry of a seed file. The password is stored hashed.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedUser {
    pub username: String,
    pub password: String,
}

/// Group entry of a seed file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedGroup {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

/// Parsed seed file.
///
/// # Examples
/// ```
/// use yatube_api::domain::SeedData;
///
/// let seed = SeedData::from_json(r#"{"groups":[{"title":"Cats","slug":"cats"}]}"#)
///     .expect("valid seed");
/// assert!(seed.users.is_empty());
/// assert_eq!(seed.groups.len(), 1);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<SeedUser>,
    #[serde(default)]
    pub groups: Vec<SeedGroup>,
}

impl SeedData {
    /// Parse a seed document. The top level must be a JSON object.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let document: serde_json::Value = serde_json::from_str(raw)?;
        if !document.is_object() {
            return Err(serde::de::Error::custom(
                "seed document must be a JSON object",
            ));
        }
        serde_json::from_value(document)
    }
}

/// Errors raised while applying a seed.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("invalid seed user {username:?}: {source}")]
    InvalidUser {
        username: String,
        #[source]
        source: UserValidationError,
    },
    #[error("seed user {username:?} has an empty password")]
    EmptyPassword { username: String },
    #[error("invalid seed group {slug:?}: {source}")]
    InvalidGroup {
        slug: String,
        #[source]
        source: GroupValidationError,
    },
    #[error("seed storage failed: {0}")]
    Storage(#[from] Error),
}

/// Counts of what a seed run created and skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    pub users_created: usize,
    pub users_skipped: usize,
    pub groups_created: usize,
    pub groups_skipped: usize,
}

/// Applies [`SeedData`] through the user and group repositories.
#[derive(Clone)]
pub struct SeedService<U: ?Sized, G: ?Sized> {
    users: Arc<U>,
    groups: Arc<G>,
}

impl<U, G> SeedService<U, G>
where
    U: UserRepository + ?Sized,
    G: GroupRepository + ?Sized,
{
    /// Create the service over its repositories.
    pub fn new(users: Arc<U>, groups: Arc<G>) -> Self {
        Self { users, groups }
    }

    /// Validate every entry, then insert those not already stored.
    pub async fn apply(&self, seed: &SeedData) -> Result<SeedOutcome, SeedError> {
        let users = seed
            .users
            .iter()
            .map(validate_user)
            .collect::<Result<Vec<_>, _>>()?;
        let groups = seed
            .groups
            .iter()
            .map(|group| {
                NewGroup::new(&group.title, &group.slug, &group.description).map_err(|source| {
                    SeedError::InvalidGroup {
                        slug: group.slug.clone(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut outcome = SeedOutcome::default();
        for user in &users {
            match self.users.insert(user).await {
                Ok(stored) => {
                    debug!(username = %stored.username(), "seeded user");
                    outcome.users_created += 1;
                }
                Err(UserRepositoryError::Conflict { username }) => {
                    debug!(%username, "seed user already exists");
                    outcome.users_skipped += 1;
                }
                Err(err) => return Err(map_user_error(err).into()),
            }
        }
        for group in &groups {
            match self.groups.insert(group).await {
                Ok(stored) => {
                    debug!(slug = %stored.slug, "seeded group");
                    outcome.groups_created += 1;
                }
                Err(GroupRepositoryError::Conflict { slug }) => {
                    debug!(%slug, "seed group already exists");
                    outcome.groups_skipped += 1;
                }
                Err(err) => return Err(map_group_error(err).into()),
            }
        }

        info!(
            users_created = outcome.users_created,
            users_skipped = outcome.users_skipped,
            groups_created = outcome.groups_created,
            groups_skipped = outcome.groups_skipped,
            "seed applied"
        );
        Ok(outcome)
    }
}

fn validate_user(user: &SeedUser) -> Result<NewUser, SeedError> {
    let username = Username::new(&user.username).map_err(|source| SeedError::InvalidUser {
        username: user.username.clone(),
        source,
    })?;
    if user.password.is_empty() {
        return Err(SeedError::EmptyPassword {
            username: user.username.clone(),
        });
    }
    Ok(NewUser {
        username,
        password: PasswordDigest::generate(&user.password),
    })
}
