//! User accounts and the identities resolved from them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::PasswordDigest;

/// Validation errors returned by [`Username::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUsername,
    UsernameTooLong { max: usize },
    UsernameInvalidCharacters,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::UsernameInvalidCharacters => write!(
                f,
                "username may only contain letters, digits and @/./+/-/_",
            ),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Storage-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw storage identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw storage identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 150;

/// Unique login name, rendered wherever a user is referenced.
///
/// # Examples
/// ```
/// use yatube_api::domain::Username;
///
/// let name = Username::new("leo.tolstoy").expect("valid username");
/// assert_eq!(name.as_ref(), "leo.tolstoy");
/// assert!(Username::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a username.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        let allowed = |c: char| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_');
        if !trimmed.chars().all(allowed) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Stored user account including its password digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    password: PasswordDigest,
}

impl User {
    /// Assemble a stored account.
    #[must_use]
    pub fn new(id: UserId, username: Username, password: PasswordDigest) -> Self {
        Self {
            id,
            username,
            password,
        }
    }

    /// Storage identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login name.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Salted password digest.
    #[must_use]
    pub fn password(&self) -> &PasswordDigest {
        &self.password
    }

    /// Drop the credential material and keep the public identity.
    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity::new(self.id, self.username.clone())
    }
}

/// Account to be created by the seeding path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: Username,
    pub password: PasswordDigest,
}

/// Acting user resolved from a request token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    id: UserId,
    username: Username,
}

impl Identity {
    /// Build an identity from its parts.
    #[must_use]
    pub fn new(id: UserId, username: Username) -> Self {
        Self { id, username }
    }

    /// Identifier compared by the ownership gate.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Username stamped as the author of new content.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("alice", Ok("alice"))]
    #[case("  bob  ", Ok("bob"))]
    #[case("mail@example.org", Ok("mail@example.org"))]
    #[case("", Err(UserValidationError::EmptyUsername))]
    #[case("has space", Err(UserValidationError::UsernameInvalidCharacters))]
    #[case("semi;colon", Err(UserValidationError::UsernameInvalidCharacters))]
    fn username_validation(
        #[case] raw: &str,
        #[case] expected: Result<&str, UserValidationError>,
    ) {
        let result = Username::new(raw).map(String::from);
        assert_eq!(result, expected.map(str::to_owned));
    }

    #[rstest]
    fn username_rejects_overlong_values() {
        let raw = "a".repeat(USERNAME_MAX + 1);
        assert_eq!(
            Username::new(raw),
            Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX })
        );
    }

    #[rstest]
    fn identity_drops_credentials() {
        let user = User::new(
            UserId::new(7),
            Username::new("alice").expect("valid username"),
            PasswordDigest::derive("pepper", "secret"),
        );

        let identity = user.identity();
        assert_eq!(identity.id(), UserId::new(7));
        assert_eq!(identity.username().as_ref(), "alice");
    }
}
