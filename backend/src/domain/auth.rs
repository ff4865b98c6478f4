//! Authentication primitives: login credentials, password digests and the
//! opaque tokens handed to clients.
//!
//! Inbound payload parsing stays outside the domain; handlers build
//! [`LoginCredentials`] from whatever they received and let the identity
//! service take it from there.

use std::fmt;

use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was missing or empty.
    EmptyPassword,
}

impl LoginValidationError {
    /// Payload field the error refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername => "username",
            Self::EmptyPassword => "password",
        }
    }
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by the identity service.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` must be non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use yatube_api::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("admin", "password").unwrap();
/// assert_eq!(creds.username(), "admin");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for user lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Error returned when a stored password digest cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed password digest")]
pub struct MalformedDigest;

/// Salted SHA-256 password digest stored as `sha256$<salt>$<hex digest>`.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    salt: String,
    digest: String,
}

const DIGEST_SCHEME: &str = "sha256";
const SALT_BYTES: usize = 16;

impl PasswordDigest {
    /// Hash `password` with a fresh random salt.
    #[must_use]
    pub fn generate(password: &str) -> Self {
        let mut salt = [0_u8; SALT_BYTES];
        rand::thread_rng().fill_bytes(&mut salt);
        Self::derive(&hex::encode(salt), password)
    }

    /// Hash `password` with a known salt.
    #[must_use]
    pub fn derive(salt: &str, password: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(password.as_bytes());
        Self {
            salt: salt.to_owned(),
            digest: hex::encode(hasher.finalize()),
        }
    }

    /// Compare a candidate password against the stored digest without
    /// short-circuiting on the first differing byte.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        let computed = Self::derive(&self.salt, candidate);
        let (left, right) = (computed.digest.as_bytes(), self.digest.as_bytes());
        left.len() == right.len()
            && left
                .iter()
                .zip(right)
                .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }

    /// Encode for storage.
    #[must_use]
    pub fn encode(&self) -> String {
        format!("{DIGEST_SCHEME}${}${}", self.salt, self.digest)
    }

    /// Decode a stored digest.
    pub fn parse(encoded: &str) -> Result<Self, MalformedDigest> {
        let mut parts = encoded.splitn(3, '$');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(DIGEST_SCHEME), Some(salt), Some(digest))
                if !salt.is_empty() && digest.len() == 64 =>
            {
                Ok(Self {
                    salt: salt.to_owned(),
                    digest: digest.to_owned(),
                })
            }
            _ => Err(MalformedDigest),
        }
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

const TOKEN_BYTES: usize = 20;

/// Opaque bearer token issued to a user.
///
/// Tokens are 40 lowercase hex characters; nothing about the user can be
/// recovered from one.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AuthToken(String);

impl AuthToken {
    /// Mint a new random token.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Wrap a token presented by a client or read from storage.
    ///
    /// Returns `None` when the value cannot be a token this service issued,
    /// which lets callers skip the store lookup entirely.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let well_formed = raw.len() == TOKEN_BYTES * 2
            && raw.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));
        well_formed.then(|| Self(raw.to_owned()))
    }

    /// Token value as sent on the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn credentials_keep_password_whitespace() {
        let creds = LoginCredentials::try_from_parts("  admin  ", " secret ")
            .expect("valid inputs should succeed");
        assert_eq!(creds.username(), "admin");
        assert_eq!(creds.password(), " secret ");
    }

    #[rstest]
    #[case("secret", true)]
    #[case("Secret", false)]
    #[case("", false)]
    fn digest_verifies_only_the_original_password(#[case] candidate: &str, #[case] ok: bool) {
        let digest = PasswordDigest::generate("secret");
        assert_eq!(digest.verify(candidate), ok);
    }

    #[rstest]
    fn generated_salts_differ() {
        let first = PasswordDigest::generate("secret");
        let second = PasswordDigest::generate("secret");
        assert_ne!(first.encode(), second.encode());
    }

    #[rstest]
    fn digest_survives_storage_encoding() {
        let digest = PasswordDigest::derive("abcd", "secret");
        let decoded = PasswordDigest::parse(&digest.encode()).expect("decodes");
        assert!(decoded.verify("secret"));
    }

    #[rstest]
    #[case("plain")]
    #[case("md5$salt$abc")]
    #[case("sha256$$0000")]
    fn malformed_digests_are_rejected(#[case] encoded: &str) {
        assert_eq!(PasswordDigest::parse(encoded), Err(MalformedDigest));
    }

    #[rstest]
    fn generated_tokens_are_well_formed() {
        let token = AuthToken::generate();
        assert_eq!(token.as_str().len(), 40);
        assert_eq!(AuthToken::parse(token.as_str()), Some(token));
    }

    #[rstest]
    #[case("")]
    #[case("short")]
    #[case("ZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZZ")]
    fn foreign_token_shapes_are_rejected(#[case] raw: &str) {
        assert!(AuthToken::parse(raw).is_none());
    }
}
