//! Domain primitives, policy and services.
//!
//! Purpose: define the blog's entities (users, groups, posts, comments), the
//! authorization policy every controller consults, and the services that
//! implement the driving ports. Nothing here knows about HTTP or SQL; the
//! adapters in `inbound` and `outbound` translate at the edges.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Caller / policy: who is asking and whether they may.
//! - GroupService, PostService, CommentService: resource controllers.
//! - TokenIdentityService: login and token resolution.
//! - SeedService: idempotent creation of accounts and groups.

pub mod auth;
pub mod comment;
mod comment_service;
pub mod error;
pub mod fields;
pub mod group;
mod group_service;
mod identity_service;
pub mod policy;
pub mod ports;
pub mod post;
mod post_service;
mod repository_errors;
pub mod scope;
pub mod seed;
#[cfg(test)]
pub(crate) mod test_fixtures;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    AuthToken, LoginCredentials, LoginValidationError, MalformedDigest, PasswordDigest,
};
pub use self::comment::{Comment, CommentChanges, CommentId, NewComment};
pub use self::comment_service::CommentService;
pub use self::error::{Error, ErrorCode};
pub use self::fields::{WriteBody, WriteMode};
pub use self::group::{GROUP_TITLE_MAX, Group, GroupId, GroupValidationError, NewGroup};
pub use self::group_service::GroupService;
pub use self::identity_service::TokenIdentityService;
pub use self::policy::{Caller, ResourceKind, ScopeState};
pub use self::post::{GroupRef, NewPost, Post, PostChanges, PostId};
pub use self::post_service::PostService;
pub use self::scope::ParentScope;
pub use self::seed::{SeedData, SeedError, SeedGroup, SeedOutcome, SeedService, SeedUser};
pub use self::trace_id::TraceId;
pub use self::user::{
    Identity, NewUser, USERNAME_MAX, User, UserId, UserValidationError, Username,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use yatube_api::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
