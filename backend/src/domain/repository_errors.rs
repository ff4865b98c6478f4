//! Translation of driven-port failures into domain errors.
//!
//! Connection failures become `service_unavailable` and everything else an
//! internal error; the original message is logged and then redacted by the
//! HTTP adapter.

use tracing::error;

use crate::domain::Error;
use crate::domain::ports::{
    CommentRepositoryError, GroupRepositoryError, PostRepositoryError, TokenRepositoryError,
    UserRepositoryError,
};

fn unavailable(port: &'static str, message: &str) -> Error {
    error!(port, %message, "repository connection failed");
    Error::service_unavailable(format!("{port} repository unavailable"))
}

fn failed(port: &'static str, message: &str) -> Error {
    error!(port, %message, "repository operation failed");
    Error::internal(format!("{port} repository error: {message}"))
}

pub(crate) fn map_user_error(err: UserRepositoryError) -> Error {
    match err {
        UserRepositoryError::Connection { message } => unavailable("user", &message),
        UserRepositoryError::Query { message } => failed("user", &message),
        UserRepositoryError::Conflict { username } => {
            Error::conflict(format!("username already taken: {username}"))
        }
    }
}

pub(crate) fn map_token_error(err: TokenRepositoryError) -> Error {
    match err {
        TokenRepositoryError::Connection { message } => unavailable("token", &message),
        TokenRepositoryError::Query { message } => failed("token", &message),
        TokenRepositoryError::Conflict { user_id } => {
            Error::conflict(format!("user {user_id} already holds a token"))
        }
    }
}

pub(crate) fn map_group_error(err: GroupRepositoryError) -> Error {
    match err {
        GroupRepositoryError::Connection { message } => unavailable("group", &message),
        GroupRepositoryError::Query { message } => failed("group", &message),
        GroupRepositoryError::Conflict { slug } => {
            Error::conflict(format!("group slug already taken: {slug}"))
        }
    }
}

pub(crate) fn map_post_error(err: PostRepositoryError) -> Error {
    match err {
        PostRepositoryError::Connection { message } => unavailable("post", &message),
        PostRepositoryError::Query { message } => failed("post", &message),
    }
}

pub(crate) fn map_comment_error(err: CommentRepositoryError) -> Error {
    match err {
        CommentRepositoryError::Connection { message } => unavailable("comment", &message),
        CommentRepositoryError::Query { message } => failed("comment", &message),
    }
}
