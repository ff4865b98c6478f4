//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod comments;
pub mod dto;
pub mod error;
pub mod groups;
pub mod health;
pub mod payload;
pub mod posts;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod tokens;
pub mod validation;

pub use error::ApiResult;
