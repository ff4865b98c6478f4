//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`*Query`, `*Command`, [`IdentityProvider`]) are what the
//! HTTP adapter calls. Driven ports (`*Repository`) are what storage
//! adapters implement.

mod macros;
pub(crate) use macros::define_port_error;

mod comment_repository;
mod comments_command;
mod comments_query;
mod group_repository;
mod groups_query;
mod identity_provider;
mod post_repository;
mod posts_command;
mod posts_query;
mod token_repository;
mod user_repository;

#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::{CommentRepository, CommentRepositoryError};
#[cfg(test)]
pub use comments_command::MockCommentsCommand;
pub use comments_command::CommentsCommand;
#[cfg(test)]
pub use comments_query::MockCommentsQuery;
pub use comments_query::CommentsQuery;
#[cfg(test)]
pub use group_repository::MockGroupRepository;
pub use group_repository::{GroupRepository, GroupRepositoryError};
#[cfg(test)]
pub use groups_query::MockGroupsQuery;
pub use groups_query::GroupsQuery;
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::IdentityProvider;
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{PostRepository, PostRepositoryError};
#[cfg(test)]
pub use posts_command::MockPostsCommand;
pub use posts_command::PostsCommand;
#[cfg(test)]
pub use posts_query::MockPostsQuery;
pub use posts_query::PostsQuery;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
pub use token_repository::{TokenRepository, TokenRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
