//! Port for reading groups and creating them from seed data.

use async_trait::async_trait;

use crate::domain::{Group, GroupId, NewGroup};

use super::define_port_error;

define_port_error! {
    /// Errors raised by group repository adapters.
    pub enum GroupRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "group repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "group repository query failed: {message}",
        /// A group with the same slug already exists.
        Conflict { slug: String } =>
            "group slug already taken: {slug}",
    }
}

/// Driven port over stored groups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// All groups ordered by id.
    async fn list(&self) -> Result<Vec<Group>, GroupRepositoryError>;

    /// Find a group by id.
    async fn find_by_id(&self, id: GroupId) -> Result<Option<Group>, GroupRepositoryError>;

    /// Store a new group and return it with its assigned id.
    async fn insert(&self, group: &NewGroup) -> Result<Group, GroupRepositoryError>;
}
