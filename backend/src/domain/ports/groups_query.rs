//! Driving port for reading groups.

use async_trait::async_trait;

use crate::domain::{Caller, Error, Group, GroupId};

/// Read-only group use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupsQuery: Send + Sync {
    /// All groups.
    async fn list(&self, caller: &Caller) -> Result<Vec<Group>, Error>;

    /// One group by id.
    async fn retrieve(&self, caller: &Caller, id: GroupId) -> Result<Group, Error>;
}
