//! Read-only group controller.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::policy::{InstanceState, Operation, ResourceKind, Target, enforce};
use crate::domain::ports::{GroupRepository, GroupsQuery};
use crate::domain::{Caller, Error, Group, GroupId};

use super::repository_errors::map_group_error;

/// Group service implementing [`GroupsQuery`].
#[derive(Clone)]
pub struct GroupService<G> {
    groups: Arc<G>,
}

impl<G> GroupService<G> {
    /// Create the service over a group repository.
    pub fn new(groups: Arc<G>) -> Self {
        Self { groups }
    }
}

#[async_trait]
impl<G> GroupsQuery for GroupService<G>
where
    G: GroupRepository,
{
    async fn list(&self, caller: &Caller) -> Result<Vec<Group>, Error> {
        enforce(caller, Operation::List, &Target::collection(ResourceKind::Group))?;
        self.groups.list().await.map_err(map_group_error)
    }

    async fn retrieve(&self, caller: &Caller, id: GroupId) -> Result<Group, Error> {
        let target = Target::instance(ResourceKind::Group);
        enforce(caller, Operation::Retrieve, &target)?;
        let found = self.groups.find_by_id(id).await.map_err(map_group_error)?;
        let state = if found.is_some() {
            InstanceState::Unowned
        } else {
            InstanceState::Missing
        };
        enforce(caller, Operation::Retrieve, &target.resolved(state))?;
        found.ok_or_else(|| Error::not_found("group not found"))
    }
}
