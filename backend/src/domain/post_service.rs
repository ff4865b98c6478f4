//! Post controller: list, retrieve, create, update and delete posts.
//!
//! Every operation goes through [`enforce`] before and after the instance
//! lookup, and every write is validated in full before anything is stored.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::fields::{
    FieldErrors, REQUIRED, WriteBody, WriteMode, decoded, parse_post, unknown_group_message,
};
use crate::domain::policy::{InstanceState, Operation, ResourceKind, Target, enforce};
use crate::domain::ports::{GroupRepository, PostRepository, PostsCommand, PostsQuery};
use crate::domain::{Caller, Error, GroupId, Identity, NewPost, Post, PostChanges, PostId};

use super::repository_errors::{map_group_error, map_post_error};

pub(crate) fn acting(caller: &Caller) -> Result<&Identity, Error> {
    caller
        .identity()
        .ok_or_else(|| Error::unauthorized("Authentication credentials were not provided."))
}

/// Post service implementing the post driving ports.
#[derive(Clone)]
pub struct PostService<P, G> {
    posts: Arc<P>,
    groups: Arc<G>,
    clock: Arc<dyn Clock>,
}

impl<P, G> PostService<P, G> {
    /// Create the service over its repositories and clock.
    pub fn new(posts: Arc<P>, groups: Arc<G>, clock: Arc<dyn Clock>) -> Self {
        Self {
            posts,
            groups,
            clock,
        }
    }
}

impl<P, G> PostService<P, G>
where
    P: PostRepository,
    G: GroupRepository,
{
    async fn load(&self, caller: &Caller, operation: Operation, id: PostId) -> Result<Post, Error> {
        let target = Target::instance(ResourceKind::Post);
        enforce(caller, operation, &target)?;
        let found = self.posts.find_by_id(id).await.map_err(map_post_error)?;
        let state = found
            .as_ref()
            .map_or(InstanceState::Missing, |post| {
                InstanceState::Owned(post.author.id())
            });
        enforce(caller, operation, &target.resolved(state))?;
        found.ok_or_else(|| Error::not_found("post not found"))
    }

    async fn existing_group(&self, group: Option<GroupId>) -> Result<Option<GroupId>, Error> {
        let Some(id) = group else {
            return Ok(None);
        };
        match self.groups.find_by_id(id).await.map_err(map_group_error)? {
            Some(_) => Ok(Some(id)),
            None => Err(FieldErrors::single("group", unknown_group_message(id)).into()),
        }
    }
}

#[async_trait]
impl<P, G> PostsQuery for PostService<P, G>
where
    P: PostRepository,
    G: GroupRepository,
{
    async fn list(&self, caller: &Caller) -> Result<Vec<Post>, Error> {
        enforce(caller, Operation::List, &Target::collection(ResourceKind::Post))?;
        self.posts.list().await.map_err(map_post_error)
    }

    async fn retrieve(&self, caller: &Caller, id: PostId) -> Result<Post, Error> {
        self.load(caller, Operation::Retrieve, id).await
    }
}

#[async_trait]
impl<P, G> PostsCommand for PostService<P, G>
where
    P: PostRepository,
    G: GroupRepository,
{
    async fn create(&self, caller: &Caller, payload: &WriteBody) -> Result<Post, Error> {
        enforce(caller, Operation::Create, &Target::collection(ResourceKind::Post))?;
        let author = acting(caller)?;
        let input = parse_post(decoded(payload)?, WriteMode::Create)?;
        let Some(text) = input.text else {
            return Err(FieldErrors::single("text", REQUIRED).into());
        };
        let group = self.existing_group(input.group.flatten()).await?;

        let post = self
            .posts
            .insert(&NewPost {
                text,
                author: author.id(),
                group,
                pub_date: self.clock.utc(),
            })
            .await
            .map_err(map_post_error)?;
        info!(post_id = %post.id, author = %author.username(), "post created");
        Ok(post)
    }

    async fn update(
        &self,
        caller: &Caller,
        id: PostId,
        payload: &WriteBody,
        mode: WriteMode,
    ) -> Result<Post, Error> {
        let current = self.load(caller, Operation::Update, id).await?;
        let input = parse_post(decoded(payload)?, mode)?;
        let group = match input.group {
            Some(requested) => self.existing_group(requested).await?,
            None => current.group.as_ref().map(|group| group.id),
        };
        let changes = PostChanges {
            text: input.text.unwrap_or(current.text),
            group,
        };

        let updated = self
            .posts
            .update(id, &changes)
            .await
            .map_err(map_post_error)?
            .ok_or_else(|| Error::not_found("post not found"))?;
        info!(post_id = %id, ?mode, "post updated");
        Ok(updated)
    }

    async fn delete(&self, caller: &Caller, id: PostId) -> Result<(), Error> {
        self.load(caller, Operation::Delete, id).await?;
        if !self.posts.delete(id).await.map_err(map_post_error)? {
            return Err(Error::not_found("post not found"));
        }
        info!(post_id = %id, "post deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "post_service_tests.rs"]
mod tests;
