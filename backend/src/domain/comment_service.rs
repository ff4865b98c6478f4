//! Comment controller. Every operation first resolves the parent post named
//! in the path; a missing parent is reported before authentication.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::fields::{FieldErrors, REQUIRED, WriteBody, WriteMode, decoded, parse_comment};
use crate::domain::policy::{InstanceState, Operation, ResourceKind, Target, enforce};
use crate::domain::ports::{CommentRepository, CommentsCommand, CommentsQuery, PostRepository};
use crate::domain::scope::resolve_parent;
use crate::domain::{
    Caller, Comment, CommentChanges, CommentId, Error, NewComment, PostId,
};

use super::post_service::acting;
use super::repository_errors::map_comment_error;

/// Comment service implementing the comment driving ports.
#[derive(Clone)]
pub struct CommentService<C, P> {
    comments: Arc<C>,
    posts: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<C, P> CommentService<C, P> {
    /// Create the service over its repositories and clock.
    pub fn new(comments: Arc<C>, posts: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            comments,
            posts,
            clock,
        }
    }
}

impl<C, P> CommentService<C, P>
where
    C: CommentRepository,
    P: PostRepository,
{
    async fn scoped(
        &self,
        caller: &Caller,
        operation: Operation,
        target: Target,
        post: PostId,
    ) -> Result<Target, Error> {
        let scope = resolve_parent(self.posts.as_ref(), post).await?;
        let target = target.within(scope.state());
        enforce(caller, operation, &target)?;
        Ok(target)
    }

    async fn load(
        &self,
        caller: &Caller,
        operation: Operation,
        post: PostId,
        id: CommentId,
    ) -> Result<Comment, Error> {
        let target = self
            .scoped(caller, operation, Target::instance(ResourceKind::Comment), post)
            .await?;
        let found = self
            .comments
            .find_for_post(post, id)
            .await
            .map_err(map_comment_error)?;
        let state = found
            .as_ref()
            .map_or(InstanceState::Missing, |comment| {
                InstanceState::Owned(comment.author.id())
            });
        enforce(caller, operation, &target.resolved(state))?;
        found.ok_or_else(|| Error::not_found("comment not found"))
    }
}

#[async_trait]
impl<C, P> CommentsQuery for CommentService<C, P>
where
    C: CommentRepository,
    P: PostRepository,
{
    async fn list(&self, caller: &Caller, post: PostId) -> Result<Vec<Comment>, Error> {
        self.scoped(
            caller,
            Operation::List,
            Target::collection(ResourceKind::Comment),
            post,
        )
        .await?;
        self.comments
            .list_for_post(post)
            .await
            .map_err(map_comment_error)
    }

    async fn retrieve(&self, caller: &Caller, post: PostId, id: CommentId) -> Result<Comment, Error> {
        self.load(caller, Operation::Retrieve, post, id).await
    }
}

#[async_trait]
impl<C, P> CommentsCommand for CommentService<C, P>
where
    C: CommentRepository,
    P: PostRepository,
{
    async fn create(&self, caller: &Caller, post: PostId, payload: &WriteBody) -> Result<Comment, Error> {
        self.scoped(
            caller,
            Operation::Create,
            Target::collection(ResourceKind::Comment),
            post,
        )
        .await?;
        let author = acting(caller)?;
        let input = parse_comment(decoded(payload)?, WriteMode::Create)?;
        let Some(text) = input.text else {
            return Err(FieldErrors::single("text", REQUIRED).into());
        };

        let comment = self
            .comments
            .insert(&NewComment {
                text,
                author: author.id(),
                post,
                created: self.clock.utc(),
            })
            .await
            .map_err(map_comment_error)?;
        info!(comment_id = %comment.id, post_id = %post, author = %author.username(), "comment created");
        Ok(comment)
    }

    async fn update(
        &self,
        caller: &Caller,
        post: PostId,
        id: CommentId,
        payload: &WriteBody,
        mode: WriteMode,
    ) -> Result<Comment, Error> {
        let current = self.load(caller, Operation::Update, post, id).await?;
        let input = parse_comment(decoded(payload)?, mode)?;
        let changes = CommentChanges {
            text: input.text.unwrap_or(current.text),
        };

        let updated = self
            .comments
            .update(id, &changes)
            .await
            .map_err(map_comment_error)?
            .ok_or_else(|| Error::not_found("comment not found"))?;
        info!(comment_id = %id, post_id = %post, ?mode, "comment updated");
        Ok(updated)
    }

    async fn delete(&self, caller: &Caller, post: PostId, id: CommentId) -> Result<(), Error> {
        self.load(caller, Operation::Delete, post, id).await?;
        if !self.comments.delete(id).await.map_err(map_comment_error)? {
            return Err(Error::not_found("comment not found"));
        }
        info!(comment_id = %id, post_id = %post, "comment deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "comment_service_tests.rs"]
mod tests;
