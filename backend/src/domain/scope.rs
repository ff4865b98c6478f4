//! Parent resolution for resources nested under a post.

use crate::domain::ports::PostRepository;
use crate::domain::{Error, Post, PostId, ScopeState};

use super::repository_errors::map_post_error;

/// Outcome of resolving the post named in a nested path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentScope {
    Found(Post),
    NotFound,
}

impl ParentScope {
    /// Scope state fed to the policy.
    #[must_use]
    pub fn state(&self) -> ScopeState {
        match self {
            Self::Found(_) => ScopeState::Found,
            Self::NotFound => ScopeState::Missing,
        }
    }
}

/// Look up the parent post of a nested request.
///
/// Storage failures are errors; a missing post is a normal
/// [`ParentScope::NotFound`] outcome left for the policy to reject.
pub async fn resolve_parent<P>(posts: &P, post_id: PostId) -> Result<ParentScope, Error>
where
    P: PostRepository + ?Sized,
{
    let found = posts.find_by_id(post_id).await.map_err(map_post_error)?;
    Ok(found.map_or(ParentScope::NotFound, ParentScope::Found))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockPostRepository, PostRepositoryError};
    use crate::domain::{ErrorCode, Identity, UserId, Username};
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn post(id: i64) -> Post {
        Post {
            id: PostId::new(id),
            text: "parent".to_owned(),
            author: Identity::new(UserId::new(1), Username::new("author").expect("valid")),
            group: None,
            pub_date: Utc
                .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
                .single()
                .expect("valid timestamp"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn existing_post_is_found() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_by_id()
            .withf(|id| *id == PostId::new(4))
            .times(1)
            .return_once(|_| Ok(Some(post(4))));

        let scope = resolve_parent(&repo, PostId::new(4))
            .await
            .expect("lookup succeeds");

        assert_eq!(scope, ParentScope::Found(post(4)));
        assert_eq!(scope.state(), ScopeState::Found);
    }

    #[rstest]
    #[tokio::test]
    async fn absent_post_is_not_found() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

        let scope = resolve_parent(&repo, PostId::new(9))
            .await
            .expect("lookup succeeds");

        assert_eq!(scope.state(), ScopeState::Missing);
    }

    #[rstest]
    #[tokio::test]
    async fn storage_failures_surface_as_errors() {
        let mut repo = MockPostRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .return_once(|_| Err(PostRepositoryError::connection("refused")));

        let error = resolve_parent(&repo, PostId::new(1))
            .await
            .expect_err("connection failure");

        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
