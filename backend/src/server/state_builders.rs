//! Builders wiring repositories into the services behind [`HttpState`].

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::info;

use crate::domain::ports::{
    CommentRepository, GroupRepository, PostRepository, TokenRepository, UserRepository,
};
use crate::domain::{
    CommentService, GroupService, PostService, SeedData, SeedError, SeedService,
    TokenIdentityService,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::MemoryStore;
use crate::outbound::persistence::{
    DbPool, DieselCommentRepository, DieselGroupRepository, DieselPostRepository,
    DieselTokenRepository, DieselUserRepository,
};

/// Repositories backing one running server.
pub(crate) struct Repositories<U, T, G, P, C> {
    pub users: Arc<U>,
    pub tokens: Arc<T>,
    pub groups: Arc<G>,
    pub posts: Arc<P>,
    pub comments: Arc<C>,
}

impl<U, T, G, P, C> Repositories<U, T, G, P, C>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    G: GroupRepository + 'static,
    P: PostRepository + 'static,
    C: CommentRepository + 'static,
{
    /// Apply `seed`, if any, then build the handler state.
    async fn into_state(
        self,
        seed: Option<&SeedData>,
        clock: Arc<dyn Clock>,
    ) -> Result<HttpState, SeedError> {
        if let Some(seed) = seed {
            SeedService::new(self.users.clone(), self.groups.clone())
                .apply(seed)
                .await?;
        }
        Ok(self.http_state(clock))
    }

    fn http_state(self, clock: Arc<dyn Clock>) -> HttpState {
        let posts = Arc::new(PostService::new(
            self.posts.clone(),
            self.groups.clone(),
            clock.clone(),
        ));
        let comments = Arc::new(CommentService::new(self.comments, self.posts, clock));
        HttpState::new(HttpStatePorts {
            identity: Arc::new(TokenIdentityService::new(self.users, self.tokens)),
            groups: Arc::new(GroupService::new(self.groups)),
            posts: posts.clone(),
            posts_query: posts,
            comments: comments.clone(),
            comments_query: comments,
        })
    }
}

fn memory_repositories(
    store: MemoryStore,
) -> Repositories<MemoryStore, MemoryStore, MemoryStore, MemoryStore, MemoryStore> {
    let store = Arc::new(store);
    Repositories {
        users: store.clone(),
        tokens: store.clone(),
        groups: store.clone(),
        posts: store.clone(),
        comments: store,
    }
}

/// Handler state over an in-memory store.
///
/// Seed the store through its repository ports before or after calling this;
/// the returned state shares the store's tables.
pub fn in_memory_http_state(store: MemoryStore, clock: Arc<dyn Clock>) -> HttpState {
    memory_repositories(store).http_state(clock)
}

/// Choose the store for `pool`, apply the seed and build the handler state.
pub(crate) async fn build_http_state(
    pool: Option<&DbPool>,
    seed: Option<&SeedData>,
) -> Result<HttpState, SeedError> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    match pool {
        Some(pool) => {
            info!(store = "postgres", "wiring repositories");
            Repositories {
                users: Arc::new(DieselUserRepository::new(pool.clone())),
                tokens: Arc::new(DieselTokenRepository::new(pool.clone())),
                groups: Arc::new(DieselGroupRepository::new(pool.clone())),
                posts: Arc::new(DieselPostRepository::new(pool.clone())),
                comments: Arc::new(DieselCommentRepository::new(pool.clone())),
            }
            .into_state(seed, clock)
            .await
        }
        None => {
            info!(store = "memory", "wiring repositories");
            memory_repositories(MemoryStore::new())
                .into_state(seed, clock)
                .await
        }
    }
}
