//! In-memory store implementing every repository port.
//!
//! Used when no database URL is configured and by the HTTP tests. A single
//! [`MemoryStore`] holds all tables behind one `RwLock` so joins (post author
//! and group title, comment author) read a consistent snapshot.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::ports::{
    CommentRepository, CommentRepositoryError, GroupRepository, GroupRepositoryError,
    PostRepository, PostRepositoryError, TokenRepository, TokenRepositoryError, UserRepository,
    UserRepositoryError,
};
use crate::domain::{
    AuthToken, Comment, CommentChanges, CommentId, Group, GroupId, GroupRef, NewComment, NewGroup,
    NewPost, NewUser, Post, PostChanges, PostId, User, UserId, Username,
};

#[derive(Debug, Clone)]
struct PostRow {
    text: String,
    author: UserId,
    group: Option<GroupId>,
    pub_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct CommentRow {
    text: String,
    author: UserId,
    post: PostId,
    created: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    tokens: HashMap<AuthToken, UserId>,
    groups: BTreeMap<GroupId, Group>,
    posts: BTreeMap<PostId, PostRow>,
    comments: BTreeMap<CommentId, CommentRow>,
    last_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn post(&self, id: PostId, row: &PostRow) -> Result<Post, String> {
        let author = self
            .users
            .get(&row.author)
            .ok_or_else(|| format!("post {id} references missing user {}", row.author))?;
        let group = row
            .group
            .map(|group_id| {
                self.groups
                    .get(&group_id)
                    .map(|group| GroupRef {
                        id: group.id,
                        title: group.title.clone(),
                    })
                    .ok_or_else(|| format!("post {id} references missing group {group_id}"))
            })
            .transpose()?;
        Ok(Post {
            id,
            text: row.text.clone(),
            author: author.identity(),
            group,
            pub_date: row.pub_date,
        })
    }

    fn comment(&self, id: CommentId, row: &CommentRow) -> Result<Comment, String> {
        let author = self
            .users
            .get(&row.author)
            .ok_or_else(|| format!("comment {id} references missing user {}", row.author))?;
        Ok(Comment {
            id,
            text: row.text.clone(),
            author: author.identity(),
            post: row.post,
            created: row.created,
        })
    }

    fn ensure_user(&self, id: UserId) -> Result<(), String> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(format!("user {id} does not exist"))
        }
    }
}

/// Shared in-memory tables. Clones share the same data.
///
/// Identifiers come from one sequence shared by every table, so they are
/// unique across the store and never reused.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|user| user.username() == username)
            .cloned())
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .values()
            .any(|existing| existing.username() == &user.username)
        {
            return Err(UserRepositoryError::conflict(user.username.to_string()));
        }
        let id = UserId::new(tables.next_id());
        let stored = User::new(id, user.username.clone(), user.password.clone());
        tables.users.insert(id, stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl TokenRepository for MemoryStore {
    async fn find_user_id(&self, token: &AuthToken) -> Result<Option<UserId>, TokenRepositoryError> {
        Ok(self.tables.read().await.tokens.get(token).copied())
    }

    async fn find_for_user(&self, user: UserId) -> Result<Option<AuthToken>, TokenRepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .tokens
            .iter()
            .find(|(_, owner)| **owner == user)
            .map(|(token, _)| token.clone()))
    }

    async fn insert(&self, user: UserId, token: &AuthToken) -> Result<(), TokenRepositoryError> {
        let mut tables = self.tables.write().await;
        tables.ensure_user(user).map_err(TokenRepositoryError::query)?;
        if tables.tokens.values().any(|owner| *owner == user) {
            return Err(TokenRepositoryError::conflict(user.get()));
        }
        if tables.tokens.contains_key(token) {
            return Err(TokenRepositoryError::query("token key already issued"));
        }
        tables.tokens.insert(token.clone(), user);
        Ok(())
    }
}

#[async_trait]
impl GroupRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Group>, GroupRepositoryError> {
        Ok(self.tables.read().await.groups.values().cloned().collect())
    }

    async fn find_by_id(&self, id: GroupId) -> Result<Option<Group>, GroupRepositoryError> {
        Ok(self.tables.read().await.groups.get(&id).cloned())
    }

    async fn insert(&self, group: &NewGroup) -> Result<Group, GroupRepositoryError> {
        let mut tables = self.tables.write().await;
        if tables
            .groups
            .values()
            .any(|existing| existing.slug == group.slug())
        {
            return Err(GroupRepositoryError::conflict(group.slug()));
        }
        let id = GroupId::new(tables.next_id());
        let stored = group.clone().into_group(id);
        tables.groups.insert(id, stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Post>, PostRepositoryError> {
        let tables = self.tables.read().await;
        tables
            .posts
            .iter()
            .map(|(id, row)| tables.post(*id, row).map_err(PostRepositoryError::query))
            .collect()
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostRepositoryError> {
        let tables = self.tables.read().await;
        tables
            .posts
            .get(&id)
            .map(|row| tables.post(id, row).map_err(PostRepositoryError::query))
            .transpose()
    }

    async fn insert(&self, post: &NewPost) -> Result<Post, PostRepositoryError> {
        let mut tables = self.tables.write().await;
        tables
            .ensure_user(post.author)
            .map_err(PostRepositoryError::query)?;
        if let Some(group) = post.group.filter(|group| !tables.groups.contains_key(group)) {
            return Err(PostRepositoryError::query(format!(
                "group {group} does not exist"
            )));
        }
        let id = PostId::new(tables.next_id());
        let row = PostRow {
            text: post.text.clone(),
            author: post.author,
            group: post.group,
            pub_date: post.pub_date,
        };
        let stored = tables.post(id, &row).map_err(PostRepositoryError::query)?;
        tables.posts.insert(id, row);
        Ok(stored)
    }

    async fn update(
        &self,
        id: PostId,
        changes: &PostChanges,
    ) -> Result<Option<Post>, PostRepositoryError> {
        let mut tables = self.tables.write().await;
        if let Some(group) = changes
            .group
            .filter(|group| !tables.groups.contains_key(group))
        {
            return Err(PostRepositoryError::query(format!(
                "group {group} does not exist"
            )));
        }
        let Some(row) = tables.posts.get_mut(&id) else {
            return Ok(None);
        };
        row.text = changes.text.clone();
        row.group = changes.group;
        let row = row.clone();
        tables
            .post(id, &row)
            .map(Some)
            .map_err(PostRepositoryError::query)
    }

    async fn delete(&self, id: PostId) -> Result<bool, PostRepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.posts.remove(&id).is_none() {
            return Ok(false);
        }
        tables.comments.retain(|_, comment| comment.post != id);
        Ok(true)
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn list_for_post(&self, post: PostId) -> Result<Vec<Comment>, CommentRepositoryError> {
        let tables = self.tables.read().await;
        tables
            .comments
            .iter()
            .filter(|(_, row)| row.post == post)
            .map(|(id, row)| tables.comment(*id, row).map_err(CommentRepositoryError::query))
            .collect()
    }

    async fn find_for_post(
        &self,
        post: PostId,
        id: CommentId,
    ) -> Result<Option<Comment>, CommentRepositoryError> {
        let tables = self.tables.read().await;
        tables
            .comments
            .get(&id)
            .filter(|row| row.post == post)
            .map(|row| tables.comment(id, row).map_err(CommentRepositoryError::query))
            .transpose()
    }

    async fn insert(&self, comment: &NewComment) -> Result<Comment, CommentRepositoryError> {
        let mut tables = self.tables.write().await;
        tables
            .ensure_user(comment.author)
            .map_err(CommentRepositoryError::query)?;
        if !tables.posts.contains_key(&comment.post) {
            return Err(CommentRepositoryError::query(format!(
                "post {} does not exist",
                comment.post
            )));
        }
        let id = CommentId::new(tables.next_id());
        let row = CommentRow {
            text: comment.text.clone(),
            author: comment.author,
            post: comment.post,
            created: comment.created,
        };
        let stored = tables
            .comment(id, &row)
            .map_err(CommentRepositoryError::query)?;
        tables.comments.insert(id, row);
        Ok(stored)
    }

    async fn update(
        &self,
        id: CommentId,
        changes: &CommentChanges,
    ) -> Result<Option<Comment>, CommentRepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(row) = tables.comments.get_mut(&id) else {
            return Ok(None);
        };
        row.text = changes.text.clone();
        let row = row.clone();
        tables
            .comment(id, &row)
            .map(Some)
            .map_err(CommentRepositoryError::query)
    }

    async fn delete(&self, id: CommentId) -> Result<bool, CommentRepositoryError> {
        Ok(self.tables.write().await.comments.remove(&id).is_some())
    }
}
