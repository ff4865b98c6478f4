//! PostgreSQL-backed `PostRepository` adapter.
//!
//! Posts are read joined with their author's username and, when set, their
//! group's title. Deleting a post cascades to its comments in the database.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::{
    GroupId, GroupRef, Identity, NewPost, Post, PostChanges, PostId, UserId, Username,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewPostRow, PostRow, PostUpdate};
use super::pool::DbPool;
use super::schema::{groups, posts, users};

/// Diesel-backed post store.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn post_error(error: diesel::result::Error) -> PostRepositoryError {
    map_basic_diesel_error(
        error,
        PostRepositoryError::query,
        PostRepositoryError::connection,
    )
}

type JoinedPost = (PostRow, String, Option<String>);

fn row_to_post((row, username, group_title): JoinedPost) -> Result<Post, PostRepositoryError> {
    let username = Username::new(&username).map_err(|err| {
        PostRepositoryError::query(format!("invalid author of post {}: {err}", row.id))
    })?;
    let group = match (row.group_id, group_title) {
        (Some(id), Some(title)) => Some(GroupRef {
            id: GroupId::new(id),
            title,
        }),
        (None, _) => None,
        (Some(id), None) => {
            return Err(PostRepositoryError::query(format!(
                "post {} references missing group {id}",
                row.id
            )));
        }
    };
    Ok(Post {
        id: PostId::new(row.id),
        text: row.text,
        author: Identity::new(UserId::new(row.author_id), username),
        group,
        pub_date: row.pub_date,
    })
}

/// Load posts ordered by id, optionally narrowed to one id.
async fn load_posts(
    conn: &mut AsyncPgConnection,
    only: Option<PostId>,
) -> Result<Vec<Post>, PostRepositoryError> {
    let mut query = posts::table
        .inner_join(users::table)
        .left_join(groups::table)
        .select((
            PostRow::as_select(),
            users::username,
            groups::title.nullable(),
        ))
        .order(posts::id.asc())
        .into_boxed();
    if let Some(id) = only {
        query = query.filter(posts::id.eq(id.get()));
    }
    let rows: Vec<JoinedPost> = query.load(conn).await.map_err(post_error)?;
    rows.into_iter().map(row_to_post).collect()
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn list(&self) -> Result<Vec<Post>, PostRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, PostRepositoryError::connection))?;
        load_posts(&mut conn, None).await
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, PostRepositoryError::connection))?;
        Ok(load_posts(&mut conn, Some(id)).await?.pop())
    }

    async fn insert(&self, post: &NewPost) -> Result<Post, PostRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, PostRepositoryError::connection))?;
        let id: i64 = diesel::insert_into(posts::table)
            .values(&NewPostRow {
                text: &post.text,
                pub_date: post.pub_date,
                author_id: post.author.get(),
                group_id: post.group.map(GroupId::get),
            })
            .returning(posts::id)
            .get_result(&mut conn)
            .await
            .map_err(post_error)?;
        load_posts(&mut conn, Some(PostId::new(id)))
            .await?
            .pop()
            .ok_or_else(|| PostRepositoryError::query(format!("post {id} vanished after insert")))
    }

    async fn update(
        &self,
        id: PostId,
        changes: &PostChanges,
    ) -> Result<Option<Post>, PostRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, PostRepositoryError::connection))?;
        let updated = diesel::update(posts::table.find(id.get()))
            .set(&PostUpdate {
                text: &changes.text,
                group_id: changes.group.map(GroupId::get),
            })
            .execute(&mut conn)
            .await
            .map_err(post_error)?;
        if updated == 0 {
            return Ok(None);
        }
        Ok(load_posts(&mut conn, Some(id)).await?.pop())
    }

    async fn delete(&self, id: PostId) -> Result<bool, PostRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, PostRepositoryError::connection))?;
        let deleted = diesel::delete(posts::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(post_error)?;
        Ok(deleted > 0)
    }
}
