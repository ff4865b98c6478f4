//! PostgreSQL-backed `CommentRepository` adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{CommentRepository, CommentRepositoryError};
use crate::domain::{
    Comment, CommentChanges, CommentId, Identity, NewComment, PostId, UserId, Username,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CommentRow, NewCommentRow};
use super::pool::DbPool;
use super::schema::{comments, users};

/// Diesel-backed comment store.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn comment_error(error: diesel::result::Error) -> CommentRepositoryError {
    map_basic_diesel_error(
        error,
        CommentRepositoryError::query,
        CommentRepositoryError::connection,
    )
}

fn row_to_comment((row, username): (CommentRow, String)) -> Result<Comment, CommentRepositoryError> {
    let username = Username::new(&username).map_err(|err| {
        CommentRepositoryError::query(format!("invalid author of comment {}: {err}", row.id))
    })?;
    Ok(Comment {
        id: CommentId::new(row.id),
        text: row.text,
        author: Identity::new(UserId::new(row.author_id), username),
        post: PostId::new(row.post_id),
        created: row.created,
    })
}

/// Load the comments of `post` ordered by id, optionally narrowed to one id.
async fn load_comments(
    conn: &mut AsyncPgConnection,
    post: PostId,
    only: Option<CommentId>,
) -> Result<Vec<Comment>, CommentRepositoryError> {
    let mut query = comments::table
        .inner_join(users::table)
        .filter(comments::post_id.eq(post.get()))
        .select((CommentRow::as_select(), users::username))
        .order(comments::id.asc())
        .into_boxed();
    if let Some(id) = only {
        query = query.filter(comments::id.eq(id.get()));
    }
    let rows: Vec<(CommentRow, String)> = query.load(conn).await.map_err(comment_error)?;
    rows.into_iter().map(row_to_comment).collect()
}

async fn load_comment(
    conn: &mut AsyncPgConnection,
    id: CommentId,
) -> Result<Option<Comment>, CommentRepositoryError> {
    let row: Option<(CommentRow, String)> = comments::table
        .inner_join(users::table)
        .filter(comments::id.eq(id.get()))
        .select((CommentRow::as_select(), users::username))
        .first(conn)
        .await
        .optional()
        .map_err(comment_error)?;
    row.map(row_to_comment).transpose()
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn list_for_post(&self, post: PostId) -> Result<Vec<Comment>, CommentRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, CommentRepositoryError::connection))?;
        load_comments(&mut conn, post, None).await
    }

    async fn find_for_post(
        &self,
        post: PostId,
        id: CommentId,
    ) -> Result<Option<Comment>, CommentRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, CommentRepositoryError::connection))?;
        Ok(load_comments(&mut conn, post, Some(id)).await?.pop())
    }

    async fn insert(&self, comment: &NewComment) -> Result<Comment, CommentRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, CommentRepositoryError::connection))?;
        let id: i64 = diesel::insert_into(comments::table)
            .values(&NewCommentRow {
                text: &comment.text,
                created: comment.created,
                author_id: comment.author.get(),
                post_id: comment.post.get(),
            })
            .returning(comments::id)
            .get_result(&mut conn)
            .await
            .map_err(comment_error)?;
        load_comment(&mut conn, CommentId::new(id))
            .await?
            .ok_or_else(|| {
                CommentRepositoryError::query(format!("comment {id} vanished after insert"))
            })
    }

    async fn update(
        &self,
        id: CommentId,
        changes: &CommentChanges,
    ) -> Result<Option<Comment>, CommentRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, CommentRepositoryError::connection))?;
        let updated = diesel::update(comments::table.find(id.get()))
            .set(comments::text.eq(&changes.text))
            .execute(&mut conn)
            .await
            .map_err(comment_error)?;
        if updated == 0 {
            return Ok(None);
        }
        load_comment(&mut conn, id).await
    }

    async fn delete(&self, id: CommentId) -> Result<bool, CommentRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_basic_pool_error(err, CommentRepositoryError::connection))?;
        let deleted = diesel::delete(comments::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(comment_error)?;
        Ok(deleted > 0)
    }
}
