//! Comment handlers, nested under their parent post.
//!
//! ```text
//! GET    /api/v1/posts/{post_id}/comments/
//! POST   /api/v1/posts/{post_id}/comments/       {"text":"Nice"}
//! GET    /api/v1/posts/{post_id}/comments/{id}/
//! PUT    /api/v1/posts/{post_id}/comments/{id}/  {"text":"Edited"}
//! PATCH  /api/v1/posts/{post_id}/comments/{id}/  {"text":"Edited"}
//! DELETE /api/v1/posts/{post_id}/comments/{id}/
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, put, web};

use crate::domain::{CommentId, PostId, WriteMode};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::CallerContext;
use crate::inbound::http::dto::{CommentBody, CommentRequest};
use crate::inbound::http::payload::WritePayload;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{comment_id, post_id};

fn comment_path(path: &(String, String)) -> ApiResult<(PostId, CommentId)> {
    let (post, comment) = path;
    Ok((post_id(post)?, comment_id(comment)?))
}

/// List the comments of a post.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{post_id}/comments/",
    params(("post_id" = i64, Path, description = "Parent post identifier")),
    responses(
        (status = 200, description = "Comments ordered by id", body = [CommentBody]),
        (status = 401, description = "Missing or unknown token", body = ErrorSchema),
        (status = 404, description = "No such post", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "listComments"
)]
#[get("/posts/{post_id}/comments/")]
pub async fn list_comments(
    state: web::Data<HttpState>,
    caller: CallerContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<CommentBody>>> {
    let post = post_id(&path)?;
    let comments = state.comments_query.list(caller.caller(), post).await?;
    Ok(web::Json(comments.into_iter().map(CommentBody::from).collect()))
}

/// Comment on a post as the calling user.
#[utoipa::path(
    post,
    path = "/api/v1/posts/{post_id}/comments/",
    params(("post_id" = i64, Path, description = "Parent post identifier")),
    request_body = CommentRequest,
    responses(
        (status = 201, description = "Comment created", body = CommentBody),
        (status = 400, description = "Invalid payload", body = ErrorSchema),
        (status = 401, description = "Missing or unknown token", body = ErrorSchema),
        (status = 404, description = "No such post", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "createComment"
)]
#[post("/posts/{post_id}/comments/")]
pub async fn create_comment(
    state: web::Data<HttpState>,
    caller: CallerContext,
    path: web::Path<String>,
    payload: WritePayload,
) -> ApiResult<HttpResponse> {
    let post = post_id(&path)?;
    let comment = state
        .comments
        .create(caller.caller(), post, payload.body())
        .await?;
    Ok(HttpResponse::Created().json(CommentBody::from(comment)))
}

/// Fetch one comment of a post.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{post_id}/comments/{id}/",
    params(
        ("post_id" = i64, Path, description = "Parent post identifier"),
        ("id" = i64, Path, description = "Comment identifier")
    ),
    responses(
        (status = 200, description = "Comment", body = CommentBody),
        (status = 401, description = "Missing or unknown token", body = ErrorSchema),
        (status = 404, description = "No such post or comment", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "getComment"
)]
#[get("/posts/{post_id}/comments/{id}/")]
pub async fn get_comment(
    state: web::Data<HttpState>,
    caller: CallerContext,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<CommentBody>> {
    let (post, id) = comment_path(&path)?;
    let comment = state
        .comments_query
        .retrieve(caller.caller(), post, id)
        .await?;
    Ok(web::Json(CommentBody::from(comment)))
}

async fn update_comment(
    state: &HttpState,
    caller: &CallerContext,
    path: &(String, String),
    payload: &WritePayload,
    mode: WriteMode,
) -> ApiResult<web::Json<CommentBody>> {
    let (post, id) = comment_path(path)?;
    let comment = state
        .comments
        .update(caller.caller(), post, id, payload.body(), mode)
        .await?;
    Ok(web::Json(CommentBody::from(comment)))
}

/// Replace a comment's text.
#[utoipa::path(
    put,
    path = "/api/v1/posts/{post_id}/comments/{id}/",
    params(
        ("post_id" = i64, Path, description = "Parent post identifier"),
        ("id" = i64, Path, description = "Comment identifier")
    ),
    request_body = CommentRequest,
    responses(
        (status = 200, description = "Comment replaced", body = CommentBody),
        (status = 400, description = "Invalid payload", body = ErrorSchema),
        (status = 401, description = "Missing or unknown token", body = ErrorSchema),
        (status = 403, description = "Caller is not the author", body = ErrorSchema),
        (status = 404, description = "No such post or comment", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "replaceComment"
)]
#[put("/posts/{post_id}/comments/{id}/")]
pub async fn replace_comment(
    state: web::Data<HttpState>,
    caller: CallerContext,
    path: web::Path<(String, String)>,
    payload: WritePayload,
) -> ApiResult<web::Json<CommentBody>> {
    update_comment(&state, &caller, &path, &payload, WriteMode::Replace).await
}

/// Change a comment's text if supplied.
#[utoipa::path(
    patch,
    path = "/api/v1/posts/{post_id}/comments/{id}/",
    params(
        ("post_id" = i64, Path, description = "Parent post identifier"),
        ("id" = i64, Path, description = "Comment identifier")
    ),
    request_body = CommentRequest,
    responses(
        (status = 200, description = "Comment updated", body = CommentBody),
        (status = 400, description = "Invalid payload", body = ErrorSchema),
        (status = 401, description = "Missing or unknown token", body = ErrorSchema),
        (status = 403, description = "Caller is not the author", body = ErrorSchema),
        (status = 404, description = "No such post or comment", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "patchComment"
)]
#[patch("/posts/{post_id}/comments/{id}/")]
pub async fn patch_comment(
    state: web::Data<HttpState>,
    caller: CallerContext,
    path: web::Path<(String, String)>,
    payload: WritePayload,
) -> ApiResult<web::Json<CommentBody>> {
    update_comment(&state, &caller, &path, &payload, WriteMode::Partial).await
}

/// Delete a comment.
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{post_id}/comments/{id}/",
    params(
        ("post_id" = i64, Path, description = "Parent post identifier"),
        ("id" = i64, Path, description = "Comment identifier")
    ),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 401, description = "Missing or unknown token", body = ErrorSchema),
        (status = 403, description = "Caller is not the author", body = ErrorSchema),
        (status = 404, description = "No such post or comment", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["comments"],
    operation_id = "deleteComment"
)]
#[delete("/posts/{post_id}/comments/{id}/")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    caller: CallerContext,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (post, id) = comment_path(&path)?;
    state.comments.delete(caller.caller(), post, id).await?;
    Ok(HttpResponse::NoContent().finish())
}
