//! Post handlers.
//!
//! ```text
//! GET    /api/v1/posts/
//! POST   /api/v1/posts/        {"text":"Hello","group":1}
//! GET    /api/v1/posts/{id}/
//! PUT    /api/v1/posts/{id}/   {"text":"Edited"}
//! PATCH  /api/v1/posts/{id}/   {"group":null}
//! DELETE /api/v1/posts/{id}/
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, put, web};

use crate::domain::WriteMode;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::CallerContext;
use crate::inbound::http::dto::{PostBody, PostRequest};
use crate::inbound::http::payload::WritePayload;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::post_id;

/// List every post.
#[utoipa::path(
    get,
    path = "/api/v1/posts/",
    responses(
        (status = 200, description = "Posts ordered by id", body = [PostBody]),
        (status = 401, description = "Missing or unknown token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "listPosts"
)]
#[get("/posts/")]
pub async fn list_posts(
    state: web::Data<HttpState>,
    caller: CallerContext,
) -> ApiResult<web::Json<Vec<PostBody>>> {
    let posts = state.posts_query.list(caller.caller()).await?;
    Ok(web::Json(posts.into_iter().map(PostBody::from).collect()))
}

/// Publish a post as the calling user.
#[utoipa::path(
    post,
    path = "/api/v1/posts/",
    request_body = PostRequest,
    responses(
        (status = 201, description = "Post created", body = PostBody),
        (status = 400, description = "Invalid payload", body = ErrorSchema),
        (status = 401, description = "Missing or unknown token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/posts/")]
pub async fn create_post(
    state: web::Data<HttpState>,
    caller: CallerContext,
    payload: WritePayload,
) -> ApiResult<HttpResponse> {
    let post = state.posts.create(caller.caller(), payload.body()).await?;
    Ok(HttpResponse::Created().json(PostBody::from(post)))
}

/// Fetch one post.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}/",
    params(("id" = i64, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post", body = PostBody),
        (status = 401, description = "Missing or unknown token", body = ErrorSchema),
        (status = 404, description = "No such post", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "getPost"
)]
#[get("/posts/{id}/")]
pub async fn get_post(
    state: web::Data<HttpState>,
    caller: CallerContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<PostBody>> {
    let id = post_id(&path)?;
    let post = state.posts_query.retrieve(caller.caller(), id).await?;
    Ok(web::Json(PostBody::from(post)))
}

async fn update_post(
    state: &HttpState,
    caller: &CallerContext,
    raw_id: &str,
    payload: &WritePayload,
    mode: WriteMode,
) -> ApiResult<web::Json<PostBody>> {
    let id = post_id(raw_id)?;
    let post = state
        .posts
        .update(caller.caller(), id, payload.body(), mode)
        .await?;
    Ok(web::Json(PostBody::from(post)))
}

/// Replace a post's writable fields. An omitted `group` is cleared.
#[utoipa::path(
    put,
    path = "/api/v1/posts/{id}/",
    params(("id" = i64, Path, description = "Post identifier")),
    request_body = PostRequest,
    responses(
        (status = 200, description = "Post replaced", body = PostBody),
        (status = 400, description = "Invalid payload", body = ErrorSchema),
        (status = 401, description = "Missing or unknown token", body = ErrorSchema),
        (status = 403, description = "Caller is not the author", body = ErrorSchema),
        (status = 404, description = "No such post", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "replacePost"
)]
#[put("/posts/{id}/")]
pub async fn replace_post(
    state: web::Data<HttpState>,
    caller: CallerContext,
    path: web::Path<String>,
    payload: WritePayload,
) -> ApiResult<web::Json<PostBody>> {
    update_post(&state, &caller, &path, &payload, WriteMode::Replace).await
}

/// Change some of a post's writable fields.
#[utoipa::path(
    patch,
    path = "/api/v1/posts/{id}/",
    params(("id" = i64, Path, description = "Post identifier")),
    request_body = PostRequest,
    responses(
        (status = 200, description = "Post updated", body = PostBody),
        (status = 400, description = "Invalid payload", body = ErrorSchema),
        (status = 401, description = "Missing or unknown token", body = ErrorSchema),
        (status = 403, description = "Caller is not the author", body = ErrorSchema),
        (status = 404, description = "No such post", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "patchPost"
)]
#[patch("/posts/{id}/")]
pub async fn patch_post(
    state: web::Data<HttpState>,
    caller: CallerContext,
    path: web::Path<String>,
    payload: WritePayload,
) -> ApiResult<web::Json<PostBody>> {
    update_post(&state, &caller, &path, &payload, WriteMode::Partial).await
}

/// Delete a post together with its comments.
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}/",
    params(("id" = i64, Path, description = "Post identifier")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Missing or unknown token", body = ErrorSchema),
        (status = 403, description = "Caller is not the author", body = ErrorSchema),
        (status = 404, description = "No such post", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "deletePost"
)]
#[delete("/posts/{id}/")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    caller: CallerContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = post_id(&path)?;
    state.posts.delete(caller.caller(), id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fields::REQUIRED;
    use crate::domain::ports::{GroupRepository, PostRepository};
    use crate::inbound::http::test_utils::{Seeded, field_messages, json_request, seeded};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    macro_rules! post_app {
        ($seeded:expr) => {
            test::init_service(
                App::new()
                    .app_data($seeded.state.clone())
                    .service(list_posts)
                    .service(create_post)
                    .service(get_post)
                    .service(replace_post)
                    .service(patch_post)
                    .service(delete_post),
            )
            .await
        };
    }

    async fn create_as_author(seeded: &Seeded, body: Value) -> Value {
        let app = post_app!(seeded);
        let req = json_request(
            test::TestRequest::post().uri("/posts/"),
            Some(seeded.author()),
            body,
        )
        .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        test::read_body_json(res).await
    }

    #[rstest]
    #[case(test::TestRequest::get().uri("/posts/"))]
    #[case(test::TestRequest::post().uri("/posts/"))]
    #[case(test::TestRequest::get().uri("/posts/1/"))]
    #[case(test::TestRequest::delete().uri("/posts/1/"))]
    #[actix_web::test]
    async fn anonymous_callers_are_unauthorized(#[case] request: test::TestRequest) {
        let seeded = seeded().await;
        let app = post_app!(seeded);
        let res = test::call_service(&app, request.to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn unknown_token_is_unauthorized() {
        let seeded = seeded().await;
        let app = post_app!(seeded);
        let req = test::TestRequest::get()
            .uri("/posts/")
            .insert_header(("Authorization", format!("Token {}", "0".repeat(40))))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn create_stamps_author_and_ignores_server_fields() {
        let seeded = seeded().await;
        let body = create_as_author(
            &seeded,
            json!({"text": "Hello", "author": "stranger", "pub_date": "1999-01-01T00:00:00Z"}),
        )
        .await;

        assert_eq!(body["text"], "Hello");
        assert_eq!(body["author"], "author");
        assert_eq!(body["group"], Value::Null);
        assert_eq!(body["pub_date"], "2026-03-14T09:26:53Z");
    }

    #[actix_web::test]
    async fn create_with_group_renders_title() {
        let seeded = seeded().await;
        let groups = GroupRepository::list(&seeded.store).await.expect("groups");

        let body = create_as_author(&seeded, json!({"text": "Meow", "group": groups[0].id.get()})).await;
        assert_eq!(body["group"], "Cats");
    }

    #[actix_web::test]
    async fn create_without_text_is_rejected_and_stores_nothing() {
        let seeded = seeded().await;
        let app = post_app!(seeded);
        let req = json_request(
            test::TestRequest::post().uri("/posts/"),
            Some(seeded.author()),
            json!({"group": null}),
        )
        .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(field_messages(&body, "text"), vec![REQUIRED]);
        assert!(PostRepository::list(&seeded.store).await.expect("posts").is_empty());
    }

    #[actix_web::test]
    async fn form_encoded_create_is_accepted() {
        let seeded = seeded().await;
        let app = post_app!(seeded);
        let req = test::TestRequest::post()
            .uri("/posts/")
            .insert_header(seeded.author())
            .set_form([("text", "From a form")])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["text"], "From a form");
    }

    #[actix_web::test]
    async fn stranger_cannot_change_or_delete() {
        let seeded = seeded().await;
        let created = create_as_author(&seeded, json!({"text": "Mine"})).await;
        let uri = format!("/posts/{}/", created["id"]);
        let app = post_app!(seeded);

        let patch = json_request(
            test::TestRequest::patch().uri(&uri),
            Some(seeded.stranger()),
            json!({"text": "Yours"}),
        )
        .to_request();
        assert_eq!(
            test::call_service(&app, patch).await.status(),
            StatusCode::FORBIDDEN
        );

        let delete = test::TestRequest::delete()
            .uri(&uri)
            .insert_header(seeded.stranger())
            .to_request();
        assert_eq!(
            test::call_service(&app, delete).await.status(),
            StatusCode::FORBIDDEN
        );

        let get = test::TestRequest::get()
            .uri(&uri)
            .insert_header(seeded.stranger())
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, get).await;
        assert_eq!(body["text"], "Mine");
    }

    #[actix_web::test]
    async fn author_replaces_then_deletes() {
        let seeded = seeded().await;
        let created = create_as_author(&seeded, json!({"text": "Draft"})).await;
        let uri = format!("/posts/{}/", created["id"]);
        let app = post_app!(seeded);

        let put = json_request(
            test::TestRequest::put().uri(&uri),
            Some(seeded.author()),
            json!({"text": "Final"}),
        )
        .to_request();
        let body: Value = test::call_and_read_body_json(&app, put).await;
        assert_eq!(body["text"], "Final");
        assert_eq!(body["pub_date"], created["pub_date"]);

        let delete = test::TestRequest::delete()
            .uri(&uri)
            .insert_header(seeded.author())
            .to_request();
        assert_eq!(
            test::call_service(&app, delete).await.status(),
            StatusCode::NO_CONTENT
        );

        let get = test::TestRequest::get()
            .uri(&uri)
            .insert_header(seeded.author())
            .to_request();
        assert_eq!(
            test::call_service(&app, get).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[rstest]
    #[case("/posts/abc/")]
    #[case("/posts/999/")]
    #[actix_web::test]
    async fn unknown_or_malformed_ids_are_not_found(#[case] uri: &str) {
        let seeded = seeded().await;
        let app = post_app!(seeded);
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(seeded.author())
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    fn malformed(request: test::TestRequest) -> test::TestRequest {
        request
            .insert_header((actix_web::http::header::CONTENT_TYPE, "application/json"))
            .set_payload("{nope")
    }

    #[actix_web::test]
    async fn anonymous_malformed_writes_are_unauthorized() {
        let seeded = seeded().await;
        let app = post_app!(seeded);

        let create = malformed(test::TestRequest::post().uri("/posts/")).to_request();
        assert_eq!(
            test::call_service(&app, create).await.status(),
            StatusCode::UNAUTHORIZED
        );

        let replace = malformed(test::TestRequest::put().uri("/posts/999/")).to_request();
        assert_eq!(
            test::call_service(&app, replace).await.status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[actix_web::test]
    async fn malformed_body_is_checked_after_ownership() {
        let seeded = seeded().await;
        let created = create_as_author(&seeded, json!({"text": "Mine"})).await;
        let uri = format!("/posts/{}/", created["id"]);
        let app = post_app!(seeded);

        let outsider = malformed(test::TestRequest::patch().uri(&uri))
            .insert_header(seeded.stranger())
            .to_request();
        assert_eq!(
            test::call_service(&app, outsider).await.status(),
            StatusCode::FORBIDDEN
        );

        let missing = malformed(test::TestRequest::patch().uri("/posts/999/"))
            .insert_header(seeded.author())
            .to_request();
        assert_eq!(
            test::call_service(&app, missing).await.status(),
            StatusCode::NOT_FOUND
        );

        let owner = malformed(test::TestRequest::patch().uri(&uri))
            .insert_header(seeded.author())
            .to_request();
        let res = test::call_service(&app, owner).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "invalid_request");
    }
}
