//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler in the inbound layer, the wire bodies
//! from `inbound::http::dto` and the error schemas, which stand in for
//! domain types that do not derive `ToSchema`. Clients authenticate with
//! the `token` scheme: an `Authorization: Token <key>` header.

use crate::inbound::http::dto::{
    CommentBody, CommentRequest, GroupBody, PostBody, PostRequest, TokenBody, TokenRequest,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the security scheme every protected operation requires.
pub const TOKEN_SCHEME: &str = "token";

/// Enrich the generated document with the token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            TOKEN_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "Authorization",
                "`Token <key>` where the key comes from POST /api/v1/api-token-auth/.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Yatube API",
        description = "Token-authenticated blog API: read-only groups, posts and nested comments.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("token" = [])),
    paths(
        crate::inbound::http::tokens::obtain_token,
        crate::inbound::http::groups::list_groups,
        crate::inbound::http::groups::get_group,
        crate::inbound::http::groups::write_groups,
        crate::inbound::http::groups::write_group,
        crate::inbound::http::posts::list_posts,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::get_post,
        crate::inbound::http::posts::replace_post,
        crate::inbound::http::posts::patch_post,
        crate::inbound::http::posts::delete_post,
        crate::inbound::http::comments::list_comments,
        crate::inbound::http::comments::create_comment,
        crate::inbound::http::comments::get_comment,
        crate::inbound::http::comments::replace_comment,
        crate::inbound::http::comments::patch_comment,
        crate::inbound::http::comments::delete_comment,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        GroupBody,
        PostBody,
        PostRequest,
        CommentBody,
        CommentRequest,
        TokenBody,
        TokenRequest,
    )),
    tags(
        (name = "auth", description = "Token issuance"),
        (name = "groups", description = "Read-only communities"),
        (name = "posts", description = "Posts owned by their author"),
        (name = "comments", description = "Comments nested under a post"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    fn error_schema_uses_camel_case_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[rstest]
    #[case("/api/v1/api-token-auth/")]
    #[case("/api/v1/groups/")]
    #[case("/api/v1/groups/{id}/")]
    #[case("/api/v1/posts/")]
    #[case("/api/v1/posts/{id}/")]
    #[case("/api/v1/posts/{post_id}/comments/")]
    #[case("/api/v1/posts/{post_id}/comments/{id}/")]
    #[case("/health/ready")]
    fn every_resource_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "{path} missing");
    }

    #[rstest]
    fn token_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(TOKEN_SCHEME));
    }

    #[rstest]
    fn post_body_is_registered() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        assert_object_schema_has_field(schemas.get("PostBody").expect("PostBody"), "pub_date");
    }
}
