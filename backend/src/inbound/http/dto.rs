//! Wire representations of groups, posts, comments and tokens.
//!
//! Keys follow the resource field tables in `domain::fields`; a test keeps
//! the two in step.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AuthToken, Comment, Group, Post};

fn timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Group as rendered to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GroupBody {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Cats")]
    pub title: String,
    #[schema(example = "cats")]
    pub slug: String,
    pub description: String,
}

impl From<Group> for GroupBody {
    fn from(group: Group) -> Self {
        Self {
            id: group.id.get(),
            title: group.title,
            slug: group.slug,
            description: group.description,
        }
    }
}

/// Post as rendered to clients. `author` is the username and `group` the
/// group title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PostBody {
    #[schema(example = 1)]
    pub id: i64,
    pub text: String,
    #[schema(example = "alice")]
    pub author: String,
    #[schema(example = "Cats")]
    pub group: Option<String>,
    #[schema(example = "2026-03-14T09:26:53Z")]
    pub pub_date: String,
}

impl From<Post> for PostBody {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.get(),
            text: post.text,
            author: post.author.username().to_string(),
            group: post.group.map(|group| group.title),
            pub_date: timestamp(&post.pub_date),
        }
    }
}

/// Comment as rendered to clients. `post` is the parent post id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CommentBody {
    #[schema(example = 1)]
    pub id: i64,
    pub text: String,
    #[schema(example = "alice")]
    pub author: String,
    #[schema(example = 1)]
    pub post: i64,
    #[schema(example = "2026-03-14T09:26:53Z")]
    pub created: String,
}

impl From<Comment> for CommentBody {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.get(),
            text: comment.text,
            author: comment.author.username().to_string(),
            post: comment.post.get(),
            created: timestamp(&comment.created),
        }
    }
}

/// Documented shape of a post write. Bodies are screened against the field
/// table rather than deserialized into this type.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostRequest {
    #[schema(example = "Hello, world")]
    pub text: String,
    #[schema(example = 1)]
    pub group: Option<i64>,
}

/// Documented shape of a comment write.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentRequest {
    #[schema(example = "Nice post")]
    pub text: String,
}

/// Login request body for `POST /api/v1/api-token-auth/`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenRequest {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "wonderland")]
    pub password: String,
}

/// Token issued on successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TokenBody {
    #[schema(example = "9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b")]
    pub token: String,
}

impl From<AuthToken> for TokenBody {
    fn from(token: AuthToken) -> Self {
        Self {
            token: token.as_str().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fields::schema_for;
    use crate::domain::test_fixtures::{comment, post};
    use crate::domain::{GroupId, ResourceKind};
    use rstest::rstest;
    use serde_json::{Value, json};

    fn keys(value: &Value) -> Vec<String> {
        let mut keys: Vec<String> = value
            .as_object()
            .expect("object body")
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    fn table_keys(kind: ResourceKind) -> Vec<String> {
        let mut keys: Vec<String> = schema_for(kind)
            .iter()
            .map(|spec| spec.name.to_owned())
            .collect();
        keys.sort();
        keys
    }

    #[rstest]
    fn rendered_keys_match_field_tables() {
        let group = serde_json::to_value(GroupBody::from(Group {
            id: GroupId::new(1),
            title: "Cats".to_owned(),
            slug: "cats".to_owned(),
            description: String::new(),
        }))
        .expect("serialize group");
        let post = serde_json::to_value(PostBody::from(post(1, None))).expect("serialize post");
        let comment =
            serde_json::to_value(CommentBody::from(comment(2, 1))).expect("serialize comment");

        assert_eq!(keys(&group), table_keys(ResourceKind::Group));
        assert_eq!(keys(&post), table_keys(ResourceKind::Post));
        assert_eq!(keys(&comment), table_keys(ResourceKind::Comment));
    }

    #[rstest]
    fn post_renders_author_username_and_group_title() {
        let body = serde_json::to_value(PostBody::from(post(3, Some((2, "Cats")))))
            .expect("serialize post");

        assert_eq!(
            body,
            json!({
                "id": 3,
                "text": "Original text",
                "author": "author",
                "group": "Cats",
                "pub_date": "2026-03-14T09:26:53Z",
            })
        );
    }

    #[rstest]
    fn ungrouped_post_renders_null_group() {
        let body = serde_json::to_value(PostBody::from(post(3, None))).expect("serialize post");
        assert_eq!(body["group"], Value::Null);
    }

    #[rstest]
    fn comment_renders_parent_id() {
        let body = serde_json::to_value(CommentBody::from(comment(2, 9))).expect("serialize");
        assert_eq!(body["post"], json!(9));
        assert_eq!(body["author"], json!("author"));
    }
}
