//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::http::header::{AUTHORIZATION, HeaderName};
use actix_web::{test::TestRequest, web};

use crate::domain::ports::IdentityProvider;
use crate::domain::test_fixtures::fixture_clock;
use crate::domain::{LoginCredentials, SeedData, SeedService};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::MemoryStore;
use crate::server::in_memory_http_state;

pub const PASSWORD: &str = "wonderland";

/// In-memory world with two accounts and one group.
pub struct Seeded {
    pub state: web::Data<HttpState>,
    pub store: MemoryStore,
    pub author_token: String,
    pub stranger_token: String,
}

impl Seeded {
    /// `Authorization` header value for the author.
    pub fn author(&self) -> (HeaderName, String) {
        (AUTHORIZATION, format!("Token {}", self.author_token))
    }

    /// `Authorization` header value for the other account.
    pub fn stranger(&self) -> (HeaderName, String) {
        (AUTHORIZATION, format!("Token {}", self.stranger_token))
    }
}

async fn token_for(state: &HttpState, username: &str) -> String {
    let credentials =
        LoginCredentials::try_from_parts(username, PASSWORD).expect("valid credentials");
    state
        .identity
        .authenticate(&credentials)
        .await
        .expect("seeded account authenticates")
        .as_str()
        .to_owned()
}

/// Build state over a fresh store holding `author`, `stranger` and the
/// `cats` group, with the fixture clock.
pub async fn seeded() -> Seeded {
    let store = MemoryStore::new();
    let seed = SeedData::from_json(&format!(
        r#"{{
            "users": [
                {{"username": "author", "password": "{PASSWORD}"}},
                {{"username": "stranger", "password": "{PASSWORD}"}}
            ],
            "groups": [{{"title": "Cats", "slug": "cats", "description": "All about cats"}}]
        }}"#
    ))
    .expect("valid seed");
    SeedService::new(Arc::new(store.clone()), Arc::new(store.clone()))
        .apply(&seed)
        .await
        .expect("seed applies");
    let state = in_memory_http_state(store.clone(), fixture_clock());
    let author_token = token_for(&state, "author").await;
    let stranger_token = token_for(&state, "stranger").await;
    Seeded {
        state: web::Data::new(state),
        store,
        author_token,
        stranger_token,
    }
}

/// JSON request builder with an optional `Authorization` header.
pub fn json_request(
    request: TestRequest,
    auth: Option<(HeaderName, String)>,
    body: serde_json::Value,
) -> TestRequest {
    let request = request.set_json(body);
    match auth {
        Some(header) => request.insert_header(header),
        None => request,
    }
}

/// Messages reported for `field` in a validation error body.
pub fn field_messages(body: &serde_json::Value, field: &str) -> Vec<String> {
    body["details"]["fields"][field]
        .as_array()
        .map(|messages| {
            messages
                .iter()
                .filter_map(|message| message.as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default()
}
