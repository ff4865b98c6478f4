//! Write payload extraction.
//!
//! Handlers receive the request body as an untyped JSON value so the field
//! table in `domain::fields` can screen it. JSON and form-encoded bodies are
//! both accepted; form values arrive as strings.

use actix_web::http::header::CONTENT_TYPE;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::domain::{Error, WriteBody};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Request body as a JSON value, or the reason it could not be decoded.
///
/// Extraction never fails: a malformed body is reported by the domain once
/// the caller has passed the policy.
#[derive(Debug, Clone, PartialEq)]
pub struct WritePayload(pub WriteBody);

impl WritePayload {
    /// Borrow the decoded body as handed to the domain services.
    #[must_use]
    pub fn body(&self) -> &WriteBody {
        &self.0
    }

    /// Borrow the payload, surfacing a decode failure.
    ///
    /// # Errors
    /// Returns the `invalid_request` error recorded during extraction.
    pub fn value(&self) -> Result<&Value, Error> {
        self.0.as_ref().map_err(Clone::clone)
    }
}

fn is_form(req: &HttpRequest) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim_start().starts_with(FORM_CONTENT_TYPE))
}

fn malformed(kind: &str, detail: impl std::fmt::Display) -> Error {
    debug!(%detail, kind, "rejecting malformed request body");
    Error::invalid_request(format!("Malformed {kind} request body."))
        .with_details(json!({ "parse": detail.to_string() }))
}

/// Decode a JSON body. An empty body is an empty object.
pub(crate) fn decode_json(body: &[u8]) -> Result<Value, Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body).map_err(|err| malformed("JSON", err))
}

fn form_to_value(pairs: Vec<(String, String)>) -> Value {
    let object = pairs
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect::<Map<_, _>>();
    Value::Object(object)
}

impl FromRequest for WritePayload {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        if is_form(req) {
            let fut = web::Form::<Vec<(String, String)>>::from_request(req, payload);
            return Box::pin(async move {
                let body = fut
                    .await
                    .map(|form| form_to_value(form.into_inner()))
                    .map_err(|err| malformed("form", err));
                Ok(Self(body))
            });
        }
        let fut = web::Bytes::from_request(req, payload);
        Box::pin(async move {
            let body = fut
                .await
                .map_err(|err| malformed("JSON", err))
                .and_then(|bytes| decode_json(&bytes));
            Ok(Self(body))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use actix_web::test as actix_test;
    use actix_web::{App, HttpResponse, http::StatusCode};
    use rstest::rstest;

    #[rstest]
    #[case(b"".as_slice(), json!({}))]
    #[case(b"  \n".as_slice(), json!({}))]
    #[case(br#"{"text":"hi"}"#.as_slice(), json!({"text": "hi"}))]
    #[case(b"[1,2]".as_slice(), json!([1, 2]))]
    fn decodes_json_bodies(#[case] body: &[u8], #[case] expected: Value) {
        assert_eq!(decode_json(body).expect("decodes"), expected);
    }

    #[rstest]
    fn malformed_json_is_invalid_request() {
        let error = decode_json(b"{\"text\":").expect_err("malformed");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    async fn echo(payload: WritePayload) -> HttpResponse {
        match payload.value() {
            Ok(value) => HttpResponse::Ok().json(value),
            Err(error) => HttpResponse::UnprocessableEntity().json(error.code()),
        }
    }

    #[actix_web::test]
    async fn form_bodies_become_string_members() {
        let app =
            actix_test::init_service(App::new().route("/", web::post().to(echo))).await;
        let req = actix_test::TestRequest::post()
            .uri("/")
            .insert_header((CONTENT_TYPE, FORM_CONTENT_TYPE))
            .set_payload("text=Hello+there&group=")
            .to_request();

        let body: Value = actix_test::call_and_read_body_json(&app, req).await;

        assert_eq!(body, json!({"text": "Hello there", "group": ""}));
    }

    #[actix_web::test]
    async fn malformed_json_is_carried_to_the_handler() {
        let app =
            actix_test::init_service(App::new().route("/", web::post().to(echo))).await;
        let req = actix_test::TestRequest::post()
            .uri("/")
            .insert_header((CONTENT_TYPE, "application/json"))
            .set_payload("{nope")
            .to_request();

        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let code: Value = actix_test::read_body_json(res).await;
        assert_eq!(code, json!("invalid_request"));
    }
}
