//! Token issuance.
//!
//! ```text
//! POST /api/v1/api-token-auth/ {"username":"alice","password":"wonderland"}
//! ```

use actix_web::{post, web};
use serde_json::Value;

use crate::domain::fields::{
    FieldErrors, NON_FIELD_ERRORS, NOT_BLANK, NOT_OBJECT, NOT_STRING, REQUIRED,
};
use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{TokenBody, TokenRequest};
use crate::inbound::http::payload::WritePayload;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

fn required_string<'a>(
    payload: &'a Value,
    field: &'static str,
    blank: impl Fn(&str) -> bool,
    errors: &mut FieldErrors,
) -> Option<&'a str> {
    match payload.get(field) {
        None | Some(Value::Null) => {
            errors.push(field, REQUIRED);
            None
        }
        Some(Value::String(raw)) if blank(raw) => {
            errors.push(field, NOT_BLANK);
            None
        }
        Some(Value::String(raw)) => Some(raw.as_str()),
        Some(_) => {
            errors.push(field, NOT_STRING);
            None
        }
    }
}

fn credentials_from(payload: &Value) -> Result<LoginCredentials, Error> {
    if !payload.is_object() {
        return Err(FieldErrors::single(NON_FIELD_ERRORS, NOT_OBJECT).into());
    }
    let mut errors = FieldErrors::default();
    let username = required_string(payload, "username", |raw| raw.trim().is_empty(), &mut errors);
    let password = required_string(payload, "password", str::is_empty, &mut errors);
    let (Some(username), Some(password)) = (username, password) else {
        return Err(errors.into());
    };
    LoginCredentials::try_from_parts(username, password).map_err(map_login_validation_error)
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    FieldErrors::single(err.field(), NOT_BLANK).into()
}

/// Exchange a username and password for the account's API token.
///
/// Repeated logins return the same token.
#[utoipa::path(
    post,
    path = "/api/v1/api-token-auth/",
    request_body(
        content = TokenRequest,
        content_type = "application/json",
        description = "Also accepted as application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "Token issued", body = TokenBody),
        (status = 400, description = "Missing fields or bad credentials", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "obtainToken",
    security([])
)]
#[post("/api-token-auth/")]
pub async fn obtain_token(
    state: web::Data<HttpState>,
    payload: WritePayload,
) -> ApiResult<web::Json<TokenBody>> {
    let credentials = credentials_from(payload.value()?)?;
    let token = state.identity.authenticate(&credentials).await?;
    Ok(web::Json(TokenBody::from(token)))
}
