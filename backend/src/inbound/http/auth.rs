//! Caller resolution for HTTP handlers.
//!
//! The `Authorization` header is read as `Token <key>` (or `Bearer <key>`)
//! and resolved through the [`IdentityProvider`] port. A missing, malformed
//! or unknown token yields an anonymous caller; the policy decides later
//! whether that is acceptable.

use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::ports::IdentityProvider;
use crate::domain::{AuthToken, Caller, Error};
use crate::inbound::http::state::HttpState;

const SCHEMES: [&str; 2] = ["Token", "Bearer"];

/// Extract a well-formed token from the request headers.
///
/// # Examples
/// ```
/// use actix_web::http::header::{AUTHORIZATION, HeaderMap, HeaderValue};
/// use yatube_api::inbound::http::auth::presented_token;
///
/// let mut headers = HeaderMap::new();
/// headers.insert(
///     AUTHORIZATION,
///     HeaderValue::from_static("Token 0123456789abcdef0123456789abcdef01234567"),
/// );
/// assert!(presented_token(&headers).is_some());
/// ```
#[must_use]
pub fn presented_token(headers: &HeaderMap) -> Option<AuthToken> {
    let raw = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = raw.split_whitespace();
    let scheme = parts.next()?;
    let key = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    if !SCHEMES
        .iter()
        .any(|known| known.eq_ignore_ascii_case(scheme))
    {
        return None;
    }
    AuthToken::parse(key)
}

/// Resolve the caller behind a set of request headers.
pub async fn resolve_caller(
    identity: &dyn IdentityProvider,
    headers: &HeaderMap,
) -> Result<Caller, Error> {
    let Some(token) = presented_token(headers) else {
        if headers.contains_key(AUTHORIZATION) {
            debug!("ignoring malformed authorization header");
        }
        return Ok(Caller::Anonymous);
    };
    Ok(Caller::from(identity.resolve(&token).await?))
}

/// Extractor wrapping the resolved [`Caller`].
#[derive(Debug, Clone)]
pub struct CallerContext(pub Caller);

impl CallerContext {
    /// Borrow the resolved caller.
    #[must_use]
    pub fn caller(&self) -> &Caller {
        &self.0
    }
}

impl FromRequest for CallerContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let headers = req.headers().clone();
        Box::pin(async move {
            let Some(state) = state else {
                return Err(Error::internal("HTTP state is not configured").into());
            };
            let caller = resolve_caller(state.identity.as_ref(), &headers).await?;
            Ok(Self(caller))
        })
    }
}
