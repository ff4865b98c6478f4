//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No valid token was presented.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not the author of the resource.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource or its parent does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The resource is read-only.
    #[schema(rename = "method_not_allowed")]
    MethodNotAllowed,
    /// The request conflicts with stored state.
    #[schema(rename = "conflict")]
    Conflict,
    /// Storage is temporarily unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// Field validation failures carry `details.fields`, a map from field name
/// to messages.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "request payload failed validation")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "6f2c1a7e-0d4b-4c55-9a3e-2f1b0c9d8e7a")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    #[schema(example = json!({"fields": {"text": ["This field is required."]}}))]
    details: Option<serde_json::Value>,
}
