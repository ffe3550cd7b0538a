//! OpenAPI schema definitions for domain types.
//!
//! The domain error keeps its own serde representation and does not derive
//! `ToSchema`. This module registers matching schema wrappers so the error
//! payload appears in the OpenAPI document.

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
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The record's current state does not allow the action.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing store is offline.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "amount must be greater than zero")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(rename = "traceId", example = "6f1d0c52-8f0e-4b8e-9a57-6a8d7c1f2e3b")]
    trace_id: Option<String>,
    /// Validation details such as `{ "field": "amount", "code": "invalid_value" }`.
    details: Option<serde_json::Value>,
}
