//! HTTP adapter mapping for domain errors.
//!
//! Domain failures become JSON bodies with a status derived from the error
//! code. Malformed JSON bodies and query strings are routed through the same
//! payload so clients never see Actix's plain-text extractor errors.

use actix_web::http::header::{self, HeaderValue};
use actix_web::{HttpRequest, HttpResponse, ResponseError, error, http::StatusCode, web};
use serde_json::json;
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Seconds a client should wait before retrying while a store is offline.
pub const STORE_RETRY_AFTER_SECS: u32 = 5;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Internal errors keep their trace id but lose message and details.
fn client_payload(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }
    let redacted = Error::internal("Internal server error");
    match error.trace_id() {
        Some(id) => redacted.with_trace_id(id.to_owned()),
        None => redacted,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            warn!(code = ?self.code(), message = self.message(), "request failed");
        }

        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        if self.code() == ErrorCode::ServiceUnavailable {
            builder.insert_header((header::RETRY_AFTER, HeaderValue::from(STORE_RETRY_AFTER_SECS)));
        }
        builder.json(client_payload(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Self::internal("Internal server error")
    }
}

fn malformed(kind: &'static str, reason: String) -> Error {
    Error::invalid_request(format!("malformed {kind}: {reason}"))
        .with_details(json!({ "code": format!("malformed_{kind}") }))
}

fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    malformed("body", err.to_string()).into()
}

fn query_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    malformed("query", err.to_string()).into()
}

/// JSON extractor settings that answer malformed bodies with an
/// `invalid_request` payload.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error)
}

/// Query extractor settings that answer malformed query strings with an
/// `invalid_request` payload.
#[must_use]
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error)
}

#[cfg(test)]
mod tests;
