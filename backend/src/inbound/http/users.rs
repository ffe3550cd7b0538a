//! Session endpoints.
//!
//! ```text
//! POST /api/v1/login {"username":"manager","password":"manager"}
//! POST /api/v1/logout
//! GET  /api/v1/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, LoginValidationError, Principal, Role};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "manager")]
    pub username: String,
    #[schema(example = "manager")]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// The signed-in account.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalResponse {
    pub username: String,
    pub role: Role,
    #[schema(example = "EMP-0002")]
    pub employee_id: String,
}

impl From<&Principal> for PrincipalResponse {
    fn from(value: &Principal) -> Self {
        Self {
            username: value.username().to_owned(),
            role: value.role(),
            employee_id: value.employee_id().to_string(),
        }
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = PrincipalResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["session"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<PrincipalResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let principal = state.login.authenticate(&credentials).await?;
    session.persist_principal(&principal)?;
    info!(username = principal.username(), role = %principal.role(), "signed in");
    Ok(web::Json(PrincipalResponse::from(&principal)))
}

/// End the session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Session cleared")
    ),
    tags = ["session"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// Return the signed-in account.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Current principal", body = PrincipalResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["session"],
    operation_id = "currentPrincipal"
)]
#[get("/me")]
pub async fn current_principal(session: SessionContext) -> ApiResult<web::Json<PrincipalResponse>> {
    let principal = session.require_principal()?;
    Ok(web::Json(PrincipalResponse::from(&principal)))
}
