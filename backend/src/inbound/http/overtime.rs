//! Overtime claim HTTP handlers.
//!
//! Overtime is kept for audit, so there is no delete endpoint.

use actix_web::{HttpResponse, post, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{OvertimeDraft, OvertimeKind, OvertimeRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::records::{DecisionRequest, RecordHeader, record_endpoints, resolve_owner};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_date, parse_label, require};

/// Request payload for a new overtime claim.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeSubmission {
    pub employee_id: Option<String>,
    #[schema(example = "2026-04-18")]
    pub work_date: Option<String>,
    #[schema(value_type = Option<String>, example = "3.5")]
    pub hours: Option<Decimal>,
    #[schema(example = "weekend")]
    pub kind: Option<String>,
    pub reason: Option<String>,
}

/// Response payload for an overtime claim.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeResponse {
    #[serde(flatten)]
    pub record: RecordHeader,
    pub work_date: String,
    #[schema(value_type = String)]
    pub hours: Decimal,
    pub kind: OvertimeKind,
    pub reason: String,
}

impl From<&OvertimeRequest> for OvertimeResponse {
    fn from(value: &OvertimeRequest) -> Self {
        Self {
            record: RecordHeader::of(value),
            work_date: value.work_date().to_string(),
            hours: value.hours(),
            kind: value.kind(),
            reason: value.reason().to_owned(),
        }
    }
}

/// Claim overtime hours.
#[utoipa::path(
    post,
    path = "/api/v1/overtime",
    request_body = OvertimeSubmission,
    responses(
        (status = 201, description = "Overtime claimed", body = OvertimeResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Submitting for another employee", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["overtime"],
    operation_id = "submitOvertime"
)]
#[post("/overtime")]
pub async fn submit_overtime(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<OvertimeSubmission>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let payload = payload.into_inner();
    let work_date = parse_date(
        require(payload.work_date, FieldName::new("workDate"))?,
        FieldName::new("workDate"),
    )?;
    let hours = require(payload.hours, FieldName::new("hours"))?;
    let kind: OvertimeKind = parse_label(
        require(payload.kind, FieldName::new("kind"))?,
        FieldName::new("kind"),
    )?;
    let reason = require(payload.reason, FieldName::new("reason"))?;
    let employee = resolve_owner(state.employees.as_ref(), &principal, payload.employee_id).await?;

    let claim = state
        .overtime
        .command
        .submit(OvertimeDraft {
            employee,
            work_date,
            hours,
            kind,
            reason,
        })
        .await?;
    Ok(HttpResponse::Created().json(OvertimeResponse::from(&claim)))
}

record_endpoints! {
    ports: overtime,
    response: OvertimeResponse,
    tag: "overtime",
    list: list_overtime("/overtime", "/api/v1/overtime", "listOvertime"),
    get: get_overtime("/overtime/{id}", "/api/v1/overtime/{id}", "getOvertime"),
    decide: decide_overtime(
        "/overtime/{id}/decision",
        "/api/v1/overtime/{id}/decision",
        "decideOvertime"
    ),
}
