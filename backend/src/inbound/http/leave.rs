//! Leave request HTTP handlers.

use actix_web::{HttpResponse, get, post, web};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, LeaveBalance, LeaveDraft, LeaveRequest, LeaveType, RecordFilter, leave_balances,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::records::{DecisionRequest, RecordHeader, record_endpoints, resolve_owner};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_date, parse_employee_id, parse_label, require,
};

/// Request payload for a new leave request.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveSubmission {
    pub employee_id: Option<String>,
    #[schema(example = "annual")]
    pub leave_type: Option<String>,
    #[schema(example = "2026-08-03")]
    pub start_date: Option<String>,
    #[schema(example = "2026-08-14")]
    pub end_date: Option<String>,
    pub reason: Option<String>,
}

/// Response payload for a leave request.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveResponse {
    #[serde(flatten)]
    pub record: RecordHeader,
    pub leave_type: LeaveType,
    pub start_date: String,
    pub end_date: String,
    /// Inclusive calendar days.
    pub days: u32,
    pub reason: String,
}

impl From<&LeaveRequest> for LeaveResponse {
    fn from(value: &LeaveRequest) -> Self {
        Self {
            record: RecordHeader::of(value),
            leave_type: value.leave_type(),
            start_date: value.start_date().to_string(),
            end_date: value.end_date().to_string(),
            days: value.days(),
            reason: value.reason().to_owned(),
        }
    }
}

/// Remaining entitlement for one leave type.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveBalanceBody {
    pub leave_type: LeaveType,
    /// Absent for uncapped leave types.
    pub entitlement: Option<u32>,
    pub used: u32,
    pub pending: u32,
    pub remaining: Option<u32>,
}

impl From<LeaveBalance> for LeaveBalanceBody {
    fn from(value: LeaveBalance) -> Self {
        Self {
            leave_type: value.leave_type,
            entitlement: value.entitlement,
            used: value.used,
            pending: value.pending,
            remaining: value.remaining,
        }
    }
}

/// Query string for leave balances.
#[derive(Debug, Deserialize)]
pub struct LeaveBalanceQuery {
    pub year: Option<i32>,
}

/// Request leave.
#[utoipa::path(
    post,
    path = "/api/v1/leave",
    request_body = LeaveSubmission,
    responses(
        (status = 201, description = "Leave requested", body = LeaveResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Submitting for another employee", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["leave"],
    operation_id = "submitLeave"
)]
#[post("/leave")]
pub async fn submit_leave(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LeaveSubmission>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let payload = payload.into_inner();
    let leave_type: LeaveType = parse_label(
        require(payload.leave_type, FieldName::new("leaveType"))?,
        FieldName::new("leaveType"),
    )?;
    let start_date = parse_date(
        require(payload.start_date, FieldName::new("startDate"))?,
        FieldName::new("startDate"),
    )?;
    let end_date = parse_date(
        require(payload.end_date, FieldName::new("endDate"))?,
        FieldName::new("endDate"),
    )?;
    let reason = require(payload.reason, FieldName::new("reason"))?;
    let employee = resolve_owner(state.employees.as_ref(), &principal, payload.employee_id).await?;

    let request = state
        .leave
        .command
        .submit(LeaveDraft {
            employee,
            leave_type,
            start_date,
            end_date,
            reason,
        })
        .await?;
    Ok(HttpResponse::Created().json(LeaveResponse::from(&request)))
}

/// Leave balances for one employee and calendar year.
#[utoipa::path(
    get,
    path = "/api/v1/leave/balances/{employeeId}",
    params(
        ("employeeId" = String, Path, description = "Employee identifier"),
        ("year" = Option<i32>, Query, description = "Calendar year; defaults to the current year")
    ),
    responses(
        (status = 200, description = "One balance per leave type", body = [LeaveBalanceBody]),
        (status = 400, description = "Malformed employee id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Balances of another employee", body = ErrorSchema)
    ),
    tags = ["leave"],
    operation_id = "leaveBalances"
)]
#[get("/leave/balances/{employeeId}")]
pub async fn balances(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    query: web::Query<LeaveBalanceQuery>,
) -> ApiResult<web::Json<Vec<LeaveBalanceBody>>> {
    let principal = session.require_principal()?;
    let employee_id = parse_employee_id(path.into_inner(), FieldName::new("employeeId"))?;
    if !principal.can_access(&employee_id) {
        return Err(Error::forbidden("records of other employees are not accessible"));
    }
    let year = query
        .into_inner()
        .year
        .unwrap_or_else(|| state.clock.utc().year());
    let requests = state
        .leave
        .query
        .list(&RecordFilter::for_employee(employee_id.clone()))
        .await?;

    Ok(web::Json(
        leave_balances(&requests, &employee_id, year)
            .into_iter()
            .map(LeaveBalanceBody::from)
            .collect(),
    ))
}

record_endpoints! {
    ports: leave,
    response: LeaveResponse,
    tag: "leave",
    list: list_leave("/leave", "/api/v1/leave", "listLeave"),
    get: get_leave("/leave/{id}", "/api/v1/leave/{id}", "getLeave"),
    decide: decide_leave(
        "/leave/{id}/decision",
        "/api/v1/leave/{id}/decision",
        "decideLeave"
    ),
    delete: delete_leave("/leave/{id}", "/api/v1/leave/{id}", "deleteLeave"),
}
