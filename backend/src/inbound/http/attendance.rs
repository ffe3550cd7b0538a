//! Attendance HTTP handlers.
//!
//! ```text
//! GET  /api/v1/attendance
//! POST /api/v1/attendance
//! POST /api/v1/attendance/check-in
//! POST /api/v1/attendance/check-out
//! GET  /api/v1/attendance/summaries
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::records::StoredRecord;
use crate::domain::{
    AttendanceFilter, AttendanceMark, AttendanceRecord, AttendanceStatus, AttendanceSummary,
    CheckIn, CheckOut, Error, summarise_attendance,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::records::{EmployeeRefBody, resolve_owner};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_date, parse_label, parse_optional_date, parse_optional_employee_id,
    parse_optional_rfc3339_timestamp, require,
};

/// Check-in payload. `at` defaults to now.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
    pub employee_id: Option<String>,
    #[schema(example = "2026-05-11T08:52:00Z")]
    pub at: Option<String>,
    pub note: Option<String>,
}

/// Check-out payload. `at` defaults to now.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutRequest {
    pub employee_id: Option<String>,
    #[schema(example = "2026-05-11T17:05:00Z")]
    pub at: Option<String>,
}

/// Manual attendance entry.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceMarkRequest {
    pub employee_id: Option<String>,
    #[schema(example = "2026-05-11")]
    pub work_date: Option<String>,
    #[schema(example = "absent")]
    pub status: Option<String>,
    pub note: Option<String>,
}

/// Response payload for one attendance day.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceResponse {
    #[schema(example = "ATT-1767225600000")]
    pub id: String,
    #[serde(flatten)]
    pub employee: EmployeeRefBody,
    pub work_date: String,
    /// UTC wall-clock time, `HH:MM:SS`.
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub status: AttendanceStatus,
    pub note: Option<String>,
    #[schema(value_type = Option<String>)]
    pub worked_hours: Option<Decimal>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&AttendanceRecord> for AttendanceResponse {
    fn from(value: &AttendanceRecord) -> Self {
        Self {
            id: value.id().to_string(),
            employee: EmployeeRefBody::from(value.employee()),
            work_date: value.work_date().to_string(),
            check_in: value.check_in_time().map(|time| time.format("%H:%M:%S").to_string()),
            check_out: value.check_out_time().map(|time| time.format("%H:%M:%S").to_string()),
            status: value.status(),
            note: value.note().map(str::to_owned),
            worked_hours: value.worked_hours(),
            created_at: value.created_at().to_rfc3339(),
            updated_at: value.updated_at().to_rfc3339(),
        }
    }
}

/// Attendance totals for one employee.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummaryBody {
    #[serde(flatten)]
    pub employee: EmployeeRefBody,
    pub present_days: u32,
    pub late_days: u32,
    pub half_days: u32,
    pub absent_days: u32,
    pub leave_days: u32,
    #[schema(value_type = String)]
    pub worked_hours: Decimal,
}

impl From<AttendanceSummary> for AttendanceSummaryBody {
    fn from(value: AttendanceSummary) -> Self {
        Self {
            employee: EmployeeRefBody::from(&value.employee),
            present_days: value.present_days,
            late_days: value.late_days,
            half_days: value.half_days,
            absent_days: value.absent_days,
            leave_days: value.leave_days,
            worked_hours: value.worked_hours,
        }
    }
}

/// Query string for the attendance listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceListQuery {
    pub employee_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Query string for attendance summaries.
#[derive(Debug, Default, Deserialize)]
pub struct AttendanceRangeQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// List attendance days visible to the caller.
#[utoipa::path(
    get,
    path = "/api/v1/attendance",
    params(
        ("employeeId" = Option<String>, Query, description = "Only this employee"),
        ("from" = Option<String>, Query, description = "First work date, inclusive"),
        ("to" = Option<String>, Query, description = "Last work date, inclusive")
    ),
    responses(
        (status = 200, description = "Matching attendance days", body = [AttendanceResponse]),
        (status = 400, description = "Invalid filter", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["attendance"],
    operation_id = "listAttendance"
)]
#[get("/attendance")]
pub async fn list_attendance(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<AttendanceListQuery>,
) -> ApiResult<web::Json<Vec<AttendanceResponse>>> {
    let principal = session.require_principal()?;
    let query = query.into_inner();
    let requested = parse_optional_employee_id(query.employee_id, FieldName::new("employeeId"))?;
    let filter = AttendanceFilter {
        employee_id: if principal.role().can_review() {
            requested
        } else {
            Some(principal.employee_id().clone())
        },
        from: parse_optional_date(query.from, FieldName::new("from"))?,
        to: parse_optional_date(query.to, FieldName::new("to"))?,
    };
    let records = state.attendance_query.list(&filter).await?;
    Ok(web::Json(records.iter().map(AttendanceResponse::from).collect()))
}

/// Open today's attendance record.
#[utoipa::path(
    post,
    path = "/api/v1/attendance/check-in",
    request_body = CheckInRequest,
    responses(
        (status = 201, description = "Checked in", body = AttendanceResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Checking in another employee", body = ErrorSchema),
        (status = 409, description = "Already recorded for the day", body = ErrorSchema)
    ),
    tags = ["attendance"],
    operation_id = "checkIn"
)]
#[post("/attendance/check-in")]
pub async fn check_in(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CheckInRequest>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let payload = payload.into_inner();
    let at = parse_optional_rfc3339_timestamp(payload.at, FieldName::new("at"))?
        .unwrap_or_else(|| state.clock.utc());
    let employee = resolve_owner(state.employees.as_ref(), &principal, payload.employee_id).await?;

    let record = state
        .attendance
        .check_in(CheckIn {
            employee,
            at,
            note: payload.note,
        })
        .await?;
    Ok(HttpResponse::Created().json(AttendanceResponse::from(&record)))
}

/// Close the day's attendance record.
#[utoipa::path(
    post,
    path = "/api/v1/attendance/check-out",
    request_body = CheckOutRequest,
    responses(
        (status = 200, description = "Checked out", body = AttendanceResponse),
        (status = 400, description = "Check-out before check-in", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Checking out another employee", body = ErrorSchema),
        (status = 404, description = "No check-in for the day", body = ErrorSchema),
        (status = 409, description = "Already checked out", body = ErrorSchema)
    ),
    tags = ["attendance"],
    operation_id = "checkOut"
)]
#[post("/attendance/check-out")]
pub async fn check_out(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CheckOutRequest>,
) -> ApiResult<web::Json<AttendanceResponse>> {
    let principal = session.require_principal()?;
    let payload = payload.into_inner();
    let employee_id = parse_optional_employee_id(payload.employee_id, FieldName::new("employeeId"))?
        .unwrap_or_else(|| principal.employee_id().clone());
    if !principal.can_access(&employee_id) {
        return Err(Error::forbidden("records of other employees are not accessible"));
    }
    let at = parse_optional_rfc3339_timestamp(payload.at, FieldName::new("at"))?
        .unwrap_or_else(|| state.clock.utc());

    let record = state
        .attendance
        .check_out(CheckOut { employee_id, at })
        .await?;
    Ok(web::Json(AttendanceResponse::from(&record)))
}

/// Record an absence or leave day by hand.
#[utoipa::path(
    post,
    path = "/api/v1/attendance",
    request_body = AttendanceMarkRequest,
    responses(
        (status = 201, description = "Day recorded", body = AttendanceResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Manager role required", body = ErrorSchema),
        (status = 409, description = "Already recorded for the day", body = ErrorSchema)
    ),
    tags = ["attendance"],
    operation_id = "markAttendance"
)]
#[post("/attendance")]
pub async fn mark_attendance(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AttendanceMarkRequest>,
) -> ApiResult<HttpResponse> {
    let reviewer = session.require_reviewer()?;
    let payload = payload.into_inner();
    let employee_id = require(payload.employee_id, FieldName::new("employeeId"))?;
    let work_date = parse_date(
        require(payload.work_date, FieldName::new("workDate"))?,
        FieldName::new("workDate"),
    )?;
    let status: AttendanceStatus = parse_label(
        require(payload.status, FieldName::new("status"))?,
        FieldName::new("status"),
    )?;
    let employee = resolve_owner(state.employees.as_ref(), &reviewer, Some(employee_id)).await?;

    let record = state
        .attendance
        .mark(AttendanceMark {
            employee,
            work_date,
            status,
            note: payload.note,
        })
        .await?;
    Ok(HttpResponse::Created().json(AttendanceResponse::from(&record)))
}

/// Per-employee attendance totals over a date range.
#[utoipa::path(
    get,
    path = "/api/v1/attendance/summaries",
    params(
        ("from" = Option<String>, Query, description = "First date, inclusive; defaults to the start of the month"),
        ("to" = Option<String>, Query, description = "Last date, inclusive; defaults to today")
    ),
    responses(
        (status = 200, description = "Attendance summaries in first-seen order", body = [AttendanceSummaryBody]),
        (status = 400, description = "Invalid range", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["attendance"],
    operation_id = "summariseAttendance"
)]
#[get("/attendance/summaries")]
pub async fn attendance_summaries(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<AttendanceRangeQuery>,
) -> ApiResult<web::Json<Vec<AttendanceSummaryBody>>> {
    let principal = session.require_principal()?;
    let query = query.into_inner();
    let today = state.clock.utc().date_naive();
    let to = parse_optional_date(query.to, FieldName::new("to"))?.unwrap_or(today);
    let from = parse_optional_date(query.from, FieldName::new("from"))?
        .unwrap_or_else(|| month_start(to));
    let filter = AttendanceFilter {
        employee_id: (!principal.role().can_review()).then(|| principal.employee_id().clone()),
        from: Some(from),
        to: Some(to),
    };
    let records = state.attendance_query.list(&filter).await?;

    Ok(web::Json(
        summarise_attendance(&records, from, to)
            .into_iter()
            .map(AttendanceSummaryBody::from)
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_start_snaps_to_the_first() {
        let date = NaiveDate::from_ymd_opt(2026, 5, 19).expect("valid date");
        assert_eq!(
            month_start(date),
            NaiveDate::from_ymd_opt(2026, 5, 1).expect("valid date")
        );
    }
}
