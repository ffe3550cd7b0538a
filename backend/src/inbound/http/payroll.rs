//! Payroll preview HTTP handler.

use actix_web::{get, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{PayrollLine, PayrollPeriod, PayrollPreview};
use crate::inbound::http::ApiResult;
use crate::inbound::http::records::EmployeeRefBody;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_period};

/// One employee's payroll line.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayrollLineBody {
    #[serde(flatten)]
    pub employee: EmployeeRefBody,
    #[schema(value_type = String)]
    pub base_salary: Decimal,
    #[schema(value_type = String)]
    pub overtime_hours: Decimal,
    #[schema(value_type = String)]
    pub overtime_pay: Decimal,
    #[schema(value_type = String)]
    pub reimbursements: Decimal,
    #[schema(value_type = String)]
    pub advance_deduction: Decimal,
    pub unpaid_leave_days: u32,
    #[schema(value_type = String)]
    pub unpaid_leave_deduction: Decimal,
    #[schema(value_type = String)]
    pub gross: Decimal,
    #[schema(value_type = String)]
    pub deductions: Decimal,
    #[schema(value_type = String)]
    pub net: Decimal,
}

impl From<&PayrollLine> for PayrollLineBody {
    fn from(value: &PayrollLine) -> Self {
        Self {
            employee: EmployeeRefBody::from(&value.employee),
            base_salary: value.base_salary,
            overtime_hours: value.overtime_hours,
            overtime_pay: value.overtime_pay,
            reimbursements: value.reimbursements,
            advance_deduction: value.advance_deduction,
            unpaid_leave_days: value.unpaid_leave_days,
            unpaid_leave_deduction: value.unpaid_leave_deduction,
            gross: value.gross,
            deductions: value.deductions,
            net: value.net,
        }
    }
}

/// Period totals.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayrollTotalsBody {
    pub employees: usize,
    #[schema(value_type = String)]
    pub gross: Decimal,
    #[schema(value_type = String)]
    pub deductions: Decimal,
    #[schema(value_type = String)]
    pub net: Decimal,
}

/// Payroll preview for one month.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayrollPreviewResponse {
    #[schema(example = "2026-05")]
    pub period: String,
    pub lines: Vec<PayrollLineBody>,
    pub totals: PayrollTotalsBody,
}

impl From<&PayrollPreview> for PayrollPreviewResponse {
    fn from(value: &PayrollPreview) -> Self {
        Self {
            period: value.period.to_string(),
            lines: value.lines.iter().map(PayrollLineBody::from).collect(),
            totals: PayrollTotalsBody {
                employees: value.totals.employees,
                gross: value.totals.gross,
                deductions: value.totals.deductions,
                net: value.totals.net,
            },
        }
    }
}

/// Query string for the payroll preview.
#[derive(Debug, Default, Deserialize)]
pub struct PayrollQuery {
    pub period: Option<String>,
}

/// Preview the payroll for a month.
#[utoipa::path(
    get,
    path = "/api/v1/payroll/preview",
    params(
        ("period" = Option<String>, Query, description = "Month as YYYY-MM; defaults to the current month")
    ),
    responses(
        (status = 200, description = "One line per active employee", body = PayrollPreviewResponse),
        (status = 400, description = "Malformed period", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Manager role required", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "previewPayroll"
)]
#[get("/payroll/preview")]
pub async fn preview_payroll(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<PayrollQuery>,
) -> ApiResult<web::Json<PayrollPreviewResponse>> {
    session.require_reviewer()?;
    let period = match query.into_inner().period {
        Some(raw) => parse_period(raw, FieldName::new("period"))?,
        None => PayrollPeriod::containing(state.clock.utc().date_naive()),
    };
    let preview = state.payroll.preview(period).await?;
    Ok(web::Json(PayrollPreviewResponse::from(&preview)))
}
