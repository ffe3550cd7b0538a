//! Salary advance HTTP handlers.
//!
//! ```text
//! GET    /api/v1/advances
//! POST   /api/v1/advances
//! GET    /api/v1/advances/summaries
//! GET    /api/v1/advances/{id}
//! POST   /api/v1/advances/{id}/decision
//! POST   /api/v1/advances/{id}/repayments
//! DELETE /api/v1/advances/{id}
//! ```

use actix_web::{HttpResponse, get, post, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AdvanceDraft, AdvanceRequest, LoanSummary, NextDatePolicy, RecordFilter, RepaymentDraft,
    RepaymentEntry, summarise_loans,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::records::{
    DecisionRequest, EmployeeRefBody, RecordHeader, record_endpoints, resolve_owner,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_date, parse_optional_label, parse_record_id, require,
};

/// Request payload for a new advance.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceSubmission {
    /// Defaults to the caller's own employee record.
    pub employee_id: Option<String>,
    #[schema(value_type = Option<String>, example = "3000.00")]
    pub amount: Option<Decimal>,
    #[schema(value_type = Option<String>, example = "500.00")]
    pub monthly_deduction: Option<Decimal>,
    pub reason: Option<String>,
}

/// Request payload recording one repayment.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepaymentRequest {
    #[schema(value_type = Option<String>, example = "500.00")]
    pub amount: Option<Decimal>,
    #[schema(example = "2026-03-01")]
    pub paid_on: Option<String>,
    pub note: Option<String>,
}

/// One ledger entry.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepaymentBody {
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub paid_on: String,
    pub note: Option<String>,
    pub recorded_at: String,
}

impl From<&RepaymentEntry> for RepaymentBody {
    fn from(value: &RepaymentEntry) -> Self {
        Self {
            amount: value.amount,
            paid_on: value.paid_on.to_string(),
            note: value.note.clone(),
            recorded_at: value.recorded_at.to_rfc3339(),
        }
    }
}

/// Response payload for an advance.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceResponse {
    #[serde(flatten)]
    pub record: RecordHeader,
    #[schema(value_type = String)]
    pub amount: Decimal,
    #[schema(value_type = String)]
    pub monthly_deduction: Decimal,
    pub reason: String,
    #[schema(value_type = String)]
    pub paid_amount: Decimal,
    #[schema(value_type = String)]
    pub remaining_amount: Decimal,
    pub next_payment_date: Option<String>,
    pub repayments: Vec<RepaymentBody>,
}

impl From<&AdvanceRequest> for AdvanceResponse {
    fn from(value: &AdvanceRequest) -> Self {
        let repayment = value.repayment();
        Self {
            record: RecordHeader::of(value),
            amount: value.amount(),
            monthly_deduction: value.monthly_deduction(),
            reason: value.reason().to_owned(),
            paid_amount: repayment.paid_amount(),
            remaining_amount: repayment.remaining_amount(),
            next_payment_date: repayment.next_payment_date().map(|date| date.to_string()),
            repayments: repayment.history().iter().map(RepaymentBody::from).collect(),
        }
    }
}

/// Per-employee loan position.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanSummaryBody {
    #[serde(flatten)]
    pub employee: EmployeeRefBody,
    #[schema(value_type = String)]
    pub total_requested: Decimal,
    #[schema(value_type = String)]
    pub total_paid: Decimal,
    #[schema(value_type = String)]
    pub total_remaining: Decimal,
    pub active_loans: usize,
    pub next_payment_date: Option<String>,
    #[schema(value_type = String)]
    pub monthly_deduction: Decimal,
}

impl From<LoanSummary> for LoanSummaryBody {
    fn from(value: LoanSummary) -> Self {
        Self {
            employee: EmployeeRefBody::from(&value.employee),
            total_requested: value.total_requested,
            total_paid: value.total_paid,
            total_remaining: value.total_remaining,
            active_loans: value.active_loans,
            next_payment_date: value.next_payment_date.map(|date| date.to_string()),
            monthly_deduction: value.monthly_deduction,
        }
    }
}

/// Query string for loan summaries.
#[derive(Debug, Deserialize)]
pub struct LoanSummaryQuery {
    pub policy: Option<String>,
}

/// Submit a salary advance.
#[utoipa::path(
    post,
    path = "/api/v1/advances",
    request_body = AdvanceSubmission,
    responses(
        (status = 201, description = "Advance submitted", body = AdvanceResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Submitting for another employee", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["advances"],
    operation_id = "submitAdvance"
)]
#[post("/advances")]
pub async fn submit_advance(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AdvanceSubmission>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let payload = payload.into_inner();
    let amount = require(payload.amount, FieldName::new("amount"))?;
    let monthly_deduction = require(payload.monthly_deduction, FieldName::new("monthlyDeduction"))?;
    let reason = require(payload.reason, FieldName::new("reason"))?;
    let employee = resolve_owner(state.employees.as_ref(), &principal, payload.employee_id).await?;

    let advance = state
        .advances
        .command
        .submit(AdvanceDraft {
            employee,
            amount,
            monthly_deduction,
            reason,
        })
        .await?;
    Ok(HttpResponse::Created().json(AdvanceResponse::from(&advance)))
}

/// Record a repayment against an approved advance.
#[utoipa::path(
    post,
    path = "/api/v1/advances/{id}/repayments",
    params(("id" = String, Path, description = "Advance identifier")),
    request_body = RepaymentRequest,
    responses(
        (status = 200, description = "Updated advance", body = AdvanceResponse),
        (status = 400, description = "Invalid repayment", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Manager role required", body = ErrorSchema),
        (status = 404, description = "Unknown advance", body = ErrorSchema),
        (status = 409, description = "Advance has no outstanding balance", body = ErrorSchema)
    ),
    tags = ["advances"],
    operation_id = "recordRepayment"
)]
#[post("/advances/{id}/repayments")]
pub async fn record_repayment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<RepaymentRequest>,
) -> ApiResult<web::Json<AdvanceResponse>> {
    session.require_reviewer()?;
    let id = parse_record_id(&path, FieldName::new("id"))?;
    let payload = payload.into_inner();
    let draft = RepaymentDraft {
        amount: require(payload.amount, FieldName::new("amount"))?,
        paid_on: parse_date(
            require(payload.paid_on, FieldName::new("paidOn"))?,
            FieldName::new("paidOn"),
        )?,
        note: payload.note,
    };

    let advance = state.advance_ledger.record_repayment(&id, draft).await?;
    Ok(web::Json(AdvanceResponse::from(&advance)))
}

/// Per-employee loan summaries over approved advances.
#[utoipa::path(
    get,
    path = "/api/v1/advances/summaries",
    params(
        ("policy" = Option<NextDatePolicy>, Query, description = "How the next payment date is chosen; defaults to last_seen")
    ),
    responses(
        (status = 200, description = "Loan summaries in first-seen order", body = [LoanSummaryBody]),
        (status = 400, description = "Unknown policy", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["advances"],
    operation_id = "summariseLoans"
)]
#[get("/advances/summaries")]
pub async fn loan_summaries(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<LoanSummaryQuery>,
) -> ApiResult<web::Json<Vec<LoanSummaryBody>>> {
    let principal = session.require_principal()?;
    let policy: NextDatePolicy =
        parse_optional_label(query.into_inner().policy, FieldName::new("policy"))?
            .unwrap_or_default();
    let advances = state
        .advances
        .query
        .list(&principal.scope(RecordFilter::default()))
        .await?;

    Ok(web::Json(
        summarise_loans(&advances, policy)
            .into_iter()
            .map(LoanSummaryBody::from)
            .collect(),
    ))
}

record_endpoints! {
    ports: advances,
    response: AdvanceResponse,
    tag: "advances",
    list: list_advances("/advances", "/api/v1/advances", "listAdvances"),
    get: get_advance("/advances/{id}", "/api/v1/advances/{id}", "getAdvance"),
    decide: decide_advance(
        "/advances/{id}/decision",
        "/api/v1/advances/{id}/decision",
        "decideAdvance"
    ),
    delete: delete_advance("/advances/{id}", "/api/v1/advances/{id}", "deleteAdvance"),
}
