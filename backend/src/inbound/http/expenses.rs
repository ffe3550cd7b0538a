//! Expense claim HTTP handlers.

use actix_web::{HttpResponse, get, post, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    ExpenseCategory, ExpenseClaim, ExpenseDraft, ExpenseSummary, RecordFilter, summarise_expenses,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::records::{
    DecisionRequest, EmployeeRefBody, RecordHeader, record_endpoints, resolve_owner,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_date, parse_label, require};

/// Request payload for a new expense claim.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSubmission {
    pub employee_id: Option<String>,
    #[schema(example = "travel")]
    pub category: Option<String>,
    #[schema(value_type = Option<String>, example = "245.50")]
    pub amount: Option<Decimal>,
    #[schema(example = "2026-02-14")]
    pub expense_date: Option<String>,
    pub description: Option<String>,
    pub receipt_reference: Option<String>,
}

/// Response payload for an expense claim.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseResponse {
    #[serde(flatten)]
    pub record: RecordHeader,
    pub category: ExpenseCategory,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub expense_date: String,
    pub description: String,
    pub receipt_reference: Option<String>,
}

impl From<&ExpenseClaim> for ExpenseResponse {
    fn from(value: &ExpenseClaim) -> Self {
        Self {
            record: RecordHeader::of(value),
            category: value.category(),
            amount: value.amount(),
            expense_date: value.expense_date().to_string(),
            description: value.description().to_owned(),
            receipt_reference: value.receipt_reference().map(str::to_owned),
        }
    }
}

/// Expense totals for one employee.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummaryBody {
    #[serde(flatten)]
    pub employee: EmployeeRefBody,
    pub claim_count: usize,
    #[schema(value_type = String)]
    pub total_claimed: Decimal,
    #[schema(value_type = String)]
    pub total_approved: Decimal,
    #[schema(value_type = String)]
    pub total_reimbursed: Decimal,
    #[schema(value_type = String)]
    pub outstanding: Decimal,
    pub pending_count: usize,
    #[schema(value_type = String)]
    pub pending_amount: Decimal,
    pub last_expense_date: Option<String>,
}

impl From<ExpenseSummary> for ExpenseSummaryBody {
    fn from(value: ExpenseSummary) -> Self {
        Self {
            employee: EmployeeRefBody::from(&value.employee),
            claim_count: value.claim_count,
            total_claimed: value.total_claimed,
            total_approved: value.total_approved,
            total_reimbursed: value.total_reimbursed,
            outstanding: value.outstanding,
            pending_count: value.pending_count,
            pending_amount: value.pending_amount,
            last_expense_date: value.last_expense_date.map(|date| date.to_string()),
        }
    }
}

/// Submit an expense claim.
#[utoipa::path(
    post,
    path = "/api/v1/expenses",
    request_body = ExpenseSubmission,
    responses(
        (status = 201, description = "Claim submitted", body = ExpenseResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Submitting for another employee", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["expenses"],
    operation_id = "submitExpense"
)]
#[post("/expenses")]
pub async fn submit_expense(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ExpenseSubmission>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let payload = payload.into_inner();
    let category: ExpenseCategory = parse_label(
        require(payload.category, FieldName::new("category"))?,
        FieldName::new("category"),
    )?;
    let amount = require(payload.amount, FieldName::new("amount"))?;
    let expense_date = parse_date(
        require(payload.expense_date, FieldName::new("expenseDate"))?,
        FieldName::new("expenseDate"),
    )?;
    let description = require(payload.description, FieldName::new("description"))?;
    let employee = resolve_owner(state.employees.as_ref(), &principal, payload.employee_id).await?;

    let claim = state
        .expenses
        .command
        .submit(ExpenseDraft {
            employee,
            category,
            amount,
            expense_date,
            description,
            receipt_reference: payload.receipt_reference,
        })
        .await?;
    Ok(HttpResponse::Created().json(ExpenseResponse::from(&claim)))
}

/// Per-employee expense totals.
#[utoipa::path(
    get,
    path = "/api/v1/expenses/summaries",
    responses(
        (status = 200, description = "Expense summaries in first-seen order", body = [ExpenseSummaryBody]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["expenses"],
    operation_id = "summariseExpenses"
)]
#[get("/expenses/summaries")]
pub async fn expense_summaries(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ExpenseSummaryBody>>> {
    let principal = session.require_principal()?;
    let claims = state
        .expenses
        .query
        .list(&principal.scope(RecordFilter::default()))
        .await?;

    Ok(web::Json(
        summarise_expenses(&claims)
            .into_iter()
            .map(ExpenseSummaryBody::from)
            .collect(),
    ))
}

record_endpoints! {
    ports: expenses,
    response: ExpenseResponse,
    tag: "expenses",
    list: list_expenses("/expenses", "/api/v1/expenses", "listExpenses"),
    get: get_expense("/expenses/{id}", "/api/v1/expenses/{id}", "getExpense"),
    decide: decide_expense(
        "/expenses/{id}/decision",
        "/api/v1/expenses/{id}/decision",
        "decideExpense"
    ),
    delete: delete_expense("/expenses/{id}", "/api/v1/expenses/{id}", "deleteExpense"),
}
