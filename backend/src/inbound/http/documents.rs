//! Employee document HTTP handlers.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    DEFAULT_EXPIRY_WINDOW_DAYS, DocumentDraft, DocumentKind, DocumentSummary, EmployeeDocument,
    ExpiryWindow, NextDatePolicy, RecordFilter, summarise_documents,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::records::{
    DecisionRequest, EmployeeRefBody, RecordHeader, record_endpoints, resolve_owner,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_label, parse_optional_date, parse_optional_label, require,
};

/// Request payload for a new document.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSubmission {
    pub employee_id: Option<String>,
    #[schema(example = "passport")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub document_number: Option<String>,
    pub issue_date: Option<String>,
    #[schema(example = "2031-05-20")]
    pub expiry_date: Option<String>,
    pub file_name: Option<String>,
}

/// Response payload for a document.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    #[serde(flatten)]
    pub record: RecordHeader,
    pub kind: DocumentKind,
    pub title: String,
    pub document_number: Option<String>,
    pub issue_date: Option<String>,
    pub expiry_date: Option<String>,
    pub file_name: Option<String>,
}

impl From<&EmployeeDocument> for DocumentResponse {
    fn from(value: &EmployeeDocument) -> Self {
        Self {
            record: RecordHeader::of(value),
            kind: value.kind(),
            title: value.title().to_owned(),
            document_number: value.document_number().map(str::to_owned),
            issue_date: value.issue_date().map(|date| date.to_string()),
            expiry_date: value.expiry_date().map(|date| date.to_string()),
            file_name: value.file_name().map(str::to_owned),
        }
    }
}

/// Document counts for one employee.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummaryBody {
    #[serde(flatten)]
    pub employee: EmployeeRefBody,
    pub total: usize,
    pub verified: usize,
    pub pending: usize,
    pub expired: usize,
    pub expiring_soon: usize,
    pub next_expiry_date: Option<String>,
}

impl From<DocumentSummary> for DocumentSummaryBody {
    fn from(value: DocumentSummary) -> Self {
        Self {
            employee: EmployeeRefBody::from(&value.employee),
            total: value.total,
            verified: value.verified,
            pending: value.pending,
            expired: value.expired,
            expiring_soon: value.expiring_soon,
            next_expiry_date: value.next_expiry_date.map(|date| date.to_string()),
        }
    }
}

/// Query string for document summaries.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummaryQuery {
    pub as_of: Option<String>,
    pub window_days: Option<u32>,
    pub policy: Option<String>,
}

/// Upload document metadata.
#[utoipa::path(
    post,
    path = "/api/v1/documents",
    request_body = DocumentSubmission,
    responses(
        (status = 201, description = "Document submitted for verification", body = DocumentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Submitting for another employee", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "submitDocument"
)]
#[post("/documents")]
pub async fn submit_document(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<DocumentSubmission>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let payload = payload.into_inner();
    let kind: DocumentKind = parse_label(
        require(payload.kind, FieldName::new("kind"))?,
        FieldName::new("kind"),
    )?;
    let title = require(payload.title, FieldName::new("title"))?;
    let issue_date = parse_optional_date(payload.issue_date, FieldName::new("issueDate"))?;
    let expiry_date = parse_optional_date(payload.expiry_date, FieldName::new("expiryDate"))?;
    let employee = resolve_owner(state.employees.as_ref(), &principal, payload.employee_id).await?;

    let document = state
        .documents
        .command
        .submit(DocumentDraft {
            employee,
            kind,
            title,
            document_number: payload.document_number,
            issue_date,
            expiry_date,
            file_name: payload.file_name,
        })
        .await?;
    Ok(HttpResponse::Created().json(DocumentResponse::from(&document)))
}

/// Per-employee document counts and expiry outlook.
#[utoipa::path(
    get,
    path = "/api/v1/documents/summaries",
    params(
        ("asOf" = Option<String>, Query, description = "Reference date, YYYY-MM-DD; defaults to today"),
        ("windowDays" = Option<u32>, Query, description = "Days ahead counted as expiring soon; defaults to 30"),
        ("policy" = Option<NextDatePolicy>, Query, description = "How the next expiry date is chosen; defaults to last_seen")
    ),
    responses(
        (status = 200, description = "Document summaries in first-seen order", body = [DocumentSummaryBody]),
        (status = 400, description = "Invalid query", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "summariseDocuments"
)]
#[get("/documents/summaries")]
pub async fn document_summaries(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<DocumentSummaryQuery>,
) -> ApiResult<web::Json<Vec<DocumentSummaryBody>>> {
    let principal = session.require_principal()?;
    let query = query.into_inner();
    let window = ExpiryWindow {
        as_of: parse_optional_date(query.as_of, FieldName::new("asOf"))?
            .unwrap_or_else(|| state.clock.utc().date_naive()),
        window_days: query.window_days.unwrap_or(DEFAULT_EXPIRY_WINDOW_DAYS),
        policy: parse_optional_label(query.policy, FieldName::new("policy"))?.unwrap_or_default(),
    };
    let documents = state
        .documents
        .query
        .list(&principal.scope(RecordFilter::default()))
        .await?;

    Ok(web::Json(
        summarise_documents(&documents, window)
            .into_iter()
            .map(DocumentSummaryBody::from)
            .collect(),
    ))
}

record_endpoints! {
    ports: documents,
    response: DocumentResponse,
    tag: "documents",
    list: list_documents("/documents", "/api/v1/documents", "listDocuments"),
    get: get_document("/documents/{id}", "/api/v1/documents/{id}", "getDocument"),
    decide: decide_document(
        "/documents/{id}/decision",
        "/api/v1/documents/{id}/decision",
        "decideDocument"
    ),
    delete: delete_document("/documents/{id}", "/api/v1/documents/{id}", "deleteDocument"),
}
