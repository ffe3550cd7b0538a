//! Handlers shared by every request record kind.
//!
//! Advances, expenses, documents, tickets, overtime and leave expose the same
//! list, get, decision and delete endpoints. The generic helpers here apply
//! the session rules; `record_endpoints!` stamps out the per-kind Actix
//! handlers with their OpenAPI annotations.
//!
//! Callers with the employee role only ever see and touch their own records.
//! Reviewers see everything and may submit on behalf of any active employee.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::EmployeeDirectory;
use crate::domain::records::{Creatable, EmployeeRecord};
use crate::domain::{
    Decision, DecisionAction, EmployeeRef, Error, ErrorCode, Principal, RecordFilter,
    RequestStatus,
};
use crate::inbound::http::state::RecordPorts;
use crate::inbound::http::validation::{
    FieldName, parse_label, parse_optional_employee_id, parse_optional_label, parse_record_id,
    require,
};

/// Query string accepted by every record listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordListQuery {
    pub employee_id: Option<String>,
    pub status: Option<String>,
}

/// Reviewer decision payload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRequest {
    /// One of `approve`, `reject`, `reimburse` or `close`.
    #[schema(example = "approve")]
    pub action: Option<String>,
    pub comment: Option<String>,
}

/// Owner snapshot embedded in records and summaries.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRefBody {
    #[schema(example = "EMP-0001")]
    pub employee_id: String,
    pub employee_name: String,
    pub department: String,
}

impl From<&EmployeeRef> for EmployeeRefBody {
    fn from(value: &EmployeeRef) -> Self {
        Self {
            employee_id: value.employee_id.to_string(),
            employee_name: value.employee_name.clone(),
            department: value.department.clone(),
        }
    }
}

/// Fields common to every request record response.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordHeader {
    #[schema(example = "ADV-1767225600000")]
    pub id: String,
    #[serde(flatten)]
    pub employee: EmployeeRefBody,
    pub status: RequestStatus,
    pub review_comment: Option<String>,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl RecordHeader {
    pub fn of<R: EmployeeRecord>(record: &R) -> Self {
        let meta = record.meta();
        let review = meta.review();
        Self {
            id: meta.id().to_string(),
            employee: EmployeeRefBody::from(meta.employee()),
            status: meta.status(),
            review_comment: review.comment.clone(),
            reviewed_by: review.reviewed_by.clone(),
            reviewed_at: review.reviewed_at.map(|at| at.to_rfc3339()),
            created_at: meta.created_at().to_rfc3339(),
            updated_at: meta.updated_at().to_rfc3339(),
        }
    }
}

fn not_your_record() -> Error {
    Error::forbidden("records of other employees are not accessible")
}

/// Resolve the owner snapshot for a new submission.
///
/// Without an explicit `employeeId` the caller's own directory entry is used.
pub(crate) async fn resolve_owner(
    directory: &dyn EmployeeDirectory,
    principal: &Principal,
    requested: Option<String>,
) -> Result<EmployeeRef, Error> {
    let field = FieldName::new("employeeId");
    let employee_id = match parse_optional_employee_id(requested, field)? {
        Some(id) if !principal.can_access(&id) => return Err(not_your_record()),
        Some(id) => id,
        None => principal.employee_id().clone(),
    };
    let employee = directory.get(&employee_id).await.map_err(|err| {
        if err.code() == ErrorCode::NotFound {
            Error::invalid_request(err.message().to_owned()).with_details(serde_json::json!({
                "field": "employeeId",
                "value": employee_id.to_string(),
                "code": "unknown_employee",
            }))
        } else {
            err
        }
    })?;
    if !employee.is_active() {
        return Err(Error::conflict(format!(
            "employee {employee_id} is inactive"
        )));
    }
    Ok(employee.reference())
}

pub(crate) async fn list_records<R: Creatable>(
    ports: &RecordPorts<R>,
    principal: &Principal,
    query: RecordListQuery,
) -> Result<Vec<R>, Error> {
    let filter = RecordFilter {
        employee_id: parse_optional_employee_id(query.employee_id, FieldName::new("employeeId"))?,
        status: parse_optional_label(query.status, FieldName::new("status"))?,
    };
    ports.query.list(&principal.scope(filter)).await
}

pub(crate) async fn fetch_record<R: Creatable>(
    ports: &RecordPorts<R>,
    principal: &Principal,
    raw_id: &str,
) -> Result<R, Error> {
    let id = parse_record_id(raw_id, FieldName::new("id"))?;
    let record = ports.query.get(&id).await?;
    if principal.can_access(&record.employee().employee_id) {
        Ok(record)
    } else {
        Err(not_your_record())
    }
}

pub(crate) async fn decide_record<R: Creatable>(
    ports: &RecordPorts<R>,
    reviewer: &Principal,
    raw_id: &str,
    payload: DecisionRequest,
) -> Result<R, Error> {
    let id = parse_record_id(raw_id, FieldName::new("id"))?;
    let action: DecisionAction =
        parse_label(require(payload.action, FieldName::new("action"))?, FieldName::new("action"))?;
    ports
        .command
        .decide(
            &id,
            Decision {
                action,
                comment: payload.comment,
                decided_by: reviewer.username().to_owned(),
            },
        )
        .await
}

pub(crate) async fn delete_record<R: Creatable>(
    ports: &RecordPorts<R>,
    principal: &Principal,
    raw_id: &str,
) -> Result<R, Error> {
    let record = fetch_record(ports, principal, raw_id).await?;
    ports.command.delete(record.id()).await
}

/// Generate the list, get, decision and optional delete handlers for one
/// record kind.
///
/// Each handler reads the kind's [`RecordPorts`] from the named
/// `HttpState` field and converts records with `$response::from`.
macro_rules! record_endpoints {
    (
        ports: $ports:ident,
        response: $response:ident,
        tag: $tag:tt,
        list: $list:ident ($list_route:tt, $list_path:tt, $list_op:tt),
        get: $get:ident ($get_route:tt, $get_path:tt, $get_op:tt),
        decide: $decide:ident ($decide_route:tt, $decide_path:tt, $decide_op:tt)
        $(, delete: $delete:ident ($delete_route:tt, $delete_path:tt, $delete_op:tt))?
        $(,)?
    ) => {
        /// List records visible to the caller.
        #[utoipa::path(
            get,
            path = $list_path,
            params(
                ("employeeId" = Option<String>, Query, description = "Only records owned by this employee"),
                ("status" = Option<String>, Query, description = "Only records in this status")
            ),
            responses(
                (status = 200, description = "Matching records", body = [$response]),
                (status = 400, description = "Invalid filter", body = ErrorSchema),
                (status = 401, description = "Unauthorised", body = ErrorSchema)
            ),
            tags = [$tag],
            operation_id = $list_op
        )]
        #[actix_web::get($list_route)]
        pub async fn $list(
            state: actix_web::web::Data<$crate::inbound::http::state::HttpState>,
            session: $crate::inbound::http::session::SessionContext,
            query: actix_web::web::Query<$crate::inbound::http::records::RecordListQuery>,
        ) -> $crate::inbound::http::ApiResult<actix_web::web::Json<Vec<$response>>> {
            let principal = session.require_principal()?;
            let records = $crate::inbound::http::records::list_records(
                &state.$ports,
                &principal,
                query.into_inner(),
            )
            .await?;
            Ok(actix_web::web::Json(records.iter().map($response::from).collect()))
        }

        /// Fetch one record.
        #[utoipa::path(
            get,
            path = $get_path,
            params(("id" = String, Path, description = "Record identifier")),
            responses(
                (status = 200, description = "The record", body = $response),
                (status = 400, description = "Malformed identifier", body = ErrorSchema),
                (status = 401, description = "Unauthorised", body = ErrorSchema),
                (status = 403, description = "Owned by another employee", body = ErrorSchema),
                (status = 404, description = "Unknown record", body = ErrorSchema)
            ),
            tags = [$tag],
            operation_id = $get_op
        )]
        #[actix_web::get($get_route)]
        pub async fn $get(
            state: actix_web::web::Data<$crate::inbound::http::state::HttpState>,
            session: $crate::inbound::http::session::SessionContext,
            path: actix_web::web::Path<String>,
        ) -> $crate::inbound::http::ApiResult<actix_web::web::Json<$response>> {
            let principal = session.require_principal()?;
            let record =
                $crate::inbound::http::records::fetch_record(&state.$ports, &principal, &path)
                    .await?;
            Ok(actix_web::web::Json($response::from(&record)))
        }

        /// Apply a reviewer decision.
        #[utoipa::path(
            post,
            path = $decide_path,
            params(("id" = String, Path, description = "Record identifier")),
            request_body = DecisionRequest,
            responses(
                (status = 200, description = "Updated record", body = $response),
                (status = 400, description = "Invalid decision", body = ErrorSchema),
                (status = 401, description = "Unauthorised", body = ErrorSchema),
                (status = 403, description = "Manager role required", body = ErrorSchema),
                (status = 404, description = "Unknown record", body = ErrorSchema),
                (status = 409, description = "Decision not allowed in the current status", body = ErrorSchema),
                (status = 503, description = "Store unavailable", body = ErrorSchema)
            ),
            tags = [$tag],
            operation_id = $decide_op
        )]
        #[actix_web::post($decide_route)]
        pub async fn $decide(
            state: actix_web::web::Data<$crate::inbound::http::state::HttpState>,
            session: $crate::inbound::http::session::SessionContext,
            path: actix_web::web::Path<String>,
            payload: actix_web::web::Json<$crate::inbound::http::records::DecisionRequest>,
        ) -> $crate::inbound::http::ApiResult<actix_web::web::Json<$response>> {
            let reviewer = session.require_reviewer()?;
            let record = $crate::inbound::http::records::decide_record(
                &state.$ports,
                &reviewer,
                &path,
                payload.into_inner(),
            )
            .await?;
            Ok(actix_web::web::Json($response::from(&record)))
        }

        $(
            /// Delete a record when its kind and state allow it.
            #[utoipa::path(
                delete,
                path = $delete_path,
                params(("id" = String, Path, description = "Record identifier")),
                responses(
                    (status = 204, description = "Record deleted"),
                    (status = 401, description = "Unauthorised", body = ErrorSchema),
                    (status = 403, description = "Owned by another employee", body = ErrorSchema),
                    (status = 404, description = "Unknown record", body = ErrorSchema),
                    (status = 409, description = "Record must be retained", body = ErrorSchema)
                ),
                tags = [$tag],
                operation_id = $delete_op
            )]
            #[actix_web::delete($delete_route)]
            pub async fn $delete(
                state: actix_web::web::Data<$crate::inbound::http::state::HttpState>,
                session: $crate::inbound::http::session::SessionContext,
                path: actix_web::web::Path<String>,
            ) -> $crate::inbound::http::ApiResult<actix_web::HttpResponse> {
                let principal = session.require_principal()?;
                $crate::inbound::http::records::delete_record(&state.$ports, &principal, &path)
                    .await?;
                Ok(actix_web::HttpResponse::NoContent().finish())
            }
        )?
    };
}

pub(crate) use record_endpoints;
