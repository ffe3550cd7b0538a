//! Employee directory HTTP handlers.
//!
//! Reviewers manage the directory. Callers with the employee role only see
//! their own entry.

use actix_web::{HttpResponse, get, post, put, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Employee, EmployeeDraft, EmployeeFilter, EmployeeUpdate, EmploymentStatus, Error,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_date, parse_employee_id, parse_optional_label, require,
};

/// Directory entry as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    #[schema(example = "EMP-0004")]
    pub id: String,
    pub name: String,
    pub department: String,
    pub position: String,
    pub email: String,
    pub join_date: String,
    #[schema(value_type = String, example = "4800.00")]
    pub monthly_salary: Decimal,
    pub status: EmploymentStatus,
}

impl From<&Employee> for EmployeeResponse {
    fn from(value: &Employee) -> Self {
        Self {
            id: value.id().to_string(),
            name: value.name().to_owned(),
            department: value.department().to_owned(),
            position: value.position().to_owned(),
            email: value.email().to_owned(),
            join_date: value.join_date().to_string(),
            monthly_salary: value.monthly_salary(),
            status: value.status(),
        }
    }
}

/// Request payload for a new directory entry.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCreateRequest {
    #[schema(example = "EMP-0004")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub email: Option<String>,
    #[schema(example = "2025-09-01")]
    pub join_date: Option<String>,
    #[schema(value_type = Option<String>, example = "4800.00")]
    pub monthly_salary: Option<Decimal>,
    /// Defaults to `active`.
    pub status: Option<String>,
}

/// Partial update; absent fields keep their value.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdateRequest {
    pub name: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub email: Option<String>,
    #[schema(value_type = Option<String>)]
    pub monthly_salary: Option<Decimal>,
    pub status: Option<String>,
}

/// Query string for the directory listing.
#[derive(Debug, Default, Deserialize)]
pub struct EmployeeListQuery {
    pub department: Option<String>,
    pub status: Option<String>,
}

/// List directory entries.
#[utoipa::path(
    get,
    path = "/api/v1/employees",
    params(
        ("department" = Option<String>, Query, description = "Department, compared without case"),
        ("status" = Option<EmploymentStatus>, Query, description = "Employment status")
    ),
    responses(
        (status = 200, description = "Matching employees", body = [EmployeeResponse]),
        (status = 400, description = "Invalid filter", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "listEmployees"
)]
#[get("/employees")]
pub async fn list_employees(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<EmployeeListQuery>,
) -> ApiResult<web::Json<Vec<EmployeeResponse>>> {
    let principal = session.require_principal()?;
    let query = query.into_inner();
    let filter = EmployeeFilter {
        department: query.department,
        status: parse_optional_label(query.status, FieldName::new("status"))?,
    };
    let employees = state.employees.list(&filter).await?;
    Ok(web::Json(
        employees
            .iter()
            .filter(|employee| principal.can_access(employee.id()))
            .map(EmployeeResponse::from)
            .collect(),
    ))
}

/// Add a directory entry.
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = EmployeeCreateRequest,
    responses(
        (status = 201, description = "Employee created", body = EmployeeResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Manager role required", body = ErrorSchema),
        (status = 409, description = "Employee id already taken", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "createEmployee"
)]
#[post("/employees")]
pub async fn create_employee(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<EmployeeCreateRequest>,
) -> ApiResult<HttpResponse> {
    session.require_reviewer()?;
    let payload = payload.into_inner();
    let draft = EmployeeDraft {
        id: parse_employee_id(require(payload.id, FieldName::new("id"))?, FieldName::new("id"))?,
        name: require(payload.name, FieldName::new("name"))?,
        department: require(payload.department, FieldName::new("department"))?,
        position: require(payload.position, FieldName::new("position"))?,
        email: require(payload.email, FieldName::new("email"))?,
        join_date: parse_date(
            require(payload.join_date, FieldName::new("joinDate"))?,
            FieldName::new("joinDate"),
        )?,
        monthly_salary: require(payload.monthly_salary, FieldName::new("monthlySalary"))?,
        status: parse_optional_label(payload.status, FieldName::new("status"))?
            .unwrap_or(EmploymentStatus::Active),
    };

    let employee = state.employees.create(draft).await?;
    Ok(HttpResponse::Created().json(EmployeeResponse::from(&employee)))
}

/// Fetch one directory entry.
#[utoipa::path(
    get,
    path = "/api/v1/employees/{id}",
    params(("id" = String, Path, description = "Employee identifier")),
    responses(
        (status = 200, description = "The employee", body = EmployeeResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Another employee's entry", body = ErrorSchema),
        (status = 404, description = "Unknown employee", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "getEmployee"
)]
#[get("/employees/{id}")]
pub async fn get_employee(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<EmployeeResponse>> {
    let principal = session.require_principal()?;
    let id = parse_employee_id(path.into_inner(), FieldName::new("id"))?;
    if !principal.can_access(&id) {
        return Err(Error::forbidden("records of other employees are not accessible"));
    }
    let employee = state.employees.get(&id).await?;
    Ok(web::Json(EmployeeResponse::from(&employee)))
}

/// Update a directory entry.
#[utoipa::path(
    put,
    path = "/api/v1/employees/{id}",
    params(("id" = String, Path, description = "Employee identifier")),
    request_body = EmployeeUpdateRequest,
    responses(
        (status = 200, description = "Updated employee", body = EmployeeResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Manager role required", body = ErrorSchema),
        (status = 404, description = "Unknown employee", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "updateEmployee"
)]
#[put("/employees/{id}")]
pub async fn update_employee(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<EmployeeUpdateRequest>,
) -> ApiResult<web::Json<EmployeeResponse>> {
    session.require_reviewer()?;
    let id = parse_employee_id(path.into_inner(), FieldName::new("id"))?;
    let payload = payload.into_inner();
    let update = EmployeeUpdate {
        name: payload.name,
        department: payload.department,
        position: payload.position,
        email: payload.email,
        monthly_salary: payload.monthly_salary,
        status: parse_optional_label(payload.status, FieldName::new("status"))?,
    };

    let employee = state.employees.update(&id, update).await?;
    Ok(web::Json(EmployeeResponse::from(&employee)))
}
