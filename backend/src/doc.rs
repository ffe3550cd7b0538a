//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every `/api/v1` handler plus the health probes
//! - **Schemas**: request and response bodies, with [`ErrorSchema`] and
//!   [`ErrorCodeSchema`] standing in for the domain error type
//! - **Security**: Session cookie authentication scheme
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::advances::{
    AdvanceResponse, AdvanceSubmission, LoanSummaryBody, RepaymentBody, RepaymentRequest,
};
use crate::inbound::http::attendance::{
    AttendanceMarkRequest, AttendanceResponse, AttendanceSummaryBody, CheckInRequest,
    CheckOutRequest,
};
use crate::inbound::http::dashboard::{DashboardResponse, StoreStatusBody};
use crate::inbound::http::documents::{DocumentResponse, DocumentSubmission, DocumentSummaryBody};
use crate::inbound::http::employees::{
    EmployeeCreateRequest, EmployeeResponse, EmployeeUpdateRequest,
};
use crate::inbound::http::expenses::{ExpenseResponse, ExpenseSubmission, ExpenseSummaryBody};
use crate::inbound::http::leave::{LeaveBalanceBody, LeaveResponse, LeaveSubmission};
use crate::inbound::http::overtime::{OvertimeResponse, OvertimeSubmission};
use crate::inbound::http::payroll::PayrollPreviewResponse;
use crate::inbound::http::records::DecisionRequest;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::tickets::{TicketResponse, TicketSubmission};
use crate::inbound::http::users::{LoginRequest, PrincipalResponse};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "HR console API",
        description = "Employee records, request review workflows, payroll preview and dashboards over in-memory stores."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_principal,
        crate::inbound::http::employees::list_employees,
        crate::inbound::http::employees::create_employee,
        crate::inbound::http::employees::get_employee,
        crate::inbound::http::employees::update_employee,
        crate::inbound::http::advances::submit_advance,
        crate::inbound::http::advances::record_repayment,
        crate::inbound::http::advances::loan_summaries,
        crate::inbound::http::advances::list_advances,
        crate::inbound::http::advances::get_advance,
        crate::inbound::http::advances::decide_advance,
        crate::inbound::http::advances::delete_advance,
        crate::inbound::http::expenses::submit_expense,
        crate::inbound::http::expenses::expense_summaries,
        crate::inbound::http::expenses::list_expenses,
        crate::inbound::http::expenses::get_expense,
        crate::inbound::http::expenses::decide_expense,
        crate::inbound::http::expenses::delete_expense,
        crate::inbound::http::documents::submit_document,
        crate::inbound::http::documents::document_summaries,
        crate::inbound::http::documents::list_documents,
        crate::inbound::http::documents::get_document,
        crate::inbound::http::documents::decide_document,
        crate::inbound::http::documents::delete_document,
        crate::inbound::http::tickets::submit_ticket,
        crate::inbound::http::tickets::list_tickets,
        crate::inbound::http::tickets::get_ticket,
        crate::inbound::http::tickets::decide_ticket,
        crate::inbound::http::tickets::delete_ticket,
        crate::inbound::http::overtime::submit_overtime,
        crate::inbound::http::overtime::list_overtime,
        crate::inbound::http::overtime::get_overtime,
        crate::inbound::http::overtime::decide_overtime,
        crate::inbound::http::leave::submit_leave,
        crate::inbound::http::leave::balances,
        crate::inbound::http::leave::list_leave,
        crate::inbound::http::leave::get_leave,
        crate::inbound::http::leave::decide_leave,
        crate::inbound::http::leave::delete_leave,
        crate::inbound::http::attendance::list_attendance,
        crate::inbound::http::attendance::check_in,
        crate::inbound::http::attendance::check_out,
        crate::inbound::http::attendance::mark_attendance,
        crate::inbound::http::attendance::attendance_summaries,
        crate::inbound::http::payroll::preview_payroll,
        crate::inbound::http::dashboard::dashboard,
        crate::inbound::http::dashboard::store_statuses,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest,
        PrincipalResponse,
        EmployeeCreateRequest,
        EmployeeUpdateRequest,
        EmployeeResponse,
        DecisionRequest,
        AdvanceSubmission,
        AdvanceResponse,
        RepaymentRequest,
        RepaymentBody,
        LoanSummaryBody,
        ExpenseSubmission,
        ExpenseResponse,
        ExpenseSummaryBody,
        DocumentSubmission,
        DocumentResponse,
        DocumentSummaryBody,
        TicketSubmission,
        TicketResponse,
        OvertimeSubmission,
        OvertimeResponse,
        LeaveSubmission,
        LeaveResponse,
        LeaveBalanceBody,
        CheckInRequest,
        CheckOutRequest,
        AttendanceMarkRequest,
        AttendanceResponse,
        AttendanceSummaryBody,
        PayrollPreviewResponse,
        DashboardResponse,
        StoreStatusBody,
    )),
    tags(
        (name = "session", description = "Login, logout and the signed-in principal"),
        (name = "employees", description = "Employee directory"),
        (name = "advances", description = "Salary advances and repayments"),
        (name = "expenses", description = "Expense claims"),
        (name = "documents", description = "Employee documents and expiry tracking"),
        (name = "tickets", description = "Air ticket requests"),
        (name = "overtime", description = "Overtime claims"),
        (name = "leave", description = "Leave requests and balances"),
        (name = "attendance", description = "Daily attendance"),
        (name = "reports", description = "Payroll preview, dashboard and store status"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure.
    //!
    //! Schema registration and endpoint reference tests are covered by the
    //! BDD tests in `backend/tests/openapi_schemas_bdd.rs`.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[rstest]
    #[case("PrincipalResponse", "employeeId")]
    #[case("StoreStatusBody", "lastError")]
    #[case("PayrollPreviewResponse", "totals")]
    #[case("AdvanceSubmission", "monthlyDeduction")]
    fn request_and_response_bodies_use_camel_case(#[case] name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");

        assert_object_schema_has_field(schema, field);
    }

    #[test]
    fn summary_routes_are_documented() {
        let doc = ApiDoc::openapi();

        for path in [
            "/api/v1/advances/summaries",
            "/api/v1/expenses/summaries",
            "/api/v1/documents/summaries",
            "/api/v1/attendance/summaries",
            "/api/v1/leave/balances/{employeeId}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
