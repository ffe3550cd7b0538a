//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed HR records, their review lifecycle and the
//! read-side aggregations (loan, expense, document, leave and attendance
//! summaries, payroll preview, dashboard). Inbound adapters talk to the
//! services only through the driving ports in [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Employee and the request record types with their drafts.
//! - RecordService, EmployeeService, AttendanceService, PayrollService and
//!   DashboardService: implementations of the driving ports.

pub mod error;
pub mod labels;
pub mod money;
pub mod ports;
pub mod records;
pub mod trace_id;

mod advances;
mod attendance;
mod attendance_service;
mod auth;
mod dashboard;
mod documents;
mod employee;
mod employee_service;
mod expenses;
mod leave;
mod overtime;
mod payroll;
mod record_service;
mod report_service;
mod tickets;

pub use self::advances::{
    AdvanceDraft, AdvanceRequest, LoanSummary, Repayment, RepaymentDraft, RepaymentEntry,
    first_of_next_month, summarise_loans,
};
pub use self::attendance::{
    AttendanceFilter, AttendanceMark, AttendanceRecord, AttendanceStatus, AttendanceSummary,
    CheckIn, CheckOut, summarise_attendance,
};
pub use self::attendance_service::AttendanceService;
pub use self::auth::{LoginCredentials, LoginValidationError, Principal, Role};
pub use self::dashboard::{
    AttendanceToday, DashboardInputs, DashboardOverview, HeadCount, PendingCount,
    UPCOMING_LEAVE_DAYS, build_overview,
};
pub use self::documents::{
    DEFAULT_EXPIRY_WINDOW_DAYS, DocumentDraft, DocumentKind, DocumentSummary, EmployeeDocument,
    ExpiryWindow, summarise_documents,
};
pub use self::employee::{
    EMPLOYEE_ID_MAX, Employee, EmployeeDraft, EmployeeFilter, EmployeeId, EmployeeRef,
    EmployeeUpdate, EmployeeValidationError, EmploymentStatus,
};
pub use self::employee_service::EmployeeService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::expenses::{
    ExpenseCategory, ExpenseClaim, ExpenseDraft, ExpenseSummary, summarise_expenses,
};
pub use self::labels::UnknownLabel;
pub use self::leave::{LeaveBalance, LeaveDraft, LeaveRequest, LeaveType, leave_balances};
pub use self::money::{MAX_AMOUNT, round_money, sum_money};
pub use self::overtime::{
    MAX_OVERTIME_HOURS, OvertimeDraft, OvertimeKind, OvertimeRequest, STANDARD_MONTHLY_HOURS,
    overtime_pay,
};
pub use self::payroll::{
    PayrollInputs, PayrollLine, PayrollPeriod, PayrollPeriodError, PayrollPreview, PayrollTotals,
    build_preview,
};
pub use self::record_service::RecordService;
pub use self::records::{
    Decision, DecisionAction, NextDatePolicy, RecordFilter, RecordId, RecordKind, RequestStatus,
    Review,
};
pub use self::report_service::{DashboardService, PayrollService, ReportSources};
pub use self::tickets::{TicketDraft, TicketRequest, TravelClass, TravelPurpose};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use hr_console::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
