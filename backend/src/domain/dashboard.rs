//! Reporting dashboard overview.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use super::money::{round_money, sum_money};
use super::ports::StoreStatus;
use super::records::{EmployeeRecord, RecordKind, RequestStatus};
use super::{
    AdvanceRequest, AttendanceRecord, AttendanceStatus, DEFAULT_EXPIRY_WINDOW_DAYS, Employee,
    EmployeeDocument, ExpenseClaim, LeaveRequest, OvertimeRequest, TicketRequest,
};

/// Days ahead checked for approved leave starting soon.
pub const UPCOMING_LEAVE_DAYS: u64 = 7;

/// Directory head count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadCount {
    pub total: usize,
    pub active: usize,
}

/// Requests awaiting review for one record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingCount {
    pub kind: RecordKind,
    pub count: usize,
}

/// Attendance for the dashboard date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceToday {
    pub present: usize,
    pub late: usize,
    pub half_day: usize,
    pub absent: usize,
    pub on_leave: usize,
    /// Active employees without any record for the day.
    pub not_recorded: usize,
}

/// Dashboard snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardOverview {
    pub as_of: NaiveDate,
    pub head_count: HeadCount,
    pub pending: Vec<PendingCount>,
    pub outstanding_advances: Decimal,
    pub pending_expense_amount: Decimal,
    pub attendance_today: AttendanceToday,
    pub documents_expiring: usize,
    pub upcoming_leave: usize,
    pub stores: Vec<StoreStatus>,
}

/// Snapshots the overview is computed from.
#[derive(Debug, Clone)]
pub struct DashboardInputs<'a> {
    pub employees: &'a [Employee],
    pub advances: &'a [AdvanceRequest],
    pub expenses: &'a [ExpenseClaim],
    pub documents: &'a [EmployeeDocument],
    pub tickets: &'a [TicketRequest],
    pub overtime: &'a [OvertimeRequest],
    pub leave: &'a [LeaveRequest],
    pub attendance: &'a [AttendanceRecord],
    pub stores: Vec<StoreStatus>,
}

fn pending<R: EmployeeRecord>(records: &[R]) -> PendingCount {
    PendingCount {
        kind: R::KIND,
        count: records
            .iter()
            .filter(|record| record.status() == RequestStatus::Pending)
            .count(),
    }
}

fn attendance_on(
    as_of: NaiveDate,
    records: &[AttendanceRecord],
    employees: &[Employee],
) -> AttendanceToday {
    let mut today = AttendanceToday::default();
    let todays: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|record| record.work_date() == as_of)
        .collect();
    for record in &todays {
        match record.status() {
            AttendanceStatus::Present => today.present += 1,
            AttendanceStatus::Late => today.late += 1,
            AttendanceStatus::HalfDay => today.half_day += 1,
            AttendanceStatus::Absent => today.absent += 1,
            AttendanceStatus::OnLeave => today.on_leave += 1,
        }
    }
    today.not_recorded = employees
        .iter()
        .filter(|employee| employee.is_active())
        .filter(|employee| {
            !todays
                .iter()
                .any(|record| &record.employee().employee_id == employee.id())
        })
        .count();
    today
}

/// Compute the dashboard for `as_of`.
pub fn build_overview(as_of: NaiveDate, inputs: DashboardInputs<'_>) -> DashboardOverview {
    let leave_horizon = as_of
        .checked_add_days(Days::new(UPCOMING_LEAVE_DAYS))
        .unwrap_or(NaiveDate::MAX);

    DashboardOverview {
        as_of,
        head_count: HeadCount {
            total: inputs.employees.len(),
            active: inputs.employees.iter().filter(|e| e.is_active()).count(),
        },
        pending: vec![
            pending(inputs.advances),
            pending(inputs.expenses),
            pending(inputs.documents),
            pending(inputs.tickets),
            pending(inputs.overtime),
            pending(inputs.leave),
        ],
        outstanding_advances: round_money(sum_money(
            inputs
                .advances
                .iter()
                .filter(|advance| advance.is_active())
                .map(|advance| advance.repayment().remaining_amount()),
        )),
        pending_expense_amount: round_money(sum_money(
            inputs
                .expenses
                .iter()
                .filter(|claim| claim.status() == RequestStatus::Pending)
                .map(ExpenseClaim::amount),
        )),
        attendance_today: attendance_on(as_of, inputs.attendance, inputs.employees),
        documents_expiring: inputs
            .documents
            .iter()
            .filter(|doc| doc.status() != RequestStatus::Rejected)
            .filter(|doc| doc.expires_within(as_of, DEFAULT_EXPIRY_WINDOW_DAYS))
            .count(),
        upcoming_leave: inputs
            .leave
            .iter()
            .filter(|leave| leave.status() == RequestStatus::Approved)
            .filter(|leave| leave.start_date() >= as_of && leave.start_date() <= leave_horizon)
            .count(),
        stores: inputs.stores,
    }
}
