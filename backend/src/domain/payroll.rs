//! Monthly payroll preview.
//!
//! The preview is read-only: it combines the directory with approved
//! overtime, approved-but-unpaid expenses, active advances and unpaid leave
//! into one line per active employee. Nothing is posted or marked as paid.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;

use super::money::{round_money, sum_money};
use super::records::{EmployeeRecord, RequestStatus};
use super::{
    AdvanceRequest, Employee, EmployeeRef, ExpenseClaim, LeaveRequest, LeaveType, OvertimeRequest,
};

/// Days used to convert a monthly salary into a daily rate for unpaid leave.
const PAYROLL_DAYS_PER_MONTH: i64 = 30;

/// Error returned when parsing a malformed [`PayrollPeriod`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollPeriodError {
    value: String,
}

impl fmt::Display for PayrollPeriodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "payroll period must be YYYY-MM, got '{}'", self.value)
    }
}

impl std::error::Error for PayrollPeriodError {}

/// Calendar month covered by a payroll run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayrollPeriod {
    first_day: NaiveDate,
}

impl PayrollPeriod {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    /// Period containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first_day
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(self.first_day)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first_day <= date && date <= self.last_day()
    }
}

impl fmt::Display for PayrollPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.first_day.year(), self.first_day.month())
    }
}

impl FromStr for PayrollPeriod {
    type Err = PayrollPeriodError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let error = || PayrollPeriodError {
            value: value.to_owned(),
        };
        let (year, month) = value.trim().split_once('-').ok_or_else(error)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(error());
        }
        let year = year.parse::<i32>().map_err(|_| error())?;
        let month = month.parse::<u32>().map_err(|_| error())?;
        Self::new(year, month).ok_or_else(error)
    }
}

/// Payroll line for one employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollLine {
    pub employee: EmployeeRef,
    pub base_salary: Decimal,
    pub overtime_hours: Decimal,
    pub overtime_pay: Decimal,
    pub reimbursements: Decimal,
    pub advance_deduction: Decimal,
    pub unpaid_leave_days: u32,
    pub unpaid_leave_deduction: Decimal,
    pub gross: Decimal,
    pub deductions: Decimal,
    pub net: Decimal,
}

/// Sums across every line of a preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollTotals {
    pub employees: usize,
    pub gross: Decimal,
    pub deductions: Decimal,
    pub net: Decimal,
}

/// Payroll preview for one period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollPreview {
    pub period: PayrollPeriod,
    pub lines: Vec<PayrollLine>,
    pub totals: PayrollTotals,
}

/// Record snapshots a preview is computed from.
#[derive(Debug, Clone, Copy)]
pub struct PayrollInputs<'a> {
    pub employees: &'a [Employee],
    pub overtime: &'a [OvertimeRequest],
    pub expenses: &'a [ExpenseClaim],
    pub advances: &'a [AdvanceRequest],
    pub leave: &'a [LeaveRequest],
}

fn owned_by<'r, R: EmployeeRecord>(
    records: &'r [R],
    employee: &'r Employee,
) -> impl Iterator<Item = &'r R> {
    records
        .iter()
        .filter(move |record| &record.employee().employee_id == employee.id())
}

fn line_for(employee: &Employee, period: PayrollPeriod, inputs: &PayrollInputs<'_>) -> PayrollLine {
    let salary = employee.monthly_salary();

    let overtime: Vec<&OvertimeRequest> = owned_by(inputs.overtime, employee)
        .filter(|claim| claim.status() == RequestStatus::Approved)
        .filter(|claim| period.contains(claim.work_date()))
        .collect();
    let overtime_hours = sum_money(overtime.iter().map(|claim| claim.hours()));
    let overtime_pay = round_money(sum_money(overtime.iter().map(|claim| claim.pay_for(salary))));

    let reimbursements = round_money(sum_money(
        owned_by(inputs.expenses, employee)
            .filter(|claim| claim.awaits_reimbursement())
            .map(ExpenseClaim::amount),
    ));

    let advance_deduction = round_money(sum_money(
        owned_by(inputs.advances, employee).map(AdvanceRequest::due_deduction),
    ));

    let unpaid_leave_days: u32 = owned_by(inputs.leave, employee)
        .filter(|leave| leave.status() == RequestStatus::Approved)
        .filter(|leave| leave.leave_type() == LeaveType::Unpaid)
        .map(|leave| leave.days_within(period.first_day(), period.last_day()))
        .fold(0, u32::saturating_add);
    let unpaid_leave_deduction = round_money(
        Decimal::from(unpaid_leave_days) * salary / Decimal::from(PAYROLL_DAYS_PER_MONTH),
    );

    let base_salary = round_money(salary);
    let gross = base_salary + overtime_pay + reimbursements;
    let deductions = advance_deduction + unpaid_leave_deduction;

    PayrollLine {
        employee: employee.reference(),
        base_salary,
        overtime_hours,
        overtime_pay,
        reimbursements,
        advance_deduction,
        unpaid_leave_days,
        unpaid_leave_deduction,
        gross,
        deductions,
        net: gross - deductions,
    }
}

/// Compute the preview for `period`: one line per active employee, in
/// directory order, plus totals.
pub fn build_preview(period: PayrollPeriod, inputs: PayrollInputs<'_>) -> PayrollPreview {
    let lines: Vec<PayrollLine> = inputs
        .employees
        .iter()
        .filter(|employee| employee.is_active())
        .map(|employee| line_for(employee, period, &inputs))
        .collect();

    let totals = PayrollTotals {
        employees: lines.len(),
        gross: sum_money(lines.iter().map(|line| line.gross)),
        deductions: sum_money(lines.iter().map(|line| line.deductions)),
        net: sum_money(lines.iter().map(|line| line.net)),
    };

    PayrollPreview {
        period,
        lines,
        totals,
    }
}

#[cfg(test)]
#[path = "payroll_tests.rs"]
mod tests;
