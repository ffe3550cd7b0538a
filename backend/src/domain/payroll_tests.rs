//! Tests for the payroll preview.

use chrono::{DateTime, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::records::{
    Approvable, Creatable, Decision, DecisionAction, RecordIdGenerator, RecordKind,
};
use crate::domain::{
    AdvanceDraft, EmployeeDraft, EmployeeId, EmploymentStatus, ExpenseCategory, ExpenseDraft,
    LeaveDraft, MAX_AMOUNT, OvertimeDraft, OvertimeKind, RepaymentDraft,
};

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, m, d).expect("valid date")
}

fn dec(units: i64) -> Decimal {
    Decimal::new(units, 0)
}

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 5, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn employee(id: &str, salary: i64, status: EmploymentStatus) -> Employee {
    Employee::try_from_draft(EmployeeDraft {
        id: EmployeeId::new(id).expect("valid id"),
        name: format!("Employee {id}"),
        department: "Finance".to_owned(),
        position: "Clerk".to_owned(),
        email: format!("{}@example.com", id.to_ascii_lowercase()),
        join_date: date(1, 1),
        monthly_salary: dec(salary),
        status,
    })
    .expect("valid employee")
}

fn decide<R: Approvable>(record: &mut R, actions: &[DecisionAction], now: DateTime<Utc>) {
    for action in actions {
        record
            .apply_decision(
                &Decision {
                    action: *action,
                    comment: None,
                    decided_by: "manager".to_owned(),
                },
                now,
            )
            .expect("valid transition");
    }
}

struct Fixture {
    employees: Vec<Employee>,
    overtime: Vec<OvertimeRequest>,
    expenses: Vec<ExpenseClaim>,
    advances: Vec<AdvanceRequest>,
    leave: Vec<LeaveRequest>,
}

impl Fixture {
    fn inputs(&self) -> PayrollInputs<'_> {
        PayrollInputs {
            employees: &self.employees,
            overtime: &self.overtime,
            expenses: &self.expenses,
            advances: &self.advances,
            leave: &self.leave,
        }
    }
}

#[fixture]
fn records(now: DateTime<Utc>) -> Fixture {
    let staff = employee("EMP-0001", 4800, EmploymentStatus::Active);
    let owner = staff.reference();

    let overtime_ids = RecordIdGenerator::new(RecordKind::Overtime);
    let overtime_claim = |work_date: NaiveDate, hours: i64, actions: &[DecisionAction]| {
        let mut claim = OvertimeRequest::create(
            overtime_ids.next(now),
            OvertimeDraft {
                employee: owner.clone(),
                work_date,
                hours: dec(hours),
                kind: OvertimeKind::Weekend,
                reason: "stocktake".to_owned(),
            },
            now,
        )
        .expect("valid overtime");
        decide(&mut claim, actions, now);
        claim
    };
    let overtime = vec![
        overtime_claim(date(3, 7), 5, &[DecisionAction::Approve]),
        overtime_claim(date(3, 8), 3, &[]),
        overtime_claim(date(2, 28), 4, &[DecisionAction::Approve]),
    ];

    let expense_ids = RecordIdGenerator::new(RecordKind::Expense);
    let expense = |amount: i64, actions: &[DecisionAction]| {
        let mut claim = ExpenseClaim::create(
            expense_ids.next(now),
            ExpenseDraft {
                employee: owner.clone(),
                category: ExpenseCategory::Transport,
                amount: dec(amount),
                expense_date: date(3, 15),
                description: "taxi".to_owned(),
                receipt_reference: None,
            },
            now,
        )
        .expect("valid expense");
        decide(&mut claim, actions, now);
        claim
    };
    let expenses = vec![
        expense(200, &[DecisionAction::Approve]),
        expense(300, &[DecisionAction::Approve, DecisionAction::Reimburse]),
        expense(999, &[]),
    ];

    let advance_ids = RecordIdGenerator::new(RecordKind::Advance);
    let advance = |amount: i64, deduction: i64| {
        let mut advance = AdvanceRequest::create(
            advance_ids.next(now),
            AdvanceDraft {
                employee: owner.clone(),
                amount: dec(amount),
                monthly_deduction: dec(deduction),
                reason: "rent".to_owned(),
            },
            now,
        )
        .expect("valid advance");
        decide(&mut advance, &[DecisionAction::Approve], now);
        advance
    };
    let mut nearly_repaid = advance(500, 250);
    nearly_repaid
        .record_repayment(
            RepaymentDraft {
                amount: dec(400),
                paid_on: date(3, 1),
                note: None,
            },
            now,
        )
        .expect("repayment succeeds");
    let advances = vec![advance(1000, 400), nearly_repaid];

    let mut unpaid = LeaveRequest::create(
        RecordIdGenerator::new(RecordKind::Leave).next(now),
        LeaveDraft {
            employee: owner,
            leave_type: LeaveType::Unpaid,
            start_date: date(3, 30),
            end_date: date(4, 2),
            reason: "family".to_owned(),
        },
        now,
    )
    .expect("valid leave");
    decide(&mut unpaid, &[DecisionAction::Approve], now);

    Fixture {
        employees: vec![
            staff,
            employee("EMP-0002", 9000, EmploymentStatus::Inactive),
            employee("EMP-0003", 3000, EmploymentStatus::Active),
        ],
        overtime,
        expenses,
        advances,
        leave: vec![unpaid],
    }
}

#[rstest]
#[case("2026-03", Some((2026, 3)))]
#[case(" 2026-12 ", Some((2026, 12)))]
#[case("2026-13", None)]
#[case("2026-3", None)]
#[case("202603", None)]
fn parses_periods(#[case] raw: &str, #[case] expected: Option<(i32, u32)>) {
    let parsed = raw
        .parse::<PayrollPeriod>()
        .ok()
        .map(|period| (period.first_day().year(), period.first_day().month()));
    assert_eq!(parsed, expected);
}

#[rstest]
fn period_bounds_cover_the_month() {
    let period = PayrollPeriod::new(2028, 2).expect("valid period");
    assert_eq!(period.last_day(), NaiveDate::from_ymd_opt(2028, 2, 29).expect("leap day"));
    assert_eq!(period.to_string(), "2028-02");
}

#[rstest]
fn preview_combines_every_source(records: Fixture) {
    let period = PayrollPeriod::new(2026, 3).expect("valid period");

    let preview = build_preview(period, records.inputs());

    let line = preview.lines.first().expect("first line");
    assert_eq!(line.base_salary, dec(4800));
    assert_eq!(line.overtime_hours, dec(5));
    assert_eq!(line.overtime_pay, dec(150));
    assert_eq!(line.reimbursements, dec(200));
    assert_eq!(line.advance_deduction, dec(500));
    assert_eq!(line.unpaid_leave_days, 2);
    assert_eq!(line.unpaid_leave_deduction, dec(320));
    assert_eq!(line.gross, dec(5150));
    assert_eq!(line.deductions, dec(820));
    assert_eq!(line.net, dec(4330));
}

#[rstest]
fn preview_skips_inactive_employees_and_totals_lines(records: Fixture) {
    let period = PayrollPeriod::new(2026, 3).expect("valid period");

    let preview = build_preview(period, records.inputs());

    let ids: Vec<&str> = preview
        .lines
        .iter()
        .map(|line| line.employee.employee_id.as_ref())
        .collect();
    assert_eq!(ids, vec!["EMP-0001", "EMP-0003"]);
    assert!(preview.lines.iter().all(|line| line.net == line.gross - line.deductions));
    assert_eq!(preview.totals.employees, 2);
    assert_eq!(preview.totals.gross, dec(8150));
    assert_eq!(preview.totals.deductions, dec(820));
    assert_eq!(preview.totals.net, dec(7330));
}

#[rstest]
fn unpaid_leave_is_prorated_into_the_following_month(records: Fixture) {
    let period = PayrollPeriod::new(2026, 4).expect("valid period");

    let preview = build_preview(period, records.inputs());

    let line = preview.lines.first().expect("first line");
    assert_eq!(line.unpaid_leave_days, 2);
    assert_eq!(line.overtime_pay, Decimal::ZERO);
}

#[rstest]
fn capped_salary_with_unpaid_leave_computes_without_overflow(now: DateTime<Utc>) {
    let staff = employee("EMP-0009", 1_000_000_000, EmploymentStatus::Active);
    assert_eq!(staff.monthly_salary(), MAX_AMOUNT);
    let mut unpaid = LeaveRequest::create(
        RecordIdGenerator::new(RecordKind::Leave).next(now),
        LeaveDraft {
            employee: staff.reference(),
            leave_type: LeaveType::Unpaid,
            start_date: date(3, 10),
            end_date: date(3, 12),
            reason: "travel".to_owned(),
        },
        now,
    )
    .expect("valid leave");
    decide(&mut unpaid, &[DecisionAction::Approve], now);
    let records = Fixture {
        employees: vec![staff],
        overtime: Vec::new(),
        expenses: Vec::new(),
        advances: Vec::new(),
        leave: vec![unpaid],
    };

    let preview = build_preview(PayrollPeriod::new(2026, 3).expect("valid period"), records.inputs());

    let line = preview.lines.first().expect("capped line");
    assert_eq!(line.unpaid_leave_days, 3);
    assert_eq!(line.unpaid_leave_deduction, dec(100_000_000));
    assert_eq!(line.net, dec(900_000_000));
}
