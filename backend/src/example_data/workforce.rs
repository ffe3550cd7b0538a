//! Conversion of generated workforce seeds into domain records.
//!
//! Generated requests go through the same validation as live submissions.
//! Decided outcomes are replayed as reviewer decisions dated from the seed's
//! reference date, so the lifecycle invariants hold for seeded data too.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use example_data::{
    AdvanceSeed, DocumentKindSeed, DocumentSeed, EmployeeSeed, ExampleWorkforce,
    ExpenseCategorySeed, ExpenseSeed, LeaveSeed, LeaveTypeSeed, OutcomeSeed, OvertimeKindSeed,
    OvertimeSeed,
};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::records::{Approvable, Creatable, RecordError, RecordIdGenerator};
use crate::domain::{
    AdvanceDraft, AdvanceRequest, Decision, DecisionAction, DocumentDraft, DocumentKind, Employee,
    EmployeeDocument, EmployeeDraft, EmployeeId, EmployeeRef, EmployeeValidationError,
    EmploymentStatus, ExpenseCategory, ExpenseClaim, ExpenseDraft, LeaveDraft, LeaveRequest,
    LeaveType, OvertimeDraft, OvertimeKind, OvertimeRequest, RecordKind, RepaymentDraft,
    RequestStatus, Review, first_of_next_month,
};

/// Username recorded as the reviewer of seeded decisions.
const SEED_REVIEWER: &str = "example-data";

/// Errors raised while converting generated seeds.
#[derive(Debug, Error)]
pub enum WorkforceConversionError {
    /// A generated employee failed directory validation.
    #[error("generated employee {employee_id} is invalid: {source}")]
    Employee {
        employee_id: String,
        #[source]
        source: EmployeeValidationError,
    },
    /// A generated request names an employee that was not generated.
    #[error("generated {kind} references unknown employee {employee_id}")]
    UnknownEmployee { kind: RecordKind, employee_id: String },
    /// A generated request failed record validation.
    #[error("generated {kind} is invalid: {source}")]
    Record {
        kind: RecordKind,
        #[source]
        source: RecordError,
    },
}

/// Domain records ready to preload into the stores.
#[derive(Debug, Default)]
pub struct SeededRecords {
    pub employees: Vec<Employee>,
    pub advances: Vec<AdvanceRequest>,
    pub expenses: Vec<ExpenseClaim>,
    pub overtime: Vec<OvertimeRequest>,
    pub leave: Vec<LeaveRequest>,
    pub documents: Vec<EmployeeDocument>,
}

impl SeededRecords {
    /// Number of request records across every kind.
    pub fn request_count(&self) -> usize {
        self.advances.len()
            + self.expenses.len()
            + self.overtime.len()
            + self.leave.len()
            + self.documents.len()
    }
}

/// Convert `workforce` into domain records stamped at `reference`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use example_data::{SeedRegistry, generate_example_workforce};
/// use hr_console::example_data::convert_workforce;
///
/// let registry = SeedRegistry::from_json(r#"{
///     "version": 1,
///     "referenceDate": "2026-01-15",
///     "departments": ["Finance"],
///     "seeds": [{"name": "tiny", "seed": 7, "employeeCount": 3}]
/// }"#).unwrap();
/// let seed = registry.find_seed("tiny").unwrap();
/// let workforce = generate_example_workforce(&registry, seed).unwrap();
/// let records = convert_workforce(workforce, registry.reference_date()).unwrap();
/// assert_eq!(records.employees.len(), 3);
/// ```
pub fn convert_workforce(
    workforce: ExampleWorkforce,
    reference: NaiveDate,
) -> Result<SeededRecords, WorkforceConversionError> {
    let stamp = reference.and_time(NaiveTime::MIN).and_utc();
    let employees = workforce
        .employees
        .into_iter()
        .map(employee)
        .collect::<Result<Vec<_>, _>>()?;
    let owners: HashMap<String, EmployeeRef> = employees
        .iter()
        .map(|employee| (employee.id().to_string(), employee.reference()))
        .collect();
    let converter = Converter { owners, stamp };

    Ok(SeededRecords {
        advances: converter.convert_all(workforce.advances, advance)?,
        expenses: converter.convert_all(workforce.expenses, expense)?,
        overtime: converter.convert_all(workforce.overtime, overtime)?,
        leave: converter.convert_all(workforce.leave, leave)?,
        documents: converter.convert_all(workforce.documents, document)?,
        employees,
    })
}

fn employee(seed: EmployeeSeed) -> Result<Employee, WorkforceConversionError> {
    let employee_id = seed.employee_id.clone();
    let wrap = |source| WorkforceConversionError::Employee {
        employee_id: employee_id.clone(),
        source,
    };
    Employee::try_from_draft(EmployeeDraft {
        id: EmployeeId::new(seed.employee_id).map_err(wrap)?,
        name: seed.name,
        department: seed.department,
        position: seed.position,
        email: seed.email,
        join_date: seed.join_date,
        monthly_salary: Decimal::from(seed.monthly_salary),
        status: EmploymentStatus::Active,
    })
    .map_err(wrap)
}

/// Seeds that belong to one generated employee.
trait OwnedSeed {
    fn employee_id(&self) -> &str;
}

macro_rules! owned_seed {
    ($($seed:ty),+ $(,)?) => {
        $(impl OwnedSeed for $seed {
            fn employee_id(&self) -> &str {
                &self.employee_id
            }
        })+
    };
}

owned_seed!(AdvanceSeed, ExpenseSeed, OvertimeSeed, LeaveSeed, DocumentSeed);

struct Converter {
    owners: HashMap<String, EmployeeRef>,
    stamp: DateTime<Utc>,
}

impl Converter {
    fn convert_all<S, R>(
        &self,
        seeds: Vec<S>,
        build: fn(&Converter, &RecordIdGenerator, EmployeeRef, S) -> Result<R, RecordError>,
    ) -> Result<Vec<R>, WorkforceConversionError>
    where
        S: OwnedSeed,
        R: Creatable,
    {
        let ids = RecordIdGenerator::new(R::KIND);
        seeds
            .into_iter()
            .map(|seed| {
                let owner = self.owners.get(seed.employee_id()).cloned().ok_or_else(|| {
                    WorkforceConversionError::UnknownEmployee {
                        kind: R::KIND,
                        employee_id: seed.employee_id().to_owned(),
                    }
                })?;
                build(self, &ids, owner, seed).map_err(|source| WorkforceConversionError::Record {
                    kind: R::KIND,
                    source,
                })
            })
            .collect()
    }

    fn create<R: Creatable>(
        &self,
        ids: &RecordIdGenerator,
        draft: R::Draft,
        outcome: OutcomeSeed,
    ) -> Result<R, RecordError> {
        let mut record = R::create(ids.next(self.stamp), draft, self.stamp)?;
        if let Some(action) = decision_action(outcome) {
            record.apply_decision(
                &Decision {
                    action,
                    comment: None,
                    decided_by: SEED_REVIEWER.to_owned(),
                },
                self.stamp,
            )?;
        }
        Ok(record)
    }
}

fn decision_action(outcome: OutcomeSeed) -> Option<DecisionAction> {
    match outcome {
        OutcomeSeed::Pending => None,
        OutcomeSeed::Approved => Some(DecisionAction::Approve),
        OutcomeSeed::Rejected => Some(DecisionAction::Reject),
    }
}

fn advance(
    converter: &Converter,
    ids: &RecordIdGenerator,
    employee: EmployeeRef,
    seed: AdvanceSeed,
) -> Result<AdvanceRequest, RecordError> {
    let monthly_deduction = Decimal::from(seed.monthly_deduction);
    let record = AdvanceRequest::create(
        ids.next(converter.stamp),
        AdvanceDraft {
            employee,
            amount: Decimal::from(seed.amount),
            monthly_deduction,
            reason: seed.reason,
        },
        converter.stamp,
    )?;
    let status = match seed.outcome {
        OutcomeSeed::Pending => return Ok(record),
        OutcomeSeed::Approved => RequestStatus::Approved,
        OutcomeSeed::Rejected => RequestStatus::Rejected,
    };
    let decided_at = seed.decided_on.and_time(NaiveTime::MIN).and_utc();
    let review = Review {
        comment: None,
        reviewed_by: Some(SEED_REVIEWER.to_owned()),
        reviewed_at: Some(decided_at),
    };
    let repayments = if status == RequestStatus::Approved {
        instalments(
            seed.decided_on,
            monthly_deduction,
            record.amount(),
            seed.installments_paid,
        )
    } else {
        Vec::new()
    };
    record.restore(status, review, repayments, converter.stamp)
}

/// Monthly instalments starting the month after approval, capped so the
/// last one settles exactly the remaining balance.
fn instalments(
    decided_on: NaiveDate,
    monthly: Decimal,
    amount: Decimal,
    count: u32,
) -> Vec<RepaymentDraft> {
    let mut remaining = amount;
    let mut paid_on = decided_on;
    let mut drafts = Vec::new();
    for _ in 0..count {
        if remaining <= Decimal::ZERO {
            break;
        }
        paid_on = first_of_next_month(paid_on);
        let amount = monthly.min(remaining);
        remaining -= amount;
        drafts.push(RepaymentDraft {
            amount,
            paid_on,
            note: Some("payroll deduction".to_owned()),
        });
    }
    drafts
}

fn expense(
    converter: &Converter,
    ids: &RecordIdGenerator,
    employee: EmployeeRef,
    seed: ExpenseSeed,
) -> Result<ExpenseClaim, RecordError> {
    let category = match seed.category {
        ExpenseCategorySeed::Travel => ExpenseCategory::Travel,
        ExpenseCategorySeed::Meals => ExpenseCategory::Meals,
        ExpenseCategorySeed::Transport => ExpenseCategory::Transport,
        ExpenseCategorySeed::Supplies => ExpenseCategory::Supplies,
        ExpenseCategorySeed::Training => ExpenseCategory::Training,
    };
    converter.create(
        ids,
        ExpenseDraft {
            employee,
            category,
            amount: Decimal::from(seed.amount),
            expense_date: seed.expense_date,
            description: seed.description,
            receipt_reference: None,
        },
        seed.outcome,
    )
}

fn overtime(
    converter: &Converter,
    ids: &RecordIdGenerator,
    employee: EmployeeRef,
    seed: OvertimeSeed,
) -> Result<OvertimeRequest, RecordError> {
    let kind = match seed.kind {
        OvertimeKindSeed::Weekday => OvertimeKind::Weekday,
        OvertimeKindSeed::Weekend => OvertimeKind::Weekend,
        OvertimeKindSeed::Holiday => OvertimeKind::Holiday,
    };
    converter.create(
        ids,
        OvertimeDraft {
            employee,
            work_date: seed.work_date,
            hours: Decimal::from(seed.hours),
            kind,
            reason: seed.reason,
        },
        seed.outcome,
    )
}

fn leave(
    converter: &Converter,
    ids: &RecordIdGenerator,
    employee: EmployeeRef,
    seed: LeaveSeed,
) -> Result<LeaveRequest, RecordError> {
    let leave_type = match seed.leave_type {
        LeaveTypeSeed::Annual => LeaveType::Annual,
        LeaveTypeSeed::Sick => LeaveType::Sick,
        LeaveTypeSeed::Emergency => LeaveType::Emergency,
        LeaveTypeSeed::Unpaid => LeaveType::Unpaid,
    };
    converter.create(
        ids,
        LeaveDraft {
            employee,
            leave_type,
            start_date: seed.start_date,
            end_date: seed.end_date,
            reason: seed.reason,
        },
        seed.outcome,
    )
}

fn document(
    converter: &Converter,
    ids: &RecordIdGenerator,
    employee: EmployeeRef,
    seed: DocumentSeed,
) -> Result<EmployeeDocument, RecordError> {
    let kind = match seed.kind {
        DocumentKindSeed::Passport => DocumentKind::Passport,
        DocumentKindSeed::Visa => DocumentKind::Visa,
        DocumentKindSeed::NationalId => DocumentKind::NationalId,
        DocumentKindSeed::Contract => DocumentKind::Contract,
    };
    converter.create(
        ids,
        DocumentDraft {
            employee,
            kind,
            title: seed.title,
            document_number: None,
            issue_date: None,
            expiry_date: seed.expiry_date,
            file_name: None,
        },
        seed.outcome,
    )
}
