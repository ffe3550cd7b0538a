//! Expense claims and the per-employee expense summary.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::labels::labelled_enum;
use super::records::{
    Approvable, Creatable, EmployeeRecord, RecordError, RecordId, RecordKind, RecordMeta,
    RequestStatus, employee_record, optional_text, positive_amount, required_text,
};
use super::{EmployeeId, EmployeeRef};

labelled_enum! {
    /// Expense category.
    pub enum ExpenseCategory ("expense category") {
        Travel => "travel",
        Meals => "meals",
        Accommodation => "accommodation",
        Transport => "transport",
        Supplies => "supplies",
        Training => "training",
        Other => "other",
    }
}

/// Submission payload for an expense claim.
#[derive(Debug, Clone)]
pub struct ExpenseDraft {
    pub employee: EmployeeRef,
    pub category: ExpenseCategory,
    pub amount: Decimal,
    pub expense_date: NaiveDate,
    pub description: String,
    pub receipt_reference: Option<String>,
}

/// Expense claim awaiting or past review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseClaim {
    meta: RecordMeta,
    category: ExpenseCategory,
    amount: Decimal,
    expense_date: NaiveDate,
    description: String,
    receipt_reference: Option<String>,
}

employee_record!(ExpenseClaim, RecordKind::Expense);

impl ExpenseClaim {
    pub fn category(&self) -> ExpenseCategory {
        self.category
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn expense_date(&self) -> NaiveDate {
        self.expense_date
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    pub fn receipt_reference(&self) -> Option<&str> {
        self.receipt_reference.as_deref()
    }

    /// Approved but not yet paid out.
    pub fn awaits_reimbursement(&self) -> bool {
        self.meta.status() == RequestStatus::Approved
    }
}

impl Approvable for ExpenseClaim {}

impl Creatable for ExpenseClaim {
    type Draft = ExpenseDraft;

    fn create(id: RecordId, draft: ExpenseDraft, now: DateTime<Utc>) -> Result<Self, RecordError> {
        let amount = positive_amount("amount", draft.amount)?;
        if draft.expense_date > now.date_naive() {
            return Err(RecordError::invalid("expenseDate", "must not be in the future"));
        }
        Ok(Self {
            meta: RecordMeta::new(id, draft.employee, now),
            category: draft.category,
            amount,
            expense_date: draft.expense_date,
            description: required_text("description", draft.description)?,
            receipt_reference: optional_text(draft.receipt_reference),
        })
    }
}

/// Expense totals for one employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseSummary {
    pub employee: EmployeeRef,
    pub claim_count: usize,
    /// Everything claimed except rejected claims.
    pub total_claimed: Decimal,
    /// Approved and reimbursed claims.
    pub total_approved: Decimal,
    pub total_reimbursed: Decimal,
    /// Approved claims not yet reimbursed.
    pub outstanding: Decimal,
    pub pending_count: usize,
    pub pending_amount: Decimal,
    pub last_expense_date: Option<NaiveDate>,
}

impl ExpenseSummary {
    fn empty(employee: EmployeeRef) -> Self {
        Self {
            employee,
            claim_count: 0,
            total_claimed: Decimal::ZERO,
            total_approved: Decimal::ZERO,
            total_reimbursed: Decimal::ZERO,
            outstanding: Decimal::ZERO,
            pending_count: 0,
            pending_amount: Decimal::ZERO,
            last_expense_date: None,
        }
    }

    fn absorb(&mut self, claim: &ExpenseClaim) {
        let amount = claim.amount();
        self.claim_count += 1;
        self.last_expense_date = self.last_expense_date.max(Some(claim.expense_date()));
        match claim.status() {
            RequestStatus::Pending => {
                self.total_claimed += amount;
                self.pending_count += 1;
                self.pending_amount += amount;
            }
            RequestStatus::Approved => {
                self.total_claimed += amount;
                self.total_approved += amount;
                self.outstanding += amount;
            }
            RequestStatus::Reimbursed => {
                self.total_claimed += amount;
                self.total_approved += amount;
                self.total_reimbursed += amount;
            }
            RequestStatus::Rejected | RequestStatus::Closed => {}
        }
    }
}

/// Fold every claim into one summary per employee, in first-appearance order.
pub fn summarise_expenses<'a, I>(claims: I) -> Vec<ExpenseSummary>
where
    I: IntoIterator<Item = &'a ExpenseClaim>,
{
    let mut summaries: Vec<ExpenseSummary> = Vec::new();
    let mut positions: HashMap<EmployeeId, usize> = HashMap::new();

    for claim in claims {
        let owner = claim.employee();
        let position = *positions.entry(owner.employee_id.clone()).or_insert_with(|| {
            let next = summaries.len();
            summaries.push(ExpenseSummary::empty(owner.clone()));
            next
        });
        if let Some(summary) = summaries.get_mut(position) {
            summary.absorb(claim);
        }
    }

    summaries
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::records::{Decision, DecisionAction, RecordIdGenerator};

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 10, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn claim(
        ids: &RecordIdGenerator,
        now: DateTime<Utc>,
        employee: &str,
        amount: i64,
        day: u32,
        actions: &[DecisionAction],
    ) -> ExpenseClaim {
        let mut claim = ExpenseClaim::create(
            ids.next(now),
            ExpenseDraft {
                employee: EmployeeRef {
                    employee_id: EmployeeId::new(employee).expect("valid id"),
                    employee_name: employee.to_owned(),
                    department: "Sales".to_owned(),
                },
                category: ExpenseCategory::Travel,
                amount: Decimal::new(amount, 0),
                expense_date: NaiveDate::from_ymd_opt(2026, 2, day).expect("valid date"),
                description: "client visit".to_owned(),
                receipt_reference: Some("  ".to_owned()),
            },
            now,
        )
        .expect("valid claim");
        for action in actions {
            claim
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
        claim
    }

    #[rstest]
    fn future_expense_dates_are_rejected(now: DateTime<Utc>) {
        let ids = RecordIdGenerator::new(RecordKind::Expense);
        let result = ExpenseClaim::create(
            ids.next(now),
            ExpenseDraft {
                employee: EmployeeRef {
                    employee_id: EmployeeId::new("EMP-0001").expect("valid id"),
                    employee_name: "A".to_owned(),
                    department: "Sales".to_owned(),
                },
                category: ExpenseCategory::Meals,
                amount: Decimal::ONE,
                expense_date: NaiveDate::from_ymd_opt(2026, 2, 11).expect("valid date"),
                description: "lunch".to_owned(),
                receipt_reference: None,
            },
            now,
        );
        assert!(matches!(
            result,
            Err(RecordError::Invalid {
                field: "expenseDate",
                ..
            })
        ));
    }

    #[rstest]
    fn blank_receipt_reference_is_dropped(now: DateTime<Utc>) {
        let ids = RecordIdGenerator::new(RecordKind::Expense);
        let claim = claim(&ids, now, "EMP-0001", 10, 1, &[]);
        assert_eq!(claim.receipt_reference(), None);
    }

    #[rstest]
    fn summary_buckets_each_status(now: DateTime<Utc>) {
        let ids = RecordIdGenerator::new(RecordKind::Expense);
        let claims = vec![
            claim(&ids, now, "EMP-0001", 100, 3, &[]),
            claim(&ids, now, "EMP-0001", 200, 5, &[DecisionAction::Approve]),
            claim(
                &ids,
                now,
                "EMP-0001",
                300,
                1,
                &[DecisionAction::Approve, DecisionAction::Reimburse],
            ),
            claim(&ids, now, "EMP-0001", 400, 9, &[DecisionAction::Reject]),
            claim(&ids, now, "EMP-0002", 50, 2, &[]),
        ];

        let summaries = summarise_expenses(&claims);

        assert_eq!(summaries.len(), 2);
        let first = summaries.first().expect("EMP-0001 summary");
        assert_eq!(first.claim_count, 4);
        assert_eq!(first.total_claimed, Decimal::new(600, 0));
        assert_eq!(first.total_approved, Decimal::new(500, 0));
        assert_eq!(first.total_reimbursed, Decimal::new(300, 0));
        assert_eq!(first.outstanding, Decimal::new(200, 0));
        assert_eq!(first.pending_count, 1);
        assert_eq!(first.pending_amount, Decimal::new(100, 0));
        assert_eq!(
            first.last_expense_date,
            NaiveDate::from_ymd_opt(2026, 2, 9)
        );
    }
}
