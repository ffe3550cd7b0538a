//! Salary advances (employee loans) and their repayment ledger.
//!
//! An advance is a principal paid out ahead of salary and recovered in
//! monthly deductions. Approval schedules the first deduction for the first
//! day of the following month; each repayment moves money from `remaining`
//! to `paid` so that `paid + remaining == amount` always holds.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::records::{
    Approvable, Creatable, EmployeeRecord, RecordError, RecordId, RecordKind, RecordMeta,
    RequestStatus, Review, employee_record, optional_text, positive_amount, required_text,
};
use super::EmployeeRef;

mod summary;

pub use summary::{LoanSummary, summarise_loans};

/// Submission payload for a new advance.
#[derive(Debug, Clone)]
pub struct AdvanceDraft {
    pub employee: EmployeeRef,
    pub amount: Decimal,
    pub monthly_deduction: Decimal,
    pub reason: String,
}

/// One repayment against an advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepaymentEntry {
    pub amount: Decimal,
    pub paid_on: NaiveDate,
    pub note: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// Repayment request recorded by a manager.
#[derive(Debug, Clone)]
pub struct RepaymentDraft {
    pub amount: Decimal,
    pub paid_on: NaiveDate,
    pub note: Option<String>,
}

/// Repayment state nested in each advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repayment {
    paid_amount: Decimal,
    remaining_amount: Decimal,
    next_payment_date: Option<NaiveDate>,
    history: Vec<RepaymentEntry>,
}

impl Repayment {
    fn outstanding(amount: Decimal) -> Self {
        Self {
            paid_amount: Decimal::ZERO,
            remaining_amount: amount,
            next_payment_date: None,
            history: Vec::new(),
        }
    }

    pub fn paid_amount(&self) -> Decimal {
        self.paid_amount
    }

    pub fn remaining_amount(&self) -> Decimal {
        self.remaining_amount
    }

    pub fn next_payment_date(&self) -> Option<NaiveDate> {
        self.next_payment_date
    }

    pub fn history(&self) -> &[RepaymentEntry] {
        self.history.as_slice()
    }
}

/// First day of the month after `date`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use hr_console::domain::first_of_next_month;
///
/// let dec = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
/// assert_eq!(first_of_next_month(dec), NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
/// ```
pub fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .unwrap_or(date)
}

/// Salary advance request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvanceRequest {
    meta: RecordMeta,
    amount: Decimal,
    monthly_deduction: Decimal,
    reason: String,
    repayment: Repayment,
}

employee_record!(AdvanceRequest, RecordKind::Advance);

impl AdvanceRequest {
    /// Principal requested.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn monthly_deduction(&self) -> Decimal {
        self.monthly_deduction
    }

    pub fn reason(&self) -> &str {
        self.reason.as_str()
    }

    pub fn repayment(&self) -> &Repayment {
        &self.repayment
    }

    /// Whether the advance is approved and still being repaid.
    pub fn is_active(&self) -> bool {
        self.meta.status() == RequestStatus::Approved
            && self.repayment.remaining_amount > Decimal::ZERO
    }

    /// Deduction due this month: the instalment, capped at the balance.
    pub fn due_deduction(&self) -> Decimal {
        if self.is_active() {
            self.monthly_deduction.min(self.repayment.remaining_amount)
        } else {
            Decimal::ZERO
        }
    }

    /// Record a repayment against an approved advance.
    pub fn record_repayment(
        &mut self,
        draft: RepaymentDraft,
        now: DateTime<Utc>,
    ) -> Result<(), RecordError> {
        if !self.is_active() {
            return Err(RecordError::state(format!(
                "advance {} has no outstanding approved balance",
                self.meta.id()
            )));
        }
        let amount = positive_amount("amount", draft.amount)?;
        if amount > self.repayment.remaining_amount {
            return Err(RecordError::invalid(
                "amount",
                format!(
                    "must not exceed the remaining balance of {}",
                    self.repayment.remaining_amount
                ),
            ));
        }

        self.repayment.paid_amount += amount;
        self.repayment.remaining_amount -= amount;
        self.repayment.next_payment_date = if self.repayment.remaining_amount.is_zero() {
            None
        } else {
            Some(first_of_next_month(draft.paid_on))
        };
        self.repayment.history.push(RepaymentEntry {
            amount,
            paid_on: draft.paid_on,
            note: optional_text(draft.note),
            recorded_at: now,
        });
        self.meta.touch(now);
        Ok(())
    }

    /// Rebuild an advance decided and partly repaid elsewhere.
    ///
    /// Used by example-data seeding; the repayments are replayed so the
    /// ledger invariants still hold.
    pub fn restore(
        mut self,
        status: RequestStatus,
        review: Review,
        repayments: Vec<RepaymentDraft>,
        now: DateTime<Utc>,
    ) -> Result<Self, RecordError> {
        self.meta.restore_decision(status, review.clone());
        if status == RequestStatus::Approved {
            let decided_on = review.reviewed_at.unwrap_or(now).date_naive();
            self.on_approved(decided_on);
        }
        for repayment in repayments {
            self.record_repayment(repayment, now)?;
        }
        Ok(self)
    }
}

impl Approvable for AdvanceRequest {
    fn on_approved(&mut self, decided_on: NaiveDate) {
        self.repayment.next_payment_date = Some(first_of_next_month(decided_on));
    }
}

impl Creatable for AdvanceRequest {
    type Draft = AdvanceDraft;

    fn create(id: RecordId, draft: AdvanceDraft, now: DateTime<Utc>) -> Result<Self, RecordError> {
        let amount = positive_amount("amount", draft.amount)?;
        let monthly_deduction = positive_amount("monthlyDeduction", draft.monthly_deduction)?;
        if monthly_deduction > amount {
            return Err(RecordError::invalid(
                "monthlyDeduction",
                "must not exceed the advance amount",
            ));
        }
        let reason = required_text("reason", draft.reason)?;
        Ok(Self {
            meta: RecordMeta::new(id, draft.employee, now),
            amount,
            monthly_deduction,
            reason,
            repayment: Repayment::outstanding(amount),
        })
    }

    fn ensure_deletable(&self) -> Result<(), RecordError> {
        if self.is_active() {
            return Err(RecordError::NotDeletable {
                kind: Self::KIND,
                reason: format!(
                    "{} remains outstanding",
                    self.repayment.remaining_amount
                ),
            });
        }
        Ok(())
    }
}
