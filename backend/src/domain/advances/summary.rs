//! Per-employee loan aggregation.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::AdvanceRequest;
use crate::domain::records::{EmployeeRecord, NextDatePolicy, RequestStatus};
use crate::domain::{EmployeeId, EmployeeRef};

/// Running loan totals for one employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanSummary {
    /// Owner snapshot from the employee's first approved advance.
    pub employee: EmployeeRef,
    pub total_requested: Decimal,
    pub total_paid: Decimal,
    pub total_remaining: Decimal,
    /// Approved advances with a remaining balance.
    pub active_loans: usize,
    pub next_payment_date: Option<NaiveDate>,
    /// Sum of instalments across active advances.
    pub monthly_deduction: Decimal,
}

impl LoanSummary {
    fn empty(employee: EmployeeRef) -> Self {
        Self {
            employee,
            total_requested: Decimal::ZERO,
            total_paid: Decimal::ZERO,
            total_remaining: Decimal::ZERO,
            active_loans: 0,
            next_payment_date: None,
            monthly_deduction: Decimal::ZERO,
        }
    }

    fn absorb(&mut self, advance: &AdvanceRequest, policy: NextDatePolicy) {
        let repayment = advance.repayment();
        self.total_requested += advance.amount();
        self.total_paid += repayment.paid_amount();
        self.total_remaining += repayment.remaining_amount();
        if advance.is_active() {
            self.active_loans += 1;
            self.monthly_deduction += advance.monthly_deduction();
        }
        self.next_payment_date = policy.fold(self.next_payment_date, repayment.next_payment_date());
    }
}

/// Fold approved advances into one summary per employee.
///
/// Only `approved` advances contribute. Summaries appear in order of each
/// employee's first approved advance in `advances`, and employees without
/// approved advances are omitted. Runs in a single pass.
///
/// # Examples
/// ```
/// use hr_console::domain::{AdvanceRequest, NextDatePolicy, summarise_loans};
///
/// let advances: Vec<AdvanceRequest> = Vec::new();
/// let summaries = summarise_loans(&advances, NextDatePolicy::default());
/// assert!(summaries.is_empty());
/// ```
pub fn summarise_loans<'a, I>(advances: I, policy: NextDatePolicy) -> Vec<LoanSummary>
where
    I: IntoIterator<Item = &'a AdvanceRequest>,
{
    let mut summaries: Vec<LoanSummary> = Vec::new();
    let mut positions: HashMap<EmployeeId, usize> = HashMap::new();

    for advance in advances {
        if advance.status() != RequestStatus::Approved {
            continue;
        }
        let owner = advance.employee();
        let position = *positions
            .entry(owner.employee_id.clone())
            .or_insert_with(|| {
                let next = summaries.len();
                summaries.push(LoanSummary::empty(owner.clone()));
                next
            });
        if let Some(summary) = summaries.get_mut(position) {
            summary.absorb(advance, policy);
        }
    }

    summaries
}
