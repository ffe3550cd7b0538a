//! Leave requests and yearly balances.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use super::labels::labelled_enum;
use super::records::{
    Approvable, Creatable, EmployeeRecord, RecordError, RecordId, RecordKind, RecordMeta,
    RequestStatus, employee_record, required_text,
};
use super::{EmployeeId, EmployeeRef};

labelled_enum! {
    /// Leave category.
    pub enum LeaveType ("leave type") {
        Annual => "annual",
        Sick => "sick",
        Emergency => "emergency",
        Unpaid => "unpaid",
        Maternity => "maternity",
        Paternity => "paternity",
    }
}

impl LeaveType {
    /// Days granted per calendar year; `None` when not capped.
    pub const fn annual_entitlement(self) -> Option<u32> {
        match self {
            Self::Annual => Some(30),
            Self::Sick => Some(15),
            Self::Emergency => Some(5),
            Self::Unpaid | Self::Maternity | Self::Paternity => None,
        }
    }
}

/// Inclusive calendar days between two dates; zero when `end < start`.
fn inclusive_days(start: NaiveDate, end: NaiveDate) -> u32 {
    let span = end.signed_duration_since(start).num_days();
    u32::try_from(span.saturating_add(1)).unwrap_or(0)
}

/// Submission payload for a leave request.
#[derive(Debug, Clone)]
pub struct LeaveDraft {
    pub employee: EmployeeRef,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
}

/// Leave request covering an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveRequest {
    meta: RecordMeta,
    leave_type: LeaveType,
    start_date: NaiveDate,
    end_date: NaiveDate,
    days: u32,
    reason: String,
}

employee_record!(LeaveRequest, RecordKind::Leave);

impl LeaveRequest {
    pub fn leave_type(&self) -> LeaveType {
        self.leave_type
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Inclusive calendar days requested.
    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn reason(&self) -> &str {
        self.reason.as_str()
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Days of this leave falling inside `[from, to]`.
    pub fn days_within(&self, from: NaiveDate, to: NaiveDate) -> u32 {
        inclusive_days(self.start_date.max(from), self.end_date.min(to))
    }
}

impl Approvable for LeaveRequest {}

impl Creatable for LeaveRequest {
    type Draft = LeaveDraft;

    fn create(id: RecordId, draft: LeaveDraft, now: DateTime<Utc>) -> Result<Self, RecordError> {
        if draft.end_date < draft.start_date {
            return Err(RecordError::invalid(
                "endDate",
                "must not be before the start date",
            ));
        }
        Ok(Self {
            meta: RecordMeta::new(id, draft.employee, now),
            leave_type: draft.leave_type,
            start_date: draft.start_date,
            end_date: draft.end_date,
            days: inclusive_days(draft.start_date, draft.end_date),
            reason: required_text("reason", draft.reason)?,
        })
    }
}

/// Yearly balance for one leave type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveBalance {
    pub leave_type: LeaveType,
    pub entitlement: Option<u32>,
    /// Approved days on leave starting in the year.
    pub used: u32,
    /// Days awaiting review.
    pub pending: u32,
    /// Entitlement minus used, floored at zero; `None` when uncapped.
    pub remaining: Option<u32>,
}

/// Balances for every leave type for `employee_id` in `year`.
///
/// Requests count towards the year they start in.
pub fn leave_balances<'a, I>(requests: I, employee_id: &EmployeeId, year: i32) -> Vec<LeaveBalance>
where
    I: IntoIterator<Item = &'a LeaveRequest>,
{
    let mut balances: Vec<LeaveBalance> = LeaveType::ALL
        .iter()
        .map(|leave_type| LeaveBalance {
            leave_type: *leave_type,
            entitlement: leave_type.annual_entitlement(),
            used: 0,
            pending: 0,
            remaining: None,
        })
        .collect();

    let relevant = requests.into_iter().filter(|request| {
        &request.employee().employee_id == employee_id && request.start_date().year() == year
    });
    for request in relevant {
        let Some(balance) = balances
            .iter_mut()
            .find(|balance| balance.leave_type == request.leave_type())
        else {
            continue;
        };
        match request.status() {
            RequestStatus::Approved => balance.used = balance.used.saturating_add(request.days()),
            RequestStatus::Pending => {
                balance.pending = balance.pending.saturating_add(request.days());
            }
            _ => {}
        }
    }

    for balance in &mut balances {
        balance.remaining = balance
            .entitlement
            .map(|entitled| entitled.saturating_sub(balance.used));
    }
    balances
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::records::{Decision, DecisionAction, RecordIdGenerator};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn leave(
        ids: &RecordIdGenerator,
        now: DateTime<Utc>,
        employee: &str,
        leave_type: LeaveType,
        range: (NaiveDate, NaiveDate),
        approve: bool,
    ) -> LeaveRequest {
        let mut request = LeaveRequest::create(
            ids.next(now),
            LeaveDraft {
                employee: EmployeeRef {
                    employee_id: EmployeeId::new(employee).expect("valid id"),
                    employee_name: employee.to_owned(),
                    department: "People".to_owned(),
                },
                leave_type,
                start_date: range.0,
                end_date: range.1,
                reason: "rest".to_owned(),
            },
            now,
        )
        .expect("valid leave");
        if approve {
            request
                .apply_decision(
                    &Decision {
                        action: DecisionAction::Approve,
                        comment: None,
                        decided_by: "manager".to_owned(),
                    },
                    now,
                )
                .expect("approval succeeds");
        }
        request
    }

    #[rstest]
    fn days_are_inclusive(now: DateTime<Utc>) {
        let ids = RecordIdGenerator::new(RecordKind::Leave);
        let request = leave(
            &ids,
            now,
            "EMP-0001",
            LeaveType::Annual,
            (date(2026, 1, 28), date(2026, 2, 3)),
            false,
        );
        assert_eq!(request.days(), 7);
        assert_eq!(request.days_within(date(2026, 2, 1), date(2026, 2, 28)), 3);
        assert_eq!(request.days_within(date(2026, 3, 1), date(2026, 3, 31)), 0);
    }

    #[rstest]
    fn end_before_start_is_rejected(now: DateTime<Utc>) {
        let result = LeaveRequest::create(
            RecordIdGenerator::new(RecordKind::Leave).next(now),
            LeaveDraft {
                employee: EmployeeRef {
                    employee_id: EmployeeId::new("EMP-0001").expect("valid id"),
                    employee_name: "A".to_owned(),
                    department: "People".to_owned(),
                },
                leave_type: LeaveType::Sick,
                start_date: date(2026, 2, 2),
                end_date: date(2026, 2, 1),
                reason: "flu".to_owned(),
            },
            now,
        );
        assert!(result.is_err());
    }

    #[rstest]
    fn balances_floor_remaining_and_ignore_other_years(now: DateTime<Utc>) {
        let ids = RecordIdGenerator::new(RecordKind::Leave);
        let requests = vec![
            leave(&ids, now, "EMP-0001", LeaveType::Emergency, (date(2026, 3, 1), date(2026, 3, 7)), true),
            leave(&ids, now, "EMP-0001", LeaveType::Annual, (date(2026, 4, 1), date(2026, 4, 10)), true),
            leave(&ids, now, "EMP-0001", LeaveType::Annual, (date(2026, 5, 1), date(2026, 5, 2)), false),
            leave(&ids, now, "EMP-0001", LeaveType::Annual, (date(2025, 12, 1), date(2025, 12, 5)), true),
            leave(&ids, now, "EMP-0002", LeaveType::Annual, (date(2026, 6, 1), date(2026, 6, 9)), true),
            leave(&ids, now, "EMP-0001", LeaveType::Unpaid, (date(2026, 7, 1), date(2026, 7, 3)), true),
        ];
        let employee = EmployeeId::new("EMP-0001").expect("valid id");

        let balances = leave_balances(&requests, &employee, 2026);

        let by_type = |leave_type: LeaveType| {
            balances
                .iter()
                .find(|balance| balance.leave_type == leave_type)
                .cloned()
                .expect("every type has a balance")
        };
        assert_eq!(balances.len(), LeaveType::ALL.len());
        let annual = by_type(LeaveType::Annual);
        assert_eq!((annual.used, annual.pending, annual.remaining), (10, 2, Some(20)));
        let emergency = by_type(LeaveType::Emergency);
        assert_eq!((emergency.used, emergency.remaining), (7, Some(0)));
        let unpaid = by_type(LeaveType::Unpaid);
        assert_eq!((unpaid.used, unpaid.remaining), (3, None));
    }
}
