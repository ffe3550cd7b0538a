//! Overtime requests and pay calculation.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::EmployeeRef;
use super::labels::labelled_enum;
use super::records::{
    Approvable, Creatable, RecordError, RecordId, RecordKind, RecordMeta, employee_record,
    positive_amount, required_text,
};

/// Standard working hours in a month, used to derive the hourly rate.
pub const STANDARD_MONTHLY_HOURS: Decimal = Decimal::from_parts(240, 0, 0, false, 0);

/// Longest overtime claim accepted for a single day.
pub const MAX_OVERTIME_HOURS: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

labelled_enum! {
    /// Day type the overtime was worked on.
    pub enum OvertimeKind ("overtime kind") {
        Weekday => "weekday",
        Weekend => "weekend",
        Holiday => "holiday",
    }
}

impl OvertimeKind {
    /// Pay multiplier applied to the hourly rate.
    pub fn multiplier(self) -> Decimal {
        match self {
            Self::Weekday => Decimal::new(125, 2),
            Self::Weekend => Decimal::new(15, 1),
            Self::Holiday => Decimal::new(2, 0),
        }
    }
}

/// Overtime pay: `hours × salary / 240 × multiplier`, unrounded.
///
/// # Examples
/// ```
/// use hr_console::domain::{OvertimeKind, overtime_pay};
/// use rust_decimal::Decimal;
///
/// let pay = overtime_pay(Decimal::new(4, 0), OvertimeKind::Weekend, Decimal::new(4800, 0));
/// assert_eq!(pay, Decimal::new(120, 0));
/// ```
pub fn overtime_pay(hours: Decimal, kind: OvertimeKind, monthly_salary: Decimal) -> Decimal {
    hours * monthly_salary / STANDARD_MONTHLY_HOURS * kind.multiplier()
}

/// Submission payload for an overtime claim.
#[derive(Debug, Clone)]
pub struct OvertimeDraft {
    pub employee: EmployeeRef,
    pub work_date: NaiveDate,
    pub hours: Decimal,
    pub kind: OvertimeKind,
    pub reason: String,
}

/// Overtime claim. Kept for audit, never deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OvertimeRequest {
    meta: RecordMeta,
    work_date: NaiveDate,
    hours: Decimal,
    kind: OvertimeKind,
    reason: String,
}

employee_record!(OvertimeRequest, RecordKind::Overtime);

impl OvertimeRequest {
    pub fn work_date(&self) -> NaiveDate {
        self.work_date
    }

    pub fn hours(&self) -> Decimal {
        self.hours
    }

    pub fn kind(&self) -> OvertimeKind {
        self.kind
    }

    pub fn reason(&self) -> &str {
        self.reason.as_str()
    }

    pub fn pay_for(&self, monthly_salary: Decimal) -> Decimal {
        overtime_pay(self.hours, self.kind, monthly_salary)
    }
}

impl Approvable for OvertimeRequest {}

impl Creatable for OvertimeRequest {
    type Draft = OvertimeDraft;

    fn create(id: RecordId, draft: OvertimeDraft, now: DateTime<Utc>) -> Result<Self, RecordError> {
        let hours = positive_amount("hours", draft.hours)?;
        if hours > MAX_OVERTIME_HOURS {
            return Err(RecordError::invalid(
                "hours",
                format!("must not exceed {MAX_OVERTIME_HOURS}"),
            ));
        }
        if draft.work_date > now.date_naive() {
            return Err(RecordError::invalid("workDate", "must not be in the future"));
        }
        Ok(Self {
            meta: RecordMeta::new(id, draft.employee, now),
            work_date: draft.work_date,
            hours,
            kind: draft.kind,
            reason: required_text("reason", draft.reason)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;
    use crate::domain::EmployeeId;
    use crate::domain::records::RecordIdGenerator;

    #[rstest]
    #[case(OvertimeKind::Weekday, Decimal::new(125, 0))]
    #[case(OvertimeKind::Weekend, Decimal::new(150, 0))]
    #[case(OvertimeKind::Holiday, Decimal::new(200, 0))]
    fn pay_applies_multiplier(#[case] kind: OvertimeKind, #[case] expected: Decimal) {
        // 4,800 / 240 = 20 per hour; five hours = 100 before the multiplier.
        assert_eq!(overtime_pay(Decimal::new(5, 0), kind, Decimal::new(4800, 0)), expected);
    }

    #[rstest]
    #[case(Decimal::ZERO, false)]
    #[case(Decimal::new(125, 1), false)]
    #[case(Decimal::new(12, 0), true)]
    #[case(Decimal::new(5, 1), true)]
    fn hours_must_be_within_a_day(#[case] hours: Decimal, #[case] ok: bool) {
        let now = Utc
            .with_ymd_and_hms(2026, 4, 2, 18, 0, 0)
            .single()
            .expect("valid timestamp");
        let result = OvertimeRequest::create(
            RecordIdGenerator::new(RecordKind::Overtime).next(now),
            OvertimeDraft {
                employee: EmployeeRef {
                    employee_id: EmployeeId::new("EMP-0006").expect("valid id"),
                    employee_name: "Barbara Liskov".to_owned(),
                    department: "Engineering".to_owned(),
                },
                work_date: NaiveDate::from_ymd_opt(2026, 4, 1).expect("valid date"),
                hours,
                kind: OvertimeKind::Weekday,
                reason: "release".to_owned(),
            },
            now,
        );
        assert_eq!(result.is_ok(), ok);
    }
}
