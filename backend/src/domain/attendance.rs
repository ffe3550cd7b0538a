//! Daily attendance records.
//!
//! Attendance has no approval flow. A check-in opens the day's record, a
//! check-out closes it, and managers may mark absences or leave days by
//! hand. Times are recorded in UTC.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use rust_decimal::Decimal;

use super::labels::labelled_enum;
use super::money::round_money;
use super::records::{RecordError, RecordId, StoredRecord, optional_text};
use super::{EmployeeId, EmployeeRef};

/// Check-ins after 09:15 (09:00 shift start plus grace) count as late.
const LATE_AFTER_SECONDS: u32 = 9 * 3600 + 15 * 60;

/// Shifts shorter than this become half days at check-out.
const HALF_DAY_MINUTES: i64 = 4 * 60;

labelled_enum! {
    /// Attendance outcome for one employee-day.
    pub enum AttendanceStatus ("attendance status") {
        Present => "present",
        Late => "late",
        HalfDay => "half_day",
        Absent => "absent",
        OnLeave => "on_leave",
    }
}

impl AttendanceStatus {
    /// Whether the employee was at work.
    pub const fn is_present(self) -> bool {
        matches!(self, Self::Present | Self::Late | Self::HalfDay)
    }
}

/// Check-in request.
#[derive(Debug, Clone)]
pub struct CheckIn {
    pub employee: EmployeeRef,
    pub at: DateTime<Utc>,
    pub note: Option<String>,
}

/// Check-out request.
#[derive(Debug, Clone)]
pub struct CheckOut {
    pub employee_id: EmployeeId,
    pub at: DateTime<Utc>,
}

/// Manual attendance entry for a day without a check-in.
#[derive(Debug, Clone)]
pub struct AttendanceMark {
    pub employee: EmployeeRef,
    pub work_date: NaiveDate,
    pub status: AttendanceStatus,
    pub note: Option<String>,
}

/// One employee-day of attendance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    id: RecordId,
    employee: EmployeeRef,
    work_date: NaiveDate,
    check_in: Option<NaiveTime>,
    check_out: Option<NaiveTime>,
    status: AttendanceStatus,
    note: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AttendanceRecord {
    /// Open the day's record at the check-in time.
    pub fn check_in(id: RecordId, request: CheckIn) -> Self {
        let time = request.at.time();
        let status = if time.num_seconds_from_midnight() > LATE_AFTER_SECONDS {
            AttendanceStatus::Late
        } else {
            AttendanceStatus::Present
        };
        Self {
            id,
            employee: request.employee,
            work_date: request.at.date_naive(),
            check_in: Some(time),
            check_out: None,
            status,
            note: optional_text(request.note),
            created_at: request.at,
            updated_at: request.at,
        }
    }

    /// Record an absence or leave day.
    pub fn mark(id: RecordId, mark: AttendanceMark, now: DateTime<Utc>) -> Result<Self, RecordError> {
        if mark.status.is_present() {
            return Err(RecordError::invalid(
                "status",
                "only absent or on_leave days can be marked manually",
            ));
        }
        Ok(Self {
            id,
            employee: mark.employee,
            work_date: mark.work_date,
            check_in: None,
            check_out: None,
            status: mark.status,
            note: optional_text(mark.note),
            created_at: now,
            updated_at: now,
        })
    }

    /// Close the day's record.
    pub fn check_out(&mut self, at: DateTime<Utc>) -> Result<(), RecordError> {
        let Some(check_in) = self.check_in else {
            return Err(RecordError::state(format!(
                "{} has no check-in on {}",
                self.employee.employee_id, self.work_date
            )));
        };
        if self.check_out.is_some() {
            return Err(RecordError::state(format!(
                "{} already checked out on {}",
                self.employee.employee_id, self.work_date
            )));
        }
        let time = at.time();
        if time < check_in {
            return Err(RecordError::invalid("at", "must not be before the check-in time"));
        }
        if (time - check_in).num_minutes() < HALF_DAY_MINUTES {
            self.status = AttendanceStatus::HalfDay;
        }
        self.check_out = Some(time);
        self.updated_at = at;
        Ok(())
    }

    pub fn employee(&self) -> &EmployeeRef {
        &self.employee
    }

    pub fn work_date(&self) -> NaiveDate {
        self.work_date
    }

    pub fn check_in_time(&self) -> Option<NaiveTime> {
        self.check_in
    }

    pub fn check_out_time(&self) -> Option<NaiveTime> {
        self.check_out
    }

    pub fn status(&self) -> AttendanceStatus {
        self.status
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Hours between check-in and check-out, to two decimal places.
    pub fn worked_hours(&self) -> Option<Decimal> {
        let (start, end) = self.check_in.zip(self.check_out)?;
        let minutes = (end - start).num_minutes();
        Some(round_money(Decimal::from(minutes) / Decimal::from(60)))
    }
}

impl StoredRecord for AttendanceRecord {
    type Id = RecordId;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

/// Attendance list filter; date bounds are inclusive.
#[derive(Debug, Clone, Default)]
pub struct AttendanceFilter {
    pub employee_id: Option<EmployeeId>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl AttendanceFilter {
    pub fn matches(&self, record: &AttendanceRecord) -> bool {
        let employee_ok = self
            .employee_id
            .as_ref()
            .is_none_or(|id| id == &record.employee.employee_id);
        let from_ok = self.from.is_none_or(|from| record.work_date >= from);
        let to_ok = self.to.is_none_or(|to| record.work_date <= to);
        employee_ok && from_ok && to_ok
    }
}

/// Attendance totals for one employee over a date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceSummary {
    pub employee: EmployeeRef,
    /// Present, late and half days.
    pub present_days: u32,
    pub late_days: u32,
    pub half_days: u32,
    pub absent_days: u32,
    pub leave_days: u32,
    pub worked_hours: Decimal,
}

/// Fold records dated within `[from, to]` into per-employee summaries, in
/// first-appearance order.
pub fn summarise_attendance<'a, I>(
    records: I,
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<AttendanceSummary>
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    let mut summaries: Vec<AttendanceSummary> = Vec::new();
    let mut positions: HashMap<EmployeeId, usize> = HashMap::new();

    let in_range = records
        .into_iter()
        .filter(|record| record.work_date >= from && record.work_date <= to);
    for record in in_range {
        let position = *positions
            .entry(record.employee.employee_id.clone())
            .or_insert_with(|| {
                let next = summaries.len();
                summaries.push(AttendanceSummary {
                    employee: record.employee.clone(),
                    present_days: 0,
                    late_days: 0,
                    half_days: 0,
                    absent_days: 0,
                    leave_days: 0,
                    worked_hours: Decimal::ZERO,
                });
                next
            });
        let Some(summary) = summaries.get_mut(position) else {
            continue;
        };
        match record.status {
            AttendanceStatus::Present => summary.present_days += 1,
            AttendanceStatus::Late => {
                summary.present_days += 1;
                summary.late_days += 1;
            }
            AttendanceStatus::HalfDay => {
                summary.present_days += 1;
                summary.half_days += 1;
            }
            AttendanceStatus::Absent => summary.absent_days += 1,
            AttendanceStatus::OnLeave => summary.leave_days += 1,
        }
        if let Some(hours) = record.worked_hours() {
            summary.worked_hours = round_money(summary.worked_hours + hours);
        }
    }

    summaries
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;
    use crate::domain::records::{RecordIdGenerator, RecordKind};

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, hour, minute, 0)
            .single()
            .expect("valid timestamp")
    }

    fn employee(id: &str) -> EmployeeRef {
        EmployeeRef {
            employee_id: EmployeeId::new(id).expect("valid id"),
            employee_name: id.to_owned(),
            department: "Operations".to_owned(),
        }
    }

    fn checked_in(ids: &RecordIdGenerator, id: &str, at: DateTime<Utc>) -> AttendanceRecord {
        AttendanceRecord::check_in(
            ids.next(at),
            CheckIn {
                employee: employee(id),
                at,
                note: None,
            },
        )
    }

    #[rstest]
    #[case(9, 0, AttendanceStatus::Present)]
    #[case(9, 15, AttendanceStatus::Present)]
    #[case(9, 16, AttendanceStatus::Late)]
    fn check_in_applies_grace_period(
        #[case] hour: u32,
        #[case] minute: u32,
        #[case] expected: AttendanceStatus,
    ) {
        let ids = RecordIdGenerator::new(RecordKind::Attendance);
        let record = checked_in(&ids, "EMP-0001", at(2, hour, minute));
        assert_eq!(record.status(), expected);
    }

    #[rstest]
    fn short_shift_becomes_half_day() {
        let ids = RecordIdGenerator::new(RecordKind::Attendance);
        let mut record = checked_in(&ids, "EMP-0001", at(2, 9, 0));

        record.check_out(at(2, 12, 30)).expect("check-out succeeds");

        assert_eq!(record.status(), AttendanceStatus::HalfDay);
        assert_eq!(record.worked_hours(), Some(Decimal::new(35, 1)));
    }

    #[rstest]
    fn second_check_out_conflicts() {
        let ids = RecordIdGenerator::new(RecordKind::Attendance);
        let mut record = checked_in(&ids, "EMP-0001", at(2, 9, 30));
        record.check_out(at(2, 18, 0)).expect("first check-out");

        let err = record.check_out(at(2, 19, 0)).expect_err("second check-out fails");

        assert!(matches!(err, RecordError::State { .. }));
        assert_eq!(record.status(), AttendanceStatus::Late);
    }

    #[rstest]
    fn check_out_before_check_in_is_invalid() {
        let ids = RecordIdGenerator::new(RecordKind::Attendance);
        let mut record = checked_in(&ids, "EMP-0001", at(2, 10, 0));
        let err = record.check_out(at(2, 8, 0)).expect_err("time travel fails");
        assert!(matches!(err, RecordError::Invalid { field: "at", .. }));
    }

    #[rstest]
    #[case(AttendanceStatus::Absent, true)]
    #[case(AttendanceStatus::OnLeave, true)]
    #[case(AttendanceStatus::Present, false)]
    fn manual_marks_are_limited(#[case] status: AttendanceStatus, #[case] ok: bool) {
        let ids = RecordIdGenerator::new(RecordKind::Attendance);
        let result = AttendanceRecord::mark(
            ids.next(at(3, 8, 0)),
            AttendanceMark {
                employee: employee("EMP-0001"),
                work_date: NaiveDate::from_ymd_opt(2026, 3, 3).expect("valid date"),
                status,
                note: Some("called in".to_owned()),
            },
            at(3, 8, 0),
        );
        assert_eq!(result.is_ok(), ok);
    }

    #[rstest]
    fn summary_counts_days_in_range() {
        let ids = RecordIdGenerator::new(RecordKind::Attendance);
        let mut monday = checked_in(&ids, "EMP-0001", at(2, 9, 0));
        monday.check_out(at(2, 17, 0)).expect("check-out");
        let mut tuesday = checked_in(&ids, "EMP-0001", at(3, 9, 45));
        tuesday.check_out(at(3, 17, 15)).expect("check-out");
        let outside = checked_in(&ids, "EMP-0001", at(20, 9, 0));
        let absent = AttendanceRecord::mark(
            ids.next(at(4, 8, 0)),
            AttendanceMark {
                employee: employee("EMP-0001"),
                work_date: NaiveDate::from_ymd_opt(2026, 3, 4).expect("valid date"),
                status: AttendanceStatus::Absent,
                note: None,
            },
            at(4, 8, 0),
        )
        .expect("valid mark");
        let records = vec![monday, tuesday, outside, absent];

        let summaries = summarise_attendance(
            &records,
            NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date"),
            NaiveDate::from_ymd_opt(2026, 3, 7).expect("valid date"),
        );

        let summary = summaries.first().expect("one employee");
        assert_eq!(summary.present_days, 2);
        assert_eq!(summary.late_days, 1);
        assert_eq!(summary.absent_days, 1);
        assert_eq!(summary.worked_hours, Decimal::new(155, 1));
    }
}
