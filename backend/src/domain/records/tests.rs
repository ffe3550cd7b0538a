//! Tests for record identifiers, status transitions and decisions.

use std::collections::HashSet;

use chrono::{Duration, TimeZone};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;

#[derive(Debug, Clone, PartialEq)]
struct Probe {
    meta: RecordMeta,
    approved_on: Option<NaiveDate>,
}

employee_record!(Probe, RecordKind::Expense);

impl Approvable for Probe {
    fn on_approved(&mut self, decided_on: NaiveDate) {
        self.approved_on = Some(decided_on);
    }
}

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 10, 30, 0)
        .single()
        .expect("valid timestamp")
}

#[fixture]
fn owner() -> EmployeeRef {
    EmployeeRef {
        employee_id: EmployeeId::new("EMP-0001").expect("valid id"),
        employee_name: "Ada Lovelace".to_owned(),
        department: "Engineering".to_owned(),
    }
}

#[fixture]
fn probe(now: DateTime<Utc>, owner: EmployeeRef) -> Probe {
    let id = RecordIdGenerator::new(RecordKind::Expense).next(now);
    Probe {
        meta: RecordMeta::new(id, owner, now),
        approved_on: None,
    }
}

fn decision(action: DecisionAction) -> Decision {
    Decision {
        action,
        comment: Some("looks fine".to_owned()),
        decided_by: "manager".to_owned(),
    }
}

#[rstest]
#[case(RequestStatus::Pending, DecisionAction::Approve, RecordKind::Leave, Some(RequestStatus::Approved))]
#[case(RequestStatus::Pending, DecisionAction::Reject, RecordKind::Advance, Some(RequestStatus::Rejected))]
#[case(RequestStatus::Approved, DecisionAction::Reimburse, RecordKind::Expense, Some(RequestStatus::Reimbursed))]
#[case(RequestStatus::Approved, DecisionAction::Close, RecordKind::Ticket, Some(RequestStatus::Closed))]
#[case(RequestStatus::Approved, DecisionAction::Approve, RecordKind::Leave, None)]
#[case(RequestStatus::Rejected, DecisionAction::Approve, RecordKind::Leave, None)]
#[case(RequestStatus::Approved, DecisionAction::Reimburse, RecordKind::Ticket, None)]
#[case(RequestStatus::Approved, DecisionAction::Close, RecordKind::Expense, None)]
#[case(RequestStatus::Pending, DecisionAction::Reimburse, RecordKind::Expense, None)]
#[case(RequestStatus::Reimbursed, DecisionAction::Reimburse, RecordKind::Expense, None)]
fn transitions(
    #[case] from: RequestStatus,
    #[case] action: DecisionAction,
    #[case] kind: RecordKind,
    #[case] expected: Option<RequestStatus>,
) {
    assert_eq!(from.transition(kind, action).ok(), expected);
}

#[rstest]
fn apply_decision_records_review_and_runs_hook(mut probe: Probe, now: DateTime<Utc>) {
    let later = now + Duration::hours(2);

    let status = probe
        .apply_decision(&decision(DecisionAction::Approve), later)
        .expect("pending records can be approved");

    assert_eq!(status, RequestStatus::Approved);
    assert_eq!(probe.meta.review().reviewed_by.as_deref(), Some("manager"));
    assert_eq!(probe.meta.review().reviewed_at, Some(later));
    assert_eq!(probe.meta.updated_at(), later);
    assert_eq!(probe.approved_on, Some(later.date_naive()));
}

#[rstest]
fn repeated_decision_conflicts_and_keeps_first(mut probe: Probe, now: DateTime<Utc>) {
    probe
        .apply_decision(&decision(DecisionAction::Reject), now)
        .expect("first decision succeeds");
    let before = probe.clone();

    let err = probe
        .apply_decision(&decision(DecisionAction::Reject), now + Duration::minutes(5))
        .expect_err("repeated decision fails");

    assert!(matches!(err, RecordError::Transition(_)));
    assert_eq!(probe, before);
    assert_eq!(Error::from(err).code(), ErrorCode::Conflict);
}

#[rstest]
fn rejection_does_not_run_approval_hook(mut probe: Probe, now: DateTime<Utc>) {
    probe
        .apply_decision(&decision(DecisionAction::Reject), now)
        .expect("reject succeeds");
    assert!(probe.approved_on.is_none());
}

#[rstest]
fn generator_ids_are_unique_within_one_millisecond(now: DateTime<Utc>) {
    let generator = RecordIdGenerator::new(RecordKind::Advance);

    let ids: Vec<RecordId> = (0..50).map(|_| generator.next(now)).collect();

    let unique: HashSet<&RecordId> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
    assert!(ids.windows(2).all(|pair| match pair {
        [first, second] => first.millis() < second.millis(),
        _ => false,
    }));
    assert_eq!(ids.first().map(RecordId::millis), Some(now.timestamp_millis()));
}

#[rstest]
fn generator_survives_clock_stepping_back(now: DateTime<Utc>) {
    let generator = RecordIdGenerator::new(RecordKind::Leave);
    let first = generator.next(now);
    let second = generator.next(now - Duration::seconds(30));
    assert!(second.millis() > first.millis());
    assert!(second.as_str().starts_with("LV-"));
}

#[rstest]
#[case("ADV-1767225600000", Ok(RecordKind::Advance))]
#[case(" OT-42 ", Ok(RecordKind::Overtime))]
#[case("ADV1767", Err(RecordIdError::MissingSeparator))]
#[case("XYZ-1", Err(RecordIdError::UnknownPrefix { prefix: "XYZ".to_owned() }))]
#[case("DOC-", Err(RecordIdError::InvalidMillis))]
#[case("DOC--5", Err(RecordIdError::InvalidMillis))]
fn parses_record_ids(#[case] raw: &str, #[case] expected: Result<RecordKind, RecordIdError>) {
    assert_eq!(RecordId::parse(raw).map(|id| id.kind()), expected);
}

#[rstest]
#[case(RecordKind::Advance, true)]
#[case(RecordKind::Leave, true)]
#[case(RecordKind::Overtime, false)]
#[case(RecordKind::Attendance, false)]
fn delete_rules(#[case] kind: RecordKind, #[case] allowed: bool) {
    assert_eq!(kind.allows_delete(), allowed);
}

#[rstest]
fn filter_matches_owner_and_status(probe: Probe) {
    let own = RecordFilter::for_employee(EmployeeId::new("EMP-0001").expect("valid id"));
    let other = RecordFilter::for_employee(EmployeeId::new("EMP-0002").expect("valid id"));
    let approved = RecordFilter {
        status: Some(RequestStatus::Approved),
        ..RecordFilter::default()
    };

    assert!(own.matches(&probe));
    assert!(!other.matches(&probe));
    assert!(!approved.matches(&probe));
    assert!(RecordFilter::default().matches(&probe));
}

#[rstest]
fn invalid_errors_map_to_field_details() {
    let error = Error::from(RecordError::invalid("amount", "must be greater than zero"));
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        error.details(),
        Some(&json!({ "field": "amount", "code": "invalid_value" }))
    );
}

#[rstest]
#[case("  travel  ", Ok("travel".to_owned()))]
#[case("   ", Err(RecordError::invalid("reason", "must not be empty")))]
fn required_text_trims(#[case] raw: &str, #[case] expected: Result<String, RecordError>) {
    assert_eq!(required_text("reason", raw.to_owned()), expected);
}

#[rstest]
fn optional_text_drops_blank_values() {
    assert_eq!(optional_text(Some("  ".to_owned())), None);
    assert_eq!(optional_text(Some(" x ".to_owned())), Some("x".to_owned()));
}
