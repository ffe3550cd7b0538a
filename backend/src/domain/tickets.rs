//! Air ticket requests.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::EmployeeRef;
use super::labels::labelled_enum;
use super::money::MAX_AMOUNT;
use super::records::{
    Approvable, Creatable, RecordError, RecordId, RecordKind, RecordMeta, employee_record,
    required_text,
};

labelled_enum! {
    /// Cabin class requested.
    pub enum TravelClass ("travel class") {
        Economy => "economy",
        PremiumEconomy => "premium_economy",
        Business => "business",
    }
}

labelled_enum! {
    /// Reason for travel.
    pub enum TravelPurpose ("travel purpose") {
        AnnualLeave => "annual_leave",
        Business => "business",
        Emergency => "emergency",
    }
}

/// Submission payload for a ticket request.
#[derive(Debug, Clone)]
pub struct TicketDraft {
    pub employee: EmployeeRef,
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub travel_class: TravelClass,
    pub purpose: TravelPurpose,
    pub estimated_cost: Decimal,
}

/// Air ticket request. Approved tickets are closed once travel completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketRequest {
    meta: RecordMeta,
    origin: String,
    destination: String,
    departure_date: NaiveDate,
    return_date: Option<NaiveDate>,
    travel_class: TravelClass,
    purpose: TravelPurpose,
    estimated_cost: Decimal,
}

employee_record!(TicketRequest, RecordKind::Ticket);

impl TicketRequest {
    pub fn origin(&self) -> &str {
        self.origin.as_str()
    }

    pub fn destination(&self) -> &str {
        self.destination.as_str()
    }

    pub fn departure_date(&self) -> NaiveDate {
        self.departure_date
    }

    pub fn return_date(&self) -> Option<NaiveDate> {
        self.return_date
    }

    pub fn travel_class(&self) -> TravelClass {
        self.travel_class
    }

    pub fn purpose(&self) -> TravelPurpose {
        self.purpose
    }

    pub fn estimated_cost(&self) -> Decimal {
        self.estimated_cost
    }
}

impl Approvable for TicketRequest {}

impl Creatable for TicketRequest {
    type Draft = TicketDraft;

    fn create(id: RecordId, draft: TicketDraft, now: DateTime<Utc>) -> Result<Self, RecordError> {
        let origin = required_text("origin", draft.origin)?;
        let destination = required_text("destination", draft.destination)?;
        if origin.eq_ignore_ascii_case(&destination) {
            return Err(RecordError::invalid("destination", "must differ from the origin"));
        }
        if draft.return_date.is_some_and(|ret| ret < draft.departure_date) {
            return Err(RecordError::invalid(
                "returnDate",
                "must not be before the departure date",
            ));
        }
        if draft.estimated_cost.is_sign_negative() && !draft.estimated_cost.is_zero() {
            return Err(RecordError::invalid("estimatedCost", "must not be negative"));
        }
        if draft.estimated_cost > MAX_AMOUNT {
            return Err(RecordError::invalid(
                "estimatedCost",
                format!("must not exceed {MAX_AMOUNT}"),
            ));
        }
        Ok(Self {
            meta: RecordMeta::new(id, draft.employee, now),
            origin,
            destination,
            departure_date: draft.departure_date,
            return_date: draft.return_date,
            travel_class: draft.travel_class,
            purpose: draft.purpose,
            estimated_cost: draft.estimated_cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;
    use crate::domain::EmployeeId;
    use crate::domain::records::{
        Decision, DecisionAction, EmployeeRecord, RecordIdGenerator, RequestStatus,
    };

    fn draft(origin: &str, destination: &str, ret: Option<u32>, cost: i64) -> TicketDraft {
        TicketDraft {
            employee: EmployeeRef {
                employee_id: EmployeeId::new("EMP-0005").expect("valid id"),
                employee_name: "Ken Thompson".to_owned(),
                department: "Operations".to_owned(),
            },
            origin: origin.to_owned(),
            destination: destination.to_owned(),
            departure_date: NaiveDate::from_ymd_opt(2026, 6, 10).expect("valid date"),
            return_date: ret.map(|day| NaiveDate::from_ymd_opt(2026, 6, day).expect("valid date")),
            travel_class: TravelClass::Economy,
            purpose: TravelPurpose::AnnualLeave,
            estimated_cost: Decimal::new(cost, 0),
        }
    }

    fn create(draft: TicketDraft) -> Result<TicketRequest, RecordError> {
        let now = Utc
            .with_ymd_and_hms(2026, 5, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        TicketRequest::create(RecordIdGenerator::new(RecordKind::Ticket).next(now), draft, now)
    }

    #[rstest]
    #[case(draft("DXB", "LHR", Some(20), 900), None)]
    #[case(draft("DXB", "dxb", None, 900), Some("destination"))]
    #[case(draft("DXB", "LHR", Some(9), 900), Some("returnDate"))]
    #[case(draft("DXB", "LHR", Some(10), -1), Some("estimatedCost"))]
    #[case(draft("DXB", "LHR", Some(10), 1_000_000_001), Some("estimatedCost"))]
    #[case(draft(" ", "LHR", None, 0), Some("origin"))]
    fn validates_itinerary(#[case] draft: TicketDraft, #[case] failing_field: Option<&str>) {
        match (create(draft), failing_field) {
            (Ok(_), None) => {}
            (Err(RecordError::Invalid { field, .. }), Some(expected)) => assert_eq!(field, expected),
            (other, expected) => panic!("unexpected {other:?} for {expected:?}"),
        }
    }

    #[rstest]
    fn approved_tickets_close() {
        let mut ticket = create(draft("DXB", "LHR", Some(20), 900)).expect("valid ticket");
        let now = Utc::now();
        for action in [DecisionAction::Approve, DecisionAction::Close] {
            ticket
                .apply_decision(
                    &Decision {
                        action,
                        comment: None,
                        decided_by: "manager".to_owned(),
                    },
                    now,
                )
                .expect("valid transition");
        }
        assert_eq!(ticket.status(), RequestStatus::Closed);
    }
}
