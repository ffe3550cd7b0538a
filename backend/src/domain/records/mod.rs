//! Shared shape and lifecycle of employee request records.
//!
//! Advances, expenses, documents, tickets, overtime and leave all follow the
//! same pattern: a submission creates a `pending` record owned by an
//! employee snapshot, a reviewer moves it through [`RequestStatus`], and the
//! record keeps only the latest decision in its [`Review`].
//!
//! The traits here let one generic service and one generic store handle
//! every kind:
//!
//! - [`StoredRecord`] gives a store its identity key.
//! - [`EmployeeRecord`] exposes the owner, kind and [`RecordMeta`].
//! - [`Approvable`] applies decisions and runs per-kind approval hooks.
//! - [`Creatable`] validates a draft into a new record.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::json;

use super::money::MAX_AMOUNT;
use super::{EmployeeId, EmployeeRef, Error};

mod id;
mod next_date;
mod status;

pub use id::{RecordId, RecordIdError, RecordIdGenerator, RecordKind};
pub use next_date::NextDatePolicy;
pub use status::{DecisionAction, RequestStatus, TransitionError};

/// Latest review decision kept on a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Review {
    pub comment: Option<String>,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// A reviewer's decision on a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub action: DecisionAction,
    pub comment: Option<String>,
    pub decided_by: String,
}

/// Fields common to every request record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordMeta {
    id: RecordId,
    employee: EmployeeRef,
    status: RequestStatus,
    review: Review,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RecordMeta {
    /// Metadata for a freshly submitted, pending record.
    pub fn new(id: RecordId, employee: EmployeeRef, now: DateTime<Utc>) -> Self {
        Self {
            id,
            employee,
            status: RequestStatus::Pending,
            review: Review::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn employee(&self) -> &EmployeeRef {
        &self.employee
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn review(&self) -> &Review {
        &self.review
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    /// Replace the status without lifecycle checks. Used when loading
    /// records that were decided elsewhere.
    pub(crate) fn restore_decision(&mut self, status: RequestStatus, review: Review) {
        self.status = status;
        self.review = review;
    }
}

/// Errors raised by record validation and lifecycle rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// A submitted value is missing or out of range.
    Invalid { field: &'static str, reason: String },
    /// The decision is not allowed from the current status.
    Transition(TransitionError),
    /// The record may not be deleted.
    NotDeletable { kind: RecordKind, reason: String },
    /// A domain action is not allowed in the record's current state.
    State { reason: String },
}

impl RecordError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }

    pub fn state(reason: impl Into<String>) -> Self {
        Self::State {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid { field, reason } => write!(f, "{field}: {reason}"),
            Self::Transition(err) => err.fmt(f),
            Self::NotDeletable { kind, reason } => write!(f, "{kind} cannot be deleted: {reason}"),
            Self::State { reason } => f.write_str(reason),
        }
    }
}

impl std::error::Error for RecordError {}

impl From<TransitionError> for RecordError {
    fn from(value: TransitionError) -> Self {
        Self::Transition(value)
    }
}

impl From<RecordError> for Error {
    fn from(value: RecordError) -> Self {
        match &value {
            RecordError::Invalid { field, .. } => Error::invalid_request(value.to_string())
                .with_details(json!({ "field": field, "code": "invalid_value" })),
            RecordError::Transition(err) => Error::conflict(value.to_string()).with_details(json!({
                "status": err.from.as_str(),
                "action": err.action.as_str(),
            })),
            RecordError::NotDeletable { .. } | RecordError::State { .. } => {
                Error::conflict(value.to_string())
            }
        }
    }
}

/// A value a store can key by identifier.
pub trait StoredRecord: Clone + Send + Sync + 'static {
    type Id: Clone + Eq + fmt::Display + Send + Sync + 'static;

    fn id(&self) -> &Self::Id;
}

/// A request record owned by an employee.
pub trait EmployeeRecord: StoredRecord<Id = RecordId> {
    const KIND: RecordKind;

    fn meta(&self) -> &RecordMeta;

    fn meta_mut(&mut self) -> &mut RecordMeta;

    fn employee(&self) -> &EmployeeRef {
        self.meta().employee()
    }

    fn status(&self) -> RequestStatus {
        self.meta().status()
    }
}

/// A record that moves through the review lifecycle.
pub trait Approvable: EmployeeRecord {
    /// Hook run after a transition into `approved`.
    fn on_approved(&mut self, _decided_on: NaiveDate) {}

    /// Apply `decision`, recording the reviewer and time.
    ///
    /// Fails without touching the record when the transition is not allowed.
    fn apply_decision(
        &mut self,
        decision: &Decision,
        now: DateTime<Utc>,
    ) -> Result<RequestStatus, RecordError> {
        let next = self.status().transition(Self::KIND, decision.action)?;
        let meta = self.meta_mut();
        meta.status = next;
        meta.review = Review {
            comment: decision.comment.clone(),
            reviewed_by: Some(decision.decided_by.clone()),
            reviewed_at: Some(now),
        };
        meta.updated_at = now;
        if next == RequestStatus::Approved {
            self.on_approved(now.date_naive());
        }
        Ok(next)
    }
}

/// A record created from a validated submission.
pub trait Creatable: Approvable + Sized {
    type Draft: Send + 'static;

    /// Validate `draft` into a pending record.
    fn create(id: RecordId, draft: Self::Draft, now: DateTime<Utc>) -> Result<Self, RecordError>;

    /// Check the record may be deleted in its current state.
    fn ensure_deletable(&self) -> Result<(), RecordError> {
        if Self::KIND.allows_delete() {
            Ok(())
        } else {
            Err(RecordError::NotDeletable {
                kind: Self::KIND,
                reason: "records of this kind are retained".to_owned(),
            })
        }
    }
}

/// Implements [`StoredRecord`] and [`EmployeeRecord`] for a struct with a
/// `meta: RecordMeta` field.
macro_rules! employee_record {
    ($record:ty, $kind:expr) => {
        impl $crate::domain::records::StoredRecord for $record {
            type Id = $crate::domain::records::RecordId;

            fn id(&self) -> &Self::Id {
                self.meta.id()
            }
        }

        impl $crate::domain::records::EmployeeRecord for $record {
            const KIND: $crate::domain::records::RecordKind = $kind;

            fn meta(&self) -> &$crate::domain::records::RecordMeta {
                &self.meta
            }

            fn meta_mut(&mut self) -> &mut $crate::domain::records::RecordMeta {
                &mut self.meta
            }
        }
    };
}

pub(crate) use employee_record;

/// List filter applied to request records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub employee_id: Option<EmployeeId>,
    pub status: Option<RequestStatus>,
}

impl RecordFilter {
    /// Filter matching every record of one employee.
    pub fn for_employee(employee_id: EmployeeId) -> Self {
        Self {
            employee_id: Some(employee_id),
            status: None,
        }
    }

    pub fn matches<R: EmployeeRecord>(&self, record: &R) -> bool {
        let employee_ok = self
            .employee_id
            .as_ref()
            .is_none_or(|id| id == &record.employee().employee_id);
        let status_ok = self.status.is_none_or(|status| status == record.status());
        employee_ok && status_ok
    }
}

/// Trimmed non-empty text, or [`RecordError::Invalid`].
pub(crate) fn required_text(field: &'static str, value: String) -> Result<String, RecordError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RecordError::invalid(field, "must not be empty"));
    }
    Ok(trimmed.to_owned())
}

/// Trimmed text, with blank input treated as absent.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

/// Amount strictly greater than zero and at most [`MAX_AMOUNT`].
pub(crate) fn positive_amount(field: &'static str, value: Decimal) -> Result<Decimal, RecordError> {
    if value <= Decimal::ZERO {
        return Err(RecordError::invalid(field, "must be greater than zero"));
    }
    if value > MAX_AMOUNT {
        return Err(RecordError::invalid(field, format!("must not exceed {MAX_AMOUNT}")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests;
