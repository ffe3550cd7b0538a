//! Employee documents and expiry tracking.

use std::collections::HashMap;

use chrono::{DateTime, Days, NaiveDate, Utc};

use super::labels::labelled_enum;
use super::records::{
    Approvable, Creatable, EmployeeRecord, NextDatePolicy, RecordError, RecordId, RecordKind,
    RecordMeta, RequestStatus, employee_record, optional_text, required_text,
};
use super::{EmployeeId, EmployeeRef};

/// Default look-ahead for "expiring soon", in days.
pub const DEFAULT_EXPIRY_WINDOW_DAYS: u32 = 30;

labelled_enum! {
    /// Type of an uploaded document.
    pub enum DocumentKind ("document kind") {
        Passport => "passport",
        Visa => "visa",
        NationalId => "national_id",
        Contract => "contract",
        Certificate => "certificate",
        Other => "other",
    }
}

/// Submission payload for a document.
#[derive(Debug, Clone)]
pub struct DocumentDraft {
    pub employee: EmployeeRef,
    pub kind: DocumentKind,
    pub title: String,
    pub document_number: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub file_name: Option<String>,
}

/// Document record; approval marks it verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDocument {
    meta: RecordMeta,
    kind: DocumentKind,
    title: String,
    document_number: Option<String>,
    issue_date: Option<NaiveDate>,
    expiry_date: Option<NaiveDate>,
    file_name: Option<String>,
}

employee_record!(EmployeeDocument, RecordKind::Document);

impl EmployeeDocument {
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn document_number(&self) -> Option<&str> {
        self.document_number.as_deref()
    }

    pub fn issue_date(&self) -> Option<NaiveDate> {
        self.issue_date
    }

    pub fn expiry_date(&self) -> Option<NaiveDate> {
        self.expiry_date
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn is_expired(&self, as_of: NaiveDate) -> bool {
        self.expiry_date.is_some_and(|expiry| expiry < as_of)
    }

    /// Expires within `[as_of, as_of + window_days]`.
    pub fn expires_within(&self, as_of: NaiveDate, window_days: u32) -> bool {
        let horizon = as_of
            .checked_add_days(Days::new(u64::from(window_days)))
            .unwrap_or(NaiveDate::MAX);
        self.expiry_date
            .is_some_and(|expiry| expiry >= as_of && expiry <= horizon)
    }
}

impl Approvable for EmployeeDocument {}

impl Creatable for EmployeeDocument {
    type Draft = DocumentDraft;

    fn create(id: RecordId, draft: DocumentDraft, now: DateTime<Utc>) -> Result<Self, RecordError> {
        if let (Some(issue), Some(expiry)) = (draft.issue_date, draft.expiry_date) {
            if expiry < issue {
                return Err(RecordError::invalid(
                    "expiryDate",
                    "must not be before the issue date",
                ));
            }
        }
        Ok(Self {
            meta: RecordMeta::new(id, draft.employee, now),
            kind: draft.kind,
            title: required_text("title", draft.title)?,
            document_number: optional_text(draft.document_number),
            issue_date: draft.issue_date,
            expiry_date: draft.expiry_date,
            file_name: optional_text(draft.file_name),
        })
    }
}

/// Document counts for one employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    pub employee: EmployeeRef,
    pub total: usize,
    /// Approved documents.
    pub verified: usize,
    pub pending: usize,
    pub expired: usize,
    pub expiring_soon: usize,
    /// Chosen among unexpired documents.
    pub next_expiry_date: Option<NaiveDate>,
}

/// Parameters for [`summarise_documents`].
#[derive(Debug, Clone, Copy)]
pub struct ExpiryWindow {
    pub as_of: NaiveDate,
    pub window_days: u32,
    pub policy: NextDatePolicy,
}

impl ExpiryWindow {
    /// Default 30-day window as of `as_of`.
    pub fn starting(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            window_days: DEFAULT_EXPIRY_WINDOW_DAYS,
            policy: NextDatePolicy::default(),
        }
    }
}

/// Fold documents into one summary per employee, in first-appearance order.
///
/// Rejected documents count towards `total` only.
pub fn summarise_documents<'a, I>(documents: I, window: ExpiryWindow) -> Vec<DocumentSummary>
where
    I: IntoIterator<Item = &'a EmployeeDocument>,
{
    let mut summaries: Vec<DocumentSummary> = Vec::new();
    let mut positions: HashMap<EmployeeId, usize> = HashMap::new();

    for document in documents {
        let owner = document.employee();
        let position = *positions.entry(owner.employee_id.clone()).or_insert_with(|| {
            let next = summaries.len();
            summaries.push(DocumentSummary {
                employee: owner.clone(),
                total: 0,
                verified: 0,
                pending: 0,
                expired: 0,
                expiring_soon: 0,
                next_expiry_date: None,
            });
            next
        });
        let Some(summary) = summaries.get_mut(position) else {
            continue;
        };

        summary.total += 1;
        match document.status() {
            RequestStatus::Approved => summary.verified += 1,
            RequestStatus::Pending => summary.pending += 1,
            _ => {}
        }
        if document.status() == RequestStatus::Rejected {
            continue;
        }
        if document.is_expired(window.as_of) {
            summary.expired += 1;
            continue;
        }
        if document.expires_within(window.as_of, window.window_days) {
            summary.expiring_soon += 1;
        }
        summary.next_expiry_date = window
            .policy
            .fold(summary.next_expiry_date, document.expiry_date());
    }

    summaries
}
