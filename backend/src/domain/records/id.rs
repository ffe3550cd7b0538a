//! Timestamp-derived record identifiers.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::labels::labelled_enum;

labelled_enum! {
    /// Kind of record held by a mock store.
    pub enum RecordKind ("record kind") {
        Advance => "advance",
        Expense => "expense",
        Document => "document",
        Ticket => "ticket",
        Overtime => "overtime",
        Leave => "leave",
        Attendance => "attendance",
    }
}

impl RecordKind {
    /// Identifier prefix for records of this kind.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Advance => "ADV",
            Self::Expense => "EXP",
            Self::Document => "DOC",
            Self::Ticket => "TKT",
            Self::Overtime => "OT",
            Self::Leave => "LV",
            Self::Attendance => "ATT",
        }
    }

    /// Whether records of this kind may be removed by an explicit delete.
    pub const fn allows_delete(self) -> bool {
        !matches!(self, Self::Overtime | Self::Attendance)
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.prefix() == prefix)
    }
}

/// Error returned when parsing a malformed [`RecordId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordIdError {
    MissingSeparator,
    UnknownPrefix { prefix: String },
    InvalidMillis,
}

impl fmt::Display for RecordIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSeparator => write!(f, "record id must look like <PREFIX>-<millis>"),
            Self::UnknownPrefix { prefix } => write!(f, "unknown record id prefix '{prefix}'"),
            Self::InvalidMillis => write!(f, "record id suffix must be a positive integer"),
        }
    }
}

impl std::error::Error for RecordIdError {}

/// Record identifier of the form `<PREFIX>-<unix millis>`.
///
/// # Examples
/// ```
/// use hr_console::domain::{RecordId, RecordKind};
///
/// let id = RecordId::parse("ADV-1767225600000").unwrap();
/// assert_eq!(id.kind(), RecordKind::Advance);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId {
    kind: RecordKind,
    millis: i64,
    raw: String,
}

impl RecordId {
    fn from_parts(kind: RecordKind, millis: i64) -> Self {
        Self {
            kind,
            millis,
            raw: format!("{}-{millis}", kind.prefix()),
        }
    }

    /// Parse an identifier received from a client.
    pub fn parse(raw: &str) -> Result<Self, RecordIdError> {
        let (prefix, millis) = raw
            .trim()
            .split_once('-')
            .ok_or(RecordIdError::MissingSeparator)?;
        let kind = RecordKind::from_prefix(prefix).ok_or_else(|| RecordIdError::UnknownPrefix {
            prefix: prefix.to_owned(),
        })?;
        if millis.is_empty() || !millis.chars().all(|c| c.is_ascii_digit()) {
            return Err(RecordIdError::InvalidMillis);
        }
        let millis = millis
            .parse::<i64>()
            .map_err(|_| RecordIdError::InvalidMillis)?;
        Ok(Self::from_parts(kind, millis))
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Millisecond component; strictly increasing per generator.
    pub fn millis(&self) -> i64 {
        self.millis
    }

    pub fn as_str(&self) -> &str {
        self.raw.as_str()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.raw
    }
}

impl TryFrom<String> for RecordId {
    type Error = RecordIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Issues strictly increasing identifiers for one record kind.
///
/// The clock supplies the millisecond component. When two records are
/// created within the same millisecond, or the clock steps backwards, the
/// generator continues from the previous value plus one.
#[derive(Debug)]
pub struct RecordIdGenerator {
    kind: RecordKind,
    last: AtomicI64,
}

impl RecordIdGenerator {
    pub const fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            last: AtomicI64::new(0),
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Next identifier for a record created at `now`.
    pub fn next(&self, now: DateTime<Utc>) -> RecordId {
        let candidate = now.timestamp_millis();
        let mut current = self.last.load(Ordering::Acquire);
        loop {
            let next = candidate.max(current.saturating_add(1));
            match self
                .last
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return RecordId::from_parts(self.kind, next),
                Err(observed) => current = observed,
            }
        }
    }
}
