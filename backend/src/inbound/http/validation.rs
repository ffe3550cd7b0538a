//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request payloads carry optional raw strings; these helpers turn them into
//! domain values and report failures as `invalid_request` errors with a
//! `field` and `code` in the details.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;

use crate::domain::{EmployeeId, Error, PayrollPeriod, RecordId, UnknownLabel};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidDate,
    InvalidTimestamp,
    InvalidLabel,
    InvalidEmployeeId,
    InvalidRecordId,
    InvalidPeriod,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidDate => "invalid_date",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
            ErrorCode::InvalidLabel => "invalid_label",
            ErrorCode::InvalidEmployeeId => "invalid_employee_id",
            ErrorCode::InvalidRecordId => "invalid_record_id",
            ErrorCode::InvalidPeriod => "invalid_period",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

/// Unwrap a required payload field.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn invalid_date_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a YYYY-MM-DD date"))
        .with_value(ErrorCode::InvalidDate, value)
}

pub(crate) fn parse_date(value: String, field: FieldName) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| invalid_date_error(field, &value))
}

pub(crate) fn parse_optional_date(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<NaiveDate>, Error> {
    value.map(|raw| parse_date(raw, field)).transpose()
}

pub(crate) fn invalid_timestamp_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be an RFC 3339 timestamp"))
        .with_value(ErrorCode::InvalidTimestamp, value)
}

pub(crate) fn parse_rfc3339_timestamp(
    value: String,
    field: FieldName,
) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(&value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| invalid_timestamp_error(field, &value))
}

pub(crate) fn parse_optional_rfc3339_timestamp(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    value
        .map(|raw| parse_rfc3339_timestamp(raw, field))
        .transpose()
}

/// Parse a snake_case vocabulary label such as a status or category.
pub(crate) fn parse_label<T>(value: String, field: FieldName) -> Result<T, Error>
where
    T: FromStr<Err = UnknownLabel>,
{
    T::from_str(&value).map_err(|err| {
        ValidationError::new(field.as_str(), err.to_string())
            .with_value(ErrorCode::InvalidLabel, value.as_str())
    })
}

pub(crate) fn parse_optional_label<T>(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<T>, Error>
where
    T: FromStr<Err = UnknownLabel>,
{
    value.map(|raw| parse_label(raw, field)).transpose()
}

pub(crate) fn parse_employee_id(value: String, field: FieldName) -> Result<EmployeeId, Error> {
    EmployeeId::new(value.trim()).map_err(|err| {
        ValidationError::new(field.as_str(), err.to_string())
            .with_value(ErrorCode::InvalidEmployeeId, value.as_str())
    })
}

pub(crate) fn parse_optional_employee_id(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<EmployeeId>, Error> {
    value.map(|raw| parse_employee_id(raw, field)).transpose()
}

pub(crate) fn parse_record_id(value: &str, field: FieldName) -> Result<RecordId, Error> {
    RecordId::parse(value).map_err(|err| {
        ValidationError::new(field.as_str(), err.to_string())
            .with_value(ErrorCode::InvalidRecordId, value)
    })
}

pub(crate) fn parse_period(value: String, field: FieldName) -> Result<PayrollPeriod, Error> {
    PayrollPeriod::from_str(&value).map_err(|err| {
        ValidationError::new(field.as_str(), err.to_string())
            .with_value(ErrorCode::InvalidPeriod, value.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode as DomainErrorCode, RequestStatus};
    use rstest::rstest;

    fn details_code(error: &Error) -> Option<&str> {
        error
            .details()
            .and_then(|details| details.get("code"))
            .and_then(|code| code.as_str())
    }

    #[rstest]
    fn missing_fields_name_the_field() {
        let err = require::<String>(None, FieldName::new("amount")).expect_err("missing");

        assert_eq!(err.code(), DomainErrorCode::InvalidRequest);
        assert_eq!(err.message(), "missing required field: amount");
        assert_eq!(details_code(&err), Some("missing_field"));
    }

    #[rstest]
    #[case("2026-02-30")]
    #[case("01/02/2026")]
    #[case("")]
    fn rejects_malformed_dates(#[case] raw: &str) {
        let err = parse_date(raw.to_owned(), FieldName::new("startDate")).expect_err("bad date");

        assert_eq!(details_code(&err), Some("invalid_date"));
        let value = err
            .details()
            .and_then(|details| details.get("value"))
            .and_then(|value| value.as_str());
        assert_eq!(value, Some(raw));
    }

    #[rstest]
    fn parses_dates_with_padding() {
        let date = parse_date(" 2026-03-01 ".to_owned(), FieldName::new("startDate"))
            .expect("valid date");

        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 3, 1).expect("valid date"));
    }

    #[rstest]
    #[case("approved", Some(RequestStatus::Approved))]
    #[case("reimbursed", Some(RequestStatus::Reimbursed))]
    #[case("Approved", None)]
    fn parses_status_labels(#[case] raw: &str, #[case] expected: Option<RequestStatus>) {
        let parsed = parse_label::<RequestStatus>(raw.to_owned(), FieldName::new("status"));

        match expected {
            Some(status) => assert_eq!(parsed.expect("known label"), status),
            None => {
                let err = parsed.expect_err("unknown label");
                assert_eq!(details_code(&err), Some("invalid_label"));
            }
        }
    }

    #[rstest]
    fn record_ids_must_carry_a_known_prefix() {
        let err = parse_record_id("XYZ-12", FieldName::new("id")).expect_err("unknown prefix");

        assert_eq!(details_code(&err), Some("invalid_record_id"));
        assert_eq!(err.message(), "unknown record id prefix 'XYZ'");
    }

    #[rstest]
    #[case("2026-13")]
    #[case("26-01")]
    fn rejects_malformed_periods(#[case] raw: &str) {
        let err = parse_period(raw.to_owned(), FieldName::new("period")).expect_err("bad period");

        assert_eq!(details_code(&err), Some("invalid_period"));
    }

    #[rstest]
    fn timestamps_are_normalised_to_utc() {
        let at = parse_rfc3339_timestamp(
            "2026-03-01T09:30:00+03:00".to_owned(),
            FieldName::new("at"),
        )
        .expect("valid timestamp");

        assert_eq!(at.to_rfc3339(), "2026-03-01T06:30:00+00:00");
    }
}
