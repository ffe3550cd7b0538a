//! Employee directory model.
//!
//! Request records never reference the directory directly. They carry an
//! [`EmployeeRef`] snapshot taken at submission time, so renaming or
//! deactivating an employee leaves historical records untouched.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::labels::labelled_enum;
use super::money::MAX_AMOUNT;
use super::records::StoredRecord;
use super::Error;

/// Maximum length of an employee identifier.
pub const EMPLOYEE_ID_MAX: usize = 32;

/// Validation errors returned by employee constructors and updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeValidationError {
    EmptyId,
    IdTooLong { max: usize },
    InvalidIdCharacters,
    EmptyName,
    EmptyDepartment,
    EmptyPosition,
    InvalidEmail,
    NegativeSalary,
    SalaryAboveLimit,
}

impl EmployeeValidationError {
    /// Name of the offending input field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyId | Self::IdTooLong { .. } | Self::InvalidIdCharacters => "id",
            Self::EmptyName => "name",
            Self::EmptyDepartment => "department",
            Self::EmptyPosition => "position",
            Self::InvalidEmail => "email",
            Self::NegativeSalary | Self::SalaryAboveLimit => "monthlySalary",
        }
    }
}

impl fmt::Display for EmployeeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "employee id must not be empty"),
            Self::IdTooLong { max } => write!(f, "employee id must be at most {max} characters"),
            Self::InvalidIdCharacters => write!(
                f,
                "employee id may only contain ASCII letters, digits or hyphens"
            ),
            Self::EmptyName => write!(f, "employee name must not be empty"),
            Self::EmptyDepartment => write!(f, "department must not be empty"),
            Self::EmptyPosition => write!(f, "position must not be empty"),
            Self::InvalidEmail => write!(f, "email must contain '@'"),
            Self::NegativeSalary => write!(f, "monthly salary must not be negative"),
            Self::SalaryAboveLimit => write!(f, "monthly salary must not exceed {MAX_AMOUNT}"),
        }
    }
}

impl std::error::Error for EmployeeValidationError {}

impl From<EmployeeValidationError> for Error {
    fn from(value: EmployeeValidationError) -> Self {
        Error::invalid_request(value.to_string())
            .with_details(json!({ "field": value.field(), "code": "invalid_value" }))
    }
}

/// Stable employee identifier such as `EMP-0001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmployeeId(String);

impl EmployeeId {
    /// Validate and construct an [`EmployeeId`].
    ///
    /// # Examples
    /// ```
    /// use hr_console::domain::EmployeeId;
    ///
    /// let id = EmployeeId::new("EMP-0001").unwrap();
    /// assert_eq!(id.as_ref(), "EMP-0001");
    /// assert!(EmployeeId::new("EMP 1").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, EmployeeValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(EmployeeValidationError::EmptyId);
        }
        if id.chars().count() > EMPLOYEE_ID_MAX {
            return Err(EmployeeValidationError::IdTooLong {
                max: EMPLOYEE_ID_MAX,
            });
        }
        if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(EmployeeValidationError::InvalidIdCharacters);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for EmployeeId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmployeeId> for String {
    fn from(value: EmployeeId) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmployeeId {
    type Error = EmployeeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

labelled_enum! {
    /// Whether the employee is currently on the payroll.
    pub enum EmploymentStatus ("employment status") {
        Active => "active",
        Inactive => "inactive",
    }
}

/// Owner snapshot copied into every request record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRef {
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub department: String,
}

/// Employee directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    id: EmployeeId,
    name: String,
    department: String,
    position: String,
    email: String,
    join_date: NaiveDate,
    monthly_salary: Decimal,
    status: EmploymentStatus,
}

/// Input for [`Employee::try_from_draft`].
#[derive(Debug, Clone)]
pub struct EmployeeDraft {
    pub id: EmployeeId,
    pub name: String,
    pub department: String,
    pub position: String,
    pub email: String,
    pub join_date: NaiveDate,
    pub monthly_salary: Decimal,
    pub status: EmploymentStatus,
}

/// Partial update applied by [`Employee::apply_update`]; `None` keeps the
/// current value.
#[derive(Debug, Clone, Default)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub email: Option<String>,
    pub monthly_salary: Option<Decimal>,
    pub status: Option<EmploymentStatus>,
}

/// Directory listing filter.
#[derive(Debug, Clone, Default)]
pub struct EmployeeFilter {
    pub department: Option<String>,
    pub status: Option<EmploymentStatus>,
}

impl EmployeeFilter {
    /// Whether `employee` passes the filter. Departments compare without case.
    pub fn matches(&self, employee: &Employee) -> bool {
        let department_ok = self
            .department
            .as_deref()
            .is_none_or(|dept| dept.trim().eq_ignore_ascii_case(employee.department()));
        let status_ok = self.status.is_none_or(|status| status == employee.status());
        department_ok && status_ok
    }
}

fn required(value: String, error: EmployeeValidationError) -> Result<String, EmployeeValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(error);
    }
    Ok(trimmed.to_owned())
}

fn email(value: String) -> Result<String, EmployeeValidationError> {
    let trimmed = required(value, EmployeeValidationError::InvalidEmail)?;
    if !trimmed.contains('@') {
        return Err(EmployeeValidationError::InvalidEmail);
    }
    Ok(trimmed)
}

fn salary(value: Decimal) -> Result<Decimal, EmployeeValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(EmployeeValidationError::NegativeSalary);
    }
    if value > MAX_AMOUNT {
        return Err(EmployeeValidationError::SalaryAboveLimit);
    }
    Ok(value)
}

impl Employee {
    /// Validate a draft into a directory entry.
    pub fn try_from_draft(draft: EmployeeDraft) -> Result<Self, EmployeeValidationError> {
        Ok(Self {
            id: draft.id,
            name: required(draft.name, EmployeeValidationError::EmptyName)?,
            department: required(draft.department, EmployeeValidationError::EmptyDepartment)?,
            position: required(draft.position, EmployeeValidationError::EmptyPosition)?,
            email: email(draft.email)?,
            join_date: draft.join_date,
            monthly_salary: salary(draft.monthly_salary)?,
            status: draft.status,
        })
    }

    /// Apply a partial update. On error the employee is left unchanged.
    pub fn apply_update(&mut self, update: EmployeeUpdate) -> Result<(), EmployeeValidationError> {
        let mut next = self.clone();
        if let Some(name) = update.name {
            next.name = required(name, EmployeeValidationError::EmptyName)?;
        }
        if let Some(department) = update.department {
            next.department = required(department, EmployeeValidationError::EmptyDepartment)?;
        }
        if let Some(position) = update.position {
            next.position = required(position, EmployeeValidationError::EmptyPosition)?;
        }
        if let Some(value) = update.email {
            next.email = email(value)?;
        }
        if let Some(value) = update.monthly_salary {
            next.monthly_salary = salary(value)?;
        }
        if let Some(status) = update.status {
            next.status = status;
        }
        *self = next;
        Ok(())
    }

    /// Snapshot used as the owner of new request records.
    pub fn reference(&self) -> EmployeeRef {
        EmployeeRef {
            employee_id: self.id.clone(),
            employee_name: self.name.clone(),
            department: self.department.clone(),
        }
    }

    pub fn id(&self) -> &EmployeeId {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn department(&self) -> &str {
        self.department.as_str()
    }

    pub fn position(&self) -> &str {
        self.position.as_str()
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn join_date(&self) -> NaiveDate {
        self.join_date
    }

    pub fn monthly_salary(&self) -> Decimal {
        self.monthly_salary
    }

    pub fn status(&self) -> EmploymentStatus {
        self.status
    }

    /// Whether the employee should appear on the payroll.
    pub fn is_active(&self) -> bool {
        self.status == EmploymentStatus::Active
    }
}

impl StoredRecord for Employee {
    type Id = EmployeeId;

    fn id(&self) -> &EmployeeId {
        &self.id
    }
}
