//! Authentication primitives: login credentials, roles and the principal.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::labels::labelled_enum;
use super::{EmployeeId, Error, RecordFilter};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` must be non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use hr_console::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("manager", "manager").unwrap();
/// assert_eq!(creds.username(), "manager");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for account lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

labelled_enum! {
    /// Console role attached to an account.
    pub enum Role ("role") {
        Admin => "admin",
        HrManager => "hr_manager",
        Employee => "employee",
    }
}

impl Role {
    /// Whether the role may approve, reject and otherwise manage records.
    pub const fn can_review(self) -> bool {
        matches!(self, Self::Admin | Self::HrManager)
    }
}

/// Authenticated account stored in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    username: String,
    role: Role,
    employee_id: EmployeeId,
}

impl Principal {
    pub fn new(username: impl Into<String>, role: Role, employee_id: EmployeeId) -> Self {
        Self {
            username: username.into(),
            role,
            employee_id,
        }
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Directory entry linked to this account.
    pub fn employee_id(&self) -> &EmployeeId {
        &self.employee_id
    }

    /// Fail with [`Error::forbidden`] unless the role may review records.
    pub fn require_reviewer(&self) -> Result<(), Error> {
        if self.role.can_review() {
            Ok(())
        } else {
            Err(Error::forbidden("manager role required"))
        }
    }

    /// Whether this principal may act on records owned by `owner`.
    pub fn can_access(&self, owner: &EmployeeId) -> bool {
        self.role.can_review() || &self.employee_id == owner
    }

    /// Narrow a record filter to what this principal may see.
    ///
    /// Reviewers keep the filter as given; employees only see their own
    /// records whatever employee they asked for.
    pub fn scope(&self, filter: RecordFilter) -> RecordFilter {
        if self.role.can_review() {
            filter
        } else {
            RecordFilter {
                employee_id: Some(self.employee_id.clone()),
                ..filter
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  admin  ", "secret")]
    #[case("alice", " padded ")]
    fn valid_credentials_trim_username(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(username, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.username(), username.trim());
        assert_eq!(creds.password(), password);
    }

    fn principal(role: Role) -> Principal {
        Principal::new("someone", role, EmployeeId::new("EMP-0003").expect("valid id"))
    }

    #[rstest]
    #[case(Role::Admin, true)]
    #[case(Role::HrManager, true)]
    #[case(Role::Employee, false)]
    fn reviewer_roles(#[case] role: Role, #[case] allowed: bool) {
        let result = principal(role).require_reviewer();
        match (allowed, result) {
            (true, Ok(())) => {}
            (false, Err(err)) => assert_eq!(err.code(), ErrorCode::Forbidden),
            (_, other) => panic!("unexpected outcome for {role}: {other:?}"),
        }
    }

    #[rstest]
    fn employees_are_scoped_to_their_own_records() {
        let requested = RecordFilter {
            employee_id: Some(EmployeeId::new("EMP-0009").expect("valid id")),
            status: None,
        };

        let scoped = principal(Role::Employee).scope(requested.clone());
        assert_eq!(scoped.employee_id.map(String::from).as_deref(), Some("EMP-0003"));

        let unscoped = principal(Role::HrManager).scope(requested);
        assert_eq!(unscoped.employee_id.map(String::from).as_deref(), Some("EMP-0009"));
    }

    #[rstest]
    fn principal_serialises_camel_case() {
        let json = serde_json::to_value(principal(Role::HrManager)).expect("serialises");
        assert_eq!(
            json,
            serde_json::json!({
                "username": "someone",
                "role": "hr_manager",
                "employeeId": "EMP-0003",
            })
        );
    }
}
