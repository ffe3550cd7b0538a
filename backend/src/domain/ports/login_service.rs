//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials without knowing the backing account directory.
//! HTTP handler tests substitute a double instead of the fixture accounts.

use async_trait::async_trait;

use crate::domain::{EmployeeId, Error, LoginCredentials, Principal, Role};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated principal.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error>;
}

struct FixtureAccount {
    username: &'static str,
    password: &'static str,
    role: Role,
    employee_id: &'static str,
}

const FIXTURE_ACCOUNTS: [FixtureAccount; 3] = [
    FixtureAccount {
        username: "admin",
        password: "password",
        role: Role::Admin,
        employee_id: "EMP-0001",
    },
    FixtureAccount {
        username: "manager",
        password: "manager",
        role: Role::HrManager,
        employee_id: "EMP-0002",
    },
    FixtureAccount {
        username: "employee",
        password: "employee",
        role: Role::Employee,
        employee_id: "EMP-0003",
    },
];

/// In-memory account directory for the console.
///
/// Each account is linked to an employee id so self-service requests can be
/// attributed without a lookup.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error> {
        let account = FIXTURE_ACCOUNTS
            .iter()
            .find(|account| {
                account.username == credentials.username()
                    && account.password == credentials.password()
            })
            .ok_or_else(|| Error::unauthorized("invalid credentials"))?;
        let employee_id = EmployeeId::new(account.employee_id)
            .map_err(|err| Error::internal(format!("invalid fixture employee id: {err}")))?;
        Ok(Principal::new(account.username, account.role, employee_id))
    }
}
