//! Driving port for the employee directory.
//!
//! Inbound adapters use this port both for the directory endpoints and to
//! resolve the owner snapshot of new request records.

use async_trait::async_trait;

use crate::domain::{
    Employee, EmployeeDraft, EmployeeFilter, EmployeeId, EmployeeUpdate, Error,
};

/// Domain use-case port for reading and maintaining employees.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    async fn list(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>, Error>;

    /// Fetch one employee; `not_found` when the id is unknown.
    async fn get(&self, id: &EmployeeId) -> Result<Employee, Error>;

    /// Add an employee. A duplicate id yields `conflict`.
    async fn create(&self, draft: EmployeeDraft) -> Result<Employee, Error>;

    /// Apply a partial update and return the stored result.
    async fn update(&self, id: &EmployeeId, update: EmployeeUpdate) -> Result<Employee, Error>;
}
