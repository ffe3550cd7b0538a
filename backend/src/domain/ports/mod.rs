//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`RecordStore`]) are implemented by outbound adapters.
//! Driving ports are implemented by the domain services and called by the
//! HTTP adapter.

mod macros;
pub(crate) use macros::define_port_error;

mod advance_ledger;
mod attendance;
mod employee_directory;
mod login_service;
mod record_command;
mod record_query;
mod record_store;
mod reporting;

pub use advance_ledger::AdvanceLedger;
pub use attendance::{AttendanceCommand, AttendanceQuery};
#[cfg(test)]
pub use attendance::{MockAttendanceCommand, MockAttendanceQuery};
pub use employee_directory::EmployeeDirectory;
#[cfg(test)]
pub use employee_directory::MockEmployeeDirectory;
pub use login_service::{FixtureLoginService, LoginService};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use record_command::RecordCommand;
pub use record_query::RecordQuery;
pub use record_store::{RecordStore, RecordStoreError, StoreStatus};
pub use reporting::{DashboardQuery, PayrollQuery, StoreMonitor};
#[cfg(test)]
pub use reporting::{MockDashboardQuery, MockPayrollQuery, MockStoreMonitor};
