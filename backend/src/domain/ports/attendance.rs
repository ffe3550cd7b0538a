//! Driving ports for attendance tracking.

use async_trait::async_trait;

use crate::domain::{AttendanceFilter, AttendanceMark, AttendanceRecord, CheckIn, CheckOut, Error};

/// Domain use-case port for attendance mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceCommand: Send + Sync {
    /// Open the day's record. A second check-in on the same day yields
    /// `conflict`.
    async fn check_in(&self, request: CheckIn) -> Result<AttendanceRecord, Error>;

    /// Close the open record for the employee's check-out date.
    async fn check_out(&self, request: CheckOut) -> Result<AttendanceRecord, Error>;

    /// Record an absence or leave day.
    async fn mark(&self, mark: AttendanceMark) -> Result<AttendanceRecord, Error>;
}

/// Domain use-case port for attendance reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceQuery: Send + Sync {
    async fn list(&self, filter: &AttendanceFilter) -> Result<Vec<AttendanceRecord>, Error>;
}
