//! Driving ports for read-only reports.
//!
//! Reports are computed on demand from store snapshots; nothing here
//! mutates state.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{DashboardOverview, Error, PayrollPeriod, PayrollPreview};

use super::StoreStatus;

/// Domain use-case port for the monthly payroll preview.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PayrollQuery: Send + Sync {
    async fn preview(&self, period: PayrollPeriod) -> Result<PayrollPreview, Error>;
}

/// Domain use-case port for the dashboard overview.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    async fn overview(&self, as_of: NaiveDate) -> Result<DashboardOverview, Error>;
}

/// Reports the status of every store.
#[cfg_attr(test, mockall::automock)]
pub trait StoreMonitor: Send + Sync {
    fn statuses(&self) -> Vec<StoreStatus>;
}
