//! Read-only report services: payroll preview and dashboard.
//!
//! Both take one snapshot per store and hand the slices to the pure
//! builders in [`crate::domain::payroll`] and [`crate::domain::dashboard`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

use crate::domain::ports::{DashboardQuery, PayrollQuery, RecordStore, StoreMonitor};
use crate::domain::{
    AdvanceRequest, AttendanceRecord, DashboardInputs, DashboardOverview, Employee,
    EmployeeDocument, Error, ExpenseClaim, LeaveRequest, OvertimeRequest, PayrollInputs,
    PayrollPeriod, PayrollPreview, TicketRequest, build_overview, build_preview,
};

/// Store handles the reports read from.
#[derive(Clone)]
pub struct ReportSources {
    pub employees: Arc<dyn RecordStore<Employee>>,
    pub advances: Arc<dyn RecordStore<AdvanceRequest>>,
    pub expenses: Arc<dyn RecordStore<ExpenseClaim>>,
    pub documents: Arc<dyn RecordStore<EmployeeDocument>>,
    pub tickets: Arc<dyn RecordStore<TicketRequest>>,
    pub overtime: Arc<dyn RecordStore<OvertimeRequest>>,
    pub leave: Arc<dyn RecordStore<LeaveRequest>>,
    pub attendance: Arc<dyn RecordStore<AttendanceRecord>>,
}

/// Service implementing [`PayrollQuery`].
#[derive(Clone)]
pub struct PayrollService {
    sources: ReportSources,
}

impl PayrollService {
    pub fn new(sources: ReportSources) -> Self {
        Self { sources }
    }
}

#[async_trait]
impl PayrollQuery for PayrollService {
    async fn preview(&self, period: PayrollPeriod) -> Result<PayrollPreview, Error> {
        let employees = self.sources.employees.snapshot().await;
        let overtime = self.sources.overtime.snapshot().await;
        let expenses = self.sources.expenses.snapshot().await;
        let advances = self.sources.advances.snapshot().await;
        let leave = self.sources.leave.snapshot().await;

        let preview = build_preview(
            period,
            PayrollInputs {
                employees: &employees,
                overtime: &overtime,
                expenses: &expenses,
                advances: &advances,
                leave: &leave,
            },
        );
        debug!(%period, lines = preview.lines.len(), net = %preview.totals.net, "payroll preview built");
        Ok(preview)
    }
}

/// Service implementing [`DashboardQuery`].
#[derive(Clone)]
pub struct DashboardService {
    sources: ReportSources,
    monitor: Arc<dyn StoreMonitor>,
}

impl DashboardService {
    pub fn new(sources: ReportSources, monitor: Arc<dyn StoreMonitor>) -> Self {
        Self { sources, monitor }
    }
}

#[async_trait]
impl DashboardQuery for DashboardService {
    async fn overview(&self, as_of: NaiveDate) -> Result<DashboardOverview, Error> {
        let employees = self.sources.employees.snapshot().await;
        let advances = self.sources.advances.snapshot().await;
        let expenses = self.sources.expenses.snapshot().await;
        let documents = self.sources.documents.snapshot().await;
        let tickets = self.sources.tickets.snapshot().await;
        let overtime = self.sources.overtime.snapshot().await;
        let leave = self.sources.leave.snapshot().await;
        let attendance = self.sources.attendance.snapshot().await;

        Ok(build_overview(
            as_of,
            DashboardInputs {
                employees: &employees,
                advances: &advances,
                expenses: &expenses,
                documents: &documents,
                tickets: &tickets,
                overtime: &overtime,
                leave: &leave,
                attendance: &attendance,
                stores: self.monitor.statuses(),
            },
        ))
    }
}
