//! The set of stores behind one console instance.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::ports::{RecordStore, StoreMonitor, StoreStatus};
use crate::domain::{
    AdvanceRequest, AttendanceRecord, Employee, EmployeeDocument, Error, ExpenseClaim,
    LeaveRequest, OvertimeRequest, ReportSources, TicketRequest,
};

use super::{MockStore, account_employees};

/// One [`MockStore`] per record kind, sharing a latency setting.
#[derive(Clone)]
pub struct ConsoleStores {
    pub employees: Arc<MockStore<Employee>>,
    pub advances: Arc<MockStore<AdvanceRequest>>,
    pub expenses: Arc<MockStore<ExpenseClaim>>,
    pub documents: Arc<MockStore<EmployeeDocument>>,
    pub tickets: Arc<MockStore<TicketRequest>>,
    pub overtime: Arc<MockStore<OvertimeRequest>>,
    pub leave: Arc<MockStore<LeaveRequest>>,
    pub attendance: Arc<MockStore<AttendanceRecord>>,
}

impl ConsoleStores {
    pub fn new(latency: Duration) -> Self {
        Self {
            employees: Arc::new(MockStore::new("employees", latency)),
            advances: Arc::new(MockStore::new("advances", latency)),
            expenses: Arc::new(MockStore::new("expenses", latency)),
            documents: Arc::new(MockStore::new("documents", latency)),
            tickets: Arc::new(MockStore::new("tickets", latency)),
            overtime: Arc::new(MockStore::new("overtime", latency)),
            leave: Arc::new(MockStore::new("leave", latency)),
            attendance: Arc::new(MockStore::new("attendance", latency)),
        }
    }

    /// Stores holding only the employees linked to the login accounts.
    pub fn with_account_employees(latency: Duration) -> Result<Self, Error> {
        let stores = Self::new(latency);
        stores.employees.preload(account_employees()?);
        Ok(stores)
    }

    /// Read handles for the report services.
    pub fn report_sources(&self) -> ReportSources {
        ReportSources {
            employees: self.employees.clone(),
            advances: self.advances.clone(),
            expenses: self.expenses.clone(),
            documents: self.documents.clone(),
            tickets: self.tickets.clone(),
            overtime: self.overtime.clone(),
            leave: self.leave.clone(),
            attendance: self.attendance.clone(),
        }
    }
}

impl StoreMonitor for ConsoleStores {
    fn statuses(&self) -> Vec<StoreStatus> {
        vec![
            self.employees.status(),
            self.advances.status(),
            self.expenses.status(),
            self.documents.status(),
            self.tickets.status(),
            self.overtime.status(),
            self.leave.status(),
            self.attendance.status(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn statuses_cover_every_store_once() {
        let stores = ConsoleStores::new(Duration::ZERO);

        let names: Vec<&str> = stores.statuses().iter().map(|status| status.name).collect();

        assert_eq!(
            names,
            vec![
                "employees",
                "advances",
                "expenses",
                "documents",
                "tickets",
                "overtime",
                "leave",
                "attendance"
            ]
        );
    }

    #[rstest]
    fn account_employees_are_preloaded_without_a_revision() {
        let stores = ConsoleStores::with_account_employees(Duration::ZERO).expect("stores");

        let status = stores.employees.status();

        assert_eq!(status.record_count, 3);
        assert_eq!(status.revision, 0);
    }
}
