//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AdvanceLedger, AttendanceCommand, AttendanceQuery, DashboardQuery, EmployeeDirectory,
    LoginService, PayrollQuery, RecordCommand, RecordQuery, StoreMonitor,
};
use crate::domain::ports::FixtureLoginService;
use crate::domain::records::Creatable;
use crate::domain::{
    AdvanceRequest, AttendanceService, DashboardService, EmployeeDocument, EmployeeService,
    ExpenseClaim, LeaveRequest, OvertimeRequest, PayrollService, RecordService, TicketRequest,
};
use crate::outbound::memory::ConsoleStores;

/// Query and command ports for one request record kind.
pub struct RecordPorts<R: Creatable> {
    pub query: Arc<dyn RecordQuery<R>>,
    pub command: Arc<dyn RecordCommand<R>>,
}

impl<R: Creatable> Clone for RecordPorts<R> {
    fn clone(&self) -> Self {
        Self {
            query: Arc::clone(&self.query),
            command: Arc::clone(&self.command),
        }
    }
}

impl<R: Creatable> RecordPorts<R> {
    /// Expose one service through both ports.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: RecordQuery<R> + RecordCommand<R> + 'static,
    {
        Self {
            query: service.clone(),
            command: service,
        }
    }
}

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// use hr_console::inbound::http::state::HttpState;
/// use hr_console::outbound::memory::ConsoleStores;
/// use mockable::DefaultClock;
///
/// let stores = ConsoleStores::new(Duration::from_millis(250));
/// let state = HttpState::in_memory(&stores, Arc::new(DefaultClock));
/// assert_eq!(state.stores.statuses().len(), 8);
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub employees: Arc<dyn EmployeeDirectory>,
    pub advances: RecordPorts<AdvanceRequest>,
    pub advance_ledger: Arc<dyn AdvanceLedger>,
    pub expenses: RecordPorts<ExpenseClaim>,
    pub documents: RecordPorts<EmployeeDocument>,
    pub tickets: RecordPorts<TicketRequest>,
    pub overtime: RecordPorts<OvertimeRequest>,
    pub leave: RecordPorts<LeaveRequest>,
    pub attendance: Arc<dyn AttendanceCommand>,
    pub attendance_query: Arc<dyn AttendanceQuery>,
    pub payroll: Arc<dyn PayrollQuery>,
    pub dashboard: Arc<dyn DashboardQuery>,
    pub stores: Arc<dyn StoreMonitor>,
    /// Supplies "today" for endpoints whose date parameter is optional.
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    /// Wire every port to services over the given in-memory stores.
    pub fn in_memory(stores: &ConsoleStores, clock: Arc<dyn Clock>) -> Self {
        let advances = Arc::new(RecordService::new(stores.advances.clone(), clock.clone()));
        let attendance = Arc::new(AttendanceService::new(
            stores.attendance.clone(),
            clock.clone(),
        ));
        Self {
            login: Arc::new(FixtureLoginService),
            employees: Arc::new(EmployeeService::new(stores.employees.clone())),
            advances: RecordPorts::from_service(advances.clone()),
            advance_ledger: advances,
            expenses: RecordPorts::from_service(Arc::new(RecordService::new(
                stores.expenses.clone(),
                clock.clone(),
            ))),
            documents: RecordPorts::from_service(Arc::new(RecordService::new(
                stores.documents.clone(),
                clock.clone(),
            ))),
            tickets: RecordPorts::from_service(Arc::new(RecordService::new(
                stores.tickets.clone(),
                clock.clone(),
            ))),
            overtime: RecordPorts::from_service(Arc::new(RecordService::new(
                stores.overtime.clone(),
                clock.clone(),
            ))),
            leave: RecordPorts::from_service(Arc::new(RecordService::new(
                stores.leave.clone(),
                clock.clone(),
            ))),
            attendance: attendance.clone(),
            attendance_query: attendance,
            payroll: Arc::new(PayrollService::new(stores.report_sources())),
            dashboard: Arc::new(DashboardService::new(
                stores.report_sources(),
                Arc::new(stores.clone()),
            )),
            stores: Arc::new(stores.clone()),
            clock,
        }
    }
}
