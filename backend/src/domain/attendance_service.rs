//! Attendance service implementing the attendance driving ports.
//!
//! An employee has at most one record per work date. Check-in and manual
//! marks refuse a second record for the same day; check-out closes the
//! record opened on the check-out date.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::Clock;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::ports::{AttendanceCommand, AttendanceQuery, RecordStore};
use crate::domain::records::{RecordIdGenerator, RecordKind};
use crate::domain::{
    AttendanceFilter, AttendanceMark, AttendanceRecord, CheckIn, CheckOut, EmployeeId, Error,
};

/// Attendance service over a record store.
pub struct AttendanceService<S> {
    store: Arc<S>,
    ids: RecordIdGenerator,
    clock: Arc<dyn Clock>,
    write_lane: Mutex<()>,
}

impl<S> AttendanceService<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            ids: RecordIdGenerator::new(RecordKind::Attendance),
            clock,
            write_lane: Mutex::new(()),
        }
    }
}

impl<S: RecordStore<AttendanceRecord>> AttendanceService<S> {
    async fn find_day(&self, employee_id: &EmployeeId, work_date: NaiveDate) -> Option<AttendanceRecord> {
        self.store
            .snapshot()
            .await
            .iter()
            .find(|record| {
                &record.employee().employee_id == employee_id && record.work_date() == work_date
            })
            .cloned()
    }

    async fn ensure_day_free(&self, employee_id: &EmployeeId, work_date: NaiveDate) -> Result<(), Error> {
        match self.find_day(employee_id, work_date).await {
            Some(existing) => Err(Error::conflict(format!(
                "{employee_id} already has a {} record on {work_date}",
                existing.status()
            ))),
            None => Ok(()),
        }
    }

    async fn insert(&self, record: AttendanceRecord) -> Result<AttendanceRecord, Error> {
        self.store.insert(record.clone()).await.map_err(|err| {
            warn!(employee = %record.employee().employee_id, error = %err, "attendance insert failed");
            Error::from(err)
        })?;
        debug!(
            employee = %record.employee().employee_id,
            date = %record.work_date(),
            status = %record.status(),
            "attendance recorded"
        );
        Ok(record)
    }
}

#[async_trait]
impl<S: RecordStore<AttendanceRecord>> AttendanceCommand for AttendanceService<S> {
    async fn check_in(&self, request: CheckIn) -> Result<AttendanceRecord, Error> {
        let _lane = self.write_lane.lock().await;
        self.ensure_day_free(&request.employee.employee_id, request.at.date_naive())
            .await?;
        let record = AttendanceRecord::check_in(self.ids.next(self.clock.utc()), request);
        self.insert(record).await
    }

    async fn check_out(&self, request: CheckOut) -> Result<AttendanceRecord, Error> {
        let _lane = self.write_lane.lock().await;
        let work_date = request.at.date_naive();
        let mut record = self
            .find_day(&request.employee_id, work_date)
            .await
            .ok_or_else(|| {
                Error::not_found(format!(
                    "{} has no check-in on {work_date}",
                    request.employee_id
                ))
            })?;
        record.check_out(request.at)?;
        self.store.replace(record.clone()).await.map_err(|err| {
            warn!(employee = %request.employee_id, error = %err, "check-out failed");
            Error::from(err)
        })?;
        debug!(employee = %request.employee_id, date = %work_date, "checked out");
        Ok(record)
    }

    async fn mark(&self, mark: AttendanceMark) -> Result<AttendanceRecord, Error> {
        let _lane = self.write_lane.lock().await;
        self.ensure_day_free(&mark.employee.employee_id, mark.work_date)
            .await?;
        let now = self.clock.utc();
        let record = AttendanceRecord::mark(self.ids.next(now), mark, now)?;
        self.insert(record).await
    }
}

#[async_trait]
impl<S: RecordStore<AttendanceRecord>> AttendanceQuery for AttendanceService<S> {
    async fn list(&self, filter: &AttendanceFilter) -> Result<Vec<AttendanceRecord>, Error> {
        let snapshot = self.store.snapshot().await;
        Ok(snapshot
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }
}
