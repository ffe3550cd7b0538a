//! Employee directory service.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::ports::{EmployeeDirectory, RecordStore};
use crate::domain::{Employee, EmployeeDraft, EmployeeFilter, EmployeeId, EmployeeUpdate, Error};

/// Directory service implementing [`EmployeeDirectory`] over a store.
pub struct EmployeeService<S> {
    store: Arc<S>,
    write_lane: Mutex<()>,
}

impl<S> EmployeeService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            write_lane: Mutex::new(()),
        }
    }
}

impl<S: RecordStore<Employee>> EmployeeService<S> {
    async fn find(&self, id: &EmployeeId) -> Result<Employee, Error> {
        self.store
            .snapshot()
            .await
            .iter()
            .find(|employee| employee.id() == id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("employee {id} not found")))
    }
}

#[async_trait]
impl<S: RecordStore<Employee>> EmployeeDirectory for EmployeeService<S> {
    async fn list(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>, Error> {
        let snapshot = self.store.snapshot().await;
        Ok(snapshot
            .iter()
            .filter(|employee| filter.matches(employee))
            .cloned()
            .collect())
    }

    async fn get(&self, id: &EmployeeId) -> Result<Employee, Error> {
        self.find(id).await
    }

    async fn create(&self, draft: EmployeeDraft) -> Result<Employee, Error> {
        let employee = Employee::try_from_draft(draft)?;
        let _lane = self.write_lane.lock().await;
        self.store.insert(employee.clone()).await.map_err(|err| {
            warn!(employee = %employee.id(), error = %err, "employee insert failed");
            Error::from(err)
        })?;
        info!(employee = %employee.id(), department = employee.department(), "employee created");
        Ok(employee)
    }

    async fn update(&self, id: &EmployeeId, update: EmployeeUpdate) -> Result<Employee, Error> {
        let _lane = self.write_lane.lock().await;
        let mut employee = self.find(id).await?;
        employee.apply_update(update)?;
        self.store.replace(employee.clone()).await.map_err(|err| {
            warn!(employee = %id, error = %err, "employee update failed");
            Error::from(err)
        })?;
        debug!(employee = %id, "employee updated");
        Ok(employee)
    }
}
