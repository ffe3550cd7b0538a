//! Generic request record service.
//!
//! One [`RecordService`] per record kind implements the record driving
//! ports over a [`RecordStore`]. Every read-modify-write sequence runs inside
//! the service's write lane, so concurrent decisions on the same record
//! cannot interleave between the read and the replace.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::ports::{AdvanceLedger, RecordCommand, RecordQuery, RecordStore};
use crate::domain::records::{
    Creatable, Decision, EmployeeRecord, RecordFilter, RecordId, RecordIdGenerator,
};
use crate::domain::{AdvanceRequest, Error, RepaymentDraft};

/// Record service implementing the query and command ports for one kind.
pub struct RecordService<R, S> {
    store: Arc<S>,
    ids: RecordIdGenerator,
    clock: Arc<dyn Clock>,
    write_lane: Mutex<()>,
    _record: PhantomData<fn() -> R>,
}

impl<R: EmployeeRecord, S> RecordService<R, S> {
    /// Create a service over `store`, stamping records with `clock`.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use hr_console::domain::{AdvanceRequest, RecordService};
    /// # use hr_console::outbound::memory::MockStore;
    /// # use mockable::DefaultClock;
    /// let store = Arc::new(MockStore::<AdvanceRequest>::new("advances", Default::default()));
    /// let service: RecordService<AdvanceRequest, _> = RecordService::new(store, Arc::new(DefaultClock));
    /// # let _ = service;
    /// ```
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            ids: RecordIdGenerator::new(R::KIND),
            clock,
            write_lane: Mutex::new(()),
            _record: PhantomData,
        }
    }
}

impl<R, S> RecordService<R, S>
where
    R: EmployeeRecord,
    S: RecordStore<R>,
{
    async fn find(&self, id: &RecordId) -> Result<R, Error> {
        self.store
            .snapshot()
            .await
            .iter()
            .find(|record| record.id() == id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("{} {id} not found", R::KIND)))
    }

    /// Run a read-modify-write step on one record inside the write lane.
    async fn update_with<F>(&self, id: &RecordId, operation: &'static str, step: F) -> Result<R, Error>
    where
        F: FnOnce(&mut R) -> Result<(), Error> + Send,
    {
        let _lane = self.write_lane.lock().await;
        let mut record = self.find(id).await?;
        step(&mut record).inspect_err(|err| {
            warn!(kind = %R::KIND, record = %id, operation, error = %err, "record update rejected");
        })?;
        self.store.replace(record.clone()).await.map_err(|err| {
            warn!(kind = %R::KIND, record = %id, operation, error = %err, "record store update failed");
            Error::from(err)
        })?;
        Ok(record)
    }
}

#[async_trait]
impl<R, S> RecordQuery<R> for RecordService<R, S>
where
    R: EmployeeRecord,
    S: RecordStore<R>,
{
    async fn list(&self, filter: &RecordFilter) -> Result<Vec<R>, Error> {
        let snapshot = self.store.snapshot().await;
        Ok(snapshot
            .iter()
            .filter(|record| filter.matches(*record))
            .cloned()
            .collect())
    }

    async fn get(&self, id: &RecordId) -> Result<R, Error> {
        self.find(id).await
    }
}

#[async_trait]
impl<R, S> RecordCommand<R> for RecordService<R, S>
where
    R: Creatable,
    S: RecordStore<R>,
{
    async fn submit(&self, draft: R::Draft) -> Result<R, Error> {
        let _lane = self.write_lane.lock().await;
        let now = self.clock.utc();
        let record = R::create(self.ids.next(now), draft, now).inspect_err(|err| {
            debug!(kind = %R::KIND, error = %err, "submission rejected");
        })?;
        self.store.insert(record.clone()).await.map_err(|err| {
            warn!(kind = %R::KIND, record = %record.id(), error = %err, "record insert failed");
            Error::from(err)
        })?;
        debug!(
            kind = %R::KIND,
            record = %record.id(),
            employee = %record.employee().employee_id,
            "record submitted"
        );
        Ok(record)
    }

    async fn decide(&self, id: &RecordId, decision: Decision) -> Result<R, Error> {
        let now = self.clock.utc();
        let action = decision.action;
        let reviewer = decision.decided_by.clone();
        let record = self
            .update_with(id, "decide", move |record| {
                record.apply_decision(&decision, now)?;
                Ok(())
            })
            .await?;
        info!(
            kind = %R::KIND,
            record = %id,
            action = %action,
            status = %record.status(),
            reviewer = %reviewer,
            "decision recorded"
        );
        Ok(record)
    }

    async fn delete(&self, id: &RecordId) -> Result<R, Error> {
        let _lane = self.write_lane.lock().await;
        let record = self.find(id).await?;
        record.ensure_deletable().inspect_err(|err| {
            debug!(kind = %R::KIND, record = %id, error = %err, "delete refused");
        })?;
        let removed = self.store.remove(id).await.map_err(|err| {
            warn!(kind = %R::KIND, record = %id, error = %err, "record removal failed");
            Error::from(err)
        })?;
        info!(kind = %R::KIND, record = %id, "record deleted");
        Ok(removed)
    }
}

#[async_trait]
impl<S> AdvanceLedger for RecordService<AdvanceRequest, S>
where
    S: RecordStore<AdvanceRequest>,
{
    async fn record_repayment(
        &self,
        id: &RecordId,
        repayment: RepaymentDraft,
    ) -> Result<AdvanceRequest, Error> {
        let now = self.clock.utc();
        let amount = repayment.amount;
        let advance = self
            .update_with(id, "repay", move |advance| {
                advance.record_repayment(repayment, now)?;
                Ok(())
            })
            .await?;
        info!(
            record = %id,
            %amount,
            remaining = %advance.repayment().remaining_amount(),
            "repayment recorded"
        );
        Ok(advance)
    }
}

#[cfg(test)]
#[path = "record_service_tests.rs"]
mod tests;
