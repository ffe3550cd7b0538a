//! Copy-on-write record store.
//!
//! Reads clone the current `Arc` and never wait. Mutators sleep for the
//! configured latency, copy the array, apply the change and swap the new
//! array in. The loading flag is derived from an in-flight counter held by
//! a drop guard, so it clears even when the caller drops the future.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{RecordStore, RecordStoreError, StoreStatus};
use crate::domain::records::StoredRecord;

struct LoadingGuard<'a>(&'a AtomicUsize);

impl<'a> LoadingGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// In-memory store for one record kind.
pub struct MockStore<R> {
    name: &'static str,
    latency: Duration,
    records: RwLock<Arc<Vec<R>>>,
    in_flight: AtomicUsize,
    last_error: Mutex<Option<String>>,
    revision: AtomicU64,
    offline: AtomicBool,
}

impl<R: StoredRecord> MockStore<R> {
    /// Create an empty store named `name` whose mutators wait `latency`.
    pub fn new(name: &'static str, latency: Duration) -> Self {
        Self {
            name,
            latency,
            records: RwLock::new(Arc::new(Vec::new())),
            in_flight: AtomicUsize::new(0),
            last_error: Mutex::new(None),
            revision: AtomicU64::new(0),
            offline: AtomicBool::new(false),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Replace the contents without latency or a revision bump.
    ///
    /// Used when seeding a fresh store before it serves requests.
    pub fn preload(&self, records: Vec<R>) {
        let mut guard = self.records.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(records);
    }

    /// Make every following mutator fail with
    /// [`RecordStoreError::Unavailable`] until switched back.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn current(&self) -> Arc<Vec<R>> {
        Arc::clone(&self.records.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn set_last_error(&self, message: Option<String>) {
        *self.last_error.lock().unwrap_or_else(PoisonError::into_inner) = message;
    }

    async fn mutate<T, F>(&self, operation: &'static str, apply: F) -> Result<T, RecordStoreError>
    where
        F: FnOnce(&mut Vec<R>) -> Result<T, RecordStoreError> + Send,
    {
        let _loading = LoadingGuard::enter(&self.in_flight);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let result = if self.offline.load(Ordering::SeqCst) {
            Err(RecordStoreError::unavailable(format!("{} store is offline", self.name)))
        } else {
            let mut guard = self.records.write().unwrap_or_else(PoisonError::into_inner);
            let mut next = Vec::clone(&guard);
            apply(&mut next).map(|value| {
                *guard = Arc::new(next);
                value
            })
        };

        match &result {
            Ok(_) => {
                let revision = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
                self.set_last_error(None);
                debug!(store = self.name, operation, revision, "store mutation applied");
            }
            Err(err) => {
                self.set_last_error(Some(err.to_string()));
                warn!(store = self.name, operation, error = %err, "store mutation failed");
            }
        }
        result
    }
}

#[async_trait]
impl<R: StoredRecord> RecordStore<R> for MockStore<R> {
    async fn snapshot(&self) -> Arc<Vec<R>> {
        self.current()
    }

    async fn insert(&self, record: R) -> Result<(), RecordStoreError> {
        self.mutate("insert", move |records| {
            if records.iter().any(|existing| existing.id() == record.id()) {
                return Err(RecordStoreError::duplicate(record.id().to_string()));
            }
            records.push(record);
            Ok(())
        })
        .await
    }

    async fn replace(&self, record: R) -> Result<(), RecordStoreError> {
        self.mutate("replace", move |records| {
            let slot = records
                .iter_mut()
                .find(|existing| existing.id() == record.id())
                .ok_or_else(|| RecordStoreError::not_found(record.id().to_string()))?;
            *slot = record;
            Ok(())
        })
        .await
    }

    async fn remove(&self, id: &R::Id) -> Result<R, RecordStoreError> {
        self.mutate("remove", |records| {
            let index = records
                .iter()
                .position(|existing| existing.id() == id)
                .ok_or_else(|| RecordStoreError::not_found(id.to_string()))?;
            Ok(records.remove(index))
        })
        .await
    }

    fn status(&self) -> StoreStatus {
        StoreStatus {
            name: self.name,
            loading: self.in_flight.load(Ordering::SeqCst) > 0,
            last_error: self
                .last_error
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
            record_count: self.current().len(),
            revision: self.revision.load(Ordering::SeqCst),
        }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
