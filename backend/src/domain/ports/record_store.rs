//! Driven port for the record stores.
//!
//! Every record kind, plus the employee directory, lives in its own store.
//! Reads hand out a shared snapshot; mutators replace the snapshot as a whole
//! so readers never observe a half-applied change.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::records::StoredRecord;

use super::define_port_error;

define_port_error! {
    /// Errors raised by record store adapters.
    pub enum RecordStoreError {
        /// No record has the requested identifier.
        NotFound { id: String } => "record {id} not found",
        /// A record with the same identifier already exists.
        Duplicate { id: String } => "record {id} already exists",
        /// The backing store cannot serve the request.
        Unavailable { message: String } => "record store unavailable: {message}",
    }
}

impl From<RecordStoreError> for Error {
    fn from(value: RecordStoreError) -> Self {
        match &value {
            RecordStoreError::NotFound { .. } => Error::not_found(value.to_string()),
            RecordStoreError::Duplicate { .. } => Error::conflict(value.to_string()),
            RecordStoreError::Unavailable { .. } => Error::service_unavailable(value.to_string()),
        }
    }
}

/// Observable state of one store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStatus {
    /// Stable store name, for example `advances`.
    pub name: &'static str,
    /// Whether a mutator is currently running.
    pub loading: bool,
    /// Message of the last failed mutation; cleared by the next success.
    pub last_error: Option<String>,
    pub record_count: usize,
    /// Incremented on every successful mutation.
    pub revision: u64,
}

/// Port for a copy-on-write record array.
#[async_trait]
pub trait RecordStore<R: StoredRecord>: Send + Sync {
    /// Current records in insertion order.
    async fn snapshot(&self) -> Arc<Vec<R>>;

    /// Append a record. Fails with [`RecordStoreError::Duplicate`] when the
    /// id is taken.
    async fn insert(&self, record: R) -> Result<(), RecordStoreError>;

    /// Replace the record sharing `record`'s id.
    async fn replace(&self, record: R) -> Result<(), RecordStoreError>;

    /// Remove and return the record with `id`.
    async fn remove(&self, id: &R::Id) -> Result<R, RecordStoreError>;

    fn status(&self) -> StoreStatus;
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    #[case(RecordStoreError::not_found("ADV-1"), ErrorCode::NotFound, "record ADV-1 not found")]
    #[case(RecordStoreError::duplicate("ADV-1"), ErrorCode::Conflict, "record ADV-1 already exists")]
    #[case(
        RecordStoreError::unavailable("offline"),
        ErrorCode::ServiceUnavailable,
        "record store unavailable: offline"
    )]
    fn store_errors_map_to_domain_codes(
        #[case] error: RecordStoreError,
        #[case] code: ErrorCode,
        #[case] message: &str,
    ) {
        let mapped = Error::from(error);
        assert_eq!(mapped.code(), code);
        assert_eq!(mapped.message(), message);
    }
}
