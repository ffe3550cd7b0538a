//! Driving port for reading request records.
//!
//! One generic port serves every request kind. Handlers scope the filter to
//! the caller before asking; the port itself knows nothing about sessions.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::records::{EmployeeRecord, RecordFilter, RecordId};

/// Domain use-case port for listing and fetching records of one kind.
#[async_trait]
pub trait RecordQuery<R: EmployeeRecord>: Send + Sync {
    /// Records matching `filter`, in submission order.
    async fn list(&self, filter: &RecordFilter) -> Result<Vec<R>, Error>;

    /// Fetch one record; `not_found` when the id is unknown.
    async fn get(&self, id: &RecordId) -> Result<R, Error>;
}
