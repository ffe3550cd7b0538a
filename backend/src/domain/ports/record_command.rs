//! Driving port for request record mutations.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::records::{Creatable, Decision, RecordId};

/// Domain use-case port for submitting, reviewing and deleting records.
#[async_trait]
pub trait RecordCommand<R: Creatable>: Send + Sync {
    /// Validate `draft` and store it as a new pending record.
    async fn submit(&self, draft: R::Draft) -> Result<R, Error>;

    /// Apply a reviewer decision. A transition the lifecycle does not allow
    /// yields `conflict` and leaves the stored record untouched.
    async fn decide(&self, id: &RecordId, decision: Decision) -> Result<R, Error>;

    /// Delete a record when its kind and state allow it.
    async fn delete(&self, id: &RecordId) -> Result<R, Error>;
}
