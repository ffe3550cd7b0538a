//! Driving port for advance repayments.

use async_trait::async_trait;

use crate::domain::records::RecordId;
use crate::domain::{AdvanceRequest, Error, RepaymentDraft};

/// Domain use-case port for the repayment ledger of salary advances.
#[async_trait]
pub trait AdvanceLedger: Send + Sync {
    /// Record a repayment against an approved advance and return the
    /// updated advance.
    async fn record_repayment(
        &self,
        id: &RecordId,
        repayment: RepaymentDraft,
    ) -> Result<AdvanceRequest, Error>;
}
