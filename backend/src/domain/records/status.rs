//! Request status lifecycle.

use std::fmt;

use super::RecordKind;
use crate::domain::labels::labelled_enum;

labelled_enum! {
    /// Approval state of a request record.
    #[derive(Default)]
    pub enum RequestStatus ("request status") {
        #[default]
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
        /// Expenses only: the approved amount has been paid out.
        Reimbursed => "reimbursed",
        /// Tickets only: travel completed and the request archived.
        Closed => "closed",
    }
}

labelled_enum! {
    /// Action taken by a reviewer.
    pub enum DecisionAction ("decision action") {
        Approve => "approve",
        Reject => "reject",
        Reimburse => "reimburse",
        Close => "close",
    }
}

/// A decision that the current status does not permit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionError {
    pub kind: RecordKind,
    pub from: RequestStatus,
    pub action: DecisionAction,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot {} a {} {} request",
            self.action, self.from, self.kind
        )
    }
}

impl std::error::Error for TransitionError {}

impl RequestStatus {
    /// Target status for `action`, or the reason it is not allowed.
    ///
    /// | from     | action    | to         | kinds    |
    /// |----------|-----------|------------|----------|
    /// | pending  | approve   | approved   | all      |
    /// | pending  | reject    | rejected   | all      |
    /// | approved | reimburse | reimbursed | expense  |
    /// | approved | close     | closed     | ticket   |
    pub fn transition(
        self,
        kind: RecordKind,
        action: DecisionAction,
    ) -> Result<Self, TransitionError> {
        match (self, action, kind) {
            (Self::Pending, DecisionAction::Approve, _) => Ok(Self::Approved),
            (Self::Pending, DecisionAction::Reject, _) => Ok(Self::Rejected),
            (Self::Approved, DecisionAction::Reimburse, RecordKind::Expense) => Ok(Self::Reimbursed),
            (Self::Approved, DecisionAction::Close, RecordKind::Ticket) => Ok(Self::Closed),
            _ => Err(TransitionError {
                kind,
                from: self,
                action,
            }),
        }
    }
}
