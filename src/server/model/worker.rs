//! Jobs processed by the reminder worker.

use std::fmt;

use uuid::Uuid;

/// A unit of background work.
///
/// Each job carries only identifiers; the handler loads fresh data when it runs so edits made
/// after queueing are respected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderJob {
    /// Render, upload and send the invoice image for one member of a batch.
    SendInvoice {
        /// Batch the job reports its outcome to.
        batch_id: Uuid,
        /// Member to remind.
        member_id: i32,
    },
}

impl ReminderJob {
    pub fn batch_id(&self) -> Uuid {
        match self {
            Self::SendInvoice { batch_id, .. } => *batch_id,
        }
    }
}

impl fmt::Display for ReminderJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SendInvoice {
                batch_id,
                member_id,
            } => write!(f, "SendInvoice {{ member_id: {}, batch: {} }}", member_id, batch_id),
        }
    }
}
