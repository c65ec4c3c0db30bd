//! Two-step delete confirmation
//!
//! ```text
//!            select(id)                confirm → remove(id)
//!   Idle ───────────────▶ PendingConfirm ───────────────────▶ Idle
//!     ▲                        │  ▲
//!     └──────── cancel ────────┘  └── select(other id): last selection wins
//! ```

use crate::error::Result;
use crate::model::ProviderRecord;
use crate::store::RecordStore;

/// Pending-deletion state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteFlow {
    /// No deletion pending
    #[default]
    Idle,
    /// Waiting for the user to confirm deleting `id`
    PendingConfirm {
        id: i64,
        /// Shown in the confirmation prompt
        name: String,
    },
}

impl DeleteFlow {
    /// Select a record for deletion
    ///
    /// Replaces any pending selection. An id that is not in the store leaves
    /// the state unchanged and returns `None`; otherwise returns the name to
    /// confirm.
    pub fn select(&mut self, id: i64, store: &RecordStore) -> Option<&str> {
        let record = store.find(id)?;
        *self = DeleteFlow::PendingConfirm {
            id,
            name: record.name.clone(),
        };
        match self {
            DeleteFlow::PendingConfirm { name, .. } => Some(name.as_str()),
            DeleteFlow::Idle => None,
        }
    }

    /// Drop the pending selection without side effects
    pub fn cancel(&mut self) {
        *self = DeleteFlow::Idle;
    }

    /// Delete the pending record and return to idle
    ///
    /// Confirming while idle does nothing. If the store cannot persist the
    /// removal the selection stays pending so the user can retry.
    pub async fn confirm(&mut self, store: &mut RecordStore) -> Result<Option<ProviderRecord>> {
        let DeleteFlow::PendingConfirm { id, .. } = *self else {
            return Ok(None);
        };

        let removed = store.remove(id).await?;
        *self = DeleteFlow::Idle;
        Ok(removed)
    }

    /// Id awaiting confirmation, if any
    pub fn pending_id(&self) -> Option<i64> {
        match self {
            DeleteFlow::PendingConfirm { id, .. } => Some(*id),
            DeleteFlow::Idle => None,
        }
    }

    /// Whether no deletion is pending
    pub fn is_idle(&self) -> bool {
        matches!(self, DeleteFlow::Idle)
    }
}
