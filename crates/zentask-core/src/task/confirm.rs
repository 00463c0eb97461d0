//! Two-phase delete confirmation.
//!
//! ```text
//! Idle --arm(id)--> Pending(id) --confirm--> Idle (yields id)
//!                        |
//!                        +------cancel------> Idle
//! ```
//!
//! The registry's delete stays unconditional; this machine sits in front of
//! it on the interaction side.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "id", rename_all = "snake_case")]
pub enum DeleteConfirmation {
    #[default]
    Idle,
    Pending(String),
}

impl DeleteConfirmation {
    /// Arm a deletion. Re-arming replaces any earlier pending id.
    pub fn arm(&mut self, id: impl Into<String>) {
        *self = DeleteConfirmation::Pending(id.into());
    }

    /// Consume the pending id, if any.
    pub fn confirm(&mut self) -> Option<String> {
        match std::mem::take(self) {
            DeleteConfirmation::Pending(id) => Some(id),
            DeleteConfirmation::Idle => None,
        }
    }

    pub fn cancel(&mut self) {
        *self = DeleteConfirmation::Idle;
    }

    pub fn pending(&self) -> Option<&str> {
        match self {
            DeleteConfirmation::Pending(id) => Some(id),
            DeleteConfirmation::Idle => None,
        }
    }
}
