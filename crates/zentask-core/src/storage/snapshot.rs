//! The two persisted board slots.
//!
//! Tasks and stats are stored as independent JSON blobs and overwritten in
//! full on every change, tasks first. There is no transaction across the two
//! writes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::KvStore;
use crate::error::Result;
use crate::streak::UserStats;
use crate::task::{DeleteConfirmation, Task};

pub const TASKS_KEY: &str = "zen_tasks";
pub const STATS_KEY: &str = "zen_stats";
pub const PENDING_DELETE_KEY: &str = "zen_pending_delete";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub tasks: Vec<Task>,
    pub stats: UserStats,
}

impl BoardSnapshot {
    /// Read both slots. Missing or unreadable slots fall back to defaults.
    ///
    /// # Errors
    /// Only store access failures are returned; corrupt JSON is logged and
    /// replaced by the default value.
    pub fn load<S: KvStore>(store: &S) -> Result<Self> {
        Ok(Self {
            tasks: read_slot(store, TASKS_KEY)?,
            stats: read_slot(store, STATS_KEY)?,
        })
    }

    /// Overwrite both slots.
    pub fn save<S: KvStore>(&self, store: &S) -> Result<()> {
        store.kv_set(TASKS_KEY, &serde_json::to_string(&self.tasks)?)?;
        store.kv_set(STATS_KEY, &serde_json::to_string(&self.stats)?)?;
        Ok(())
    }
}

pub fn load_pending_delete<S: KvStore>(store: &S) -> Result<DeleteConfirmation> {
    read_slot(store, PENDING_DELETE_KEY)
}

pub fn save_pending_delete<S: KvStore>(store: &S, pending: &DeleteConfirmation) -> Result<()> {
    match pending {
        DeleteConfirmation::Idle => store.kv_delete(PENDING_DELETE_KEY)?,
        DeleteConfirmation::Pending(_) => {
            store.kv_set(PENDING_DELETE_KEY, &serde_json::to_string(pending)?)?
        }
    }
    Ok(())
}

fn read_slot<S: KvStore, T: DeserializeOwned + Default>(store: &S, key: &str) -> Result<T> {
    let Some(raw) = store.kv_get(key)? else {
        return Ok(T::default());
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!(key, error = %e, "discarding unreadable slot");
            Ok(T::default())
        }
    }
}
