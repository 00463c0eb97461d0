mod config;
pub mod database;
pub mod snapshot;

pub use config::{Config, PlannerConfig, TasksConfig, TimerConfig};
pub use database::Database;
pub use snapshot::{BoardSnapshot, PENDING_DELETE_KEY, STATS_KEY, TASKS_KEY};

use std::collections::HashMap;
use std::path::PathBuf;
use std::cell::RefCell;

use crate::error::StorageError;

/// Returns the data directory, creating it if needed.
///
/// `ZENTASK_HOME` overrides the location outright. Otherwise this is
/// `~/.config/zentask[-dev]/`, with `ZENTASK_ENV=dev` selecting the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("ZENTASK_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("ZENTASK_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("zentask-dev")
            } else {
                base_dir.join("zentask")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| StorageError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

/// String-keyed, string-valued store. Values are overwritten wholesale.
pub trait KvStore {
    fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn kv_delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-local store for tests and ephemeral boards.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn kv_delete(&self, key: &str) -> Result<(), StorageError> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}

impl<S: KvStore + ?Sized> KvStore for &S {
    fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).kv_get(key)
    }

    fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).kv_set(key, value)
    }

    fn kv_delete(&self, key: &str) -> Result<(), StorageError> {
        (**self).kv_delete(key)
    }
}
