//! Core error types for zentask-core.
//!
//! Storage, configuration and planner plumbing can fail hard. Task
//! validation failures ([`crate::task::TaskError`]) are wrapped as
//! [`CoreError::Task`]; they leave the board untouched and callers surface
//! them as notices.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for zentask-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Rejected task operation (blank title, daily cap)
    #[error("{0}")]
    Task(#[from] crate::task::TaskError),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Planner-related errors
    #[error("Planner error: {0}")]
    Planner(#[from] PlannerError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value store errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable at {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),
}

/// Errors raised while talking to the planning service.
///
/// These never reach the task board: [`crate::planner::plan_or_none`]
/// folds them into "no plan available".
#[derive(Error, Debug)]
pub enum PlannerError {
    /// No API key in the environment or the OS keyring
    #[error("No API key configured for the planner")]
    MissingApiKey,

    /// Keyring access failed
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    /// HTTP transport failure
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("Planner returned HTTP {status}")]
    Status { status: u16 },

    /// Endpoint URL could not be built
    #[error("Invalid planner endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    /// The service answered without any candidate text
    #[error("Planner returned no text")]
    EmptyResponse,

    /// The candidate text was not the expected JSON shape
    #[error("Planner returned malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg)
                if e.code == rusqlite::ErrorCode::DatabaseBusy
                    || e.code == rusqlite::ErrorCode::DatabaseLocked =>
            {
                StorageError::Locked
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
