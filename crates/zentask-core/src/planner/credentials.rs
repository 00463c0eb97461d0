//! Planner API key lookup.
//!
//! Environment variables win over the OS keyring so CI and one-off runs do
//! not need a keyring entry.

use crate::error::PlannerError;

const SERVICE: &str = "zentask";
const API_KEY_ENTRY: &str = "gemini_api_key";
const ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Thin wrapper around the OS keyring for credential storage.
pub mod keyring_store {
    use super::SERVICE;

    pub fn get(key: &str) -> Result<Option<String>, keyring::Error> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.get_password() {
            Ok(pw) => Ok(Some(pw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn set(key: &str, value: &str) -> Result<(), keyring::Error> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        entry.set_password(value)
    }

    pub fn delete(key: &str) -> Result<(), keyring::Error> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

fn from_env() -> Option<String> {
    ENV_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

/// Resolve the API key from the environment, then the keyring.
pub fn api_key() -> Result<String, PlannerError> {
    if let Some(key) = from_env() {
        return Ok(key);
    }
    keyring_store::get(API_KEY_ENTRY)?
        .filter(|k| !k.trim().is_empty())
        .ok_or(PlannerError::MissingApiKey)
}

pub fn store_api_key(key: &str) -> Result<(), PlannerError> {
    keyring_store::set(API_KEY_ENTRY, key.trim())?;
    Ok(())
}

pub fn clear_api_key() -> Result<(), PlannerError> {
    keyring_store::delete(API_KEY_ENTRY)?;
    Ok(())
}
