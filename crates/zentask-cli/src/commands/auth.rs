use std::io::{self, BufRead, Write};

use clap::Subcommand;
use zentask_core::planner::credentials;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store the planner API key in the OS keyring
    SetKey {
        /// API key; read from stdin when omitted
        key: Option<String>,
    },
    /// Remove the stored API key
    Clear,
    /// Show whether an API key is available
    Status,
}

fn read_key() -> Result<String, Box<dyn std::error::Error>> {
    print!("API key: ");
    io::stdout().flush()?;
    let mut key = String::new();
    io::stdin().lock().read_line(&mut key)?;
    Ok(key.trim().to_string())
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AuthAction::SetKey { key } => {
            let key = match key {
                Some(k) => k,
                None => read_key()?,
            };
            if key.trim().is_empty() {
                return Err("API key is empty".into());
            }
            credentials::store_api_key(&key)?;
            println!("API key saved.");
        }
        AuthAction::Clear => {
            credentials::clear_api_key()?;
            println!("API key removed.");
        }
        AuthAction::Status => match credentials::api_key() {
            Ok(_) => println!("API key: configured"),
            Err(zentask_core::PlannerError::MissingApiKey) => println!("API key: not configured"),
            Err(e) => return Err(e.into()),
        },
    }
    Ok(())
}
