pub mod auth;
pub mod config;
pub mod plan;
pub mod stats;
pub mod task;
pub mod timer;

use tracing::debug;
use zentask_core::{Board, Config, Database};

/// Open the on-disk board with the current configuration.
pub fn open_board(config: &Config) -> Result<Board<Database>, Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let board = Board::open(db, &config.tasks)?;
    debug!(
        tasks = board.tasks().len(),
        daily_cap = config.tasks.daily_cap,
        "board opened"
    );
    Ok(board)
}
