use crate::save::SaveError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("End of season: week {requested} requested, season has {total_weeks} weeks")]
    EndOfSeason { requested: u32, total_weeks: u32 },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] SaveError),

    #[error("Config error: {0}")]
    Config(String),
}

impl LeagueError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        LeagueError::InvalidInput(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, LeagueError>;
