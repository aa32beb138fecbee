use crate::domain::round::Phase;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid bet: {0}")]
    InvalidBet(String),
    #[error("Cannot {operation} while the round is {phase}")]
    InvalidState {
        operation: &'static str,
        phase: Phase,
    },
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl GameError {
    /// True for errors the player can fix by changing their input.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, GameError::InvalidBet(_) | GameError::ParseError(_))
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
