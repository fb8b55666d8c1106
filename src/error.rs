// bingo/src/error.rs
// Error taxonomy shared by the engine and the session layer.

use thiserror::Error;

use crate::defs::{CardId, Number};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid card id {0}: cards are numbered 1-500")]
    InvalidCardId(CardId),
    #[error("card {0} does not match its generated layout")]
    CardMismatch(CardId),
    #[error("pool exhausted: all 75 numbers have been called")]
    PoolExhausted,
    #[error("invalid cell position {0}: positions are 0-24")]
    InvalidCell(usize),
    #[error("number {0} is outside the 1-75 pool")]
    NumberOutOfRange(u32),
    #[error("number {0} was already called")]
    DuplicateNumber(Number),
    #[error("selection full: at most {0} cards per player")]
    SelectionFull(usize),
    #[error("card {0} is not selected by this player")]
    CardNotSelected(CardId),
    #[error("round is over: a winning claim has been accepted")]
    RoundOver,
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("serialize error: {0}")]
    Serialize(String),
}

impl From<std::io::Error> for EngineError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value.to_string())
    }
}
