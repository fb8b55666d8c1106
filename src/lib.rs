// lib.rs
// Library modules for the bingo engine

pub mod defs;
pub mod error;
pub mod rng;
pub mod card;
pub mod pattern;
pub mod board;
pub mod pouch;
pub mod score;
pub mod selection;
pub mod prize;
pub mod game;
pub mod config;
pub mod logging;
pub mod terminal;

pub use board::CalledHistory;
pub use card::{Card, CardCatalogue, Cell, generate_card};
pub use error::EngineError;
pub use pattern::{Pattern, PatternKind, patterns};
pub use pouch::{Caller, CallerState};
pub use score::{
    ClaimRejection, ClaimResult, MarkedSet, check_pattern, find_winning_patterns, validate_claim,
};
