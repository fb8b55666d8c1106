// bingo/src/score.rs
// Win detection and claim validation against the called history.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::CalledHistory;
use crate::card::{Card, Cell};
use crate::defs::{CELLSPERCARD, CardId, FREECELL, Number};
use crate::error::EngineError;
use crate::pattern::{Pattern, patterns};

/// Card positions a player has daubed. The free centre is always included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct MarkedSet(u32);

impl MarkedSet {
    pub fn new() -> Self {
        MarkedSet(1 << FREECELL)
    }

    pub fn from_positions<I>(positions: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut marked = Self::new();
        for index in positions {
            marked.insert(index)?;
        }
        Ok(marked)
    }

    pub fn from_mask(mask: &[bool; CELLSPERCARD]) -> Self {
        let mut marked = Self::new();
        for (index, _) in mask.iter().enumerate().filter(|(_, m)| **m) {
            marked.0 |= 1 << index;
        }
        marked
    }

    /// Returns whether the position was newly marked.
    pub fn insert(&mut self, index: usize) -> Result<bool, EngineError> {
        if index >= CELLSPERCARD {
            return Err(EngineError::InvalidCell(index));
        }
        let newly = !self.contains(index);
        self.0 |= 1 << index;
        Ok(newly)
    }

    /// The free centre cannot be unmarked.
    pub fn remove(&mut self, index: usize) -> bool {
        if index == FREECELL || !self.contains(index) {
            return false;
        }
        self.0 &= !(1 << index);
        true
    }

    pub fn contains(&self, index: usize) -> bool {
        index < CELLSPERCARD && self.0 & (1 << index) != 0
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..CELLSPERCARD).filter(|&index| self.contains(index))
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Only the free centre is marked.
    pub fn is_empty(&self) -> bool {
        self.len() == 1
    }
}

impl Default for MarkedSet {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<usize>> for MarkedSet {
    type Error = EngineError;

    fn try_from(positions: Vec<usize>) -> Result<Self, Self::Error> {
        Self::from_positions(positions)
    }
}

impl From<MarkedSet> for Vec<usize> {
    fn from(marked: MarkedSet) -> Self {
        marked.iter().collect()
    }
}

/// Why a claim was turned down. These are expected outcomes, not failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimRejection {
    NumberNotCalled(Number),
    NoWinningPattern,
}

impl fmt::Display for ClaimRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClaimRejection::NumberNotCalled(number) => write!(f, "Number {number} not called yet"),
            ClaimRejection::NoWinningPattern => f.write_str("No winning pattern found"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ClaimResult {
    Valid {
        card_id: CardId,
        patterns: Vec<Pattern>,
        numbers: Vec<Cell>,
    },
    Invalid {
        card_id: CardId,
        reason: ClaimRejection,
    },
}

impl ClaimResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ClaimResult::Valid { .. })
    }

    pub fn card_id(&self) -> CardId {
        match self {
            ClaimResult::Valid { card_id, .. } | ClaimResult::Invalid { card_id, .. } => *card_id,
        }
    }

    pub fn reason(&self) -> Option<ClaimRejection> {
        match self {
            ClaimResult::Valid { .. } => None,
            ClaimResult::Invalid { reason, .. } => Some(*reason),
        }
    }

    pub fn patterns(&self) -> &[Pattern] {
        match self {
            ClaimResult::Valid { patterns, .. } => patterns,
            ClaimResult::Invalid { .. } => &[],
        }
    }

    pub fn numbers(&self) -> &[Cell] {
        match self {
            ClaimResult::Valid { numbers, .. } => numbers,
            ClaimResult::Invalid { .. } => &[],
        }
    }
}

impl fmt::Display for ClaimResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClaimResult::Valid { card_id, patterns, .. } => {
                let lines: Vec<String> = patterns.iter().map(Pattern::to_string).collect();
                write!(f, "BINGO on card {card_id}: {}", lines.join(", "))
            }
            ClaimResult::Invalid { card_id, reason } => {
                write!(f, "Claim on card {card_id} rejected: {reason}")
            }
        }
    }
}

pub fn check_pattern(marked: &MarkedSet, pattern: &Pattern) -> bool {
    pattern.cells().iter().all(|&index| index == FREECELL || marked.contains(index))
}

/// Satisfied patterns in catalogue order.
pub fn find_winning_patterns(marked: &MarkedSet) -> Vec<Pattern> {
    patterns().iter().filter(|pattern| check_pattern(marked, pattern)).copied().collect()
}

/// Patterns exactly one daub away from completion, with the missing position.
pub fn near_wins(marked: &MarkedSet) -> Vec<(Pattern, usize)> {
    patterns()
        .iter()
        .filter_map(|pattern| {
            let mut missing = pattern
                .cells()
                .iter()
                .filter(|&&index| index != FREECELL && !marked.contains(index));
            match (missing.next(), missing.next()) {
                (Some(&index), None) => Some((*pattern, index)),
                _ => None,
            }
        })
        .collect()
}

/// Check a claim: every daub must be a called number, then at least one line
/// must be complete. The called check covers all daubs before any line is
/// looked at, so one bad daub sinks the whole claim.
pub fn validate_claim(card: &Card, marked: &MarkedSet, called: &CalledHistory) -> ClaimResult {
    for index in marked.iter().filter(|&index| index != FREECELL) {
        if let Some(number) = card.number_at(index) {
            if !called.contains(number) {
                return ClaimResult::Invalid {
                    card_id: card.id(),
                    reason: ClaimRejection::NumberNotCalled(number),
                };
            }
        }
    }

    let winning = find_winning_patterns(marked);
    if winning.is_empty() {
        return ClaimResult::Invalid {
            card_id: card.id(),
            reason: ClaimRejection::NoWinningPattern,
        };
    }

    let numbers = marked.iter().filter_map(|index| card.cell(index)).collect();

    ClaimResult::Valid {
        card_id: card.id(),
        patterns: winning,
        numbers,
    }
}

/// Positions of `card` whose numbers have been called, plus the free centre.
pub fn called_marks(card: &Card, called: &CalledHistory) -> MarkedSet {
    let mut marked = MarkedSet::new();
    for (index, cell) in card.numbers().iter().enumerate() {
        if let Cell::Number(number) = cell {
            if called.contains(*number) {
                marked.0 |= 1 << index;
            }
        }
    }
    marked
}
