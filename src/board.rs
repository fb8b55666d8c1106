// bingo/src/board.rs
// The board of called numbers: an ordered, append-only record of the round.

use serde::{Deserialize, Serialize};

use crate::defs::{FIRSTNUMBER, LASTNUMBER, NUMBERSINPOOL, Number};
use crate::error::EngineError;

/// Numbers called so far, in call order, without repeats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<Number>")]
pub struct CalledHistory {
    numbers: Vec<Number>,
    // bit n set when number n has been called
    called: u128,
}

impl CalledHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, number: Number) -> Result<(), EngineError> {
        if !(FIRSTNUMBER..=LASTNUMBER).contains(&number) {
            return Err(EngineError::NumberOutOfRange(u32::from(number)));
        }
        if self.contains(number) {
            return Err(EngineError::DuplicateNumber(number));
        }
        self.numbers.push(number);
        self.called |= 1u128 << number;
        Ok(())
    }

    pub fn contains(&self, number: Number) -> bool {
        number < 128 && self.called & (1u128 << number) != 0
    }

    pub fn numbers(&self) -> &[Number] {
        &self.numbers
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// True once every number in the pool has been called.
    pub fn is_complete(&self) -> bool {
        self.numbers.len() == NUMBERSINPOOL
    }

    pub fn last(&self) -> Option<Number> {
        self.numbers.last().copied()
    }

    /// Numbers not called yet, ascending.
    pub fn remaining(&self) -> Vec<Number> {
        (FIRSTNUMBER..=LASTNUMBER).filter(|&n| !self.contains(n)).collect()
    }

    pub fn sorted_numbers(&self) -> Vec<Number> {
        let mut sorted = self.numbers.clone();
        sorted.sort_unstable();
        sorted
    }

    /// Up to `n` numbers called before the latest one, most recent first.
    pub fn previous_numbers(&self, n: usize) -> Vec<Number> {
        if self.numbers.len() <= 1 {
            return Vec::new();
        }

        let available_previous = self.numbers.len() - 1;
        let numbers_to_show = std::cmp::min(n, available_previous);
        let start_index = self.numbers.len() - numbers_to_show - 1;
        let end_index = self.numbers.len() - 1;

        let mut result = self.numbers[start_index..end_index].to_vec();
        result.reverse();
        result
    }
}

impl TryFrom<Vec<u32>> for CalledHistory {
    type Error = EngineError;

    fn try_from(values: Vec<u32>) -> Result<Self, Self::Error> {
        let mut history = CalledHistory::new();
        for value in values {
            let number = Number::try_from(value).map_err(|_| EngineError::NumberOutOfRange(value))?;
            history.push(number)?;
        }
        Ok(history)
    }
}

impl TryFrom<Vec<Number>> for CalledHistory {
    type Error = EngineError;

    fn try_from(values: Vec<Number>) -> Result<Self, Self::Error> {
        Self::try_from(values.into_iter().map(u32::from).collect::<Vec<u32>>())
    }
}

impl From<CalledHistory> for Vec<Number> {
    fn from(history: CalledHistory) -> Self {
        history.numbers
    }
}
