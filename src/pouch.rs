// bingo/src/pouch.rs
// The caller: draws numbers out of the pouch without replacement.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::board::CalledHistory;
use crate::defs::{FIRSTNUMBER, LASTNUMBER, Number};
use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallerState {
    Active,
    Exhausted,
}

/// Owns the pouch of undrawn numbers and the history of called ones.
#[derive(Debug, Clone)]
pub struct Caller {
    pouch: Vec<Number>,
    history: CalledHistory,
}

impl Caller {
    pub fn new() -> Self {
        Caller {
            pouch: (FIRSTNUMBER..=LASTNUMBER).collect(),
            history: CalledHistory::new(),
        }
    }

    /// Continue a round from an existing history.
    pub fn resume(history: CalledHistory) -> Self {
        Caller {
            pouch: history.remaining(),
            history,
        }
    }

    pub fn state(&self) -> CallerState {
        if self.pouch.is_empty() {
            CallerState::Exhausted
        } else {
            CallerState::Active
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.state() == CallerState::Exhausted
    }

    pub fn remaining(&self) -> usize {
        self.pouch.len()
    }

    pub fn history(&self) -> &CalledHistory {
        &self.history
    }

    pub fn into_history(self) -> CalledHistory {
        self.history
    }

    pub fn draw_next(&mut self) -> Result<Number, EngineError> {
        self.draw_next_with(&mut rand::rng())
    }

    /// Draw uniformly among the numbers still in the pouch.
    pub fn draw_next_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Number, EngineError> {
        if self.pouch.is_empty() {
            return Err(EngineError::PoolExhausted);
        }
        let random_index = rng.random_range(0..self.pouch.len());
        let number = self.pouch.remove(random_index);
        self.history.push(number)?;
        Ok(number)
    }
}

impl Default for Caller {
    fn default() -> Self {
        Self::new()
    }
}

/// The first `count` numbers of a shuffled pool, for pre-drawn rounds.
pub fn shuffled_calls(count: usize) -> Vec<Number> {
    shuffled_calls_with(&mut rand::rng(), count)
}

pub fn shuffled_calls_with<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Number> {
    let mut numbers: Vec<Number> = (FIRSTNUMBER..=LASTNUMBER).collect();
    numbers.shuffle(rng);
    numbers.truncate(count);
    numbers
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_new_caller_is_active() {
        let caller = Caller::new();
        assert_eq!(caller.state(), CallerState::Active);
        assert_eq!(caller.remaining(), 75);
        assert!(caller.history().is_empty());
    }

    #[test]
    fn test_exhaustion_after_75_draws() {
        let mut caller = Caller::new();
        let mut seen = HashSet::new();
        for i in 0..75 {
            assert_eq!(caller.state(), CallerState::Active, "exhausted early at draw {i}");
            let number = caller.draw_next().unwrap();
            assert!((1..=75).contains(&number));
            assert!(seen.insert(number), "number {number} drawn twice");
        }
        assert_eq!(caller.state(), CallerState::Exhausted);
        assert_eq!(caller.draw_next(), Err(EngineError::PoolExhausted));
        assert_eq!(caller.history().len(), 75);
        assert!(caller.history().is_complete());
    }

    #[test]
    fn test_history_records_draw_order() {
        let mut caller = Caller::new();
        let mut rng = StdRng::seed_from_u64(7);
        let drawn: Vec<Number> =
            (0..10).map(|_| caller.draw_next_with(&mut rng).unwrap()).collect();
        assert_eq!(caller.history().numbers(), drawn.as_slice());
        assert_eq!(caller.remaining(), 65);
    }

    #[test]
    fn test_seeded_draws_are_reproducible() {
        let mut a = Caller::new();
        let mut b = Caller::new();
        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        for _ in 0..20 {
            assert_eq!(a.draw_next_with(&mut rng_a), b.draw_next_with(&mut rng_b));
        }
    }

    #[test]
    fn test_resume_skips_called_numbers() {
        let history = CalledHistory::try_from(vec![5u32, 10, 15]).unwrap();
        let mut caller = Caller::resume(history);
        assert_eq!(caller.remaining(), 72);
        let mut rng = StdRng::seed_from_u64(1);
        while let Ok(number) = caller.draw_next_with(&mut rng) {
            assert!(![5, 10, 15].contains(&number));
        }
        let numbers = caller.into_history();
        assert_eq!(&numbers.numbers()[..3], &[5, 10, 15]);
        assert_eq!(numbers.len(), 75);
    }

    #[test]
    fn test_resume_complete_history_is_exhausted() {
        let full = CalledHistory::try_from((1..=75u32).collect::<Vec<u32>>()).unwrap();
        let mut caller = Caller::resume(full);
        assert!(caller.is_exhausted());
        assert_eq!(caller.draw_next(), Err(EngineError::PoolExhausted));
    }

    #[test]
    fn test_shuffled_calls() {
        let mut rng = StdRng::seed_from_u64(3);
        let calls = shuffled_calls_with(&mut rng, 20);
        assert_eq!(calls.len(), 20);
        let unique: HashSet<_> = calls.iter().collect();
        assert_eq!(unique.len(), 20);

        let all = shuffled_calls(100);
        assert_eq!(all.len(), 75);
        let mut sorted = all.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=75).collect::<Vec<Number>>());
    }
}
