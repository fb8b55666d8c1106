// bingo/src/rng.rs
// Linear congruential generator used to derive card layouts from card ids.
// Every issued card depends on these constants: they must never change.

use crate::defs::CardId;

pub const MULTIPLIER: u64 = 9301;
pub const INCREMENT: u64 = 49297;
pub const MODULUS: u64 = 233280;

/// Initial generator state for a card.
pub fn seed_for(card_id: CardId) -> u64 {
    u64::from(card_id) * MULTIPLIER + INCREMENT
}

/// Advance the generator once, returning a value in `[0, 1)` and the new state.
pub fn next(state: u64) -> (f64, u64) {
    // Reducing first keeps the product in range for any input state.
    let new_state = ((state % MODULUS) * MULTIPLIER + INCREMENT) % MODULUS;
    (new_state as f64 / MODULUS as f64, new_state)
}

/// Endless stream of generator values starting from a seed.
#[derive(Debug, Clone)]
pub struct SeedSequence {
    state: u64,
}

impl SeedSequence {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn for_card(card_id: CardId) -> Self {
        Self::new(seed_for(card_id))
    }

    pub fn state(&self) -> u64 {
        self.state
    }
}

impl Iterator for SeedSequence {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let (value, state) = next(self.state);
        self.state = state;
        Some(value)
    }
}
