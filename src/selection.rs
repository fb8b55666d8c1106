// bingo/src/selection.rs
// A player's choice of cards for a round, capped at a fixed number of cards.

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::defs::{CardId, FIRSTCARDID, LASTCARDID, is_valid_card_id};
use crate::error::EngineError;

pub const DEFAULT_CARD_LIMIT: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SelectionRepr")]
pub struct CardSelection {
    limit: usize,
    ids: BTreeSet<CardId>,
}

#[derive(Deserialize)]
struct SelectionRepr {
    limit: usize,
    ids: Vec<CardId>,
}

// Decoded selections go through `select`, so they hold only pool ids and
// never more than their limit.
impl TryFrom<SelectionRepr> for CardSelection {
    type Error = EngineError;

    fn try_from(repr: SelectionRepr) -> Result<Self, Self::Error> {
        let mut selection = CardSelection::new(repr.limit);
        for card_id in repr.ids {
            selection.select(card_id)?;
        }
        Ok(selection)
    }
}

impl CardSelection {
    pub fn new(limit: usize) -> Self {
        CardSelection {
            limit,
            ids: BTreeSet::new(),
        }
    }

    /// Select or deselect a card. Returns true when the card is now selected.
    pub fn toggle(&mut self, card_id: CardId) -> Result<bool, EngineError> {
        if !is_valid_card_id(card_id) {
            return Err(EngineError::InvalidCardId(card_id));
        }
        if self.ids.remove(&card_id) {
            return Ok(false);
        }
        self.select(card_id)?;
        Ok(true)
    }

    /// Select a card, keeping it if it is already selected.
    pub fn select(&mut self, card_id: CardId) -> Result<(), EngineError> {
        if !is_valid_card_id(card_id) {
            return Err(EngineError::InvalidCardId(card_id));
        }
        if self.ids.contains(&card_id) {
            return Ok(());
        }
        if self.is_full() {
            return Err(EngineError::SelectionFull(self.limit));
        }
        self.ids.insert(card_id);
        Ok(())
    }

    /// Fill the free slots with random cards not already held. Returns the new ids.
    pub fn auto_fill<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<CardId> {
        let pool = usize::from(LASTCARDID - FIRSTCARDID + 1);
        let mut added = Vec::new();
        while !self.is_full() && self.ids.len() < pool {
            let card_id = rng.random_range(FIRSTCARDID..=LASTCARDID);
            if self.ids.insert(card_id) {
                added.push(card_id);
            }
        }
        added
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, card_id: CardId) -> bool {
        self.ids.contains(&card_id)
    }

    /// Selected ids, ascending.
    pub fn ids(&self) -> Vec<CardId> {
        self.ids.iter().copied().collect()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= self.limit
    }
}

impl Default for CardSelection {
    fn default() -> Self {
        Self::new(DEFAULT_CARD_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_toggle_adds_and_removes() {
        let mut selection = CardSelection::default();
        assert_eq!(selection.toggle(17), Ok(true));
        assert!(selection.contains(17));
        assert_eq!(selection.toggle(17), Ok(false));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_limit_enforced() {
        let mut selection = CardSelection::default();
        selection.toggle(1).unwrap();
        selection.toggle(2).unwrap();
        assert!(selection.is_full());
        assert_eq!(selection.toggle(3), Err(EngineError::SelectionFull(2)));
        // deselecting still works when full
        assert_eq!(selection.toggle(1), Ok(false));
        assert_eq!(selection.toggle(3), Ok(true));
        assert_eq!(selection.ids(), vec![2, 3]);
    }

    #[test]
    fn test_select_is_idempotent() {
        let mut selection = CardSelection::new(1);
        selection.select(9).unwrap();
        selection.select(9).unwrap();
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_invalid_ids_rejected() {
        let mut selection = CardSelection::default();
        assert_eq!(selection.toggle(0), Err(EngineError::InvalidCardId(0)));
        assert_eq!(selection.select(501), Err(EngineError::InvalidCardId(501)));
    }

    #[test]
    fn test_auto_fill_tops_up_distinct_cards() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut selection = CardSelection::new(5);
        selection.select(250).unwrap();
        let added = selection.auto_fill(&mut rng);
        assert_eq!(added.len(), 4);
        assert!(!added.contains(&250));
        assert_eq!(selection.len(), 5);
        assert!(selection.ids().iter().all(|&id| (1..=500).contains(&id)));
        assert!(selection.auto_fill(&mut rng).is_empty());
    }

    #[test]
    fn test_json_decoding_checks_ids_and_limit() {
        let mut selection = CardSelection::default();
        selection.select(8).unwrap();
        selection.select(300).unwrap();
        let json = serde_json::to_string(&selection).unwrap();
        assert_eq!(serde_json::from_str::<CardSelection>(&json).unwrap(), selection);

        let unknown: Result<CardSelection, _> = serde_json::from_str(r#"{"limit":2,"ids":[0]}"#);
        assert!(unknown.is_err());
        let crowded: Result<CardSelection, _> = serde_json::from_str(r#"{"limit":1,"ids":[4,5]}"#);
        assert!(crowded.is_err());
    }

    #[test]
    fn test_clear() {
        let mut selection = CardSelection::default();
        selection.select(4).unwrap();
        selection.clear();
        assert!(selection.is_empty());
        assert_eq!(selection.limit(), 2);
    }
}
