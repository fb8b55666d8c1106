// bingo/src/card.rs
// Deterministic card generation: a card id always yields the same 5x5 layout.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::defs::{
    CARDSIDE, CELLSPERCARD, CardId, FIRSTCARDID, FREECELL, LASTCARDID, Number, column_range,
    is_valid_card_id,
};
use crate::error::EngineError;
use crate::rng::SeedSequence;

const FREE_LABEL: &str = "FREE";

/// One cell of a card: a number or the free centre space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Number(Number),
    Free,
}

impl Cell {
    pub fn number(self) -> Option<Number> {
        match self {
            Cell::Number(number) => Some(number),
            Cell::Free => None,
        }
    }

    pub fn is_free(self) -> bool {
        matches!(self, Cell::Free)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(number) => write!(f, "{number}"),
            Cell::Free => f.write_str(FREE_LABEL),
        }
    }
}

// Cells travel as plain integers, with the free space spelled "FREE".
impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Number(number) => serializer.serialize_u8(*number),
            Cell::Free => serializer.serialize_str(FREE_LABEL),
        }
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(Number),
            Label(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(number) => Ok(Cell::Number(number)),
            Repr::Label(label) if label == FREE_LABEL => Ok(Cell::Free),
            Repr::Label(label) => Err(serde::de::Error::custom(format!(
                "expected a number or \"{FREE_LABEL}\", got \"{label}\""
            ))),
        }
    }
}

/// A bingo card: 25 cells in row-major order, centre cell free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CardRepr")]
pub struct Card {
    id: CardId,
    numbers: [Cell; CELLSPERCARD],
}

#[derive(Deserialize)]
struct CardRepr {
    id: CardId,
    numbers: Vec<Cell>,
}

// A decoded card is rebuilt from its id and must match the stored cells.
impl TryFrom<CardRepr> for Card {
    type Error = EngineError;

    fn try_from(repr: CardRepr) -> Result<Self, Self::Error> {
        let card = generate_card(repr.id)?;
        if repr.numbers[..] != card.numbers[..] {
            return Err(EngineError::CardMismatch(repr.id));
        }
        Ok(card)
    }
}

impl Card {
    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn numbers(&self) -> &[Cell; CELLSPERCARD] {
        &self.numbers
    }

    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.numbers.get(index).copied()
    }

    /// Number printed at `index`, `None` for the free space or a bad index.
    pub fn number_at(&self, index: usize) -> Option<Number> {
        self.cell(index).and_then(Cell::number)
    }

    pub fn contains(&self, number: Number) -> bool {
        self.index_of(number).is_some()
    }

    pub fn index_of(&self, number: Number) -> Option<usize> {
        self.numbers.iter().position(|cell| *cell == Cell::Number(number))
    }

    pub fn column(&self, col: usize) -> Vec<Cell> {
        self.numbers.iter().skip(col).step_by(CARDSIDE).copied().collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.numbers.chunks(CARDSIDE)
    }
}

/// Build the card for `card_id`.
///
/// Each column draws from the seeded sequence until it holds five distinct
/// values from its range, then sorts them top to bottom. Columns are filled
/// B, I, N, G, O from one continuous sequence, so the draw order is part of
/// the card's identity.
pub fn generate_card(card_id: CardId) -> Result<Card, EngineError> {
    if !is_valid_card_id(card_id) {
        return Err(EngineError::InvalidCardId(card_id));
    }

    let mut draws = SeedSequence::for_card(card_id);
    let mut numbers = [Cell::Free; CELLSPERCARD];

    for col in 0..CARDSIDE {
        let column = draw_column(&mut draws, column_range(col));
        for (row, number) in column.into_iter().enumerate() {
            numbers[row * CARDSIDE + col] = Cell::Number(number);
        }
    }

    numbers[FREECELL] = Cell::Free;

    Ok(Card { id: card_id, numbers })
}

fn draw_column(draws: &mut SeedSequence, range: RangeInclusive<Number>) -> Vec<Number> {
    let min = *range.start();
    let span = f64::from(*range.end() - min + 1);
    let mut column: Vec<Number> = Vec::with_capacity(CARDSIDE);

    // The generator has full period, so every value in range eventually shows up.
    for value in draws.by_ref() {
        let number = (f64::from(min) + value * span).floor() as Number;
        if !column.contains(&number) {
            column.push(number);
            if column.len() == CARDSIDE {
                break;
            }
        }
    }

    column.sort_unstable();
    column
}

/// Cache of generated cards keyed by id.
#[derive(Debug, Clone, Default)]
pub struct CardCatalogue {
    cards: HashMap<CardId, Card>,
}

impl CardCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalogue with the whole pool generated up front.
    pub fn full() -> Self {
        let mut cards = HashMap::with_capacity(usize::from(LASTCARDID));
        for card_id in FIRSTCARDID..=LASTCARDID {
            if let Ok(card) = generate_card(card_id) {
                cards.insert(card_id, card);
            }
        }
        Self { cards }
    }

    pub fn get(&mut self, card_id: CardId) -> Result<&Card, EngineError> {
        match self.cards.entry(card_id) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => Ok(entry.insert(generate_card(card_id)?)),
        }
    }

    pub fn cached(&self, card_id: CardId) -> Option<&Card> {
        self.cards.get(&card_id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::LASTNUMBER;
    use std::collections::HashSet;

    #[test]
    fn test_generation_is_deterministic() {
        for card_id in FIRSTCARDID..=LASTCARDID {
            let first = generate_card(card_id).unwrap();
            let second = generate_card(card_id).unwrap();
            assert_eq!(first.numbers(), second.numbers(), "card {card_id} differs");
        }
    }

    #[test]
    fn test_free_cell_always_centre() {
        for card_id in FIRSTCARDID..=LASTCARDID {
            let card = generate_card(card_id).unwrap();
            assert_eq!(card.cell(FREECELL), Some(Cell::Free));
            let free_cells = card.numbers().iter().filter(|c| c.is_free()).count();
            assert_eq!(free_cells, 1);
        }
    }

    #[test]
    fn test_columns_distinct_and_in_range() {
        for card_id in FIRSTCARDID..=LASTCARDID {
            let card = generate_card(card_id).unwrap();
            for col in 0..CARDSIDE {
                let range = column_range(col);
                let numbers: Vec<Number> =
                    card.column(col).into_iter().filter_map(Cell::number).collect();
                let expected = if col == 2 { 4 } else { 5 };
                assert_eq!(numbers.len(), expected, "card {card_id} column {col}");
                let unique: HashSet<_> = numbers.iter().collect();
                assert_eq!(unique.len(), numbers.len(), "card {card_id} column {col} repeats");
                assert!(
                    numbers.iter().all(|n| range.contains(n)),
                    "card {card_id} column {col} out of range"
                );
            }
        }
    }

    #[test]
    fn test_columns_sorted_top_to_bottom() {
        let card = generate_card(42).unwrap();
        for col in 0..CARDSIDE {
            let numbers: Vec<Number> =
                card.column(col).into_iter().filter_map(Cell::number).collect();
            assert!(numbers.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_card_one_layout() {
        // Replays the generator by hand for the first column of card 1.
        let mut draws = SeedSequence::for_card(1);
        let mut expected = Vec::new();
        while expected.len() < 5 {
            let n = (1.0 + draws.next().unwrap() * 15.0).floor() as Number;
            if !expected.contains(&n) {
                expected.push(n);
            }
        }
        expected.sort_unstable();

        let card = generate_card(1).unwrap();
        let column: Vec<Number> = card.column(0).into_iter().filter_map(Cell::number).collect();
        assert_eq!(column, expected);
    }

    #[test]
    fn test_invalid_card_ids() {
        assert_eq!(generate_card(0), Err(EngineError::InvalidCardId(0)));
        assert_eq!(generate_card(501), Err(EngineError::InvalidCardId(501)));
        assert!(generate_card(1).is_ok());
        assert!(generate_card(500).is_ok());
    }

    #[test]
    fn test_lookup_helpers() {
        let card = generate_card(7).unwrap();
        let number = card.number_at(0).unwrap();
        assert!(card.contains(number));
        assert_eq!(card.index_of(number), Some(0));
        assert_eq!(card.number_at(FREECELL), None);
        assert_eq!(card.number_at(25), None);
        assert!(!card.contains(0));
        assert!(!card.contains(LASTNUMBER + 1));
        assert_eq!(card.rows().count(), 5);
        assert!(card.rows().all(|row| row.len() == 5));
    }

    #[test]
    fn test_card_json_uses_free_label() {
        let card = generate_card(3).unwrap();
        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains("\"FREE\""));
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
    }

    #[test]
    fn test_tampered_card_json_rejected() {
        let card = generate_card(3).unwrap();
        let json = serde_json::to_value(&card).unwrap();

        let mut unknown_id = json.clone();
        unknown_id["id"] = serde_json::json!(9999);
        assert!(serde_json::from_value::<Card>(unknown_id).is_err());

        let mut moved_free = json.clone();
        moved_free["numbers"][0] = serde_json::json!("FREE");
        assert!(serde_json::from_value::<Card>(moved_free).is_err());

        let mut swapped = json.clone();
        swapped["numbers"][0] = serde_json::json!(99);
        assert!(serde_json::from_value::<Card>(swapped).is_err());

        let mut short = json;
        short["numbers"].as_array_mut().unwrap().pop();
        assert!(serde_json::from_value::<Card>(short).is_err());

        let repr = CardRepr {
            id: 3,
            numbers: vec![Cell::Free; CELLSPERCARD],
        };
        assert_eq!(Card::try_from(repr), Err(EngineError::CardMismatch(3)));
    }

    #[test]
    fn test_cell_rejects_unknown_label() {
        let result: Result<Cell, _> = serde_json::from_str("\"BONUS\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_catalogue_caches() {
        let mut catalogue = CardCatalogue::new();
        assert!(catalogue.is_empty());
        let numbers = *catalogue.get(10).unwrap().numbers();
        assert_eq!(catalogue.len(), 1);
        assert_eq!(catalogue.cached(10).map(|c| *c.numbers()), Some(numbers));
        assert_eq!(catalogue.get(0), Err(EngineError::InvalidCardId(0)));
        assert_eq!(catalogue.len(), 1);
    }

    #[test]
    fn test_full_catalogue() {
        let catalogue = CardCatalogue::full();
        assert_eq!(catalogue.len(), 500);
        assert_eq!(catalogue.cached(250), Some(&generate_card(250).unwrap()));
    }
}
