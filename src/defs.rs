// bingo/src/defs.rs
// Shared types and constants describing the card geometry and the number pool.

use std::ops::RangeInclusive;

pub type Number = u8;
pub type CardId = u16;

pub struct CardLayout {
    pub side: u8,
    pub numbers_per_column: u8,
    pub hnumbers_space: u8,
    pub vnumbers_space: u8,
    pub hcards_space: u8,
}

pub const CARDLAYOUT: CardLayout = CardLayout {
    side: 5, // rows and columns in a card
    numbers_per_column: 15, // size of each column's number range
    hnumbers_space: 2, // space between numbers in the same row
    vnumbers_space: 0, // empty lines between card rows
    hcards_space: 4, // space between cards printed side by side
};

pub const CARDSIDE: usize = CARDLAYOUT.side as usize;
pub const CELLSPERCARD: usize = CARDSIDE * CARDSIDE;
pub const FREECELL: usize = CELLSPERCARD / 2;

pub const FIRSTNUMBER: Number = 1;
pub const LASTNUMBER: Number = CARDLAYOUT.side * CARDLAYOUT.numbers_per_column - 1 + FIRSTNUMBER;
pub const NUMBERSINPOOL: usize = (LASTNUMBER - FIRSTNUMBER + 1) as usize;

pub const FIRSTCARDID: CardId = 1;
pub const LASTCARDID: CardId = 500;

pub const COLUMNLETTERS: [char; CARDSIDE] = ['B', 'I', 'N', 'G', 'O'];

/// Inclusive number range allowed in card column `col` (B=0 .. O=4).
pub fn column_range(col: usize) -> RangeInclusive<Number> {
    let start = FIRSTNUMBER + col as Number * CARDLAYOUT.numbers_per_column;
    start..=start + CARDLAYOUT.numbers_per_column - 1
}

/// Column letter a called number belongs to, as announced by the caller.
pub fn column_letter(number: Number) -> Option<char> {
    if !(FIRSTNUMBER..=LASTNUMBER).contains(&number) {
        return None;
    }
    let col = ((number - FIRSTNUMBER) / CARDLAYOUT.numbers_per_column) as usize;
    Some(COLUMNLETTERS[col])
}

pub fn is_valid_card_id(card_id: CardId) -> bool {
    (FIRSTCARDID..=LASTCARDID).contains(&card_id)
}
