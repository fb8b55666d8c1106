// bingo/src/pattern.rs
// The fixed catalogue of winning lines over the 25 card positions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::defs::{CARDSIDE, COLUMNLETTERS};

pub const PATTERNCOUNT: usize = 2 * CARDSIDE + 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternKind {
    Row(u8),
    Column(u8),
    /// 0 runs top-left to bottom-right, 1 runs top-right to bottom-left.
    Diagonal(u8),
}

/// One way to win: five cell positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pattern {
    kind: PatternKind,
    cells: [usize; CARDSIDE],
}

impl Pattern {
    const fn row(row: usize) -> Self {
        let mut cells = [0; CARDSIDE];
        let mut col = 0;
        while col < CARDSIDE {
            cells[col] = row * CARDSIDE + col;
            col += 1;
        }
        Pattern { kind: PatternKind::Row(row as u8), cells }
    }

    const fn column(col: usize) -> Self {
        let mut cells = [0; CARDSIDE];
        let mut row = 0;
        while row < CARDSIDE {
            cells[row] = row * CARDSIDE + col;
            row += 1;
        }
        Pattern { kind: PatternKind::Column(col as u8), cells }
    }

    const fn diagonal(anti: bool) -> Self {
        let mut cells = [0; CARDSIDE];
        let mut row = 0;
        while row < CARDSIDE {
            let col = if anti { CARDSIDE - 1 - row } else { row };
            cells[row] = row * CARDSIDE + col;
            row += 1;
        }
        Pattern { kind: PatternKind::Diagonal(anti as u8), cells }
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    pub fn cells(&self) -> &[usize; CARDSIDE] {
        &self.cells
    }

    pub fn contains(&self, index: usize) -> bool {
        self.cells.contains(&index)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PatternKind::Row(row) => write!(f, "row {}", row + 1),
            PatternKind::Column(col) => write!(f, "column {}", COLUMNLETTERS[col as usize]),
            PatternKind::Diagonal(0) => f.write_str("diagonal \\"),
            PatternKind::Diagonal(_) => f.write_str("diagonal /"),
        }
    }
}

const fn build_patterns() -> [Pattern; PATTERNCOUNT] {
    let mut patterns = [Pattern::row(0); PATTERNCOUNT];
    let mut i = 0;
    while i < CARDSIDE {
        patterns[i] = Pattern::row(i);
        patterns[CARDSIDE + i] = Pattern::column(i);
        i += 1;
    }
    patterns[2 * CARDSIDE] = Pattern::diagonal(false);
    patterns[2 * CARDSIDE + 1] = Pattern::diagonal(true);
    patterns
}

static PATTERNS: [Pattern; PATTERNCOUNT] = build_patterns();

/// Rows, then columns, then the two diagonals.
pub fn patterns() -> &'static [Pattern; PATTERNCOUNT] {
    &PATTERNS
}
