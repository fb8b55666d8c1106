// bingo/src/terminal.rs
// Terminal output for cards and the caller's board, plus key-press waits.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode},
};

use crate::board::CalledHistory;
use crate::card::{Card, Cell};
use crate::defs::{CARDLAYOUT, CARDSIDE, COLUMNLETTERS, Number, column_letter, column_range};
use crate::score::{ClaimResult, MarkedSet, near_wins};

const GREEN: &str = "\x1b[1;32m";
const YELLOW: &str = "\x1b[1;33m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

fn paint(text: &str, style: &str) -> String {
    format!("{style}{text}{RESET}")
}

fn gap() -> String {
    " ".repeat(CARDLAYOUT.hnumbers_space as usize)
}

/// Lines of one card. Daubed cells are yellow, the latest call green.
pub fn card_lines(card: &Card, marked: &MarkedSet, last: Option<Number>) -> Vec<String> {
    let mut lines = Vec::new();
    let width = CARDSIDE * (2 + CARDLAYOUT.hnumbers_space as usize);
    lines.push(format!("{:<width$}", format!("Card {}", card.id())));

    let header: Vec<String> = COLUMNLETTERS.iter().map(|letter| format!("{letter:>2}")).collect();
    lines.push(header.join(&gap()) + &gap());

    for (row_index, row) in card.rows().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                let index = row_index * CARDSIDE + col;
                match cell {
                    Cell::Free => paint("FR", YELLOW),
                    Cell::Number(number) if Some(*number) == last && marked.contains(index) => {
                        paint(&format!("{number:2}"), GREEN)
                    }
                    Cell::Number(number) if marked.contains(index) => {
                        paint(&format!("{number:2}"), YELLOW)
                    }
                    Cell::Number(number) => format!("{number:2}"),
                }
            })
            .collect();
        lines.push(cells.join(&gap()) + &gap());
        for _ in 0..CARDLAYOUT.vnumbers_space {
            lines.push(String::new());
        }
    }
    lines
}

/// Several cards printed next to each other.
pub fn render_cards(cards: &[(&Card, MarkedSet)], last: Option<Number>) -> String {
    let blocks: Vec<Vec<String>> = cards
        .iter()
        .map(|(card, marked)| card_lines(card, marked, last))
        .collect();
    let height = blocks.iter().map(Vec::len).max().unwrap_or(0);
    let separator = " ".repeat(CARDLAYOUT.hcards_space as usize);

    let mut output = String::new();
    for line in 0..height {
        let parts: Vec<&str> = blocks
            .iter()
            .map(|block| block.get(line).map(String::as_str).unwrap_or(""))
            .collect();
        output.push_str(parts.join(&separator).trim_end());
        output.push('\n');
    }
    output
}

/// The caller's board: one row per letter, called numbers shown, others dimmed.
pub fn render_board(history: &CalledHistory) -> String {
    let last = history.last();
    let mut output = String::new();
    for (col, letter) in COLUMNLETTERS.iter().enumerate() {
        let cells: Vec<String> = column_range(col)
            .map(|number| {
                if Some(number) == last {
                    paint(&format!("{number:2}"), GREEN)
                } else if history.contains(number) {
                    format!("{number:2}")
                } else {
                    paint(" .", DIM)
                }
            })
            .collect();
        output.push_str(&format!("{letter}  {}\n", cells.join(" ")));
    }
    output
}

pub fn announce(number: Number) -> String {
    match column_letter(number) {
        Some(letter) => format!("{letter}-{number}"),
        None => number.to_string(),
    }
}

/// Full screen for one call: the number, recent calls, board, cards and hints.
pub fn show_on_terminal(
    history: &CalledHistory,
    cards: &[(&Card, MarkedSet)],
    history_display: usize,
) {
    match history.last() {
        Some(number) => println!("Last number: {}", paint(&announce(number), GREEN)),
        None => println!("No numbers called yet"),
    }
    let previous: Vec<String> = history
        .previous_numbers(history_display)
        .into_iter()
        .map(announce)
        .collect();
    println!("Previous numbers: {}", previous.join(" "));
    println!("\nBoard ({} called, {} left):", history.len(), history.remaining().len());
    print!("{}", render_board(history));
    println!();
    print!("{}", render_cards(cards, history.last()));

    for (card, marked) in cards {
        for (pattern, index) in near_wins(marked) {
            if let Some(number) = card.number_at(index) {
                let hint = format!("Card {}: {pattern} needs {}", card.id(), announce(number));
                println!("{}", paint(&hint, YELLOW));
            }
        }
    }
    println!();
}

pub fn show_claim(result: &ClaimResult) {
    if result.is_valid() {
        println!("\n{}", paint(&format!("{result}"), GREEN));
    } else {
        println!("\n{}", paint(&format!("{result}"), YELLOW));
    }
}

/// Raw mode for as long as the guard lives.
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Wait for a key. Returns true when ESC was pressed.
pub fn hitkey() -> io::Result<bool> {
    println!("\nPress any key to call the next number or ESC to exit");

    let result = {
        let _raw = RawMode::enable()?;
        wait_for_key()?
    };

    print!("\x1Bc"); // Clear the screen

    Ok(result)
}

fn wait_for_key() -> io::Result<bool> {
    // Drop anything typed while the screen was drawing
    while event::poll(Duration::from_millis(0))? {
        event::read()?;
    }

    loop {
        if let Event::Key(key_event) = event::read()? {
            if key_event.kind == KeyEventKind::Press {
                return Ok(key_event.code == KeyCode::Esc);
            }
        }
    }
}
