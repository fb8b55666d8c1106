// src/main.rs
// Command line front end for the bingo engine.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use bingo::board::CalledHistory;
use bingo::card::{Card, generate_card};
use bingo::config::{DEFAULT_CONFIG_PATH, GameConfig};
use bingo::defs::CardId;
use bingo::error::EngineError;
use bingo::game::Game;
use bingo::logging::{log_error_stderr, log_info, log_warning};
use bingo::pouch::shuffled_calls;
use bingo::score::{MarkedSet, called_marks, find_winning_patterns, validate_claim};
use bingo::selection::CardSelection;
use bingo::terminal;

const PLAYER: &str = "player";
const CARDS_PER_LINE: usize = 4;

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(about = "Bingo - deterministic 75-ball cards, a caller and claim checks")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print cards from the pool of 500
    Card {
        /// Card ids (1-500)
        #[arg(required = true)]
        ids: Vec<CardId>,

        /// Print the cards as JSON
        #[arg(long)]
        json: bool,
    },
    /// Play a round in the terminal
    Play {
        /// Cards to play (comma separated); random cards when omitted
        #[arg(long = "cards", value_delimiter = ',')]
        cards: Vec<CardId>,

        /// Top up the selection with random cards
        #[arg(long)]
        auto: bool,

        /// Seconds between calls (default from config)
        #[arg(long)]
        interval: Option<u64>,

        /// Wait for a key press before each call instead of the timer
        #[arg(long)]
        manual: bool,

        /// Write the finished round to the dump directory
        #[arg(long)]
        dump: bool,

        /// Configuration file
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
    /// Validate a claim against a list of called numbers
    Claim {
        /// Card id (1-500)
        #[arg(long)]
        card: CardId,

        /// Daubed positions 0-24 (comma separated); 12 is always included
        #[arg(long, value_delimiter = ',')]
        marked: Vec<usize>,

        /// Called numbers in call order (comma separated)
        #[arg(long, value_delimiter = ',')]
        called: Vec<u32>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a shuffled call sequence
    Calls {
        /// How many numbers to call
        #[arg(default_value_t = 75)]
        count: usize,
    },
}

fn print_cards(ids: &[CardId], json: bool) -> Result<(), EngineError> {
    let cards = ids
        .iter()
        .map(|&card_id| generate_card(card_id))
        .collect::<Result<Vec<Card>, _>>()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
        return Ok(());
    }

    let view: Vec<(&Card, MarkedSet)> = cards.iter().map(|card| (card, MarkedSet::new())).collect();
    for chunk in view.chunks(CARDS_PER_LINE) {
        println!("{}", terminal::render_cards(chunk, None));
    }
    Ok(())
}

fn check_claim(
    card_id: CardId,
    marked: Vec<usize>,
    called: Vec<u32>,
    json: bool,
) -> Result<(), EngineError> {
    let card = generate_card(card_id)?;
    let marked = MarkedSet::from_positions(marked)?;
    let called = CalledHistory::try_from(called)?;
    let result = validate_claim(&card, &marked, &called);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", terminal::render_cards(&[(&card, marked)], called.last()));
        terminal::show_claim(&result);
    }
    Ok(())
}

fn print_calls(count: usize) {
    let calls: Vec<String> = shuffled_calls(count).into_iter().map(terminal::announce).collect();
    println!("{}", calls.join(" "));
}

async fn play(
    config: GameConfig,
    card_ids: Vec<CardId>,
    auto: bool,
    interval: Option<u64>,
    manual: bool,
    dump: bool,
) -> Result<(), EngineError> {
    let mut game = Game::new(config.clone());

    for card_id in card_ids {
        game.select_card(PLAYER, card_id)?;
    }
    if auto || game.selection(PLAYER).is_none_or(CardSelection::is_empty) {
        game.auto_select(PLAYER);
    }

    let selected = game.selection(PLAYER).map(CardSelection::ids).unwrap_or_default();
    let cards = selected
        .iter()
        .map(|&card_id| game.card(card_id).cloned())
        .collect::<Result<Vec<Card>, _>>()?;
    log_info(&game.game_info());
    log_info(&format!("Playing cards {selected:?}"));

    let period = Duration::from_secs(interval.unwrap_or(config.call_interval_secs).max(1));
    let mut ticker = tokio::time::interval(period);

    while !game.is_over() {
        if manual {
            if terminal::hitkey()? {
                log_info("Game interrupted");
                break;
            }
        } else {
            ticker.tick().await;
        }

        game.call_next()?;

        let view: Vec<(&Card, MarkedSet)> = cards
            .iter()
            .map(|card| (card, called_marks(card, game.history())))
            .collect();
        terminal::show_on_terminal(game.history(), &view, config.history_display);

        // Cards are daubed automatically, so claim as soon as a line completes.
        for (card, marked) in &view {
            if !find_winning_patterns(marked).is_empty() {
                let result = game.claim(PLAYER, card.id(), marked)?;
                terminal::show_claim(&result);
            }
        }
    }

    if game.is_won() {
        let prize = game.prize();
        log_info(&format!(
            "Round won after {} calls, prize per winner {:.2}",
            game.history().len(),
            prize.prize_per_winner
        ));
    } else if game.is_over() {
        log_warning("All 75 numbers called without a winner");
    }

    if dump {
        game.dump_to_json(&config.dump_dir)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let outcome = match args.command {
        Command::Card { ids, json } => print_cards(&ids, json),
        Command::Claim { card, marked, called, json } => check_claim(card, marked, called, json),
        Command::Calls { count } => {
            print_calls(count);
            Ok(())
        }
        Command::Play { cards, auto, interval, manual, dump, config } => {
            let config = GameConfig::load_from_or_default(config);
            play(config, cards, auto, interval, manual, dump).await
        }
    };

    if let Err(e) = outcome {
        log_error_stderr(&e.to_string());
        std::process::exit(1);
    }
}
