// bingo/src/game.rs
// One bingo round: the caller, the players' card selections and their claims.
// A Game is a plain value owned by whoever runs the round; independent rounds
// share nothing.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::CalledHistory;
use crate::card::{Card, CardCatalogue};
use crate::config::GameConfig;
use crate::defs::{CardId, Number};
use crate::error::EngineError;
use crate::logging::log_game;
use crate::pattern::Pattern;
use crate::pouch::{Caller, CallerState};
use crate::prize::PrizeDistribution;
use crate::score::{ClaimResult, MarkedSet, called_marks, validate_claim};
use crate::selection::CardSelection;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub player: String,
    pub card_id: CardId,
    pub patterns: Vec<Pattern>,
    /// How many numbers had been called when the claim was accepted.
    pub called_count: usize,
}

pub struct Game {
    id: String,
    created_at: DateTime<Utc>,
    config: GameConfig,
    caller: Caller,
    catalogue: CardCatalogue,
    selections: BTreeMap<String, CardSelection>,
    winners: Vec<Winner>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let game = Self {
            id: new_game_id(),
            created_at: Utc::now(),
            config,
            caller: Caller::new(),
            catalogue: CardCatalogue::new(),
            selections: BTreeMap::new(),
            winners: Vec::new(),
        };
        log_game(&game.id, "New game created");
        game
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn created_at_string(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn history(&self) -> &CalledHistory {
        self.caller.history()
    }

    pub fn caller_state(&self) -> CallerState {
        self.caller.state()
    }

    pub fn winners(&self) -> &[Winner] {
        &self.winners
    }

    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.selections.keys().map(String::as_str)
    }

    pub fn selection(&self, player: &str) -> Option<&CardSelection> {
        self.selections.get(player)
    }

    pub fn card(&mut self, card_id: CardId) -> Result<&Card, EngineError> {
        self.catalogue.get(card_id)
    }

    pub fn has_game_started(&self) -> bool {
        !self.caller.history().is_empty()
    }

    pub fn is_won(&self) -> bool {
        !self.winners.is_empty()
    }

    /// The round ends on the first accepted claim or when the pouch runs dry.
    pub fn is_over(&self) -> bool {
        self.is_won() || self.caller.is_exhausted()
    }

    fn selection_mut(&mut self, player: &str) -> &mut CardSelection {
        let limit = self.config.max_cards_per_player;
        self.selections
            .entry(player.to_string())
            .or_insert_with(|| CardSelection::new(limit))
    }

    /// Register a player without cards.
    pub fn join(&mut self, player: &str) {
        self.selection_mut(player);
    }

    pub fn select_card(&mut self, player: &str, card_id: CardId) -> Result<(), EngineError> {
        self.selection_mut(player).select(card_id)?;
        log_game(&self.id, &format!("{player} selected card {card_id}"));
        Ok(())
    }

    pub fn toggle_card(&mut self, player: &str, card_id: CardId) -> Result<bool, EngineError> {
        self.selection_mut(player).toggle(card_id)
    }

    /// Fill the player's free slots with random cards.
    pub fn auto_select(&mut self, player: &str) -> Vec<CardId> {
        self.auto_select_with(player, &mut rand::rng())
    }

    pub fn auto_select_with<R: Rng + ?Sized>(&mut self, player: &str, rng: &mut R) -> Vec<CardId> {
        let added = self.selection_mut(player).auto_fill(rng);
        if !added.is_empty() {
            log_game(&self.id, &format!("{player} auto-selected cards {added:?}"));
        }
        added
    }

    pub fn call_next(&mut self) -> Result<Number, EngineError> {
        self.call_next_with(&mut rand::rng())
    }

    pub fn call_next_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Number, EngineError> {
        if self.is_won() {
            return Err(EngineError::RoundOver);
        }
        let number = self.caller.draw_next_with(rng)?;
        if self.caller.is_exhausted() {
            log_game(&self.id, &format!("Called {number}, pouch is now empty"));
        }
        Ok(number)
    }

    /// Cells of one of the player's cards covered by the numbers called so far.
    pub fn auto_marks(&mut self, card_id: CardId) -> Result<MarkedSet, EngineError> {
        let card = self.catalogue.get(card_id)?;
        Ok(called_marks(card, self.caller.history()))
    }

    /// Validate a player's claim on one of their cards.
    ///
    /// Fails only when the card id is unknown or not in the player's
    /// selection; a false claim is an `Invalid` result and play continues.
    /// A card already recorded as a winner is not recorded again.
    pub fn claim(
        &mut self,
        player: &str,
        card_id: CardId,
        marked: &MarkedSet,
    ) -> Result<ClaimResult, EngineError> {
        let card = self.catalogue.get(card_id)?;
        let selected = self
            .selections
            .get(player)
            .is_some_and(|selection| selection.contains(card_id));
        if !selected {
            return Err(EngineError::CardNotSelected(card_id));
        }

        let result = validate_claim(card, marked, self.caller.history());
        let already_won = self
            .winners
            .iter()
            .any(|winner| winner.player == player && winner.card_id == card_id);
        match &result {
            ClaimResult::Valid { .. } if already_won => {
                log_game(&self.id, &format!("{player}: card {card_id} already won"));
                return Ok(result);
            }
            ClaimResult::Valid { patterns, .. } => {
                self.winners.push(Winner {
                    player: player.to_string(),
                    card_id,
                    patterns: patterns.clone(),
                    called_count: self.caller.history().len(),
                });
            }
            ClaimResult::Invalid { .. } => {}
        }
        log_game(&self.id, &format!("{player}: {result}"));
        Ok(result)
    }

    pub fn prize(&self) -> PrizeDistribution {
        PrizeDistribution::calculate(
            self.selections.len(),
            self.winners.len(),
            self.config.stake,
            self.config.house_commission,
        )
    }

    pub fn game_info(&self) -> String {
        format!(
            "Game[id={}, created={}, called={}, remaining={}, players={}, winners={}]",
            self.id,
            self.created_at_string(),
            self.caller.history().len(),
            self.caller.remaining(),
            self.selections.len(),
            self.winners.len()
        )
    }

    /// Start a fresh round under a new id. Players and their cards are dropped.
    pub fn reset_game(&mut self) -> Vec<String> {
        let mut reset_components = Vec::new();

        self.id = new_game_id();
        self.created_at = Utc::now();
        reset_components.push(format!("New game ID generated: {}", self.id));

        self.caller = Caller::new();
        reset_components.push("Pouch refilled with numbers 1-75".to_string());

        self.selections.clear();
        reset_components.push("Card selections cleared".to_string());

        self.winners.clear();
        reset_components.push("Winners cleared".to_string());

        log_game(&self.id, "Game reset");
        reset_components
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            id: self.id.clone(),
            created_at: self.created_at,
            called: self.caller.history().clone(),
            selections: self.selections.clone(),
            winners: self.winners.clone(),
        }
    }

    /// Rebuild a round from a snapshot. Every winner must hold the card it won with.
    pub fn restore(snapshot: GameSnapshot, config: GameConfig) -> Result<Self, EngineError> {
        for winner in &snapshot.winners {
            let selected = snapshot
                .selections
                .get(&winner.player)
                .is_some_and(|selection| selection.contains(winner.card_id));
            if !selected {
                return Err(EngineError::CardNotSelected(winner.card_id));
            }
        }

        Ok(Self {
            id: snapshot.id,
            created_at: snapshot.created_at,
            config,
            caller: Caller::resume(snapshot.called),
            catalogue: CardCatalogue::new(),
            selections: snapshot.selections,
            winners: snapshot.winners,
        })
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    pub fn from_json(json: &str, config: GameConfig) -> Result<Self, EngineError> {
        let snapshot: GameSnapshot = serde_json::from_str(json)?;
        Self::restore(snapshot, config)
    }

    /// Write the round to `<dir>/<game id>.json` and return the file path.
    pub fn dump_to_json<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf, EngineError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let filepath = dir.join(format!("{}.json", self.id));
        fs::write(&filepath, self.to_json()?)?;
        log_game(&self.id, &format!("Game dumped to: {}", filepath.display()));
        Ok(filepath)
    }
}

fn new_game_id() -> String {
    format!("game_{:08x}", rand::rng().random::<u32>())
}

/// Serializable state of a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub called: CalledHistory,
    pub selections: BTreeMap<String, CardSelection>,
    pub winners: Vec<Winner>,
}
