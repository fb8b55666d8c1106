use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::EngineError;
use crate::logging::{log_info, log_warning};
use crate::selection::DEFAULT_CARD_LIMIT;

pub const DEFAULT_CONFIG_PATH: &str = "conf/bingo.conf";

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub call_interval_secs: u64,
    pub max_cards_per_player: usize,
    pub stake: f64,
    pub house_commission: f64,
    pub history_display: usize,
    pub dump_dir: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            call_interval_secs: 3,
            max_cards_per_player: DEFAULT_CARD_LIMIT,
            stake: 10.0,
            house_commission: 0.2,
            history_display: 5,
            dump_dir: PathBuf::from("data/games"),
        }
    }
}

impl GameConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let content = fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn load_or_default() -> Self {
        Self::load_from_or_default(DEFAULT_CONFIG_PATH)
    }

    pub fn load_from_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::from_file(path) {
            Ok(config) => {
                log_info(&format!("Loaded configuration from {}", path.display()));
                config
            }
            Err(e) => {
                log_warning(&format!(
                    "Could not load config from {}: {e}. Using defaults.",
                    path.display()
                ));
                Self::default()
            }
        }
    }
}

impl FromStr for GameConfig {
    type Err = EngineError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let config_map = parse_config(content)?;
        let defaults = GameConfig::default();

        let house_commission = value_or(&config_map, "house_commission", defaults.house_commission);
        if !(0.0..=1.0).contains(&house_commission) {
            return Err(EngineError::Config(format!(
                "house_commission must be between 0 and 1, got {house_commission}"
            )));
        }

        Ok(GameConfig {
            call_interval_secs: value_or(
                &config_map,
                "call_interval_secs",
                defaults.call_interval_secs,
            ),
            max_cards_per_player: value_or(
                &config_map,
                "max_cards_per_player",
                defaults.max_cards_per_player,
            ),
            stake: value_or(&config_map, "stake", defaults.stake),
            house_commission,
            history_display: value_or(&config_map, "history_display", defaults.history_display),
            dump_dir: config_map
                .get("dump_dir")
                .map(PathBuf::from)
                .unwrap_or(defaults.dump_dir),
        })
    }
}

// Unparseable values fall back to the default for that key.
fn value_or<T: FromStr>(config_map: &HashMap<String, String>, key: &str, default: T) -> T {
    config_map
        .get(key)
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn parse_config(content: &str) -> Result<HashMap<String, String>, EngineError> {
    let mut config = HashMap::new();

    for (line_number, line) in content.lines().enumerate() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match line.split_once('=') {
            Some((key, value)) => {
                config.insert(key.trim().to_string(), value.trim().to_string());
            }
            None => {
                return Err(EngineError::Config(format!(
                    "line {}: expected `key = value`, got `{line}`",
                    line_number + 1
                )));
            }
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let content = r#"
            # This is a comment
            call_interval_secs = 5
            stake = 2.5
            # Another comment
            dump_dir = /tmp/bingo
        "#;

        let config = parse_config(content).unwrap();
        assert_eq!(config.get("call_interval_secs"), Some(&"5".to_string()));
        assert_eq!(config.get("stake"), Some(&"2.5".to_string()));
        assert_eq!(config.get("dump_dir"), Some(&"/tmp/bingo".to_string()));
    }

    #[test]
    fn test_parse_config_rejects_garbage_line() {
        let result = parse_config("stake = 1\nnot a pair\n");
        assert_eq!(
            result,
            Err(EngineError::Config("line 2: expected `key = value`, got `not a pair`".to_string()))
        );
    }

    #[test]
    fn test_game_config_default() {
        let config = GameConfig::default();
        assert_eq!(config.call_interval_secs, 3);
        assert_eq!(config.max_cards_per_player, 2);
        assert_eq!(config.stake, 10.0);
        assert_eq!(config.house_commission, 0.2);
        assert_eq!(config.history_display, 5);
        assert_eq!(config.dump_dir, PathBuf::from("data/games"));
    }

    #[test]
    fn test_game_config_from_str() {
        let text = "max_cards_per_player = 4\ncall_interval_secs = 1\nhouse_commission = 0.1";
        let config: GameConfig = text.parse().unwrap();
        assert_eq!(config.max_cards_per_player, 4);
        assert_eq!(config.call_interval_secs, 1);
        assert_eq!(config.house_commission, 0.1);
        assert_eq!(config.stake, 10.0);
    }

    #[test]
    fn test_bad_values_fall_back_to_defaults() {
        let config: GameConfig = "call_interval_secs = soon\nstake = -".parse().unwrap();
        assert_eq!(config.call_interval_secs, 3);
        assert_eq!(config.stake, 10.0);
    }

    #[test]
    fn test_commission_out_of_range() {
        let result: Result<GameConfig, _> = "house_commission = 1.5".parse();
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = GameConfig::load_from_or_default("does/not/exist.conf");
        assert_eq!(config, GameConfig::default());
    }
}
