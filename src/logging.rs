// bingo/src/logging.rs
// Timestamped console logging for the bingo front end and session events.

use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

/// `YYYY-mm-dd HH:MM:SS - LEVEL - message`
pub fn format_line(timestamp: DateTime<Local>, level: LogLevel, message: &str) -> String {
    format!("{} - {} - {}", timestamp.format("%Y-%m-%d %H:%M:%S"), level.as_str(), message)
}

pub fn log_message(level: LogLevel, message: &str) {
    println!("{}", format_line(Local::now(), level, message));
}

pub fn log_info(message: &str) {
    log_message(LogLevel::Info, message);
}

pub fn log_warning(message: &str) {
    log_message(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    log_message(LogLevel::Error, message);
}

/// Session events carry the game id so interleaved rounds stay readable.
pub fn log_game(game_id: &str, message: &str) {
    log_info(&format!("[{game_id}] {message}"));
}

/// Errors that end the program go to stderr.
pub fn log_error_stderr(message: &str) {
    eprintln!("{}", format_line(Local::now(), LogLevel::Error, message));
}
