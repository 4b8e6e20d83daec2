//! Error types for the CLI application.
//!
//! Every command handler returns `Result<(), CliError>` so failures propagate
//! with `?` up to [`crate::run`], which maps them to exit codes.

use std::fmt;

use fivedraw_engine::errors::{CardParseError, GameError};

/// Custom error type for CLI operations.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Engine-related error that is not a rejected game command
    Engine(String),

    /// A game command the engine refused
    Game(GameError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "Engine error: {}", msg),
            CliError::Game(e) => write!(f, "Game error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Game(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        CliError::Game(error)
    }
}

impl From<CardParseError> for CliError {
    fn from(error: CardParseError) -> Self {
        CliError::InvalidInput(error.to_string())
    }
}

impl From<String> for CliError {
    fn from(error: String) -> Self {
        CliError::Engine(error)
    }
}

impl From<&str> for CliError {
    fn from(error: &str) -> Self {
        CliError::Engine(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fivedraw_engine::round::{Command, Phase};
    use std::error::Error;

    #[test]
    fn game_errors_keep_their_source() {
        let e: CliError = GameError::IllegalCommand {
            command: Command::Draw,
            phase: Phase::PreDeal,
        }
        .into();
        assert!(e.to_string().starts_with("Game error:"));
        assert!(e.source().is_some());
    }

    #[test]
    fn card_parse_errors_become_invalid_input() {
        let e: CliError = CardParseError::UnknownSuit('X').into();
        assert!(matches!(e, CliError::InvalidInput(_)));
    }

    #[test]
    fn string_errors_map_to_engine() {
        let e: CliError = "boom".into();
        assert_eq!(e.to_string(), "Engine error: boom");
    }
}
