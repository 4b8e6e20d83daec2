use thiserror::Error;

use crate::bankroll::BetDirection;
use crate::round::{Command, Phase};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Command {command} is not allowed during {phase}")]
    IllegalCommand { command: Command, phase: Phase },
    #[error("Cannot {direction} bet: bet {bet}, balance {balance}")]
    InvalidAdjustment {
        direction: BetDirection,
        bet: u32,
        balance: u32,
    },
    #[error("Deck exhausted: draw requested without capacity check")]
    ExhaustedDeck,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CardParseError {
    #[error("Malformed card: {0:?}")]
    Malformed(String),
    #[error("Unknown rank: {0:?}")]
    UnknownRank(String),
    #[error("Unknown suit: {0:?}")]
    UnknownSuit(char),
}
