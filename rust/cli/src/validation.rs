//! Input parsing and validation for interactive and one-shot commands.
//!
//! Handles:
//! - Play-session key parsing (primary action, holds, bet, test mode, ...)
//! - Card list parsing for `eval`
//! - Playback speed validation

use std::collections::HashSet;

use fivedraw_engine::bankroll::BetDirection;
use fivedraw_engine::cards::Card;
use fivedraw_engine::hand::HAND_SIZE;

use crate::config::{MAX_SPEED, MIN_SPEED};

/// One line of play-session input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionInput {
    /// Deal / Draw / Next depending on the phase
    Primary,
    /// Toggle the hold on a slot (0-based)
    Hold(usize),
    Bet(BetDirection),
    /// Enter or leave the secret test mode
    ToggleDiagnostic,
    Reset,
    Paytable,
    Help,
}

/// Result type for parsing user input in the play session.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    Input(SessionInput),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse one input line (case-insensitive).
///
/// - empty line, "d", "deal", "draw", "n", "next" → primary action
/// - "1".."5" → toggle hold
/// - "+" / "-" → raise / lower the bet
/// - "z" → toggle test mode
/// - "r" / "reset" → reset the session
/// - "p" / "paytable", "h" / "help" / "?"
/// - "q" / "quit" → quit
///
/// # Example
///
/// ```rust
/// # use fivedraw_cli::validation::{parse_session_input, ParseResult, SessionInput};
/// assert_eq!(parse_session_input(""), ParseResult::Input(SessionInput::Primary));
/// assert_eq!(parse_session_input("3"), ParseResult::Input(SessionInput::Hold(2)));
/// assert_eq!(parse_session_input("q"), ParseResult::Quit);
/// ```
pub fn parse_session_input(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    match input.as_str() {
        "" | "d" | "deal" | "draw" | "n" | "next" | "enter" => {
            ParseResult::Input(SessionInput::Primary)
        }
        "q" | "quit" => ParseResult::Quit,
        "+" | "=" | "up" => ParseResult::Input(SessionInput::Bet(BetDirection::Up)),
        "-" | "_" | "down" => ParseResult::Input(SessionInput::Bet(BetDirection::Down)),
        "z" => ParseResult::Input(SessionInput::ToggleDiagnostic),
        "r" | "reset" => ParseResult::Input(SessionInput::Reset),
        "p" | "paytable" => ParseResult::Input(SessionInput::Paytable),
        "h" | "help" | "?" => ParseResult::Input(SessionInput::Help),
        other => match other.parse::<usize>() {
            Ok(n) if (1..=HAND_SIZE).contains(&n) => ParseResult::Input(SessionInput::Hold(n - 1)),
            _ => ParseResult::Invalid(format!(
                "Unrecognized input '{}'. Type h for help",
                other
            )),
        },
    }
}

/// Parse exactly five distinct cards such as `AS KS QS JS 10S`.
pub fn parse_hand(codes: &[String]) -> Result<[Card; HAND_SIZE], String> {
    if codes.len() != HAND_SIZE {
        return Err(format!(
            "expected {} cards, got {}",
            HAND_SIZE,
            codes.len()
        ));
    }
    let mut cards = Vec::with_capacity(HAND_SIZE);
    let mut seen = HashSet::new();
    for code in codes {
        let card: Card = code.parse().map_err(|e| format!("{}", e))?;
        if !seen.insert(card) {
            return Err(format!("duplicate card {}", card));
        }
        cards.push(card);
    }
    cards
        .try_into()
        .map_err(|_| "expected five cards".to_string())
}

/// Validate playback speed (percent of the default reveal timing).
pub fn validate_speed(speed: u32) -> Result<u32, String> {
    if (MIN_SPEED..=MAX_SPEED).contains(&speed) {
        Ok(speed)
    } else {
        Err(format!(
            "speed must be between {} and {}",
            MIN_SPEED, MAX_SPEED
        ))
    }
}
