//! Deal command handler.
//!
//! Plays the deal half of a round through the engine with instant reveal
//! timing and prints the five cards with their ranking. The same seed always
//! deals the same hand.

use crate::error::CliError;
use crate::formatters::{format_card, format_cash};
use fivedraw_engine::engine::Engine;
use fivedraw_engine::hand::{HAND_SIZE, evaluate};
use fivedraw_engine::reveal::RevealTiming;
use std::io::Write;

/// Handle the deal command.
///
/// # Examples
///
/// ```ignore
/// let mut out = Vec::new();
/// handle_deal_command(Some(42), &mut out).unwrap();
/// ```
pub fn handle_deal_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let mut eng = Engine::with_timing(seed, RevealTiming::instant());
    eng.start_round()?;
    eng.run_pending();

    let cards = eng
        .snapshot()
        .hand
        .iter()
        .copied()
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| CliError::Engine("deal did not fill every slot".into()))?;
    let cards: [_; HAND_SIZE] = cards
        .try_into()
        .map_err(|_| CliError::Engine("deal did not fill every slot".into()))?;
    let ranking = evaluate(&cards);

    writeln!(out, "Seed: {}", eng.seed())?;
    let shown: Vec<String> = cards.iter().map(format_card).collect();
    writeln!(out, "Hand: {}", shown.join(" "))?;
    writeln!(
        out,
        "Ranking: {} (pays {} at {})",
        ranking.category.name(),
        format_cash(ranking.payout(eng.bet())),
        format_cash(eng.bet())
    )?;
    Ok(())
}
