//! Random number generator verification command.
//!
//! Prints raw ChaCha20 output for a seed together with the first cards of
//! the deck shuffled from the same seed, so a session can be reproduced and
//! its deck order inspected.

use crate::error::CliError;
use crate::formatters::format_card;
use fivedraw_engine::deck::Deck;
use rand::{RngCore, SeedableRng};
use std::io::Write;

const PREVIEW: usize = 10;

/// Handle the rng command.
///
/// # Example
///
/// ```ignore
/// let mut out = Vec::new();
/// handle_rng_command(Some(12345), &mut out).expect("RNG command failed");
/// ```
pub fn handle_rng_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let s = seed.unwrap_or_else(rand::random);
    let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(s);
    let mut vals = vec![];
    for _ in 0..5 {
        vals.push(rng.next_u64());
    }
    writeln!(out, "Seed: {}", s)?;
    writeln!(out, "RNG sample: {:?}", vals)?;

    let mut deck = Deck::new_with_seed(s);
    deck.shuffle();
    let preview: Vec<String> = deck.undealt().iter().take(PREVIEW).map(format_card).collect();
    writeln!(out, "Deck top: {}", preview.join(" "))?;
    Ok(())
}
