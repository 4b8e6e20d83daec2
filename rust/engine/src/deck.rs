use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

pub const DECK_SIZE: usize = 52;

/// A 52-card deck with a `top` cursor. Cards before `top` are dealt and
/// stay out of play until the next reset.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    top: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep canonical order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            top: 0,
            rng,
        }
    }

    /// Restores the canonical 52-card order and marks every card undealt.
    pub fn reset(&mut self) {
        self.cards = full_deck();
        self.top = 0;
    }

    /// Fisher-Yates over the whole sequence, last position first.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
    }

    /// Reshuffles a fresh deck when fewer than `n` undealt cards remain.
    /// Returns `true` if a reshuffle happened.
    pub fn ensure_capacity(&mut self, n: usize) -> bool {
        if self.remaining() >= n {
            return false;
        }
        tracing::debug!(
            needed = n,
            remaining = self.remaining(),
            "deck below capacity, reshuffling"
        );
        self.reset();
        self.shuffle();
        true
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        let card = *self.cards.get(self.top).ok_or(GameError::ExhaustedDeck)?;
        self.top += 1;
        Ok(card)
    }

    /// Moves `cards` into the dealt region so they cannot be drawn again.
    /// Cards already dealt are left where they are.
    pub fn withdraw(&mut self, cards: &[Card]) {
        for card in cards {
            if let Some(pos) = self.cards[self.top..].iter().position(|c| c == card) {
                self.cards.swap(self.top, self.top + pos);
                self.top += 1;
            }
        }
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.top)
    }

    pub fn top(&self) -> usize {
        self.top
    }

    pub fn undealt(&self) -> &[Card] {
        &self.cards[self.top..]
    }
}
