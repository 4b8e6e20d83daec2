//! # fivedraw-engine: Five-Card-Draw Video Poker Core
//!
//! A single-player Jacks-or-Better style engine. Holds the deck, the
//! bankroll and the round state machine, and exposes time-deferred card
//! reveals through a virtual clock so any front end can animate them.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and parsing
//! - [`deck`] - Seeded 52-card deck with ChaCha20 shuffling
//! - [`hand`] - Five-card evaluation and the paytable
//! - [`bankroll`] - Balance, bet adjustment and settlement
//! - [`round`] - Phases, hold flags and the command table
//! - [`reveal`] - Cancelable queue of deferred reveal steps
//! - [`events`] - State snapshots and the notification bus
//! - [`engine`] - The facade tying everything together
//! - [`logger`] - JSONL round history
//! - [`errors`] - Error types for engine operations
//!
//! ## Quick Start
//!
//! ```rust
//! use fivedraw_engine::cards::Card;
//! use fivedraw_engine::hand::{evaluate, Category};
//!
//! let cards: Vec<Card> = ["AS", "KS", "QS", "JS", "10S"]
//!     .iter()
//!     .map(|s| s.parse().unwrap())
//!     .collect();
//! let ranking = evaluate(&cards.try_into().unwrap());
//! assert_eq!(ranking.category, Category::RoyalFlush);
//! assert_eq!(ranking.payout(10), 2500);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! ```rust
//! use fivedraw_engine::deck::Deck;
//!
//! let mut a = Deck::new_with_seed(42);
//! let mut b = Deck::new_with_seed(42);
//! a.shuffle();
//! b.shuffle();
//! assert_eq!(a.draw().unwrap(), b.draw().unwrap());
//! ```

pub mod bankroll;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod events;
pub mod hand;
pub mod logger;
pub mod reveal;
pub mod round;
