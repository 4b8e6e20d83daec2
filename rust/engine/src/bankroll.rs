use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Bet increment and the per-round ante.
pub const BET_STEP: u32 = 10;
pub const MIN_BET: u32 = BET_STEP;
/// Balance at session start and after a bailout.
pub const STARTING_BALANCE: u32 = 90;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetDirection {
    Up,
    Down,
}

impl fmt::Display for BetDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetDirection::Up => f.write_str("raise"),
            BetDirection::Down => f.write_str("lower"),
        }
    }
}

/// Outcome of settling one round against the bankroll.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub payout: u32,
    pub balance: u32,
    pub bailout: bool,
}

/// Balance and pending wager. The first `MIN_BET` of the wager is an ante
/// charged at settlement; every step above it is moved out of the balance
/// when the bet is raised.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bankroll {
    balance: u32,
    bet: u32,
}

impl Default for Bankroll {
    fn default() -> Self {
        Self::new()
    }
}

impl Bankroll {
    pub fn new() -> Self {
        Self {
            balance: STARTING_BALANCE,
            bet: MIN_BET,
        }
    }

    pub fn with_balance(balance: u32, bet: u32) -> Self {
        Self { balance, bet }
    }

    pub fn balance(&self) -> u32 {
        self.balance
    }

    pub fn bet(&self) -> u32 {
        self.bet
    }

    pub fn adjust_bet(&mut self, direction: BetDirection) -> Result<(), GameError> {
        match direction {
            BetDirection::Up if self.balance >= BET_STEP => {
                self.balance -= BET_STEP;
                self.bet += BET_STEP;
            }
            BetDirection::Down if self.bet > MIN_BET => {
                self.bet -= BET_STEP;
                self.balance += BET_STEP;
            }
            _ => {
                tracing::debug!(
                    direction = %direction,
                    bet = self.bet,
                    balance = self.balance,
                    "bet adjustment rejected"
                );
                return Err(GameError::InvalidAdjustment {
                    direction,
                    bet: self.bet,
                    balance: self.balance,
                });
            }
        }
        tracing::debug!(bet = self.bet, balance = self.balance, "bet adjusted");
        Ok(())
    }

    /// Credits `payout`, charges the ante and resets the bet. A balance that
    /// ends at or below zero is restored to `STARTING_BALANCE`.
    pub fn settle(&mut self, payout: u32) -> Settlement {
        let after = i64::from(self.balance) + i64::from(payout) - i64::from(MIN_BET);
        self.bet = MIN_BET;

        let bailout = after <= 0;
        self.balance = if bailout {
            tracing::info!(balance = after, "bankroll exhausted, bailing out");
            STARTING_BALANCE
        } else {
            u32::try_from(after).unwrap_or(u32::MAX)
        };

        Settlement {
            payout,
            balance: self.balance,
            bailout,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
