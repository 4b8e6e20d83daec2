use serde::{Deserialize, Serialize};

use crate::bankroll::BET_STEP;
use crate::cards::{Card, Rank};

pub const HAND_SIZE: usize = 5;

/// Jacks-or-better categories, highest first. `LowPair` and `Nothing` pay zero.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    RoyalFlush,
    StraightFlush,
    FourOfAKind,
    FullHouse,
    Flush,
    Straight,
    ThreeOfAKind,
    TwoPair,
    JacksOrBetter,
    LowPair,
    Nothing,
}

impl Category {
    /// Base payout at the minimum bet.
    pub fn base_payout(self) -> u32 {
        match self {
            Category::RoyalFlush => 2500,
            Category::StraightFlush => 500,
            Category::FourOfAKind => 250,
            Category::FullHouse => 80,
            Category::Flush => 50,
            Category::Straight => 40,
            Category::ThreeOfAKind => 30,
            Category::TwoPair => 20,
            Category::JacksOrBetter => 10,
            Category::LowPair | Category::Nothing => 0,
        }
    }

    /// Row name on the paytable.
    pub fn name(self) -> &'static str {
        match self {
            Category::RoyalFlush => "Royal Flush",
            Category::StraightFlush => "Straight Flush",
            Category::FourOfAKind => "Four of a Kind",
            Category::FullHouse => "Full House",
            Category::Flush => "Flush",
            Category::Straight => "Straight",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::TwoPair => "Two Pair",
            Category::JacksOrBetter => "Jacks or Better",
            Category::LowPair => "Low Pair",
            Category::Nothing => "Nothing",
        }
    }

    /// Result-line text shown when a round resolves to this category.
    pub fn label(self) -> &'static str {
        match self {
            Category::RoyalFlush => "Royal Flush!",
            Category::StraightFlush => "Straight Flush!",
            Category::FourOfAKind => "Four of a Kind!",
            Category::FullHouse => "Full House!",
            Category::Flush => "Flush!",
            Category::Straight => "Straight",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::TwoPair => "Two Pair",
            Category::JacksOrBetter => "Jacks or Better",
            Category::LowPair => "Only a Pair",
            Category::Nothing => "Nothing!",
        }
    }

    /// Stable key of the paytable row this category lights up, if any.
    pub fn paytable_key(self) -> Option<&'static str> {
        match self {
            Category::RoyalFlush => Some("royal_flush"),
            Category::StraightFlush => Some("straight_flush"),
            Category::FourOfAKind => Some("four_of_a_kind"),
            Category::FullHouse => Some("full_house"),
            Category::Flush => Some("flush"),
            Category::Straight => Some("straight"),
            Category::ThreeOfAKind => Some("three_of_a_kind"),
            Category::TwoPair => Some("two_pair"),
            Category::JacksOrBetter => Some("jacks_or_better"),
            Category::LowPair | Category::Nothing => None,
        }
    }

    pub fn is_paying(self) -> bool {
        self.base_payout() > 0
    }
}

/// The paying rows, highest first.
pub const PAYTABLE: [Category; 9] = [
    Category::RoyalFlush,
    Category::StraightFlush,
    Category::FourOfAKind,
    Category::FullHouse,
    Category::Flush,
    Category::Straight,
    Category::ThreeOfAKind,
    Category::TwoPair,
    Category::JacksOrBetter,
];

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRanking {
    pub category: Category,
    pub base_payout: u32,
}

impl HandRanking {
    pub fn payout(&self, bet: u32) -> u32 {
        payout_for(self.base_payout, bet)
    }
}

/// `round(base * bet / BET_STEP)`, halves rounded up.
pub fn payout_for(base_payout: u32, bet: u32) -> u32 {
    let scaled = u64::from(base_payout) * u64::from(bet);
    let step = u64::from(BET_STEP);
    let rounded = (2 * scaled + step) / (2 * step);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

pub fn evaluate(cards: &[Card; HAND_SIZE]) -> HandRanking {
    let category = classify(cards);
    HandRanking {
        category,
        base_payout: category.base_payout(),
    }
}

fn classify(cards: &[Card; HAND_SIZE]) -> Category {
    let counts = rank_counts(cards);

    let mut pairs: Vec<u8> = Vec::with_capacity(2);
    let mut three = false;
    let mut four = false;
    for r in 1..=13u8 {
        match counts[r as usize] {
            2 => pairs.push(r),
            3 => three = true,
            4 => four = true,
            _ => {}
        }
    }

    let flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight = is_straight(&counts);
    let royal = [1, 10, 11, 12, 13].iter().all(|&r| counts[r] == 1);

    if straight && flush && royal {
        Category::RoyalFlush
    } else if straight && flush {
        Category::StraightFlush
    } else if four {
        Category::FourOfAKind
    } else if three && pairs.len() == 1 {
        Category::FullHouse
    } else if flush {
        Category::Flush
    } else if straight {
        Category::Straight
    } else if three {
        Category::ThreeOfAKind
    } else if pairs.len() == 2 {
        Category::TwoPair
    } else if pairs.len() == 1 && is_high_pair(pairs[0]) {
        Category::JacksOrBetter
    } else if pairs.len() == 1 {
        Category::LowPair
    } else {
        Category::Nothing
    }
}

// index 1..=13, slot 0 unused
fn rank_counts(cards: &[Card; HAND_SIZE]) -> [u8; 14] {
    let mut counts = [0u8; 14];
    for c in cards {
        counts[c.rank.value() as usize] += 1;
    }
    counts
}

fn is_straight(counts: &[u8; 14]) -> bool {
    let run_from = |start: usize| (start..start + 5).all(|r| counts[r] == 1);
    // 1..=9 covers A-2-3-4-5 through 9-K; Ace-high is the only wrap-around
    (1..=9).any(run_from) || [1, 10, 11, 12, 13].iter().all(|&r| counts[r] == 1)
}

fn is_high_pair(rank: u8) -> bool {
    matches!(
        Rank::from_u8(rank),
        Some(Rank::Ace | Rank::Jack | Rank::Queen | Rank::King)
    )
}
