//! Card, hand and result formatters for terminal display.
//!
//! Pure functions only; every renderer takes the engine's [`Snapshot`] or a
//! notification and returns text. Unicode suit symbols are used where the
//! terminal supports them, with single-letter ASCII fallback.
//!
//! ## Example
//!
//! ```rust
//! use fivedraw_engine::cards::{Card, Rank, Suit};
//! use fivedraw_cli::formatters::format_card;
//!
//! let ten = Card::new(Rank::Ten, Suit::Hearts);
//! assert!(format_card(&ten) == "10♥" || format_card(&ten) == "10h");
//! ```

use fivedraw_engine::cards::{Card, Suit};
use fivedraw_engine::events::{GameEvent, Snapshot};
use fivedraw_engine::hand::{payout_for, Category, PAYTABLE};
use fivedraw_engine::round::{Phase, SlotStage};

/// Check if the terminal supports Unicode card symbols by detecting modern terminal environments.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> &'static str {
    if supports_unicode() {
        match suit {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        }
    }
}

/// String like "A♠" (Unicode) or "As" (ASCII). Tens are written "10".
pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.text(), format_suit(&card.suit))
}

pub fn format_cash(amount: u32) -> String {
    format!("${}", amount)
}

/// One cell per slot: face-up cards, `##` for a card shown face down and
/// `--` for an empty slot. Held slots get a `*` marker underneath.
pub fn format_hand(snapshot: &Snapshot) -> String {
    let cells: Vec<String> = snapshot
        .hand
        .iter()
        .zip(snapshot.stages.iter())
        .map(|(card, stage)| match (stage, card) {
            (SlotStage::FaceDown, _) => "##".to_string(),
            (_, Some(card)) => format_card(card),
            (_, None) => "--".to_string(),
        })
        .map(|cell| format!("[{:>3}]", cell))
        .collect();
    let marks: Vec<String> = snapshot
        .holds
        .iter()
        .enumerate()
        .map(|(i, held)| {
            if *held {
                format!(" {}HLD", i + 1)
            } else {
                format!("  {}  ", i + 1)
            }
        })
        .collect();
    format!("{}\n{}", cells.join(" "), marks.join(" "))
}

pub fn format_status(snapshot: &Snapshot) -> String {
    let mut line = format!(
        "Balance {}  Bet {}  [{}]",
        format_cash(snapshot.balance),
        format_cash(snapshot.bet),
        snapshot.phase
    );
    if snapshot.diagnostic {
        line.push_str("  (test mode)");
    }
    line
}

/// The paytable at `bet`, with the row for `highlight` marked.
pub fn format_paytable(bet: u32, highlight: Option<Category>) -> String {
    let mut lines = Vec::with_capacity(PAYTABLE.len());
    for category in PAYTABLE {
        let marker = if Some(category) == highlight { ">" } else { " " };
        lines.push(format!(
            "{} {:<16}{:>7}",
            marker,
            category.name(),
            format_cash(payout_for(category.base_payout(), bet))
        ));
    }
    lines.join("\n")
}

/// Main and secondary message lines for the current phase, mirroring the
/// status panel of the game.
pub fn phase_message(phase: Phase, diagnostic: bool) -> (String, String) {
    let (main, sub) = match (phase, diagnostic) {
        (Phase::PreDeal, _) => ("Ready for next hand.", "Press Enter to receive five new cards."),
        (Phase::Dealing, _) => ("Dealing...", "Cards are on the way."),
        (Phase::HoldSelect, false) => ("Select holds, then Draw.", "Type 1-5 to toggle HOLD."),
        (Phase::HoldSelect, true) => (
            "Secret test mode.",
            "Adjust holds and press Enter to redraw. Press Z to exit.",
        ),
        (Phase::Drawing, _) => ("Drawing...", "Replacing non-held cards."),
        (Phase::Result, false) => ("Round over.", "Press Enter for next hand, or Z for test mode."),
        (Phase::Result, true) => (
            "Secret test mode enabled.",
            "Type 1-5 to hold, Enter to redraw, Z to exit.",
        ),
    };
    (main.to_string(), sub.to_string())
}

/// Message lines for a `RoundResolved` notification; `None` for anything else.
/// A bailout replaces the result line with the emergency loan and `taunt`.
pub fn result_message(event: &GameEvent, taunt: &str) -> Option<(String, String)> {
    let GameEvent::RoundResolved {
        category,
        payout,
        bet,
        bailout,
        diagnostic,
        ..
    } = event
    else {
        return None;
    };

    if *diagnostic {
        return Some((
            format!("{} Test payout {}.", category.label(), format_cash(*payout)),
            "Secret test mode: no balance changes. Press Enter to redraw, Z to exit.".to_string(),
        ));
    }
    if *bailout {
        return Some(("Emergency loan $100!".to_string(), taunt.to_string()));
    }
    let main = if *payout > 0 {
        format!("{} You win {}.", category.label(), format_cash(*payout))
    } else {
        format!("{} You lose {}.", category.label(), format_cash(*bet))
    };
    Some((main, "Press Enter to play the next hand.".to_string()))
}
