//! Round phases, hold flags and the command table.
//!
//! Every command the engine accepts, including the internal "reveals
//! finished" signal, goes through [`transition`]. Anything the table does
//! not list is an [`GameError::IllegalCommand`] and changes nothing.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::bankroll::BetDirection;
use crate::cards::Card;
use crate::errors::GameError;
use crate::hand::{HandRanking, HAND_SIZE};
use crate::reveal::{RevealStep, RevealTiming};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    PreDeal,
    Dealing,
    HoldSelect,
    Drawing,
    Result,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::PreDeal => "PRE_DEAL",
            Phase::Dealing => "DEALING",
            Phase::HoldSelect => "HOLD_SELECT",
            Phase::Drawing => "DRAWING",
            Phase::Result => "RESULT",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    StartRound,
    ToggleHold(usize),
    Draw,
    Advance,
    AdjustBet(BetDirection),
    EnterDiagnostic,
    ExitDiagnostic,
    ResetSession,
    /// Issued by the reveal queue once the last slot has settled.
    RevealsFinished,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::StartRound => f.write_str("start_round"),
            Command::ToggleHold(slot) => write!(f, "toggle_hold({})", slot),
            Command::Draw => f.write_str("draw"),
            Command::Advance => f.write_str("advance"),
            Command::AdjustBet(BetDirection::Up) => f.write_str("adjust_bet(+1)"),
            Command::AdjustBet(BetDirection::Down) => f.write_str("adjust_bet(-1)"),
            Command::EnterDiagnostic => f.write_str("enter_diagnostic"),
            Command::ExitDiagnostic => f.write_str("exit_diagnostic"),
            Command::ResetSession => f.write_str("reset_session"),
            Command::RevealsFinished => f.write_str("reveals_finished"),
        }
    }
}

/// What the engine has to do for an accepted command.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Effect {
    BeginDeal,
    FinishDeal,
    FlipHold(usize),
    BeginDraw,
    Resolve,
    ClearRound,
    RearmHolds,
    AdjustBet(BetDirection),
    SetDiagnostic(bool),
    ResetSession,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Transition {
    pub effect: Effect,
    pub next: Phase,
}

pub fn transition(phase: Phase, diagnostic: bool, command: Command) -> Result<Transition, GameError> {
    let (effect, next) = match (phase, command) {
        (_, Command::ResetSession) => (Effect::ResetSession, Phase::PreDeal),

        (Phase::PreDeal, Command::StartRound) => (Effect::BeginDeal, Phase::Dealing),
        (Phase::PreDeal, Command::AdjustBet(d)) => (Effect::AdjustBet(d), Phase::PreDeal),

        (Phase::Dealing, Command::RevealsFinished) => (Effect::FinishDeal, Phase::HoldSelect),

        (Phase::HoldSelect, Command::ToggleHold(slot)) if slot < HAND_SIZE => {
            (Effect::FlipHold(slot), Phase::HoldSelect)
        }
        (Phase::HoldSelect, Command::Draw) => (Effect::BeginDraw, Phase::Drawing),

        (Phase::Drawing, Command::RevealsFinished) => (Effect::Resolve, Phase::Result),

        (Phase::Result, Command::Advance) if diagnostic => (Effect::RearmHolds, Phase::HoldSelect),
        (Phase::Result, Command::Advance) => (Effect::ClearRound, Phase::PreDeal),
        (Phase::Result, Command::ToggleHold(slot)) if diagnostic && slot < HAND_SIZE => {
            (Effect::FlipHold(slot), Phase::Result)
        }
        (Phase::Result, Command::EnterDiagnostic) if !diagnostic => {
            (Effect::SetDiagnostic(true), Phase::Result)
        }
        (Phase::Result, Command::ExitDiagnostic) if diagnostic => {
            (Effect::SetDiagnostic(false), Phase::Result)
        }

        _ => return Err(GameError::IllegalCommand { command, phase }),
    };
    Ok(Transition { effect, next })
}

/// Visible state of a card slot while reveals play out.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStage {
    #[default]
    Idle,
    FaceDown,
    Revealed,
}

/// Per-round state: the five slots, their hold flags and the phase gate.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Round {
    phase: Phase,
    hand: [Option<Card>; HAND_SIZE],
    holds: [bool; HAND_SIZE],
    stages: [SlotStage; HAND_SIZE],
    diagnostic: bool,
    last_ranking: Option<HandRanking>,
}

impl Default for Round {
    fn default() -> Self {
        Self::new()
    }
}

impl Round {
    pub fn new() -> Self {
        Self {
            phase: Phase::PreDeal,
            hand: [None; HAND_SIZE],
            holds: [false; HAND_SIZE],
            stages: [SlotStage::Idle; HAND_SIZE],
            diagnostic: false,
            last_ranking: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn hand(&self) -> [Option<Card>; HAND_SIZE] {
        self.hand
    }
    pub fn holds(&self) -> [bool; HAND_SIZE] {
        self.holds
    }
    pub fn stages(&self) -> [SlotStage; HAND_SIZE] {
        self.stages
    }
    pub fn diagnostic(&self) -> bool {
        self.diagnostic
    }
    pub fn last_ranking(&self) -> Option<HandRanking> {
        self.last_ranking
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }
    pub(crate) fn set_diagnostic(&mut self, on: bool) {
        self.diagnostic = on;
    }
    pub(crate) fn set_ranking(&mut self, ranking: HandRanking) {
        self.last_ranking = Some(ranking);
    }

    pub(crate) fn flip_hold(&mut self, slot: usize) {
        self.holds[slot] = !self.holds[slot];
    }

    /// Hold flags back to all-false; the hand stays.
    pub(crate) fn rearm(&mut self) {
        self.holds = [false; HAND_SIZE];
        self.stages = [SlotStage::Idle; HAND_SIZE];
    }

    /// Empties the slots ahead of a fresh deal or after a settled round.
    pub(crate) fn clear(&mut self) {
        self.hand = [None; HAND_SIZE];
        self.rearm();
        self.last_ranking = None;
    }

    pub(crate) fn face_down(&mut self, slot: usize) {
        self.stages[slot] = SlotStage::FaceDown;
    }

    pub(crate) fn reveal(&mut self, slot: usize, card: Card) {
        self.hand[slot] = Some(card);
        self.stages[slot] = SlotStage::Revealed;
    }

    pub(crate) fn settle(&mut self, slot: usize) {
        self.stages[slot] = SlotStage::Idle;
    }

    pub fn unheld_slots(&self) -> Vec<usize> {
        (0..HAND_SIZE).filter(|&i| !self.holds[i]).collect()
    }

    pub fn held_cards(&self) -> Vec<Card> {
        (0..HAND_SIZE)
            .filter(|&i| self.holds[i])
            .filter_map(|i| self.hand[i])
            .collect()
    }

    /// The five cards, once every slot is filled.
    pub fn full_hand(&self) -> Option<[Card; HAND_SIZE]> {
        let mut cards = [self.hand[0]?; HAND_SIZE];
        for (dst, src) in cards.iter_mut().zip(self.hand.iter()) {
            *dst = (*src)?;
        }
        Some(cards)
    }
}

/// Reveal schedule for a fresh deal: slot by slot, each card turns over after
/// `deal_lead` and settles `deal_settle` later; the next slot starts only
/// once the previous one has settled.
pub fn plan_deal(
    start: Duration,
    cards: &[Card; HAND_SIZE],
    timing: &RevealTiming,
) -> Vec<(Duration, RevealStep)> {
    let mut plan = Vec::with_capacity(HAND_SIZE * 2 + 1);
    let mut t = start;
    for (slot, &card) in cards.iter().enumerate() {
        t += timing.deal_lead;
        plan.push((t, RevealStep::Reveal { slot, card }));
        t += timing.deal_settle;
        plan.push((t, RevealStep::Settle { slot }));
    }
    plan.push((t + timing.completion, RevealStep::Complete));
    plan
}

/// Reveal schedule for a draw: each replaced slot shows its back, reveals its
/// new card after `draw_face_down` and settles `draw_settle` later.
pub fn plan_draw(
    start: Duration,
    draws: &[(usize, Card)],
    timing: &RevealTiming,
) -> Vec<(Duration, RevealStep)> {
    let mut plan = Vec::with_capacity(draws.len() * 3 + 1);
    let mut t = start;
    for &(slot, card) in draws {
        plan.push((t, RevealStep::FaceDown { slot }));
        t += timing.draw_face_down;
        plan.push((t, RevealStep::Reveal { slot, card }));
        t += timing.draw_settle;
        plan.push((t, RevealStep::Settle { slot }));
    }
    plan.push((t + timing.completion, RevealStep::Complete));
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    const PHASES: [Phase; 5] = [
        Phase::PreDeal,
        Phase::Dealing,
        Phase::HoldSelect,
        Phase::Drawing,
        Phase::Result,
    ];

    fn commands() -> Vec<Command> {
        vec![
            Command::StartRound,
            Command::ToggleHold(0),
            Command::ToggleHold(4),
            Command::ToggleHold(5),
            Command::Draw,
            Command::Advance,
            Command::AdjustBet(BetDirection::Up),
            Command::AdjustBet(BetDirection::Down),
            Command::EnterDiagnostic,
            Command::ExitDiagnostic,
            Command::ResetSession,
            Command::RevealsFinished,
        ]
    }

    fn expected(phase: Phase, diagnostic: bool, command: Command) -> Option<Phase> {
        match (phase, command) {
            (_, Command::ResetSession) => Some(Phase::PreDeal),
            (Phase::PreDeal, Command::StartRound) => Some(Phase::Dealing),
            (Phase::PreDeal, Command::AdjustBet(_)) => Some(Phase::PreDeal),
            (Phase::Dealing, Command::RevealsFinished) => Some(Phase::HoldSelect),
            (Phase::HoldSelect, Command::ToggleHold(i)) if i < 5 => Some(Phase::HoldSelect),
            (Phase::HoldSelect, Command::Draw) => Some(Phase::Drawing),
            (Phase::Drawing, Command::RevealsFinished) => Some(Phase::Result),
            (Phase::Result, Command::Advance) if diagnostic => Some(Phase::HoldSelect),
            (Phase::Result, Command::Advance) => Some(Phase::PreDeal),
            (Phase::Result, Command::ToggleHold(i)) if diagnostic && i < 5 => Some(Phase::Result),
            (Phase::Result, Command::EnterDiagnostic) if !diagnostic => Some(Phase::Result),
            (Phase::Result, Command::ExitDiagnostic) if diagnostic => Some(Phase::Result),
            _ => None,
        }
    }

    #[test]
    fn table_covers_every_phase_command_pair() {
        for phase in PHASES {
            for diagnostic in [false, true] {
                for command in commands() {
                    let got = transition(phase, diagnostic, command);
                    match expected(phase, diagnostic, command) {
                        Some(next) => assert_eq!(
                            got.map(|t| t.next),
                            Ok(next),
                            "{} in {} (diagnostic={})",
                            command,
                            phase,
                            diagnostic
                        ),
                        None => assert_eq!(
                            got,
                            Err(GameError::IllegalCommand { command, phase }),
                            "{} in {} (diagnostic={})",
                            command,
                            phase,
                            diagnostic
                        ),
                    }
                }
            }
        }
    }

    #[test]
    fn only_reset_and_completion_are_legal_mid_reveal() {
        for phase in [Phase::Dealing, Phase::Drawing] {
            for command in commands() {
                let ok = transition(phase, false, command).is_ok();
                let allowed = matches!(command, Command::ResetSession | Command::RevealsFinished);
                assert_eq!(ok, allowed, "{} in {}", command, phase);
            }
        }
    }

    #[test]
    fn deal_plan_never_overlaps_slots() {
        let cards = [
            Card::new(Rank::Ace, Suit::Spades),
            Card::new(Rank::Two, Suit::Spades),
            Card::new(Rank::Three, Suit::Spades),
            Card::new(Rank::Four, Suit::Spades),
            Card::new(Rank::Five, Suit::Spades),
        ];
        let plan = plan_deal(Duration::ZERO, &cards, &RevealTiming::default());
        assert_eq!(plan.len(), 11);

        let mut settled_at = Duration::ZERO;
        for slot in 0..5 {
            let reveal = plan
                .iter()
                .find(|(_, s)| matches!(s, RevealStep::Reveal { slot: x, .. } if *x == slot))
                .unwrap()
                .0;
            let settle = plan
                .iter()
                .find(|(_, s)| *s == RevealStep::Settle { slot })
                .unwrap()
                .0;
            assert!(reveal > settled_at);
            assert!(settle > reveal);
            settled_at = settle;
        }
        assert!(matches!(plan.last(), Some((t, RevealStep::Complete)) if *t > settled_at));
    }

    #[test]
    fn draw_plan_touches_only_listed_slots() {
        let draws = [
            (1, Card::new(Rank::King, Suit::Hearts)),
            (3, Card::new(Rank::Queen, Suit::Hearts)),
        ];
        let plan = plan_draw(Duration::from_millis(1000), &draws, &RevealTiming::default());
        let steps: Vec<RevealStep> = plan.iter().map(|(_, s)| *s).collect();
        assert_eq!(
            steps,
            vec![
                RevealStep::FaceDown { slot: 1 },
                RevealStep::Reveal { slot: 1, card: draws[0].1 },
                RevealStep::Settle { slot: 1 },
                RevealStep::FaceDown { slot: 3 },
                RevealStep::Reveal { slot: 3, card: draws[1].1 },
                RevealStep::Settle { slot: 3 },
                RevealStep::Complete,
            ]
        );
        assert_eq!(plan[0].0, Duration::from_millis(1000));
        assert_eq!(plan[3].0, plan[2].0);
    }

    #[test]
    fn full_hand_requires_every_slot() {
        let mut round = Round::new();
        assert!(round.full_hand().is_none());
        for slot in 0..4 {
            round.reveal(slot, Card::new(Rank::Two, Suit::Clubs));
        }
        assert!(round.full_hand().is_none());
        round.reveal(4, Card::new(Rank::Three, Suit::Clubs));
        assert!(round.full_hand().is_some());
    }
}
