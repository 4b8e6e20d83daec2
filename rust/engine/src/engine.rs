use std::time::Duration;

use crate::bankroll::{Bankroll, BetDirection};
use crate::deck::Deck;
use crate::errors::GameError;
use crate::events::{EventBus, EventSubscription, GameEvent, Snapshot};
use crate::hand::{evaluate, HAND_SIZE};
use crate::reveal::{RevealQueue, RevealStep, RevealTiming, TimerToken};
use crate::round::{plan_deal, plan_draw, transition, Command, Effect, Phase, Round};

/// Single-player video poker engine. Owns the deck, the bankroll, the round
/// state and the reveal queue; presentation code drives it through commands
/// and the clock, and observes it through [`Engine::subscribe`].
///
/// # Examples
///
/// ```
/// use fivedraw_engine::engine::Engine;
/// use fivedraw_engine::round::Phase;
///
/// let mut engine = Engine::new(Some(12345));
/// let events = engine.subscribe();
///
/// engine.start_round().unwrap();
/// assert_eq!(engine.phase(), Phase::Dealing);
///
/// // Reveals are deferred until the clock moves.
/// engine.run_pending();
/// assert_eq!(engine.phase(), Phase::HoldSelect);
///
/// engine.toggle_hold(0).unwrap();
/// engine.draw().unwrap();
/// engine.run_pending();
/// assert_eq!(engine.phase(), Phase::Result);
/// assert!(!events.drain().is_empty());
/// ```
#[derive(Debug)]
pub struct Engine {
    seed: u64,
    deck: Deck,
    bankroll: Bankroll,
    round: Round,
    reveals: RevealQueue,
    timing: RevealTiming,
    /// Virtual time the reveal queue is scheduled against
    clock: Duration,
    bus: EventBus,
}

impl Engine {
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_timing(seed, RevealTiming::default())
    }

    pub fn with_timing(seed: Option<u64>, timing: RevealTiming) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        Self {
            seed,
            deck: Deck::new_with_seed(seed),
            bankroll: Bankroll::new(),
            round: Round::new(),
            reveals: RevealQueue::new(),
            timing,
            clock: Duration::ZERO,
            bus: EventBus::new(),
        }
    }

    /// Replaces the bankroll, e.g. to resume from a known balance in tests.
    pub fn with_bankroll(mut self, bankroll: Bankroll) -> Self {
        self.bankroll = bankroll;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
    pub fn phase(&self) -> Phase {
        self.round.phase()
    }
    pub fn balance(&self) -> u32 {
        self.bankroll.balance()
    }
    pub fn bet(&self) -> u32 {
        self.bankroll.bet()
    }
    pub fn timing(&self) -> RevealTiming {
        self.timing
    }
    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.round.phase(),
            balance: self.bankroll.balance(),
            bet: self.bankroll.bet(),
            hand: self.round.hand(),
            holds: self.round.holds(),
            stages: self.round.stages(),
            diagnostic: self.round.diagnostic(),
            last_ranking: self.round.last_ranking(),
        }
    }

    pub fn subscribe(&mut self) -> EventSubscription {
        self.bus.subscribe()
    }

    pub fn unsubscribe(&mut self, subscription: &EventSubscription) {
        self.bus.unsubscribe(subscription.id());
    }

    // --- commands ---

    pub fn start_round(&mut self) -> Result<(), GameError> {
        self.apply(Command::StartRound)
    }

    pub fn toggle_hold(&mut self, slot: usize) -> Result<(), GameError> {
        self.apply(Command::ToggleHold(slot))
    }

    pub fn draw(&mut self) -> Result<(), GameError> {
        self.apply(Command::Draw)
    }

    pub fn advance(&mut self) -> Result<(), GameError> {
        self.apply(Command::Advance)
    }

    pub fn adjust_bet(&mut self, direction: BetDirection) -> Result<(), GameError> {
        self.apply(Command::AdjustBet(direction))
    }

    pub fn enter_diagnostic(&mut self) -> Result<(), GameError> {
        self.apply(Command::EnterDiagnostic)
    }

    pub fn exit_diagnostic(&mut self) -> Result<(), GameError> {
        self.apply(Command::ExitDiagnostic)
    }

    pub fn reset_session(&mut self) -> Result<(), GameError> {
        self.apply(Command::ResetSession)
    }

    /// The single Deal / Draw / Next button: whatever moves the round forward
    /// in the current phase. Rejected while cards are still being revealed.
    pub fn press_primary(&mut self) -> Result<(), GameError> {
        let command = match self.round.phase() {
            Phase::PreDeal | Phase::Dealing => Command::StartRound,
            Phase::HoldSelect | Phase::Drawing => Command::Draw,
            Phase::Result => Command::Advance,
        };
        self.apply(command)
    }

    // --- clock ---

    /// Advances the virtual clock and runs every reveal step that became due.
    pub fn tick(&mut self, elapsed: Duration) {
        self.clock += elapsed;
        self.fire_due();
    }

    /// Runs every outstanding reveal step, jumping the clock as needed.
    pub fn run_pending(&mut self) {
        while let Some(due) = self.reveals.next_due() {
            self.clock = self.clock.max(due);
            self.fire_due();
        }
    }

    /// Time until the next reveal step, if any is pending.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.reveals
            .next_due()
            .map(|due| due.saturating_sub(self.clock))
    }

    pub fn pending_timers(&self) -> Vec<TimerToken> {
        self.reveals.tokens()
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    // --- internals ---

    fn apply(&mut self, command: Command) -> Result<(), GameError> {
        let phase = self.round.phase();
        let t = match transition(phase, self.round.diagnostic(), command) {
            Ok(t) => t,
            Err(e) => {
                tracing::debug!(command = %command, phase = %phase, "command rejected");
                return Err(e);
            }
        };
        tracing::debug!(command = %command, from = %phase, to = %t.next, "command accepted");

        match t.effect {
            Effect::BeginDeal => self.begin_deal()?,
            Effect::FinishDeal => {}
            Effect::FlipHold(slot) => self.round.flip_hold(slot),
            Effect::BeginDraw => self.begin_draw()?,
            Effect::Resolve => return self.resolve(t.next),
            Effect::ClearRound => self.round.clear(),
            Effect::RearmHolds => self.round.rearm(),
            Effect::AdjustBet(direction) => self.bankroll.adjust_bet(direction)?,
            Effect::SetDiagnostic(on) => {
                tracing::info!(enabled = on, "diagnostic mode toggled");
                self.round.set_diagnostic(on);
            }
            Effect::ResetSession => self.reset(),
        }

        self.round.set_phase(t.next);
        self.emit_state();
        Ok(())
    }

    fn begin_deal(&mut self) -> Result<(), GameError> {
        self.cancel_reveals();
        self.deck.reset();
        self.deck.shuffle();

        let mut cards = Vec::with_capacity(HAND_SIZE);
        for _ in 0..HAND_SIZE {
            cards.push(self.deck.draw()?);
        }
        let cards: [_; HAND_SIZE] = cards
            .try_into()
            .map_err(|_| GameError::ExhaustedDeck)?;

        self.round.clear();
        for (due, step) in plan_deal(self.clock, &cards, &self.timing) {
            self.reveals.schedule(due, step);
        }
        tracing::info!(bet = self.bankroll.bet(), balance = self.bankroll.balance(), "round started");
        Ok(())
    }

    fn begin_draw(&mut self) -> Result<(), GameError> {
        self.cancel_reveals();
        let slots = self.round.unheld_slots();
        if self.deck.ensure_capacity(slots.len()) {
            self.deck.withdraw(&self.round.held_cards());
        }

        let mut draws = Vec::with_capacity(slots.len());
        for slot in slots {
            draws.push((slot, self.deck.draw()?));
        }
        for (due, step) in plan_draw(self.clock, &draws, &self.timing) {
            self.reveals.schedule(due, step);
        }
        tracing::debug!(replaced = draws.len(), deck_remaining = self.deck.remaining(), "draw scheduled");
        Ok(())
    }

    fn resolve(&mut self, next: Phase) -> Result<(), GameError> {
        let cards = self.round.full_hand().ok_or(GameError::ExhaustedDeck)?;
        let ranking = evaluate(&cards);
        let bet = self.bankroll.bet();
        let payout = ranking.payout(bet);
        let diagnostic = self.round.diagnostic();

        let bailout = if diagnostic {
            false
        } else {
            self.bankroll.settle(payout).bailout
        };

        self.round.set_ranking(ranking);
        self.round.set_phase(next);
        tracing::info!(
            category = ?ranking.category,
            payout,
            bet,
            balance = self.bankroll.balance(),
            bailout,
            diagnostic,
            "round resolved"
        );

        let snapshot = self.snapshot();
        self.bus.broadcast(GameEvent::RoundResolved {
            category: ranking.category,
            payout,
            bet,
            bailout,
            diagnostic,
            snapshot,
        });
        Ok(())
    }

    fn reset(&mut self) {
        self.cancel_reveals();
        self.bankroll.reset();
        self.deck.reset();
        self.round = Round::new();
        tracing::info!("session reset");
    }

    fn cancel_reveals(&mut self) {
        let cancelled = self.reveals.cancel_all();
        if cancelled > 0 {
            tracing::debug!(cancelled, "cancelled pending reveal steps");
        }
    }

    fn fire_due(&mut self) {
        while let Some(scheduled) = self.reveals.pop_due(self.clock) {
            self.run_step(scheduled.step);
        }
    }

    fn run_step(&mut self, step: RevealStep) {
        match step {
            RevealStep::FaceDown { slot } => {
                self.round.face_down(slot);
                self.emit_state();
            }
            RevealStep::Reveal { slot, card } => {
                self.round.reveal(slot, card);
                tracing::debug!(slot, card = %card, "card revealed");
                let snapshot = self.snapshot();
                self.bus.broadcast(GameEvent::CardRevealed {
                    slot,
                    card,
                    snapshot,
                });
            }
            RevealStep::Settle { slot } => {
                self.round.settle(slot);
                self.emit_state();
            }
            RevealStep::Complete => {
                if let Err(e) = self.apply(Command::RevealsFinished) {
                    tracing::error!(error = %e, "reveal completion failed");
                }
            }
        }
    }

    fn emit_state(&mut self) {
        let snapshot = self.snapshot();
        self.bus.broadcast(GameEvent::StateChanged { snapshot });
    }
}
