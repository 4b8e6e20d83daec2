//! Cancelable queue of time-deferred reveal steps.
//!
//! Dealing and drawing do not finish synchronously: each affected slot is
//! walked through face-down (draw only), reveal and settle steps that the
//! engine schedules here against its own virtual clock. Every scheduled step
//! gets a [`TimerToken`]; starting a new deal or resetting the session drops
//! all outstanding tokens so nothing from a replaced hand can fire later.

use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cards::Card;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TimerToken(u64);

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum RevealStep {
    /// Show the back of the card in `slot` before its replacement is revealed.
    FaceDown { slot: usize },
    /// Put `card` into `slot` face up.
    Reveal { slot: usize, card: Card },
    /// Clear the transient reveal styling of `slot`.
    Settle { slot: usize },
    /// Every slot has settled; leave DEALING/DRAWING.
    Complete,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Scheduled {
    pub token: TimerToken,
    pub due: Duration,
    pub step: RevealStep,
}

/// Delays between reveal steps. Defaults follow the original animation.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct RevealTiming {
    /// Pause before each dealt card turns over.
    pub deal_lead: Duration,
    /// How long a dealt card keeps its reveal styling.
    pub deal_settle: Duration,
    /// How long a replaced card shows its back.
    pub draw_face_down: Duration,
    /// How long a drawn card keeps its reveal styling.
    pub draw_settle: Duration,
    /// Pause after the last slot settles before the phase changes.
    pub completion: Duration,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            deal_lead: Duration::from_millis(140),
            deal_settle: Duration::from_millis(280),
            draw_face_down: Duration::from_millis(260),
            draw_settle: Duration::from_millis(320),
            completion: Duration::from_millis(20),
        }
    }
}

impl RevealTiming {
    /// All delays zero: steps still run through the queue, in order, on the next tick.
    pub fn instant() -> Self {
        Self {
            deal_lead: Duration::ZERO,
            deal_settle: Duration::ZERO,
            draw_face_down: Duration::ZERO,
            draw_settle: Duration::ZERO,
            completion: Duration::ZERO,
        }
    }

    /// Playback at `percent` speed: 200 halves every delay, 50 doubles it.
    pub fn scaled(self, percent: u32) -> Self {
        let percent = percent.max(1);
        let scale = |d: Duration| d * 100 / percent;
        Self {
            deal_lead: scale(self.deal_lead),
            deal_settle: scale(self.deal_settle),
            draw_face_down: scale(self.draw_face_down),
            draw_settle: scale(self.draw_settle),
            completion: scale(self.completion),
        }
    }
}

/// Pending steps ordered by due time; steps due at the same instant run in
/// the order they were scheduled.
#[derive(Debug, Default)]
pub struct RevealQueue {
    pending: VecDeque<Scheduled>,
    next_token: u64,
}

impl RevealQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Duration, step: RevealStep) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        let at = self.pending.partition_point(|s| s.due <= due);
        self.pending.insert(at, Scheduled { token, due, step });
        token
    }

    /// Removes the earliest step due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<Scheduled> {
        if self.pending.front()?.due <= now {
            self.pending.pop_front()
        } else {
            None
        }
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.pending.front().map(|s| s.due)
    }

    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.token != token);
        self.pending.len() != before
    }

    /// Drops every pending step and returns how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }

    pub fn tokens(&self) -> Vec<TimerToken> {
        self.pending.iter().map(|s| s.token).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn pops_in_due_order_then_schedule_order() {
        let mut q = RevealQueue::new();
        q.schedule(ms(20), RevealStep::Complete);
        q.schedule(ms(10), RevealStep::Settle { slot: 0 });
        q.schedule(ms(10), RevealStep::FaceDown { slot: 1 });

        assert!(q.pop_due(ms(5)).is_none());
        assert_eq!(q.pop_due(ms(10)).unwrap().step, RevealStep::Settle { slot: 0 });
        assert_eq!(
            q.pop_due(ms(10)).unwrap().step,
            RevealStep::FaceDown { slot: 1 }
        );
        assert!(q.pop_due(ms(19)).is_none());
        assert_eq!(q.pop_due(ms(25)).unwrap().step, RevealStep::Complete);
        assert!(q.is_empty());
    }

    #[test]
    fn cancel_all_drops_every_token() {
        let mut q = RevealQueue::new();
        for slot in 0..5 {
            q.schedule(ms(slot as u64 * 100), RevealStep::Settle { slot });
        }
        assert_eq!(q.tokens().len(), 5);
        assert_eq!(q.cancel_all(), 5);
        assert!(q.pop_due(ms(10_000)).is_none());
        assert_eq!(q.next_due(), None);
    }

    #[test]
    fn single_token_can_be_cancelled() {
        let mut q = RevealQueue::new();
        let a = q.schedule(ms(1), RevealStep::Settle { slot: 0 });
        let b = q.schedule(ms(2), RevealStep::Settle { slot: 1 });
        assert_ne!(a, b);
        assert!(q.cancel(a));
        assert!(!q.cancel(a));
        assert_eq!(q.tokens(), vec![b]);
    }

    #[test]
    fn scaled_timing_divides_delays() {
        let fast = RevealTiming::default().scaled(200);
        assert_eq!(fast.deal_lead, ms(70));
        assert_eq!(fast.draw_settle, ms(160));
        let slow = RevealTiming::default().scaled(50);
        assert_eq!(slow.completion, ms(40));
    }
}
