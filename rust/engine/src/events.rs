use std::sync::mpsc;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::hand::{Category, HandRanking, HAND_SIZE};
use crate::round::{Phase, SlotStage};

/// Everything a presentation layer can observe about the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub balance: u32,
    pub bet: u32,
    pub hand: [Option<Card>; HAND_SIZE],
    pub holds: [bool; HAND_SIZE],
    pub stages: [SlotStage; HAND_SIZE],
    pub diagnostic: bool,
    /// Ranking of the most recently resolved hand, for paytable highlighting.
    pub last_ranking: Option<HandRanking>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    StateChanged {
        snapshot: Snapshot,
    },
    CardRevealed {
        slot: usize,
        card: Card,
        snapshot: Snapshot,
    },
    RoundResolved {
        category: Category,
        payout: u32,
        /// Wager the round was played at; the snapshot already shows the reset bet.
        bet: u32,
        bailout: bool,
        diagnostic: bool,
        snapshot: Snapshot,
    },
}

impl GameEvent {
    pub fn snapshot(&self) -> &Snapshot {
        match self {
            GameEvent::StateChanged { snapshot }
            | GameEvent::CardRevealed { snapshot, .. }
            | GameEvent::RoundResolved { snapshot, .. } => snapshot,
        }
    }
}

/// Receiving end handed out by [`EventBus::subscribe`].
#[derive(Debug)]
pub struct EventSubscription {
    subscriber_id: usize,
    pub receiver: mpsc::Receiver<GameEvent>,
}

impl EventSubscription {
    pub fn id(&self) -> usize {
        self.subscriber_id
    }

    /// Everything broadcast since the last call, oldest first.
    pub fn drain(&self) -> Vec<GameEvent> {
        self.receiver.try_iter().collect()
    }
}

/// Fan-out of engine notifications. Subscribers whose receiver has been
/// dropped are pruned on the next broadcast.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<(usize, mpsc::Sender<GameEvent>)>,
    next_id: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> EventSubscription {
        let (tx, rx) = mpsc::channel();
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, tx));
        tracing::debug!(subscriber_id = id, "subscribed to game events");
        EventSubscription {
            subscriber_id: id,
            receiver: rx,
        }
    }

    pub fn broadcast(&mut self, event: GameEvent) {
        tracing::trace!(event = ?event, "broadcasting game event");
        self.subscribers.retain(|(id, sender)| {
            let delivered = sender.send(event.clone()).is_ok();
            if !delivered {
                tracing::debug!(subscriber_id = id, "dropping stale subscriber");
            }
            delivered
        });
    }

    pub fn unsubscribe(&mut self, subscriber_id: usize) {
        self.subscribers.retain(|(id, _)| *id != subscriber_id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
