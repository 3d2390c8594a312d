//! Typed publish/subscribe between the simulation and presentation
//!
//! Listeners run synchronously, in the order they subscribed, regardless of
//! whether they asked for one kind or for everything. A panicking listener
//! unwinds through `emit` like any other call.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Something that happened during the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new round began
    GameStarted,
    /// The round ended (collision or spilled tofu)
    GameOver { score: u64 },
    /// Score changed (collectible or distance milestone)
    ScoreChanged { score: u64 },
    /// A collectible was picked up at this (x, z) position
    Collected { position: Vec2 },
    /// Spill meter moved
    SpillChanged { spill: f32 },
}

/// Discriminant of [`GameEvent`], used to filter subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    GameStarted,
    GameOver,
    ScoreChanged,
    Collected,
    SpillChanged,
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::GameStarted => EventKind::GameStarted,
            GameEvent::GameOver { .. } => EventKind::GameOver,
            GameEvent::ScoreChanged { .. } => EventKind::ScoreChanged,
            GameEvent::Collected { .. } => EventKind::Collected,
            GameEvent::SpillChanged { .. } => EventKind::SpillChanged,
        }
    }
}

/// Handle returned by subscribe, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

type Listener = Box<dyn FnMut(&GameEvent)>;

struct Subscription {
    id: SubscriptionId,
    /// None = every event
    filter: Option<EventKind>,
    listener: Listener,
}

/// In-process event dispatcher
#[derive(Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
    next_id: u32,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen for one kind of event
    pub fn subscribe<F>(&mut self, kind: EventKind, listener: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.push(Some(kind), Box::new(listener))
    }

    /// Listen for every event
    pub fn subscribe_all<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.push(None, Box::new(listener))
    }

    fn push(&mut self, filter: Option<EventKind>, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            filter,
            listener,
        });
        id
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Deliver an event to every matching listener
    pub fn emit(&mut self, event: GameEvent) {
        let kind = event.kind();
        for sub in &mut self.subscriptions {
            if sub.filter.is_none_or(|k| k == kind) {
                (sub.listener)(&event);
            }
        }
    }

    /// Drop all listeners
    pub fn clear(&mut self) {
        self.subscriptions.clear();
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}
