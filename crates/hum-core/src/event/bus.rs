//! Synchronous publish/subscribe with bounded history.
//!
//! The bus is a cheap, cloneable handle. Handlers may hold a clone and call
//! [`EventBus::on`] or [`EventBus::off`] from inside a handler: emission
//! works on a snapshot of the listener table taken before the first handler
//! runs, so changes made during an emission apply from the next one.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use chrono::{DateTime, Utc};
use tracing::{error, trace};

use super::kind::EventKind;
use super::payload::{EventPayload, GameEvent};

/// Default number of events kept in the bus history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Error returned by a handler. Logged by the bus, never propagated.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct HandlerError(String);

impl HandlerError {
    /// Handler failure with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// What a handler returns.
pub type HandlerResult = Result<(), HandlerError>;

type Handler = Rc<dyn Fn(&GameEvent) -> HandlerResult>;

/// Identifies one subscription; pass it to [`EventBus::off`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// What a listener is subscribed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// One event kind.
    Kind(EventKind),
    /// Every event (the `'*'` wildcard). Runs after kind-specific listeners.
    Any,
}

#[derive(Clone)]
struct Listener {
    id: SubscriptionId,
    topic: Topic,
    once: bool,
    handler: Handler,
}

struct BusInner {
    listeners: Vec<Listener>,
    history: VecDeque<GameEvent>,
    history_capacity: usize,
    next_id: u64,
}

/// The event bus.
#[derive(Clone)]
pub struct EventBus {
    inner: Rc<RefCell<BusInner>>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("EventBus")
            .field("listeners", &inner.listeners.len())
            .field("history", &inner.history.len())
            .field("history_capacity", &inner.history_capacity)
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// A bus with the default history capacity.
    pub fn new() -> Self {
        Self::with_history_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// A bus keeping the last `capacity` events.
    pub fn with_history_capacity(capacity: usize) -> Self {
        Self {
            inner: Rc::new(RefCell::new(BusInner {
                listeners: Vec::new(),
                history: VecDeque::new(),
                history_capacity: capacity,
                next_id: 0,
            })),
        }
    }

    /// Subscribe to one event kind.
    pub fn on<F>(&self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: Fn(&GameEvent) -> HandlerResult + 'static,
    {
        self.subscribe(Topic::Kind(kind), false, Rc::new(handler))
    }

    /// Subscribe to every event.
    pub fn on_any<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&GameEvent) -> HandlerResult + 'static,
    {
        self.subscribe(Topic::Any, false, Rc::new(handler))
    }

    /// Subscribe to the next event of one kind only.
    pub fn once<F>(&self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: Fn(&GameEvent) -> HandlerResult + 'static,
    {
        self.subscribe(Topic::Kind(kind), true, Rc::new(handler))
    }

    fn subscribe(&self, topic: Topic, once: bool, handler: Handler) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.listeners.push(Listener {
            id,
            topic,
            once,
            handler,
        });
        id
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn off(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.listeners.len();
        inner.listeners.retain(|l| l.id != id);
        inner.listeners.len() < before
    }

    /// Publish an event and return it.
    ///
    /// Kind-specific listeners run first, then wildcard listeners, each in
    /// registration order. A handler that fails or panics is logged and
    /// skipped; the remaining handlers still run.
    pub fn emit(&self, payload: EventPayload) -> GameEvent {
        let event = GameEvent::new(payload);
        let snapshot = self.prepare(&event);

        trace!(kind = %event.kind, listeners = snapshot.len(), "emit");
        for listener in snapshot {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| (listener.handler)(&event)));
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    error!(kind = %event.kind, subscription = listener.id.0, error = %err, "event handler failed");
                }
                Err(_) => {
                    error!(kind = %event.kind, subscription = listener.id.0, "event handler panicked");
                }
            }
        }
        event
    }

    /// Record the event in history and take the listener snapshot. One-shot
    /// listeners are removed here so a re-entrant emit cannot fire them twice.
    fn prepare(&self, event: &GameEvent) -> Vec<Listener> {
        let mut inner = self.inner.borrow_mut();

        if inner.history_capacity > 0 {
            inner.history.push_back(event.clone());
            while inner.history.len() > inner.history_capacity {
                inner.history.pop_front();
            }
        }

        let topic = Topic::Kind(event.kind);
        let mut snapshot: Vec<Listener> = inner
            .listeners
            .iter()
            .filter(|l| l.topic == topic)
            .cloned()
            .collect();
        snapshot.extend(
            inner
                .listeners
                .iter()
                .filter(|l| l.topic == Topic::Any)
                .cloned(),
        );

        inner
            .listeners
            .retain(|l| !(l.once && snapshot.iter().any(|s| s.id == l.id)));
        snapshot
    }

    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Recent events, oldest first.
    pub fn history(&self) -> Vec<GameEvent> {
        self.inner.borrow().history.iter().cloned().collect()
    }

    /// Recent events of one kind, oldest first.
    pub fn history_of(&self, kind: EventKind) -> Vec<GameEvent> {
        self.inner
            .borrow()
            .history
            .iter()
            .filter(|e| e.kind == kind)
            .cloned()
            .collect()
    }

    /// Recent events emitted at or after `since`, oldest first.
    pub fn history_since(&self, since: DateTime<Utc>) -> Vec<GameEvent> {
        self.inner
            .borrow()
            .history
            .iter()
            .filter(|e| e.timestamp >= since)
            .cloned()
            .collect()
    }

    /// Forget the history. Subscriptions are kept.
    pub fn clear_history(&self) {
        self.inner.borrow_mut().history.clear();
    }
}
