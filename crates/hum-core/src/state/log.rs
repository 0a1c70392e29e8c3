use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::{EventKind, EventPayload, GameEvent};

/// Default number of entries kept in the state's event log.
pub const DEFAULT_LOG_CAPACITY: usize = 500;

/// A record of an emitted event, stamped with story time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// Event kind.
    pub kind: EventKind,
    /// Event payload.
    pub payload: EventPayload,
    /// Wall-clock time of emission.
    pub timestamp: DateTime<Utc>,
    /// Game day at emission.
    pub day: u32,
    /// Act at emission.
    pub act: u8,
}

impl LoggedEvent {
    /// Stamp a bus event with the story time it happened in.
    pub fn from_event(event: &GameEvent, day: u32, act: u8) -> Self {
        Self {
            kind: event.kind,
            payload: event.payload.clone(),
            timestamp: event.timestamp,
            day,
            act,
        }
    }
}

/// Append-only ring buffer of logged events; the oldest entry is dropped
/// once the capacity is reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    entries: VecDeque<LoggedEvent>,
    #[serde(skip, default = "default_capacity")]
    capacity: usize,
}

fn default_capacity() -> usize {
    DEFAULT_LOG_CAPACITY
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }
}

impl EventLog {
    /// An empty log holding at most `capacity` entries (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Change the capacity, dropping the oldest entries if needed.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        self.trim();
    }

    /// Maximum number of retained entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append an entry, dropping the oldest one if the log is full.
    pub fn push(&mut self, entry: LoggedEvent) {
        self.entries.push_back(entry);
        self.trim();
    }

    fn trim(&mut self) {
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &LoggedEvent> {
        self.entries.iter()
    }

    /// Entries of one kind, oldest first.
    pub fn of_kind(&self, kind: EventKind) -> Vec<&LoggedEvent> {
        self.entries.iter().filter(|e| e.kind == kind).collect()
    }

    /// The most recent `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> Vec<&LoggedEvent> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
