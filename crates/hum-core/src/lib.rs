//! Core types for Hum: the narrative state tree, the event catalogue, and the
//! event bus.
//!
//! This crate holds data and plumbing only. Every rule that mutates the state
//! (clamping, act transitions, gate eligibility, quest triggers) lives in
//! `hum-narrative`; here a [`GameState`] is a plain serializable tree of
//! records that relate to each other by string id.

/// The fixed cast of NPCs and the location map.
pub mod cast;
/// Error types used throughout the crate.
pub mod error;
/// The event catalogue, typed payloads, and the publish/subscribe bus.
pub mod event;
/// Write-once narrative flags and the canonical flag names.
pub mod flags;
/// The narrative state tree.
pub mod state;

/// Re-export error types.
pub use error::{HumError, HumResult};
/// Re-export event types.
pub use event::{EventBus, EventKind, EventPayload, GameEvent, SubscriptionId, Topic};
/// Re-export the flag set.
pub use flags::FlagSet;
/// Re-export the state tree root and its most used leaf types.
pub use state::{
    ActTrigger, EndingPath, GameState, NpcState, Quest, QuestArchetype, QuestStatus, TimeOfDay,
    TremorIntensity, Voice, VoiceScores, Weather,
};
