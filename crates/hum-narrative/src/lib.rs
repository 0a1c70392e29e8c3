//! The narrative rule engine for Hum.
//!
//! [`NarrativeEngine`] owns the [`GameState`](hum_core::GameState) and the
//! [`EventBus`](hum_core::EventBus). Every state change goes through one of
//! its mutators, which clamp input, apply the change, emit an event, and
//! queue the rule checks that depend on it (act transitions, gate unlocks,
//! stress crises, quest triggers). The queue is drained before the outermost
//! mutator returns.
//!
//! Around the engine sit the pieces it consults: the gate rules table, the
//! voice/ending logic, the quest trigger matcher, and the dialogue choice
//! selector. Persistence and the dialogue-service contract are data shapes
//! only; storage and text generation belong to the host.

pub mod choice;
pub mod config;
pub mod dialogue;
pub mod engine;
pub mod error;
pub mod gates;
pub mod quest;
pub mod save;
pub mod voice;

pub use choice::{Choice, ChoiceCatalog, ChoiceEffect, ChoicePool, select_choices};
pub use config::{EngineConfig, VoiceThresholds};
pub use dialogue::{DialogueContext, DialogueReply, DialogueTrigger};
pub use engine::NarrativeEngine;
pub use error::{SaveError, SaveResult};
pub use quest::{Condition, QuestMatcher, QuestTrigger, TriggerCategory};
pub use save::{SAVE_VERSION, SaveGame, SaveMeta};
pub use voice::{Confidence, DominantVoice, VoiceLean, dominant_voice, ending_for};
