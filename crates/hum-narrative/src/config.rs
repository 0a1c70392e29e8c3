//! Configuration for a narrative engine.

use serde::{Deserialize, Serialize};

use hum_core::event::DEFAULT_HISTORY_CAPACITY;
use hum_core::state::DEFAULT_LOG_CAPACITY;

/// Score gaps that classify the dominant voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceThresholds {
    /// A lead smaller than this reads as balanced.
    pub balanced_gap: i32,
    /// A lead larger than this reads as high confidence.
    pub high_gap: i32,
}

impl Default for VoiceThresholds {
    fn default() -> Self {
        Self {
            balanced_gap: 5,
            high_gap: 15,
        }
    }
}

/// Configuration for a [`NarrativeEngine`](crate::NarrativeEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// RNG seed for weather and manifestation rolls.
    pub seed: u64,
    /// Events kept in the bus history.
    pub history_capacity: usize,
    /// Events kept in the persisted event log.
    pub event_log_capacity: usize,
    /// Chance (0-1) that a high-activity change manifests.
    pub manifestation_chance: f64,
    /// Upper bound on derived checks run for one outer mutation.
    pub max_effect_iterations: usize,
    /// Dominant-voice classification.
    pub voice_thresholds: VoiceThresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            event_log_capacity: DEFAULT_LOG_CAPACITY,
            manifestation_chance: 0.25,
            max_effect_iterations: 256,
            voice_thresholds: VoiceThresholds::default(),
        }
    }
}

impl EngineConfig {
    /// Load a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the bus history capacity.
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Set the event log capacity (at least 1).
    pub fn with_event_log_capacity(mut self, capacity: usize) -> Self {
        self.event_log_capacity = capacity.max(1);
        self
    }

    /// Set the manifestation chance (clamped to 0-1).
    pub fn with_manifestation_chance(mut self, chance: f64) -> Self {
        self.manifestation_chance = chance.clamp(0.0, 1.0);
        self
    }

    /// Set the effect queue iteration cap (at least 1).
    pub fn with_max_effect_iterations(mut self, max: usize) -> Self {
        self.max_effect_iterations = max.max(1);
        self
    }

    /// Set the dominant-voice thresholds.
    pub fn with_voice_thresholds(mut self, thresholds: VoiceThresholds) -> Self {
        self.voice_thresholds = thresholds;
        self
    }

    /// Manifestation chance as a valid probability. Out-of-range values from
    /// a hand-edited config clamp; NaN disables manifestations.
    pub(crate) fn manifestation_probability(&self) -> f64 {
        if self.manifestation_chance.is_nan() {
            0.0
        } else {
            self.manifestation_chance.clamp(0.0, 1.0)
        }
    }
}
