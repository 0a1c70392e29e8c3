use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cast::ROSTER;

/// The entity beneath the town ("Curie").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurieState {
    /// How awake the entity is, 0-1.
    pub activity: f64,
    /// How legible its signals are, 0-1.
    pub coherence: f64,
    /// How attuned the player is to it, 0-1.
    pub player_attunement: f64,
    /// Per-NPC affinity with the entity, 0-1.
    pub resonance: BTreeMap<String, f64>,
    /// Manifestations so far.
    pub manifestations: u32,
}

impl CurieState {
    /// Resonance for `npc`, zero when unknown.
    pub fn resonance_of(&self, npc: &str) -> f64 {
        self.resonance.get(npc).copied().unwrap_or(0.0)
    }
}

impl Default for CurieState {
    fn default() -> Self {
        Self {
            activity: 0.2,
            coherence: 0.5,
            player_attunement: 0.0,
            resonance: ROSTER
                .iter()
                .map(|p| (p.id.to_string(), p.resonance))
                .collect(),
            manifestations: 0,
        }
    }
}
