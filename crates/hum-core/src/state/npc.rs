use serde::{Deserialize, Serialize};

use crate::cast::NpcProfile;

/// Highest backstory gate an NPC can reach.
pub const MAX_GATE: u8 = 4;
/// Upper bound of relationship and stress.
pub const MAX_SCALAR: i32 = 100;

/// Per-NPC narrative state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcState {
    /// Current location id.
    pub location: String,
    /// 0-100.
    pub relationship: i32,
    /// 0-100.
    pub stress: i32,
    /// 0-4; only ever increases.
    pub current_gate: u8,
    /// How this NPC's story ended, once decided.
    pub outcome: Option<String>,
    /// Whether the player has spoken with this NPC.
    pub met: bool,
    /// Finished conversations with the player.
    pub conversation_count: u32,
}

impl NpcState {
    /// Fresh state from a roster profile.
    pub fn from_profile(profile: &NpcProfile) -> Self {
        Self {
            location: profile.home.to_string(),
            relationship: profile.relationship,
            stress: profile.stress,
            current_gate: 0,
            outcome: None,
            met: false,
            conversation_count: 0,
        }
    }

    /// Whether every gate is open.
    pub fn fully_revealed(&self) -> bool {
        self.current_gate >= MAX_GATE
    }
}
