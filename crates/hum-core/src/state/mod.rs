//! The narrative state tree.
//!
//! [`GameState`] is plain data: no slice holds a reference to another, and
//! nothing here enforces the narrative rules. All writes are expected to go
//! through the rule engine in `hum-narrative`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cast::ROSTER;
use crate::flags::FlagSet;

mod curie;
mod environment;
mod log;
mod narrative;
mod npc;
mod player;
mod quest;
mod time;

pub use curie::CurieState;
pub use environment::{EnvironmentState, TremorIntensity, Weather};
pub use log::{DEFAULT_LOG_CAPACITY, EventLog, LoggedEvent};
pub use narrative::{
    ActTrigger, ActTriggers, EndingPath, FIRST_ACT, LAST_ACT, MAX_ACT_PROGRESS, MAX_TENSION,
    NarrativeState,
};
pub use npc::{MAX_GATE, MAX_SCALAR, NpcState};
pub use player::{PlayerState, Voice, VoiceScores};
pub use quest::{Quest, QuestArchetype, QuestState, QuestStatus};
pub use time::{TimeOfDay, TimeState};

/// The whole narrative state of one game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Identifies the game session; kept across save/load.
    pub session_id: Uuid,
    /// In-game clock.
    pub time: TimeState,
    /// Story-level progress.
    pub narrative: NarrativeState,
    /// The player character.
    pub player: PlayerState,
    /// Per-NPC state, keyed by NPC id.
    pub npcs: BTreeMap<String, NpcState>,
    /// The entity beneath the town.
    pub curie: CurieState,
    /// Physical surroundings.
    pub environment: EnvironmentState,
    /// Write-once story flags.
    pub flags: FlagSet,
    /// Quests by status.
    pub quests: QuestState,
    /// Bounded record of emitted events.
    #[serde(default)]
    pub event_log: EventLog,
}

impl GameState {
    /// State at the start of a new game.
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            time: TimeState::default(),
            narrative: NarrativeState::default(),
            player: PlayerState::default(),
            npcs: ROSTER
                .iter()
                .map(|p| (p.id.to_string(), NpcState::from_profile(p)))
                .collect(),
            curie: CurieState::default(),
            environment: EnvironmentState::default(),
            flags: FlagSet::new(),
            quests: QuestState::default(),
            event_log: EventLog::default(),
        }
    }

    /// State of one NPC.
    pub fn npc(&self, id: &str) -> Option<&NpcState> {
        self.npcs.get(id)
    }

    /// Mutable state of one NPC.
    pub fn npc_mut(&mut self, id: &str) -> Option<&mut NpcState> {
        self.npcs.get_mut(id)
    }

    /// Whether a flag is set.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// Look up a value by dotted path (e.g. `"narrative.tension"`,
    /// `"npcs.hale.current_gate"`).
    ///
    /// A debugging aid for consoles and tooling; engine code uses the typed
    /// fields.
    pub fn get(&self, path: &str) -> Option<serde_json::Value> {
        let tree = serde_json::to_value(self).ok()?;
        if path.is_empty() {
            return Some(tree);
        }
        let pointer = format!("/{}", path.replace('.', "/"));
        tree.pointer(&pointer).cloned()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
