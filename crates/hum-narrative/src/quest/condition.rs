//! Quest trigger predicates.

use serde::{Deserialize, Serialize};

use hum_core::{GameState, TimeOfDay};

/// Which kind of state change can make a predicate true.
///
/// The matcher only re-evaluates triggers indexed under the category of the
/// change that just happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerCategory {
    /// A conversation ended.
    DialogueEnd,
    /// The player moved.
    LocationChange,
    /// Tension or act changed.
    TensionChange,
    /// The clock advanced.
    TimeAdvance,
    /// An NPC's relationship, stress, or gate changed.
    RelationshipChange,
    /// Curie activity or resonance changed.
    CurieChange,
}

impl TriggerCategory {
    /// Every category.
    pub const ALL: [TriggerCategory; 6] = [
        TriggerCategory::DialogueEnd,
        TriggerCategory::LocationChange,
        TriggerCategory::TensionChange,
        TriggerCategory::TimeAdvance,
        TriggerCategory::RelationshipChange,
        TriggerCategory::CurieChange,
    ];
}

/// One predicate over the game state. A trigger's conditions are ANDed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// The NPC has finished at least `min` conversations.
    NpcConversations {
        /// NPC id.
        npc: String,
        /// Minimum conversation count.
        min: u32,
    },
    /// The NPC's stress is at least `min`.
    NpcStress {
        /// NPC id.
        npc: String,
        /// Minimum stress.
        min: i32,
    },
    /// The NPC's relationship is at least `min`.
    NpcRelationship {
        /// NPC id.
        npc: String,
        /// Minimum relationship.
        min: i32,
    },
    /// The NPC has reached at least gate `min`.
    NpcGate {
        /// NPC id.
        npc: String,
        /// Minimum gate.
        min: u8,
    },
    /// The player is at this location.
    Location {
        /// Location id.
        location: String,
    },
    /// It is this day.
    Day {
        /// Day number.
        day: u32,
    },
    /// It is this time of day.
    TimeOfDay {
        /// Period.
        period: TimeOfDay,
    },
    /// Tension is at least `min`.
    MinTension {
        /// Minimum tension.
        min: i32,
    },
    /// The current act is at least `min`.
    MinAct {
        /// Minimum act.
        min: u8,
    },
    /// The flag is set.
    HasFlag {
        /// Flag name.
        flag: String,
    },
    /// Curie activity is at least `min`.
    MinCurieActivity {
        /// Minimum activity.
        min: f64,
    },
    /// The NPC's resonance is at least `min`.
    MinResonance {
        /// NPC id.
        npc: String,
        /// Minimum resonance.
        min: f64,
    },
}

impl Condition {
    /// Evaluate against the state. Unknown NPC ids evaluate to false.
    pub fn evaluate(&self, state: &GameState) -> bool {
        match self {
            Condition::NpcConversations { npc, min } => state
                .npc(npc)
                .is_some_and(|n| n.conversation_count >= *min),
            Condition::NpcStress { npc, min } => state.npc(npc).is_some_and(|n| n.stress >= *min),
            Condition::NpcRelationship { npc, min } => {
                state.npc(npc).is_some_and(|n| n.relationship >= *min)
            }
            Condition::NpcGate { npc, min } => {
                state.npc(npc).is_some_and(|n| n.current_gate >= *min)
            }
            Condition::Location { location } => state.player.location == *location,
            Condition::Day { day } => state.time.day == *day,
            Condition::TimeOfDay { period } => state.time.time_of_day == *period,
            Condition::MinTension { min } => state.narrative.tension >= *min,
            Condition::MinAct { min } => state.narrative.current_act >= *min,
            Condition::HasFlag { flag } => state.has_flag(flag),
            Condition::MinCurieActivity { min } => state.curie.activity >= *min,
            Condition::MinResonance { npc, min } => {
                state.curie.resonance.get(npc).is_some_and(|r| r >= min)
            }
        }
    }

    /// The category whose changes can flip this predicate. Flag presence has
    /// none: it only narrows triggers indexed elsewhere.
    pub fn category(&self) -> Option<TriggerCategory> {
        match self {
            Condition::NpcConversations { .. } => Some(TriggerCategory::DialogueEnd),
            Condition::NpcStress { .. }
            | Condition::NpcRelationship { .. }
            | Condition::NpcGate { .. } => Some(TriggerCategory::RelationshipChange),
            Condition::Location { .. } => Some(TriggerCategory::LocationChange),
            Condition::Day { .. } | Condition::TimeOfDay { .. } => {
                Some(TriggerCategory::TimeAdvance)
            }
            Condition::MinTension { .. } | Condition::MinAct { .. } => {
                Some(TriggerCategory::TensionChange)
            }
            Condition::HasFlag { .. } => None,
            Condition::MinCurieActivity { .. } | Condition::MinResonance { .. } => {
                Some(TriggerCategory::CurieChange)
            }
        }
    }
}
