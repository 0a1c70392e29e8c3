//! The contract with an external dialogue service.
//!
//! The engine hands the service a [`DialogueContext`] describing the NPC and
//! the world, and receives a [`DialogueReply`]: free text for the host to
//! show, plus structured [`DialogueTrigger`]s that the engine applies through
//! its mutators.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use hum_core::{EndingPath, NpcState, TimeOfDay, TremorIntensity, Voice, VoiceScores, Weather};

use crate::voice::DominantVoice;

/// Everything a dialogue service needs to voice one NPC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueContext {
    /// NPC id.
    pub npc: String,
    /// That NPC's state.
    pub npc_state: NpcState,
    /// Game day.
    pub day: u32,
    /// Hour of the day.
    pub hour: u32,
    /// Period of the day.
    pub time_of_day: TimeOfDay,
    /// Current weather.
    pub weather: Weather,
    /// Strength of the hum, 0-1.
    pub hum_intensity: f64,
    /// Current act.
    pub act: u8,
    /// Global tension, 0-100.
    pub tension: i32,
    /// Ending the story is heading toward.
    pub ending_path: Option<EndingPath>,
    /// Where the player is.
    pub player_location: String,
    /// The player's current lean.
    pub dominant_voice: DominantVoice,
    /// Raw voice scores.
    pub voice_scores: VoiceScores,
    /// Activity of the entity, 0-1.
    pub curie_activity: f64,
    /// The entity's resonance with this NPC, 0-1.
    pub resonance: f64,
    /// The player's attunement, 0-1.
    pub player_attunement: f64,
    /// Every flag set so far, sorted.
    pub flags: Vec<String>,
}

/// A structured effect returned by the dialogue service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DialogueTrigger {
    /// The NPC brought up the shaft.
    ShaftMentioned,
    /// The NPC felt the entity.
    CurieSensed,
    /// Change the NPC's relationship with the player.
    RelationshipShift {
        /// Amount.
        delta: i32,
    },
    /// Change the NPC's stress.
    StressShift {
        /// Amount.
        delta: i32,
    },
    /// Change global tension.
    TensionShift {
        /// Amount.
        delta: i32,
    },
    /// Change a voice score.
    VoiceShift {
        /// Voice.
        voice: Voice,
        /// Amount.
        delta: i32,
    },
    /// Set a flag.
    SetFlag {
        /// Flag name.
        flag: String,
    },
    /// The NPC revealed something; check whether their next gate opens.
    Reveal,
    /// The ground shook during the conversation.
    Tremor {
        /// Defaults to light.
        #[serde(default)]
        intensity: Option<TremorIntensity>,
    },
    /// A trigger type this engine does not know.
    #[serde(other)]
    Unknown,
}

impl DialogueTrigger {
    /// Wire name of the trigger type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ShaftMentioned => "shaft_mentioned",
            Self::CurieSensed => "curie_sensed",
            Self::RelationshipShift { .. } => "relationship_shift",
            Self::StressShift { .. } => "stress_shift",
            Self::TensionShift { .. } => "tension_shift",
            Self::VoiceShift { .. } => "voice_shift",
            Self::SetFlag { .. } => "set_flag",
            Self::Reveal => "reveal",
            Self::Tremor { .. } => "tremor",
            Self::Unknown => "unknown",
        }
    }
}

/// What the dialogue service sends back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DialogueReply {
    /// Text for the host to show.
    pub response: String,
    /// Effects to apply, in order.
    #[serde(default)]
    pub triggers: Vec<DialogueTrigger>,
    /// Anything else the service sent; carried but not interpreted.
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_parses_known_and_unknown_triggers() {
        let reply: DialogueReply = serde_json::from_str(
            r#"{
                "response": "The water tastes of iron.",
                "triggers": [
                    {"type": "shaft_mentioned"},
                    {"type": "relationship_shift", "delta": 3},
                    {"type": "voice_shift", "voice": "GHOST", "delta": 2},
                    {"type": "tremor"},
                    {"type": "sing_a_song"}
                ],
                "mood": "wary"
            }"#,
        )
        .unwrap();
        assert_eq!(reply.triggers.len(), 5);
        assert_eq!(reply.triggers[0], DialogueTrigger::ShaftMentioned);
        assert_eq!(
            reply.triggers[1],
            DialogueTrigger::RelationshipShift { delta: 3 }
        );
        assert_eq!(reply.triggers[3], DialogueTrigger::Tremor { intensity: None });
        assert_eq!(reply.triggers[4], DialogueTrigger::Unknown);
        assert_eq!(reply.extra["mood"], "wary");
    }

    #[test]
    fn reply_without_triggers() {
        let reply: DialogueReply = serde_json::from_str(r#"{"response": "..."}"#).unwrap();
        assert!(reply.triggers.is_empty());
    }

    #[test]
    fn trigger_names_match_wire_tags() {
        let trigger = DialogueTrigger::TensionShift { delta: 4 };
        let json = serde_json::to_value(&trigger).unwrap();
        assert_eq!(json["type"], trigger.name());
    }
}
