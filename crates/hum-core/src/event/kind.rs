use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HumError;

/// The event catalogue. Wire names are `domain:action` and form a stable
/// API for every subsystem listening to the engine (UI, audio, dialogue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventKind {
    /// `time:advance`
    #[serde(rename = "time:advance")]
    TimeAdvance,
    /// `time:period_change`
    #[serde(rename = "time:period_change")]
    TimePeriodChange,
    /// `time:day_start`
    #[serde(rename = "time:day_start")]
    DayStart,
    /// `player:location_change`
    #[serde(rename = "player:location_change")]
    PlayerLocationChange,
    /// `player:voice_change`
    #[serde(rename = "player:voice_change")]
    VoiceChange,
    /// `player:initial_tone`
    #[serde(rename = "player:initial_tone")]
    InitialTone,
    /// `npc:relationship_change`
    #[serde(rename = "npc:relationship_change")]
    RelationshipChange,
    /// `npc:stress_change`
    #[serde(rename = "npc:stress_change")]
    StressChange,
    /// `npc:stress_critical`
    #[serde(rename = "npc:stress_critical")]
    StressCritical,
    /// `npc:gate_unlock`
    #[serde(rename = "npc:gate_unlock")]
    GateUnlock,
    /// `npc:met`
    #[serde(rename = "npc:met")]
    NpcMet,
    /// `npc:location_change`
    #[serde(rename = "npc:location_change")]
    NpcLocationChange,
    /// `npc:outcome`
    #[serde(rename = "npc:outcome")]
    NpcOutcome,
    /// `narrative:tension_change`
    #[serde(rename = "narrative:tension_change")]
    TensionChange,
    /// `narrative:act_trigger`
    #[serde(rename = "narrative:act_trigger")]
    ActTrigger,
    /// `narrative:act_transition`
    #[serde(rename = "narrative:act_transition")]
    ActTransition,
    /// `narrative:ending_path_change`
    #[serde(rename = "narrative:ending_path_change")]
    EndingPathChange,
    /// `narrative:ending_locked`
    #[serde(rename = "narrative:ending_locked")]
    EndingLocked,
    /// `curie:activity_change`
    #[serde(rename = "curie:activity_change")]
    CurieActivityChange,
    /// `curie:coherence_change`
    #[serde(rename = "curie:coherence_change")]
    CurieCoherenceChange,
    /// `curie:attunement_change`
    #[serde(rename = "curie:attunement_change")]
    AttunementChange,
    /// `curie:resonance_change`
    #[serde(rename = "curie:resonance_change")]
    ResonanceChange,
    /// `curie:manifestation`
    #[serde(rename = "curie:manifestation")]
    Manifestation,
    /// `environment:tremor`
    #[serde(rename = "environment:tremor")]
    Tremor,
    /// `environment:weather_change`
    #[serde(rename = "environment:weather_change")]
    WeatherChange,
    /// `environment:hum_change`
    #[serde(rename = "environment:hum_change")]
    HumChange,
    /// `flag:set`
    #[serde(rename = "flag:set")]
    FlagSet,
    /// `quest:start`
    #[serde(rename = "quest:start")]
    QuestStart,
    /// `quest:complete`
    #[serde(rename = "quest:complete")]
    QuestComplete,
    /// `quest:fail`
    #[serde(rename = "quest:fail")]
    QuestFail,
    /// `dialogue:start`
    #[serde(rename = "dialogue:start")]
    DialogueStart,
    /// `dialogue:end`
    #[serde(rename = "dialogue:end")]
    DialogueEnd,
    /// `dialogue:trigger`
    #[serde(rename = "dialogue:trigger")]
    DialogueTrigger,
    /// `dialogue:choice`
    #[serde(rename = "dialogue:choice")]
    ChoiceApplied,
    /// `game:reset`
    #[serde(rename = "game:reset")]
    GameReset,
    /// `game:loaded`
    #[serde(rename = "game:loaded")]
    GameLoaded,
    /// `game:saved`
    #[serde(rename = "game:saved")]
    GameSaved,
}

impl EventKind {
    /// Every event kind in catalogue order.
    pub const ALL: [EventKind; 37] = [
        EventKind::TimeAdvance,
        EventKind::TimePeriodChange,
        EventKind::DayStart,
        EventKind::PlayerLocationChange,
        EventKind::VoiceChange,
        EventKind::InitialTone,
        EventKind::RelationshipChange,
        EventKind::StressChange,
        EventKind::StressCritical,
        EventKind::GateUnlock,
        EventKind::NpcMet,
        EventKind::NpcLocationChange,
        EventKind::NpcOutcome,
        EventKind::TensionChange,
        EventKind::ActTrigger,
        EventKind::ActTransition,
        EventKind::EndingPathChange,
        EventKind::EndingLocked,
        EventKind::CurieActivityChange,
        EventKind::CurieCoherenceChange,
        EventKind::AttunementChange,
        EventKind::ResonanceChange,
        EventKind::Manifestation,
        EventKind::Tremor,
        EventKind::WeatherChange,
        EventKind::HumChange,
        EventKind::FlagSet,
        EventKind::QuestStart,
        EventKind::QuestComplete,
        EventKind::QuestFail,
        EventKind::DialogueStart,
        EventKind::DialogueEnd,
        EventKind::DialogueTrigger,
        EventKind::ChoiceApplied,
        EventKind::GameReset,
        EventKind::GameLoaded,
        EventKind::GameSaved,
    ];

    /// Wire name, `domain:action`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TimeAdvance => "time:advance",
            Self::TimePeriodChange => "time:period_change",
            Self::DayStart => "time:day_start",
            Self::PlayerLocationChange => "player:location_change",
            Self::VoiceChange => "player:voice_change",
            Self::InitialTone => "player:initial_tone",
            Self::RelationshipChange => "npc:relationship_change",
            Self::StressChange => "npc:stress_change",
            Self::StressCritical => "npc:stress_critical",
            Self::GateUnlock => "npc:gate_unlock",
            Self::NpcMet => "npc:met",
            Self::NpcLocationChange => "npc:location_change",
            Self::NpcOutcome => "npc:outcome",
            Self::TensionChange => "narrative:tension_change",
            Self::ActTrigger => "narrative:act_trigger",
            Self::ActTransition => "narrative:act_transition",
            Self::EndingPathChange => "narrative:ending_path_change",
            Self::EndingLocked => "narrative:ending_locked",
            Self::CurieActivityChange => "curie:activity_change",
            Self::CurieCoherenceChange => "curie:coherence_change",
            Self::AttunementChange => "curie:attunement_change",
            Self::ResonanceChange => "curie:resonance_change",
            Self::Manifestation => "curie:manifestation",
            Self::Tremor => "environment:tremor",
            Self::WeatherChange => "environment:weather_change",
            Self::HumChange => "environment:hum_change",
            Self::FlagSet => "flag:set",
            Self::QuestStart => "quest:start",
            Self::QuestComplete => "quest:complete",
            Self::QuestFail => "quest:fail",
            Self::DialogueStart => "dialogue:start",
            Self::DialogueEnd => "dialogue:end",
            Self::DialogueTrigger => "dialogue:trigger",
            Self::ChoiceApplied => "dialogue:choice",
            Self::GameReset => "game:reset",
            Self::GameLoaded => "game:loaded",
            Self::GameSaved => "game:saved",
        }
    }

    /// The domain half of the wire name (`"npc"` for `npc:gate_unlock`).
    pub fn domain(self) -> &'static str {
        let name = self.as_str();
        name.split_once(':').map_or(name, |(domain, _)| domain)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = HumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| HumError::invalid("event kind", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_namespaced_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for kind in EventKind::ALL {
            let name = kind.as_str();
            assert!(name.contains(':'), "{name} is not namespaced");
            assert!(seen.insert(name), "{name} appears twice");
        }
    }

    #[test]
    fn serde_matches_as_str() {
        for kind in EventKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            assert_eq!(kind.as_str().parse::<EventKind>().unwrap(), kind);
        }
    }

    #[test]
    fn domain_split() {
        assert_eq!(EventKind::GateUnlock.domain(), "npc");
        assert_eq!(EventKind::TensionChange.domain(), "narrative");
    }
}
