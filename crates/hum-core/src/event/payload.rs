use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::kind::EventKind;
use crate::state::{
    ActTrigger, EndingPath, QuestArchetype, TimeOfDay, TremorIntensity, Voice, VoiceScores,
    Weather,
};

/// Typed event payloads. Serialized adjacently tagged as
/// `{"type": "<wire name>", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum EventPayload {
    /// The clock moved forward.
    #[serde(rename = "time:advance")]
    TimeAdvance {
        /// Hours advanced.
        hours: u32,
        /// Day after advancing.
        day: u32,
        /// Hour after advancing.
        hour: u32,
        /// Period after advancing.
        time_of_day: TimeOfDay,
    },
    /// The period of the day changed.
    #[serde(rename = "time:period_change")]
    TimePeriodChange {
        /// Previous period.
        from: TimeOfDay,
        /// New period.
        to: TimeOfDay,
    },
    /// A new day began.
    #[serde(rename = "time:day_start")]
    DayStart {
        /// The new day.
        day: u32,
    },
    /// The player moved.
    #[serde(rename = "player:location_change")]
    PlayerLocationChange {
        /// Where the player was.
        from: Option<String>,
        /// Where the player is now.
        to: String,
    },
    /// A voice score changed.
    #[serde(rename = "player:voice_change")]
    VoiceChange {
        /// The voice.
        voice: Voice,
        /// Requested change.
        delta: i32,
        /// Score after the change.
        score: i32,
    },
    /// The player's initial tone was chosen.
    #[serde(rename = "player:initial_tone")]
    InitialTone {
        /// The chosen voice.
        voice: Voice,
    },
    /// An NPC's relationship with the player changed.
    #[serde(rename = "npc:relationship_change")]
    RelationshipChange {
        /// NPC id.
        npc: String,
        /// Value before.
        old: i32,
        /// Value after clamping.
        new: i32,
        /// Requested change.
        delta: i32,
    },
    /// An NPC's stress changed noticeably.
    #[serde(rename = "npc:stress_change")]
    StressChange {
        /// NPC id.
        npc: String,
        /// Value before.
        old: i32,
        /// Value after clamping.
        new: i32,
        /// Requested change.
        delta: i32,
    },
    /// An NPC crossed the critical stress line.
    #[serde(rename = "npc:stress_critical")]
    StressCritical {
        /// NPC id.
        npc: String,
        /// Stress at the time.
        stress: i32,
    },
    /// An NPC's backstory gate opened.
    #[serde(rename = "npc:gate_unlock")]
    GateUnlock {
        /// NPC id.
        npc: String,
        /// The new gate.
        gate: u8,
        /// Whether the unlock bypassed eligibility rules.
        forced: bool,
    },
    /// The player met an NPC for the first time.
    #[serde(rename = "npc:met")]
    NpcMet {
        /// NPC id.
        npc: String,
    },
    /// An NPC moved.
    #[serde(rename = "npc:location_change")]
    NpcLocationChange {
        /// NPC id.
        npc: String,
        /// Previous location.
        from: String,
        /// New location.
        to: String,
    },
    /// An NPC's story outcome was decided.
    #[serde(rename = "npc:outcome")]
    NpcOutcome {
        /// NPC id.
        npc: String,
        /// Outcome token.
        outcome: String,
    },
    /// Tension changed noticeably.
    #[serde(rename = "narrative:tension_change")]
    TensionChange {
        /// Value before.
        old: i32,
        /// Value after clamping.
        new: i32,
        /// Requested change.
        delta: i32,
        /// What caused the change.
        source: String,
    },
    /// An act trigger was armed.
    #[serde(rename = "narrative:act_trigger")]
    ActTrigger {
        /// The armed trigger.
        trigger: ActTrigger,
    },
    /// The story moved into a new act.
    #[serde(rename = "narrative:act_transition")]
    ActTransition {
        /// Previous act.
        from: u8,
        /// New act.
        to: u8,
        /// Tension after the act-entry bonus.
        tension: i32,
    },
    /// The projected ending changed.
    #[serde(rename = "narrative:ending_path_change")]
    EndingPathChange {
        /// Previous projection.
        from: Option<EndingPath>,
        /// New projection.
        to: EndingPath,
    },
    /// The ending was frozen.
    #[serde(rename = "narrative:ending_locked")]
    EndingLocked {
        /// The final ending.
        path: EndingPath,
        /// Voice scores at the moment of locking.
        voice_scores: VoiceScores,
    },
    /// Curie's activity changed.
    #[serde(rename = "curie:activity_change")]
    CurieActivityChange {
        /// Value before.
        old: f64,
        /// Value after clamping.
        new: f64,
    },
    /// Curie's coherence changed.
    #[serde(rename = "curie:coherence_change")]
    CurieCoherenceChange {
        /// Value before.
        old: f64,
        /// Value after clamping.
        new: f64,
    },
    /// The player's attunement changed.
    #[serde(rename = "curie:attunement_change")]
    AttunementChange {
        /// Value before.
        old: f64,
        /// Value after clamping.
        new: f64,
    },
    /// An NPC's resonance changed.
    #[serde(rename = "curie:resonance_change")]
    ResonanceChange {
        /// NPC id.
        npc: String,
        /// Value before.
        old: f64,
        /// Value after clamping.
        new: f64,
    },
    /// Curie manifested.
    #[serde(rename = "curie:manifestation")]
    Manifestation {
        /// Activity when it happened.
        activity: f64,
        /// Manifestations so far, including this one.
        count: u32,
        /// Where the player was.
        location: String,
    },
    /// The ground shook.
    #[serde(rename = "environment:tremor")]
    Tremor {
        /// Strength.
        intensity: TremorIntensity,
        /// Tremors so far, including this one.
        count: u32,
    },
    /// The weather changed.
    #[serde(rename = "environment:weather_change")]
    WeatherChange {
        /// Previous weather.
        from: Weather,
        /// New weather.
        to: Weather,
    },
    /// The hum at the player's location changed.
    #[serde(rename = "environment:hum_change")]
    HumChange {
        /// Value before.
        old: f64,
        /// Value after.
        new: f64,
    },
    /// A flag was set for the first time.
    #[serde(rename = "flag:set")]
    FlagSet {
        /// The flag.
        flag: String,
    },
    /// A quest started.
    #[serde(rename = "quest:start")]
    QuestStart {
        /// Quest id.
        id: String,
        /// Quest archetype.
        archetype: QuestArchetype,
        /// Trigger that spawned it, if any.
        trigger: Option<String>,
    },
    /// A quest completed.
    #[serde(rename = "quest:complete")]
    QuestComplete {
        /// Quest id.
        id: String,
    },
    /// A quest failed.
    #[serde(rename = "quest:fail")]
    QuestFail {
        /// Quest id.
        id: String,
    },
    /// A conversation began.
    #[serde(rename = "dialogue:start")]
    DialogueStart {
        /// NPC id.
        npc: String,
    },
    /// A conversation ended.
    #[serde(rename = "dialogue:end")]
    DialogueEnd {
        /// NPC id.
        npc: String,
        /// Conversations with this NPC so far.
        conversation_count: u32,
    },
    /// The dialogue service reported a trigger.
    #[serde(rename = "dialogue:trigger")]
    DialogueTrigger {
        /// NPC id.
        npc: String,
        /// Trigger type.
        trigger: String,
    },
    /// The player picked a dialogue choice.
    #[serde(rename = "dialogue:choice")]
    ChoiceApplied {
        /// NPC id.
        npc: String,
        /// Choice id.
        choice: String,
    },
    /// The state was replaced with a new game.
    #[serde(rename = "game:reset")]
    GameReset,
    /// A save was loaded.
    #[serde(rename = "game:loaded")]
    GameLoaded {
        /// Save format version of the loaded file.
        version: String,
    },
    /// The state was exported.
    #[serde(rename = "game:saved")]
    GameSaved {
        /// Accumulated play time in seconds.
        play_time: u64,
    },
}

impl EventPayload {
    /// The catalogue entry this payload belongs to.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::TimeAdvance { .. } => EventKind::TimeAdvance,
            Self::TimePeriodChange { .. } => EventKind::TimePeriodChange,
            Self::DayStart { .. } => EventKind::DayStart,
            Self::PlayerLocationChange { .. } => EventKind::PlayerLocationChange,
            Self::VoiceChange { .. } => EventKind::VoiceChange,
            Self::InitialTone { .. } => EventKind::InitialTone,
            Self::RelationshipChange { .. } => EventKind::RelationshipChange,
            Self::StressChange { .. } => EventKind::StressChange,
            Self::StressCritical { .. } => EventKind::StressCritical,
            Self::GateUnlock { .. } => EventKind::GateUnlock,
            Self::NpcMet { .. } => EventKind::NpcMet,
            Self::NpcLocationChange { .. } => EventKind::NpcLocationChange,
            Self::NpcOutcome { .. } => EventKind::NpcOutcome,
            Self::TensionChange { .. } => EventKind::TensionChange,
            Self::ActTrigger { .. } => EventKind::ActTrigger,
            Self::ActTransition { .. } => EventKind::ActTransition,
            Self::EndingPathChange { .. } => EventKind::EndingPathChange,
            Self::EndingLocked { .. } => EventKind::EndingLocked,
            Self::CurieActivityChange { .. } => EventKind::CurieActivityChange,
            Self::CurieCoherenceChange { .. } => EventKind::CurieCoherenceChange,
            Self::AttunementChange { .. } => EventKind::AttunementChange,
            Self::ResonanceChange { .. } => EventKind::ResonanceChange,
            Self::Manifestation { .. } => EventKind::Manifestation,
            Self::Tremor { .. } => EventKind::Tremor,
            Self::WeatherChange { .. } => EventKind::WeatherChange,
            Self::HumChange { .. } => EventKind::HumChange,
            Self::FlagSet { .. } => EventKind::FlagSet,
            Self::QuestStart { .. } => EventKind::QuestStart,
            Self::QuestComplete { .. } => EventKind::QuestComplete,
            Self::QuestFail { .. } => EventKind::QuestFail,
            Self::DialogueStart { .. } => EventKind::DialogueStart,
            Self::DialogueEnd { .. } => EventKind::DialogueEnd,
            Self::DialogueTrigger { .. } => EventKind::DialogueTrigger,
            Self::ChoiceApplied { .. } => EventKind::ChoiceApplied,
            Self::GameReset => EventKind::GameReset,
            Self::GameLoaded { .. } => EventKind::GameLoaded,
            Self::GameSaved { .. } => EventKind::GameSaved,
        }
    }

    /// The NPC this payload concerns, if any.
    pub fn npc(&self) -> Option<&str> {
        match self {
            Self::RelationshipChange { npc, .. }
            | Self::StressChange { npc, .. }
            | Self::StressCritical { npc, .. }
            | Self::GateUnlock { npc, .. }
            | Self::NpcMet { npc }
            | Self::NpcLocationChange { npc, .. }
            | Self::NpcOutcome { npc, .. }
            | Self::ResonanceChange { npc, .. }
            | Self::DialogueStart { npc }
            | Self::DialogueEnd { npc, .. }
            | Self::DialogueTrigger { npc, .. }
            | Self::ChoiceApplied { npc, .. } => Some(npc),
            _ => None,
        }
    }
}

/// An emitted event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Catalogue entry.
    pub kind: EventKind,
    /// Typed data.
    pub payload: EventPayload,
    /// Wall-clock time of emission.
    pub timestamp: DateTime<Utc>,
}

impl GameEvent {
    /// Wrap a payload, stamping it with the current time.
    pub fn new(payload: EventPayload) -> Self {
        Self {
            kind: payload.kind(),
            payload,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_serializes_with_wire_tag() {
        let payload = EventPayload::GateUnlock {
            npc: "hale".to_string(),
            gate: 2,
            forced: false,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "npc:gate_unlock");
        assert_eq!(json["data"]["gate"], 2);
        assert_eq!(payload.kind().as_str(), "npc:gate_unlock");
    }

    #[test]
    fn unit_payload_round_trips() {
        let json = serde_json::to_string(&EventPayload::GameReset).unwrap();
        let back: EventPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, EventPayload::GameReset);
    }

    #[test]
    fn event_kind_follows_payload() {
        let event = GameEvent::new(EventPayload::DayStart { day: 3 });
        assert_eq!(event.kind, EventKind::DayStart);
        assert_eq!(event.payload.npc(), None);

        let event = GameEvent::new(EventPayload::NpcMet {
            npc: "elsie".to_string(),
        });
        assert_eq!(event.payload.npc(), Some("elsie"));
    }
}
