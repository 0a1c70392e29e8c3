//! Applying what the dialogue service reports.

use tracing::{debug, warn};

use hum_core::flags::{CURIE_SENSED, SHAFT_MENTIONED};
use hum_core::{EventPayload, TremorIntensity};

use super::NarrativeEngine;
use super::world::SHAFT_MENTION_ACTIVITY;
use crate::dialogue::{DialogueContext, DialogueReply, DialogueTrigger};

/// Attunement gained when an NPC senses the entity.
const SENSED_ATTUNEMENT: f64 = 0.05;
/// Resonance gained by that NPC.
const SENSED_RESONANCE: f64 = 0.1;

impl NarrativeEngine {
    /// The context to send to the dialogue service for `npc`, or `None` for
    /// an unknown NPC.
    pub fn dialogue_context(&self, npc: &str) -> Option<DialogueContext> {
        let npc_state = self.state.npc(npc)?.clone();
        let s = &self.state;
        Some(DialogueContext {
            npc: npc.to_string(),
            npc_state,
            day: s.time.day,
            hour: s.time.hour,
            time_of_day: s.time.time_of_day,
            weather: s.environment.weather,
            hum_intensity: s.environment.hum_intensity,
            act: s.narrative.current_act,
            tension: s.narrative.tension,
            ending_path: s.narrative.ending_path,
            player_location: s.player.location.clone(),
            dominant_voice: self.dominant_voice(),
            voice_scores: s.player.voice_scores,
            curie_activity: s.curie.activity,
            resonance: s.curie.resonance_of(npc),
            player_attunement: s.curie.player_attunement,
            flags: s.flags.iter().map(str::to_string).collect(),
        })
    }

    /// Apply every trigger in a reply, in order.
    pub fn handle_reply(&mut self, npc: &str, reply: &DialogueReply) {
        self.mutate(|e| {
            for trigger in &reply.triggers {
                e.apply_dialogue_trigger(npc, trigger);
            }
        });
    }

    /// Apply one trigger reported while talking to `npc`.
    pub fn handle_dialogue_trigger(&mut self, npc: &str, trigger: &DialogueTrigger) {
        self.mutate(|e| e.apply_dialogue_trigger(npc, trigger));
    }

    fn apply_dialogue_trigger(&mut self, npc: &str, trigger: &DialogueTrigger) {
        if !self.known_npc(npc, "handle_dialogue_trigger") {
            return;
        }
        if *trigger == DialogueTrigger::Unknown {
            warn!(npc, "unknown dialogue trigger; ignoring");
            return;
        }
        debug!(npc, trigger = trigger.name(), "dialogue trigger");
        self.emit(EventPayload::DialogueTrigger {
            npc: npc.to_string(),
            trigger: trigger.name().to_string(),
        });

        match trigger {
            DialogueTrigger::ShaftMentioned => {
                self.insert_flag(SHAFT_MENTIONED.to_string());
                self.apply_activity(SHAFT_MENTION_ACTIVITY);
            }
            DialogueTrigger::CurieSensed => {
                self.apply_attunement(SENSED_ATTUNEMENT);
                self.apply_resonance(npc, SENSED_RESONANCE);
                self.insert_flag(CURIE_SENSED.to_string());
            }
            DialogueTrigger::RelationshipShift { delta } => self.apply_relationship(npc, *delta),
            DialogueTrigger::StressShift { delta } => self.apply_stress(npc, *delta),
            DialogueTrigger::TensionShift { delta } => self.apply_tension(*delta, "dialogue"),
            DialogueTrigger::VoiceShift { voice, delta } => self.apply_voice(*voice, *delta),
            DialogueTrigger::SetFlag { flag } => {
                self.insert_flag(flag.clone());
            }
            DialogueTrigger::Reveal => {
                self.run_gate_check(npc);
            }
            DialogueTrigger::Tremor { intensity } => {
                self.apply_tremor(intensity.unwrap_or(TremorIntensity::Light));
            }
            DialogueTrigger::Unknown => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::NarrativeEngine;
    use crate::dialogue::{DialogueReply, DialogueTrigger};
    use crate::engine::test_support::*;
    use hum_core::cast::{ELSIE, HALE, MIRA, TOM};
    use hum_core::{ActTrigger, EventKind, Voice};

    #[test]
    fn context_describes_npc_and_world() {
        let mut engine = NarrativeEngine::default();
        engine.set_flag("lamp_lit");
        let ctx = engine.dialogue_context(MIRA).unwrap();
        assert_eq!(ctx.npc, MIRA);
        assert_eq!(ctx.npc_state.relationship, 25);
        assert_eq!(ctx.act, 1);
        assert_eq!(ctx.tension, 20);
        assert_eq!(ctx.flags, vec!["lamp_lit".to_string()]);
        assert!(engine.dialogue_context("nobody").is_none());
    }

    #[test]
    fn shaft_mentioned_sets_flag_and_stirs_activity() {
        let mut engine = NarrativeEngine::default();
        let before = engine.state().curie.activity;
        engine.handle_dialogue_trigger(TOM, &DialogueTrigger::ShaftMentioned);
        assert!(engine.has_flag("shaft_mentioned"));
        assert!((engine.state().curie.activity - before - 0.05).abs() < 1e-9);
    }

    #[test]
    fn curie_sensed_raises_attunement_and_resonance() {
        let mut engine = NarrativeEngine::default();
        let attunement = engine.state().curie.player_attunement;
        let resonance = engine.state().curie.resonance_of(ELSIE);
        engine.handle_dialogue_trigger(ELSIE, &DialogueTrigger::CurieSensed);
        let curie = &engine.state().curie;
        assert!((curie.player_attunement - attunement - 0.05).abs() < 1e-9);
        assert!((curie.resonance_of(ELSIE) - resonance - 0.1).abs() < 1e-9);
        assert!(engine.has_flag("curie_sensed"));
    }

    #[test]
    fn reply_triggers_apply_in_order() {
        let mut engine = NarrativeEngine::default();
        let events = record(&engine);
        let reply = DialogueReply {
            response: "Not here.".into(),
            triggers: vec![
                DialogueTrigger::RelationshipShift { delta: 4 },
                DialogueTrigger::VoiceShift {
                    voice: Voice::Empathy,
                    delta: 3,
                },
                DialogueTrigger::SetFlag {
                    flag: "mira_confided".into(),
                },
                DialogueTrigger::Unknown,
            ],
            ..DialogueReply::default()
        };
        engine.handle_reply(MIRA, &reply);
        assert_eq!(engine.npc(MIRA).unwrap().relationship, 29);
        assert_eq!(engine.state().player.voice_scores.get(Voice::Empathy), 3);
        assert!(engine.has_flag("mira_confided"));
        assert_eq!(count(&events, EventKind::DialogueTrigger), 3);
    }

    #[test]
    fn tremor_defaults_to_light() {
        let mut engine = NarrativeEngine::default();
        let events = record(&engine);
        engine.handle_dialogue_trigger(HALE, &DialogueTrigger::Tremor { intensity: None });
        assert_eq!(engine.state().environment.tremor_count, 1);
        assert_eq!(engine.narrative().tension, 25);
        assert!(!engine.state().narrative.act_triggers.is_set(ActTrigger::Act1To2));
        assert_eq!(count(&events, EventKind::Tremor), 1);
    }

    #[test]
    fn reveal_does_not_force_a_gate() {
        let mut engine = NarrativeEngine::default();
        let events = record(&engine);
        engine.handle_dialogue_trigger(HALE, &DialogueTrigger::Reveal);
        assert_eq!(engine.npc(HALE).unwrap().current_gate, 0);
        assert_eq!(count(&events, EventKind::DialogueTrigger), 1);
        assert_eq!(count(&events, EventKind::GateUnlock), 0);
    }
}
