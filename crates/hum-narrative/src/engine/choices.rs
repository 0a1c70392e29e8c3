//! Offering and applying dialogue choices.

use tracing::{debug, warn};

use hum_core::{EventPayload, flags};

use super::NarrativeEngine;
use crate::choice::{Choice, ChoiceEffect, LEAVE_CHOICE_ID, select_choices};

impl NarrativeEngine {
    /// Choices to offer when talking to `npc`, best first, `leave` last.
    pub fn available_choices(&self, npc: &str) -> Vec<Choice> {
        select_choices(npc, &self.state, &self.choices, self.config.voice_thresholds)
    }

    /// Apply a choice made while talking to `npc`.
    ///
    /// `leave` ends the conversation. Any other id must be in the catalog and
    /// offered to this NPC; its effects run in order, then `chose_{id}` is
    /// set. Returns whether the choice was applied.
    pub fn apply_choice(&mut self, npc: &str, choice_id: &str) -> bool {
        if choice_id == LEAVE_CHOICE_ID {
            if !self.known_npc(npc, "apply_choice") {
                return false;
            }
            self.end_conversation(npc);
            return true;
        }
        self.mutate(|e| {
            if !e.known_npc(npc, "apply_choice") {
                return false;
            }
            let Some(choice) = e.choices.find(choice_id).cloned() else {
                warn!(npc, choice = choice_id, "unknown choice; ignoring");
                return false;
            };
            if !choice.offered_to(npc) {
                warn!(npc, choice = choice_id, "choice belongs to another npc; ignoring");
                return false;
            }
            debug!(npc, choice = choice_id, effects = choice.effects.len(), "apply choice");
            for effect in &choice.effects {
                e.apply_choice_effect(npc, effect);
            }
            e.insert_flag(flags::chose(choice_id));
            e.emit(EventPayload::ChoiceApplied {
                npc: npc.to_string(),
                choice: choice_id.to_string(),
            });
            true
        })
    }

    fn apply_choice_effect(&mut self, npc: &str, effect: &ChoiceEffect) {
        match effect {
            ChoiceEffect::Relationship { delta } => self.apply_relationship(npc, *delta),
            ChoiceEffect::Stress { delta } => self.apply_stress(npc, *delta),
            ChoiceEffect::Tension { delta } => self.apply_tension(*delta, "choice"),
            ChoiceEffect::Voice { voice, delta } => self.apply_voice(*voice, *delta),
            ChoiceEffect::SetFlag { flag } => {
                self.insert_flag(flag.clone());
            }
            ChoiceEffect::Resonance { delta } => self.apply_resonance(npc, *delta),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::NarrativeEngine;
    use crate::choice::LEAVE_CHOICE_ID;
    use crate::engine::test_support::*;
    use hum_core::cast::{HALE, MIRA};
    use hum_core::{EventKind, Voice};

    #[test]
    fn available_choices_end_with_leave() {
        let engine = NarrativeEngine::default();
        let choices = engine.available_choices(HALE);
        assert!(choices.len() <= 5);
        assert_eq!(choices.last().map(|c| c.id.as_str()), Some(LEAVE_CHOICE_ID));
        assert!(choices.iter().any(|c| c.id == "hale_symptoms"));
    }

    #[test]
    fn applying_a_choice_runs_its_effects() {
        let mut engine = NarrativeEngine::default();
        let events = record(&engine);
        assert!(engine.apply_choice(HALE, "hale_symptoms"));
        assert_eq!(engine.npc(HALE).unwrap().relationship, 35);
        assert_eq!(engine.state().player.voice_scores.get(Voice::Logic), 2);
        assert!(engine.has_flag("chose_hale_symptoms"));
        assert_eq!(count(&events, EventKind::ChoiceApplied), 1);
    }

    #[test]
    fn flag_effects_are_written() {
        let mut engine = NarrativeEngine::default();
        engine.apply_choice(MIRA, "mira_water");
        assert!(engine.has_flag("shaft_mentioned"));
        assert!(engine.has_flag("chose_mira_water"));
    }

    #[test]
    fn leave_ends_the_conversation() {
        let mut engine = NarrativeEngine::default();
        engine.start_conversation(MIRA);
        assert!(engine.apply_choice(MIRA, LEAVE_CHOICE_ID));
        assert_eq!(engine.npc(MIRA).unwrap().conversation_count, 1);
        assert!(!engine.has_flag("chose_leave"));
    }

    #[test]
    fn foreign_and_unknown_choices_are_refused() {
        let mut engine = NarrativeEngine::default();
        let before = engine.state().clone();
        assert!(!engine.apply_choice(MIRA, "hale_symptoms"));
        assert!(!engine.apply_choice(MIRA, "no_such_choice"));
        assert!(!engine.apply_choice("nobody", "hale_symptoms"));
        assert_eq!(engine.state(), &before);
    }
}
