use hum_core::{GameState, Voice};

use super::catalog::ChoiceCatalog;
use super::model::{Choice, ChoicePool};
use crate::config::VoiceThresholds;
use crate::voice::dominant_voice;

/// Most substantive choices offered at once; `leave` comes on top.
pub const MAX_CHOICES: usize = 4;

/// A voice other than the dominant one gets its choice above this score.
pub const SECONDARY_VOICE_MIN: i32 = 3;

/// Choices to offer when talking to `npc`, best first, `leave` last.
///
/// Pure: reads the state, never writes it. An unknown NPC gets only
/// `leave`.
pub fn select_choices(
    npc: &str,
    state: &GameState,
    catalog: &ChoiceCatalog,
    thresholds: VoiceThresholds,
) -> Vec<Choice> {
    let voices = offered_voices(state, thresholds);

    let mut eligible: Vec<&Choice> = catalog
        .choices()
        .iter()
        .filter(|c| !c.is_leave() && c.offered_to(npc))
        .filter(|c| match &c.pool {
            ChoicePool::Voice { voice } => voices.contains(voice),
            _ => true,
        })
        .filter(|c| c.is_eligible(npc, state))
        .collect();

    // sort_by is stable: equal priorities keep catalog order.
    eligible.sort_by(|a, b| b.priority.cmp(&a.priority));

    let mut selected: Vec<Choice> = eligible.into_iter().take(MAX_CHOICES).cloned().collect();
    selected.push(Choice::leave());
    selected
}

/// The dominant voice (when there is one) plus every other voice whose score
/// exceeds [`SECONDARY_VOICE_MIN`].
fn offered_voices(state: &GameState, thresholds: VoiceThresholds) -> Vec<Voice> {
    let scores = &state.player.voice_scores;
    let dominant = dominant_voice(scores, thresholds).voice.voice();
    Voice::ALL
        .into_iter()
        .filter(|v| Some(*v) == dominant || scores.get(*v) > SECONDARY_VOICE_MIN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::model::{ChoiceEffect, LEAVE_CHOICE_ID};
    use hum_core::cast::{HALE, MIRA};

    fn catalog() -> ChoiceCatalog {
        ChoiceCatalog::new(vec![
            Choice::new("a", "A", ChoicePool::Relationship { min: 0, max: 100 }).with_priority(10),
            Choice::new("b", "B", ChoicePool::Relationship { min: 0, max: 100 }).with_priority(50),
            Choice::new("c", "C", ChoicePool::Relationship { min: 0, max: 100 }).with_priority(10),
            Choice::new("d", "D", ChoicePool::Relationship { min: 0, max: 100 }).with_priority(30),
            Choice::new("e", "E", ChoicePool::Relationship { min: 0, max: 100 }).with_priority(5),
            Choice::new("hale_only", "H", ChoicePool::Relationship { min: 0, max: 100 })
                .for_npc(HALE)
                .with_priority(100),
            Choice::new("logic", "L", ChoicePool::Voice { voice: Voice::Logic }).with_priority(200),
            Choice::new("ghost", "G", ChoicePool::Voice { voice: Voice::Ghost })
                .with_priority(200)
                .with_effect(ChoiceEffect::Tension { delta: 1 }),
        ])
    }

    fn ids(choices: &[Choice]) -> Vec<&str> {
        choices.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn sorted_truncated_leave_last() {
        let state = GameState::new();
        let choices = select_choices(MIRA, &state, &catalog(), VoiceThresholds::default());
        assert_eq!(ids(&choices), vec!["b", "d", "a", "c", LEAVE_CHOICE_ID]);
    }

    #[test]
    fn npc_specific_choices() {
        let state = GameState::new();
        let choices = select_choices(HALE, &state, &catalog(), VoiceThresholds::default());
        assert_eq!(choices[0].id, "hale_only");
        assert_eq!(choices.len(), MAX_CHOICES + 1);
    }

    #[test]
    fn dominant_and_secondary_voices() {
        let mut state = GameState::new();
        state.player.voice_scores.logic = 20;
        let choices = select_choices(MIRA, &state, &catalog(), VoiceThresholds::default());
        assert_eq!(choices[0].id, "logic");
        assert!(!ids(&choices).contains(&"ghost"));

        state.player.voice_scores.ghost = 4;
        let choices = select_choices(MIRA, &state, &catalog(), VoiceThresholds::default());
        assert_eq!(&ids(&choices)[..2], &["logic", "ghost"]);
    }

    #[test]
    fn balanced_offers_only_voices_above_secondary_min() {
        let mut state = GameState::new();
        state.player.voice_scores.logic = 3;
        let choices = select_choices(MIRA, &state, &catalog(), VoiceThresholds::default());
        assert!(!ids(&choices).contains(&"logic"));
        state.player.voice_scores.logic = 4;
        state.player.voice_scores.ghost = 4;
        let choices = select_choices(MIRA, &state, &catalog(), VoiceThresholds::default());
        assert_eq!(&ids(&choices)[..2], &["logic", "ghost"]);
    }

    #[test]
    fn unknown_npc_gets_leave_only() {
        let state = GameState::new();
        let choices = select_choices("stranger", &state, &catalog(), VoiceThresholds::default());
        assert_eq!(ids(&choices), vec![LEAVE_CHOICE_ID]);
    }

    #[test]
    fn default_catalog_always_fits() {
        let state = GameState::new();
        for npc in hum_core::cast::NPC_IDS {
            let choices =
                select_choices(npc, &state, &ChoiceCatalog::default(), VoiceThresholds::default());
            assert!(choices.len() <= MAX_CHOICES + 1);
            assert!(choices.last().unwrap().is_leave());
        }
    }
}
