//! The built-in dialogue choice catalog.

use hum_core::cast::{CLINIC, ELSIE, HALE, JONAS, MINE_SHAFT, MIRA, TOM, WELL};
use hum_core::flags::{CURIE_SENSED, SHAFT_MENTIONED, VISITED_SHAFT, VISITED_WELL};
use hum_core::{TimeOfDay, Voice};

use super::model::{Choice, ChoiceEffect, ChoicePool};

/// All choices the selector draws from.
#[derive(Debug, Clone)]
pub struct ChoiceCatalog {
    choices: Vec<Choice>,
}

impl Default for ChoiceCatalog {
    fn default() -> Self {
        Self::new(default_choices())
    }
}

impl ChoiceCatalog {
    /// A catalog over the given choices.
    pub fn new(choices: Vec<Choice>) -> Self {
        Self { choices }
    }

    /// All choices in catalog order.
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// Look up a choice by id.
    pub fn find(&self, id: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id == id)
    }
}

fn story(min_gate: u8, requires: &[&str], excludes: &[&str]) -> ChoicePool {
    ChoicePool::Story {
        min_gate,
        requires: requires.iter().map(|s| s.to_string()).collect(),
        excludes: excludes.iter().map(|s| s.to_string()).collect(),
    }
}

fn band(min: i32, max: i32) -> ChoicePool {
    ChoicePool::Relationship { min, max }
}

fn situation(min_tension: i32, max_tension: i32) -> ChoicePool {
    ChoicePool::Situational {
        min_tension,
        max_tension,
        time_of_day: None,
        location: None,
    }
}

fn relationship(delta: i32) -> ChoiceEffect {
    ChoiceEffect::Relationship { delta }
}

fn stress(delta: i32) -> ChoiceEffect {
    ChoiceEffect::Stress { delta }
}

fn tension(delta: i32) -> ChoiceEffect {
    ChoiceEffect::Tension { delta }
}

fn voice(voice: Voice, delta: i32) -> ChoiceEffect {
    ChoiceEffect::Voice { voice, delta }
}

fn flag(flag: &str) -> ChoiceEffect {
    ChoiceEffect::SetFlag { flag: flag.into() }
}

fn default_choices() -> Vec<Choice> {
    vec![
        // Hale
        Choice::new("hale_symptoms", "Ask about the patients", story(0, &[], &[]))
            .for_npc(HALE)
            .with_priority(40)
            .with_effect(relationship(5))
            .with_effect(voice(Voice::Logic, 2)),
        Choice::new("hale_records", "Ask to see the clinic records", story(1, &[], &[]))
            .for_npc(HALE)
            .with_priority(60)
            .with_effect(relationship(3))
            .with_effect(flag("hale_records_seen")),
        Choice::new(
            "hale_shaft_cases",
            "Ask whether the sick worked the shaft",
            story(2, &[SHAFT_MENTIONED], &["hale_refused"]),
        )
        .for_npc(HALE)
        .with_priority(80)
        .with_effect(stress(8))
        .with_effect(tension(4)),
        Choice::new("hale_warm", "Thank her for her time", band(40, 100))
            .for_npc(HALE)
            .with_priority(20)
            .with_effect(relationship(4))
            .with_effect(voice(Voice::Empathy, 1)),
        Choice::new("hale_cold", "Press her for answers", band(0, 39))
            .for_npc(HALE)
            .with_priority(25)
            .with_effect(relationship(-5))
            .with_effect(stress(6)),
        // Mira
        Choice::new("mira_water", "Ask about the water", story(0, &[], &[]))
            .for_npc(MIRA)
            .with_priority(40)
            .with_effect(relationship(4))
            .with_effect(flag(SHAFT_MENTIONED)),
        Choice::new("mira_night_sounds", "Ask what she hears at night", story(1, &[], &[]))
            .for_npc(MIRA)
            .with_priority(60)
            .with_effect(stress(7))
            .with_effect(voice(Voice::Ghost, 2)),
        Choice::new(
            "mira_brother",
            "Ask about her brother",
            story(2, &[VISITED_WELL], &[]),
        )
        .for_npc(MIRA)
        .with_priority(80)
        .with_effect(relationship(6))
        .with_effect(stress(10)),
        Choice::new("mira_reassure", "Tell her the well is safe", band(0, 100))
            .for_npc(MIRA)
            .with_priority(15)
            .with_effect(stress(-6))
            .with_effect(voice(Voice::Empathy, 1)),
        // Tom
        Choice::new("tom_drink", "Buy him a drink", band(0, 50))
            .for_npc(TOM)
            .with_priority(30)
            .with_effect(relationship(6)),
        Choice::new("tom_old_days", "Ask about the mine's last year", story(0, &[], &[]))
            .for_npc(TOM)
            .with_priority(40)
            .with_effect(flag(SHAFT_MENTIONED))
            .with_effect(voice(Voice::Logic, 1)),
        Choice::new(
            "tom_collapse",
            "Ask what really happened in the collapse",
            story(2, &[SHAFT_MENTIONED], &[]),
        )
        .for_npc(TOM)
        .with_priority(80)
        .with_effect(stress(12))
        .with_effect(tension(5)),
        Choice::new(
            "tom_went_down",
            "Tell him you went down the shaft",
            story(1, &[VISITED_SHAFT], &[]),
        )
        .for_npc(TOM)
        .with_priority(70)
        .with_effect(relationship(5))
        .with_effect(voice(Voice::Instinct, 2)),
        // Jonas
        Choice::new("jonas_bells", "Ask why the bells were taken down", story(0, &[], &[]))
            .for_npc(JONAS)
            .with_priority(40)
            .with_effect(relationship(3)),
        Choice::new(
            "jonas_faith",
            "Ask what he thinks is under the town",
            story(1, &[CURIE_SENSED], &[]),
        )
        .for_npc(JONAS)
        .with_priority(70)
        .with_effect(voice(Voice::Ghost, 2))
        .with_effect(tension(3)),
        Choice::new("jonas_doubt", "Challenge his silence", band(0, 35))
            .for_npc(JONAS)
            .with_priority(25)
            .with_effect(relationship(-4))
            .with_effect(voice(Voice::Instinct, 1)),
        // Elsie
        Choice::new("elsie_song", "Ask about the song she hums", story(0, &[], &[]))
            .for_npc(ELSIE)
            .with_priority(40)
            .with_effect(relationship(4))
            .with_effect(ChoiceEffect::Resonance { delta: 0.05 }),
        Choice::new(
            "elsie_voice",
            "Ask who sings back",
            story(1, &[CURIE_SENSED], &[]),
        )
        .for_npc(ELSIE)
        .with_priority(75)
        .with_effect(voice(Voice::Ghost, 3))
        .with_effect(ChoiceEffect::Resonance { delta: 0.1 }),
        Choice::new("elsie_promise", "Promise to keep her safe", band(50, 100))
            .for_npc(ELSIE)
            .with_priority(35)
            .with_effect(relationship(5))
            .with_effect(voice(Voice::Empathy, 2)),
        // Anyone
        Choice::new("ask_about_hum", "Ask about the hum", situation(0, 100))
            .with_priority(10)
            .with_effect(flag(SHAFT_MENTIONED)),
        Choice::new("tremors_lately", "Mention the tremors", situation(50, 100))
            .with_priority(50)
            .with_effect(stress(5))
            .with_effect(tension(2)),
        Choice::new(
            "late_hour",
            "Ask why they are still awake",
            ChoicePool::Situational {
                min_tension: 0,
                max_tension: 100,
                time_of_day: Some(TimeOfDay::Night),
                location: None,
            },
        )
        .with_priority(45)
        .with_effect(stress(3)),
        Choice::new(
            "at_the_shaft",
            "Point at the shaft",
            ChoicePool::Situational {
                min_tension: 0,
                max_tension: 100,
                time_of_day: None,
                location: Some(MINE_SHAFT.into()),
            },
        )
        .with_priority(65)
        .with_effect(stress(8))
        .with_effect(tension(4)),
        Choice::new(
            "the_water_tastes",
            "Say the water tastes of iron",
            ChoicePool::Situational {
                min_tension: 20,
                max_tension: 100,
                time_of_day: None,
                location: Some(WELL.into()),
            },
        )
        .with_priority(55)
        .with_effect(voice(Voice::Instinct, 1)),
        Choice::new(
            "clinic_smell",
            "Ask about the smell of ozone",
            ChoicePool::Situational {
                min_tension: 30,
                max_tension: 100,
                time_of_day: None,
                location: Some(CLINIC.into()),
            },
        )
        .with_priority(55)
        .with_effect(voice(Voice::Logic, 1)),
        Choice::new("logic_reason", "Lay out the facts", ChoicePool::Voice { voice: Voice::Logic })
            .with_priority(30)
            .with_effect(voice(Voice::Logic, 2)),
        Choice::new(
            "instinct_push",
            "Trust your gut and push",
            ChoicePool::Voice {
                voice: Voice::Instinct,
            },
        )
        .with_priority(30)
        .with_effect(voice(Voice::Instinct, 2))
        .with_effect(tension(3)),
        Choice::new(
            "empathy_listen",
            "Just listen",
            ChoicePool::Voice {
                voice: Voice::Empathy,
            },
        )
        .with_priority(30)
        .with_effect(voice(Voice::Empathy, 2))
        .with_effect(relationship(2)),
        Choice::new(
            "ghost_hum_along",
            "Hum along with it",
            ChoicePool::Voice { voice: Voice::Ghost },
        )
        .with_priority(30)
        .with_effect(voice(Voice::Ghost, 2))
        .with_effect(ChoiceEffect::Resonance { delta: 0.05 }),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::choice::model::LEAVE_CHOICE_ID;

    #[test]
    fn ids_are_unique() {
        let catalog = ChoiceCatalog::default();
        let ids: HashSet<_> = catalog.choices().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), catalog.choices().len());
        assert!(!ids.contains(LEAVE_CHOICE_ID));
    }

    #[test]
    fn one_voice_choice_per_voice() {
        let catalog = ChoiceCatalog::default();
        for v in Voice::ALL {
            let count = catalog
                .choices()
                .iter()
                .filter(|c| c.pool == ChoicePool::Voice { voice: v })
                .count();
            assert_eq!(count, 1, "{v}");
        }
    }

    #[test]
    fn find_by_id() {
        let catalog = ChoiceCatalog::default();
        assert_eq!(catalog.find("tom_drink").unwrap().npc.as_deref(), Some(TOM));
        assert!(catalog.find("missing").is_none());
    }
}
