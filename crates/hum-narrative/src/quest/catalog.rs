//! The built-in quest trigger table.

use hum_core::cast::{ELSIE, HALE, MINE_SHAFT, MIRA, TOM, WELL};
use hum_core::flags::VISITED_SHAFT;
use hum_core::{QuestArchetype, TimeOfDay};

use super::condition::Condition;
use super::trigger::QuestTrigger;

/// The eight quest triggers that ship with the game.
pub fn default_triggers() -> Vec<QuestTrigger> {
    vec![
        QuestTrigger::new("hale_house_call", QuestArchetype::Errand)
            .with_condition(Condition::NpcConversations {
                npc: HALE.into(),
                min: 2,
            })
            .with_condition(Condition::NpcRelationship {
                npc: HALE.into(),
                min: 30,
            })
            .with_context("npc", HALE),
        QuestTrigger::new("the_well_at_night", QuestArchetype::Investigation)
            .with_condition(Condition::Location {
                location: WELL.into(),
            })
            .with_condition(Condition::TimeOfDay {
                period: TimeOfDay::Night,
            })
            .with_context("location", WELL),
        QuestTrigger::new("shaft_echoes", QuestArchetype::Investigation)
            .with_condition(Condition::HasFlag {
                flag: VISITED_SHAFT.into(),
            })
            .with_condition(Condition::Location {
                location: MINE_SHAFT.into(),
            })
            .with_condition(Condition::MinTension { min: 40 })
            .with_context("location", MINE_SHAFT),
        QuestTrigger::new("mira_breaking_point", QuestArchetype::Rescue)
            .with_condition(Condition::NpcStress {
                npc: MIRA.into(),
                min: 75,
            })
            .with_context("npc", MIRA),
        QuestTrigger::new("second_morning", QuestArchetype::Vigil)
            .with_condition(Condition::Day { day: 2 })
            .with_condition(Condition::TimeOfDay {
                period: TimeOfDay::Morning,
            }),
        QuestTrigger::new("resonant_voice", QuestArchetype::Revelation)
            .with_condition(Condition::MinCurieActivity { min: 0.6 })
            .with_condition(Condition::MinResonance {
                npc: ELSIE.into(),
                min: 0.5,
            })
            .with_context("npc", ELSIE),
        QuestTrigger::new("confrontation_at_the_shaft", QuestArchetype::Confrontation)
            .with_condition(Condition::MinAct { min: 2 })
            .with_condition(Condition::Location {
                location: MINE_SHAFT.into(),
            })
            .with_condition(Condition::MinTension { min: 60 })
            .with_context("location", MINE_SHAFT),
        QuestTrigger::new("tom_old_secret", QuestArchetype::Revelation)
            .with_condition(Condition::NpcGate {
                npc: TOM.into(),
                min: 2,
            })
            .with_condition(Condition::NpcConversations {
                npc: TOM.into(),
                min: 3,
            })
            .with_context("npc", TOM),
    ]
}
