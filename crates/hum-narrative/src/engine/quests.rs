//! Quest lifecycle and trigger firing.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::{debug, warn};

use hum_core::flags;
use hum_core::state::{Quest, QuestStatus};
use hum_core::{EventPayload, QuestArchetype};

use super::NarrativeEngine;
use super::narrative::QUEST_PROGRESS;
use crate::quest::{QuestTrigger, TriggerCategory};

impl NarrativeEngine {
    /// Start a quest by hand. Refused if any quest list already holds `id`.
    pub fn start_quest(
        &mut self,
        id: &str,
        archetype: QuestArchetype,
        context: BTreeMap<String, String>,
    ) -> bool {
        self.mutate(|e| e.begin_quest(id.to_string(), archetype, context, None))
    }

    /// Move an active quest to the completed list. Completion adds act
    /// progress.
    pub fn complete_quest(&mut self, id: &str) -> bool {
        self.mutate(|e| e.finish_quest(id, true))
    }

    /// Move an active quest to the failed list.
    pub fn fail_quest(&mut self, id: &str) -> bool {
        self.mutate(|e| e.finish_quest(id, false))
    }

    pub(super) fn run_quest_triggers(&mut self, category: TriggerCategory) {
        let ready: Vec<QuestTrigger> = self
            .quests
            .ready(category, &self.state)
            .into_iter()
            .cloned()
            .collect();

        for trigger in ready {
            let id = if trigger.once {
                trigger.id.clone()
            } else {
                self.instance_id(&trigger.id)
            };
            debug!(trigger = %trigger.id, quest = %id, ?category, "quest trigger fired");
            let started =
                self.begin_quest(id, trigger.archetype, trigger.context, Some(trigger.id.clone()));
            if started && trigger.once {
                self.state.quests.fired_triggers.insert(trigger.id);
            }
        }
    }

    /// Next free id for a repeatable trigger: `{trigger}_{n}`.
    fn instance_id(&self, trigger: &str) -> String {
        let mut n = 1;
        loop {
            let id = format!("{trigger}_{n}");
            if self.state.quests.find(&id).is_none() {
                return id;
            }
            n += 1;
        }
    }

    fn begin_quest(
        &mut self,
        id: String,
        archetype: QuestArchetype,
        context: BTreeMap<String, String>,
        trigger: Option<String>,
    ) -> bool {
        let quest = Quest {
            id: id.clone(),
            archetype,
            context,
            status: QuestStatus::Active,
            trigger: trigger.clone(),
            day_started: self.state.time.day,
            started_at: Utc::now(),
            completed_at: None,
        };
        if !self.state.quests.begin(quest) {
            warn!(quest = %id, "quest already exists; not starting it again");
            return false;
        }
        self.emit(EventPayload::QuestStart {
            id: id.clone(),
            archetype,
            trigger,
        });
        self.insert_flag(flags::quest_started(&id));
        true
    }

    fn finish_quest(&mut self, id: &str, success: bool) -> bool {
        if self.state.quests.finish(id, success, Utc::now()).is_none() {
            warn!(quest = id, "no active quest with this id");
            return false;
        }
        debug!(quest = id, success, "quest finished");
        if success {
            self.emit(EventPayload::QuestComplete { id: id.to_string() });
            self.insert_flag(flags::quest_completed(id));
            self.add_act_progress(QUEST_PROGRESS);
        } else {
            self.emit(EventPayload::QuestFail { id: id.to_string() });
            self.insert_flag(flags::quest_failed(id));
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::NarrativeEngine;
    use crate::engine::test_support::*;
    use crate::quest::{Condition, QuestTrigger};
    use hum_core::cast::{CLINIC, HALE, MINE_SHAFT, MIRA, WELL};
    use hum_core::{EventKind, QuestArchetype};

    fn talk(engine: &mut NarrativeEngine, npc: &str) {
        engine.start_conversation(npc);
        engine.end_conversation(npc);
    }

    #[test]
    fn conversation_trigger_fires_once() {
        let mut engine = NarrativeEngine::default();
        let events = record(&engine);
        talk(&mut engine, HALE);
        assert!(engine.active_quests().is_empty());

        talk(&mut engine, HALE);
        assert_eq!(engine.active_quests().len(), 1);
        let quest = &engine.active_quests()[0];
        assert_eq!(quest.id, "hale_house_call");
        assert_eq!(quest.trigger.as_deref(), Some("hale_house_call"));
        assert_eq!(quest.context["npc"], HALE);
        assert!(engine.has_flag("quest_started_hale_house_call"));

        engine.complete_quest("hale_house_call");
        talk(&mut engine, HALE);
        assert!(engine.active_quests().is_empty());
        assert_eq!(count(&events, EventKind::QuestStart), 1);
    }

    #[test]
    fn stress_trigger_fires_through_relationship_category() {
        let mut engine = NarrativeEngine::default();
        engine.adjust_npc_stress(MIRA, 30);
        assert!(engine.state().quests.is_active("mira_breaking_point"));
    }

    #[test]
    fn completion_adds_progress_and_flag() {
        let mut engine = NarrativeEngine::default();
        assert!(engine.start_quest("errand", QuestArchetype::Errand, BTreeMap::new()));
        assert!(engine.complete_quest("errand"));
        assert_eq!(engine.narrative().act_progress, 10);
        assert!(engine.has_flag("quest_completed_errand"));
        assert!(engine.completed_quests()[0].completed_at.is_some());
        assert!(!engine.complete_quest("errand"));
    }

    #[test]
    fn failure_moves_quest_without_progress() {
        let mut engine = NarrativeEngine::default();
        let events = record(&engine);
        engine.start_quest("vigil", QuestArchetype::Vigil, BTreeMap::new());
        assert!(engine.fail_quest("vigil"));
        assert_eq!(engine.failed_quests().len(), 1);
        assert_eq!(engine.narrative().act_progress, 0);
        assert!(engine.has_flag("quest_failed_vigil"));
        assert_eq!(count(&events, EventKind::QuestFail), 1);
    }

    #[test]
    fn duplicate_start_is_refused() {
        let mut engine = NarrativeEngine::default();
        assert!(engine.start_quest("a", QuestArchetype::Errand, BTreeMap::new()));
        assert!(!engine.start_quest("a", QuestArchetype::Rescue, BTreeMap::new()));
        assert_eq!(engine.active_quests().len(), 1);
    }

    #[test]
    fn refused_trigger_is_not_used_up() {
        let mut engine = NarrativeEngine::default();
        let events = record(&engine);
        engine.start_quest("hale_house_call", QuestArchetype::Rescue, BTreeMap::new());
        talk(&mut engine, HALE);
        talk(&mut engine, HALE);
        assert!(!engine.state().quests.fired_triggers.contains("hale_house_call"));
        assert_eq!(engine.active_quests()[0].archetype, QuestArchetype::Rescue);
        assert_eq!(count(&events, EventKind::QuestStart), 1);
    }

    #[test]
    fn reaching_the_shaft_under_tension_starts_its_quest() {
        let mut engine = NarrativeEngine::default();
        engine.adjust_tension(20, "test");
        assert!(!engine.state().quests.is_active("shaft_echoes"));
        engine.move_player(MINE_SHAFT);
        assert!(engine.state().quests.is_active("shaft_echoes"));
        assert_eq!(engine.active_quests()[0].context["location"], MINE_SHAFT);
    }

    #[test]
    fn repeatable_trigger_waits_for_active_instance() {
        let trigger = QuestTrigger::new("well_watch", QuestArchetype::Vigil)
            .with_condition(Condition::Location {
                location: WELL.into(),
            })
            .repeatable();
        let mut engine = NarrativeEngine::default().with_quest_triggers(vec![trigger]);

        engine.move_player(WELL);
        assert_eq!(engine.active_quests()[0].id, "well_watch_1");
        engine.move_player(CLINIC);
        engine.move_player(WELL);
        assert_eq!(engine.active_quests().len(), 1);

        engine.complete_quest("well_watch_1");
        engine.move_player(CLINIC);
        engine.move_player(WELL);
        assert_eq!(engine.active_quests()[0].id, "well_watch_2");
    }
}
