use std::collections::BTreeMap;

use hum_core::GameState;

use super::catalog::default_triggers;
use super::condition::TriggerCategory;
use super::trigger::QuestTrigger;

/// Indexes quest triggers by category and finds the ones ready to fire.
///
/// The matcher is read-only: it never touches the state. The engine starts
/// the quests and records fired ids in `quests.fired_triggers`.
#[derive(Debug, Clone)]
pub struct QuestMatcher {
    triggers: Vec<QuestTrigger>,
    index: BTreeMap<TriggerCategory, Vec<usize>>,
}

impl Default for QuestMatcher {
    fn default() -> Self {
        Self::new(default_triggers())
    }
}

impl QuestMatcher {
    /// Build a matcher over a trigger table.
    pub fn new(triggers: Vec<QuestTrigger>) -> Self {
        let mut index: BTreeMap<TriggerCategory, Vec<usize>> = BTreeMap::new();
        for (i, trigger) in triggers.iter().enumerate() {
            for category in trigger.categories() {
                index.entry(category).or_default().push(i);
            }
        }
        Self { triggers, index }
    }

    /// A matcher with no triggers.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// All triggers in table order.
    pub fn triggers(&self) -> &[QuestTrigger] {
        &self.triggers
    }

    /// Triggers indexed under a category.
    pub fn triggers_for(&self, category: TriggerCategory) -> impl Iterator<Item = &QuestTrigger> {
        self.index
            .get(&category)
            .into_iter()
            .flatten()
            .filter_map(|&i| self.triggers.get(i))
    }

    /// Triggers under `category` whose conditions hold and that may still
    /// fire: once-only triggers not yet fired, repeatable triggers with no
    /// quest of theirs still active.
    pub fn ready(&self, category: TriggerCategory, state: &GameState) -> Vec<&QuestTrigger> {
        self.triggers_for(category)
            .filter(|t| may_fire(t, state))
            .filter(|t| t.matches(state))
            .collect()
    }
}

fn may_fire(trigger: &QuestTrigger, state: &GameState) -> bool {
    if trigger.once {
        !state.quests.fired_triggers.contains(&trigger.id)
    } else {
        !state
            .quests
            .active
            .iter()
            .any(|q| q.trigger.as_deref() == Some(trigger.id.as_str()))
    }
}
