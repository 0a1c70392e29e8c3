use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use hum_core::{GameState, QuestArchetype};

use super::condition::{Condition, TriggerCategory};

fn default_once() -> bool {
    true
}

/// A declarative rule that starts a quest when all its conditions hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestTrigger {
    /// Trigger id; also the id of the quest it starts when `once`.
    pub id: String,
    /// Shape of the quest.
    pub archetype: QuestArchetype,
    /// All must hold.
    pub conditions: Vec<Condition>,
    /// Copied into the quest record for the host's content layer.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Fire at most once per game.
    #[serde(default = "default_once")]
    pub once: bool,
}

impl QuestTrigger {
    /// A once-only trigger with no conditions yet.
    pub fn new(id: impl Into<String>, archetype: QuestArchetype) -> Self {
        Self {
            id: id.into(),
            archetype,
            conditions: Vec::new(),
            context: BTreeMap::new(),
            once: true,
        }
    }

    /// Add a condition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Add a context entry.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Allow the trigger to fire again once its previous quest has ended.
    pub fn repeatable(mut self) -> Self {
        self.once = false;
        self
    }

    /// Whether every condition holds. Stops at the first that fails.
    pub fn matches(&self, state: &GameState) -> bool {
        self.conditions.iter().all(|c| c.evaluate(state))
    }

    /// Categories this trigger is indexed under.
    pub fn categories(&self) -> BTreeSet<TriggerCategory> {
        self.conditions.iter().filter_map(Condition::category).collect()
    }
}
