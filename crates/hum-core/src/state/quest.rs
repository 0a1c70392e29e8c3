use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The shape of a quest, used by the presentation layer to pick content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestArchetype {
    /// Look into something.
    Investigation,
    /// Face someone or something.
    Confrontation,
    /// Get someone out of trouble.
    Rescue,
    /// Wait and watch.
    Vigil,
    /// Do something for someone.
    Errand,
    /// Learn a truth.
    Revelation,
}

impl QuestArchetype {
    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Investigation => "investigation",
            Self::Confrontation => "confrontation",
            Self::Rescue => "rescue",
            Self::Vigil => "vigil",
            Self::Errand => "errand",
            Self::Revelation => "revelation",
        }
    }
}

impl fmt::Display for QuestArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which list a quest lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    /// In progress.
    Active,
    /// Finished successfully.
    Completed,
    /// Finished unsuccessfully.
    Failed,
}

/// A quest instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    /// Quest id; for triggered quests, the trigger id.
    pub id: String,
    /// Archetype.
    pub archetype: QuestArchetype,
    /// Free-form context handed to the content layer (npc, location, ...).
    pub context: BTreeMap<String, String>,
    /// Current status; always matches the list holding the quest.
    pub status: QuestStatus,
    /// Trigger that spawned the quest, if any.
    pub trigger: Option<String>,
    /// Game day on which the quest started.
    pub day_started: u32,
    /// When the quest started.
    pub started_at: DateTime<Utc>,
    /// When the quest left the active list.
    pub completed_at: Option<DateTime<Utc>>,
}

/// All quests, partitioned by status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestState {
    /// Quests in progress.
    pub active: Vec<Quest>,
    /// Quests finished successfully.
    pub completed: Vec<Quest>,
    /// Quests finished unsuccessfully.
    pub failed: Vec<Quest>,
    /// Once-only trigger ids that have already fired.
    #[serde(default)]
    pub fired_triggers: BTreeSet<String>,
}

impl QuestState {
    /// Find a quest in any list.
    pub fn find(&self, id: &str) -> Option<&Quest> {
        self.active
            .iter()
            .chain(&self.completed)
            .chain(&self.failed)
            .find(|q| q.id == id)
    }

    /// Whether a quest with this id is in progress.
    pub fn is_active(&self, id: &str) -> bool {
        self.active.iter().any(|q| q.id == id)
    }

    /// Add a quest to the active list. Refused (returns `false`) if any list
    /// already holds the id.
    pub fn begin(&mut self, mut quest: Quest) -> bool {
        if self.find(&quest.id).is_some() {
            return false;
        }
        quest.status = QuestStatus::Active;
        quest.completed_at = None;
        self.active.push(quest);
        true
    }

    /// Move an active quest to `completed` or `failed`, stamping it with `at`.
    /// Returns the moved quest, or `None` if no active quest has this id.
    pub fn finish(&mut self, id: &str, success: bool, at: DateTime<Utc>) -> Option<&Quest> {
        let index = self.active.iter().position(|q| q.id == id)?;
        let mut quest = self.active.remove(index);
        quest.completed_at = Some(at);
        let target = if success {
            quest.status = QuestStatus::Completed;
            &mut self.completed
        } else {
            quest.status = QuestStatus::Failed;
            &mut self.failed
        };
        target.push(quest);
        target.last()
    }

    /// Total quests across all lists.
    pub fn total(&self) -> usize {
        self.active.len() + self.completed.len() + self.failed.len()
    }
}
