//! Write-once narrative flags.
//!
//! A flag records that a discrete story beat happened. Flags are never
//! cleared during a game; re-adding one is a no-op. Fixed flags are
//! constants here, per-entity flags are built by the helper functions so the
//! naming scheme lives in one place.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Set on the first visit to the mine shaft.
pub const VISITED_SHAFT: &str = "visited_shaft";
/// Set on the first visit to the well.
pub const VISITED_WELL: &str = "visited_well";
/// Set on the first visit to the clinic.
pub const VISITED_CLINIC: &str = "visited_clinic";
/// Set when any NPC brings up the shaft in conversation.
pub const SHAFT_MENTIONED: &str = "shaft_mentioned";
/// Set when an NPC tells the player they sense the entity.
pub const CURIE_SENSED: &str = "curie_sensed";
/// Set when the ending is locked.
pub const ENDING_LOCKED: &str = "ending_locked";

/// Flag set when act `n` begins.
pub fn act_begun(act: u8) -> String {
    format!("act_{act}_begun")
}

/// Flag set when `npc` reaches gate `gate`.
pub fn gate(npc: &str, gate: u8) -> String {
    format!("{npc}_gate_{gate}")
}

/// Flag set the first time the player meets `npc`.
pub fn met(npc: &str) -> String {
    format!("met_{npc}")
}

/// Flag set when `npc` first crosses the critical stress line.
pub fn stress_critical(npc: &str) -> String {
    format!("{npc}_stress_critical")
}

/// Flag set when a quest starts.
pub fn quest_started(id: &str) -> String {
    format!("quest_started_{id}")
}

/// Flag set when a quest completes.
pub fn quest_completed(id: &str) -> String {
    format!("quest_completed_{id}")
}

/// Flag set when a quest fails.
pub fn quest_failed(id: &str) -> String {
    format!("quest_failed_{id}")
}

/// Flag set when the player picks a dialogue choice.
pub fn chose(choice_id: &str) -> String {
    format!("chose_{choice_id}")
}

/// An ordered set of flag tokens. Serializes as a JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagSet {
    flags: BTreeSet<String>,
}

impl FlagSet {
    /// Create an empty flag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a flag. Returns `true` only on first insertion.
    pub fn insert(&mut self, flag: impl Into<String>) -> bool {
        self.flags.insert(flag.into())
    }

    /// Whether the flag has been set.
    pub fn contains(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// Number of flags set.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether no flags are set.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Iterate flags in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for FlagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            flags: iter.into_iter().map(Into::into).collect(),
        }
    }
}
