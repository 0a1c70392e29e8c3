use std::fmt;

use serde::{Deserialize, Serialize};

/// First act.
pub const FIRST_ACT: u8 = 1;
/// Final act.
pub const LAST_ACT: u8 = 3;
/// Upper bound of the tension scalar.
pub const MAX_TENSION: i32 = 100;
/// Upper bound of act progress.
pub const MAX_ACT_PROGRESS: u32 = 100;

/// One of the scripted one-shot conditions for leaving an act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActTrigger {
    /// Arms the transition from act 1 to act 2.
    #[serde(rename = "act1to2")]
    Act1To2,
    /// Arms the transition from act 2 to act 3.
    #[serde(rename = "act2to3")]
    Act2To3,
}

impl ActTrigger {
    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Act1To2 => "act1to2",
            Self::Act2To3 => "act2to3",
        }
    }
}

impl fmt::Display for ActTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The armed/unarmed state of both act triggers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActTriggers {
    /// Act 1 to 2 armed.
    pub act1to2: bool,
    /// Act 2 to 3 armed.
    pub act2to3: bool,
}

impl ActTriggers {
    /// Whether `trigger` is armed.
    pub fn is_set(&self, trigger: ActTrigger) -> bool {
        match trigger {
            ActTrigger::Act1To2 => self.act1to2,
            ActTrigger::Act2To3 => self.act2to3,
        }
    }

    /// Arm `trigger`. Returns `true` if it was not armed before.
    pub fn arm(&mut self, trigger: ActTrigger) -> bool {
        let slot = match trigger {
            ActTrigger::Act1To2 => &mut self.act1to2,
            ActTrigger::Act2To3 => &mut self.act2to3,
        };
        let was = *slot;
        *slot = true;
        !was
    }
}

/// The ending the story is heading toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndingPath {
    /// The shaft is sealed and the town endures.
    Stability,
    /// The entity is provoked.
    Escalation,
    /// The town's people come first.
    Humanized,
    /// The player goes below.
    Transcendence,
    /// No voice won out.
    Balanced,
}

impl EndingPath {
    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stability => "stability",
            Self::Escalation => "escalation",
            Self::Humanized => "humanized",
            Self::Transcendence => "transcendence",
            Self::Balanced => "balanced",
        }
    }
}

impl fmt::Display for EndingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Story-level progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeState {
    /// 1-3; only ever increases.
    pub current_act: u8,
    /// 0-100.
    pub tension: i32,
    /// Scripted conditions for leaving acts 1 and 2.
    pub act_triggers: ActTriggers,
    /// Current ending projection; frozen once `ending_locked` is set.
    pub ending_path: Option<EndingPath>,
    /// Whether the ending can still change.
    pub ending_locked: bool,
    /// Set on entering the final act.
    pub point_of_no_return: bool,
    /// 0-100; reset on every act transition.
    #[serde(default)]
    pub act_progress: u32,
}

impl Default for NarrativeState {
    fn default() -> Self {
        Self {
            current_act: FIRST_ACT,
            tension: 20,
            act_triggers: ActTriggers::default(),
            ending_path: None,
            ending_locked: false,
            point_of_no_return: false,
            act_progress: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arm_reports_first_time_only() {
        let mut triggers = ActTriggers::default();
        assert!(triggers.arm(ActTrigger::Act1To2));
        assert!(!triggers.arm(ActTrigger::Act1To2));
        assert!(triggers.is_set(ActTrigger::Act1To2));
        assert!(!triggers.is_set(ActTrigger::Act2To3));
    }

    #[test]
    fn trigger_wire_names() {
        let json = serde_json::to_string(&ActTriggers {
            act1to2: true,
            act2to3: false,
        })
        .unwrap();
        assert_eq!(json, r#"{"act1to2":true,"act2to3":false}"#);
        assert_eq!(
            serde_json::to_string(&ActTrigger::Act2To3).unwrap(),
            r#""act2to3""#
        );
    }
}
