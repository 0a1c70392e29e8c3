use serde::{Deserialize, Serialize};

use hum_core::{GameState, TimeOfDay, Voice};

/// Id of the terminal choice that ends a conversation.
pub const LEAVE_CHOICE_ID: &str = "leave";

/// The pool a choice belongs to, with the eligibility rule of that pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "pool", rename_all = "snake_case")]
pub enum ChoicePool {
    /// Backstory beats, unlocked by the NPC's gate and story flags.
    Story {
        /// Minimum gate of the NPC.
        min_gate: u8,
        /// Flags that must be set.
        #[serde(default)]
        requires: Vec<String>,
        /// Flags that must not be set.
        #[serde(default)]
        excludes: Vec<String>,
    },
    /// Offered within a relationship band.
    Relationship {
        /// Minimum relationship (inclusive).
        min: i32,
        /// Maximum relationship (inclusive).
        max: i32,
    },
    /// Offered by circumstance.
    Situational {
        /// Minimum tension (inclusive).
        min_tension: i32,
        /// Maximum tension (inclusive).
        max_tension: i32,
        /// Only at this time of day.
        #[serde(default)]
        time_of_day: Option<TimeOfDay>,
        /// Only at this location.
        #[serde(default)]
        location: Option<String>,
    },
    /// Aligned with one of the player's voices.
    Voice {
        /// The voice this choice speaks with.
        voice: Voice,
    },
    /// The terminal "leave" choice.
    Leave,
}

/// A state change declared on a choice, applied through the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChoiceEffect {
    /// Change the relationship with the NPC being spoken to.
    Relationship {
        /// Amount.
        delta: i32,
    },
    /// Change the stress of the NPC being spoken to.
    Stress {
        /// Amount.
        delta: i32,
    },
    /// Change global tension.
    Tension {
        /// Amount.
        delta: i32,
    },
    /// Change a voice score.
    Voice {
        /// Voice.
        voice: Voice,
        /// Amount.
        delta: i32,
    },
    /// Set a flag.
    SetFlag {
        /// Flag name.
        flag: String,
    },
    /// Change the resonance of the NPC being spoken to.
    Resonance {
        /// Amount.
        delta: f64,
    },
}

/// One dialogue option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// Unique id; applying the choice sets `chose_{id}`.
    pub id: String,
    /// Restrict to one NPC; `None` offers it to everyone.
    #[serde(default)]
    pub npc: Option<String>,
    /// Short label for the host's content layer.
    pub label: String,
    /// Pool and eligibility rule.
    #[serde(flatten)]
    pub pool: ChoicePool,
    /// Higher sorts first.
    #[serde(default)]
    pub priority: i32,
    /// Effects applied when chosen.
    #[serde(default)]
    pub effects: Vec<ChoiceEffect>,
}

impl Choice {
    /// A choice with no effects and priority 0.
    pub fn new(id: impl Into<String>, label: impl Into<String>, pool: ChoicePool) -> Self {
        Self {
            id: id.into(),
            npc: None,
            label: label.into(),
            pool,
            priority: 0,
            effects: Vec::new(),
        }
    }

    /// The terminal choice. Always listed last.
    pub fn leave() -> Self {
        Self::new(LEAVE_CHOICE_ID, "Leave", ChoicePool::Leave).with_priority(i32::MIN)
    }

    /// Restrict to one NPC.
    pub fn for_npc(mut self, npc: impl Into<String>) -> Self {
        self.npc = Some(npc.into());
        self
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Add an effect.
    pub fn with_effect(mut self, effect: ChoiceEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Whether this is the terminal leave choice.
    pub fn is_leave(&self) -> bool {
        matches!(self.pool, ChoicePool::Leave)
    }

    /// Whether the choice is offered to `npc`.
    pub fn offered_to(&self, npc: &str) -> bool {
        self.npc.as_deref().is_none_or(|n| n == npc)
    }

    /// Whether the pool rule holds for `npc` in `state`. Voice choices are
    /// filtered by the selector, not here.
    pub fn is_eligible(&self, npc: &str, state: &GameState) -> bool {
        let Some(npc_state) = state.npc(npc) else {
            return false;
        };
        match &self.pool {
            ChoicePool::Story {
                min_gate,
                requires,
                excludes,
            } => {
                npc_state.current_gate >= *min_gate
                    && requires.iter().all(|f| state.has_flag(f))
                    && !excludes.iter().any(|f| state.has_flag(f))
            }
            ChoicePool::Relationship { min, max } => {
                (*min..=*max).contains(&npc_state.relationship)
            }
            ChoicePool::Situational {
                min_tension,
                max_tension,
                time_of_day,
                location,
            } => {
                (*min_tension..=*max_tension).contains(&state.narrative.tension)
                    && time_of_day.is_none_or(|t| t == state.time.time_of_day)
                    && location
                        .as_deref()
                        .is_none_or(|l| l == state.player.location)
            }
            ChoicePool::Voice { .. } | ChoicePool::Leave => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hum_core::cast::{HALE, MIRA, WELL};

    #[test]
    fn story_requires_and_excludes() {
        let mut state = GameState::new();
        let choice = Choice::new(
            "ask_about_shaft",
            "Ask about the shaft",
            ChoicePool::Story {
                min_gate: 1,
                requires: vec!["shaft_mentioned".into()],
                excludes: vec!["hale_refused".into()],
            },
        );
        assert!(!choice.is_eligible(HALE, &state));
        state.npc_mut(HALE).unwrap().current_gate = 1;
        assert!(!choice.is_eligible(HALE, &state));
        state.flags.insert("shaft_mentioned");
        assert!(choice.is_eligible(HALE, &state));
        state.flags.insert("hale_refused");
        assert!(!choice.is_eligible(HALE, &state));
    }

    #[test]
    fn situational_bounds() {
        let mut state = GameState::new();
        let choice = Choice::new(
            "calm_down",
            "Calm down",
            ChoicePool::Situational {
                min_tension: 30,
                max_tension: 60,
                time_of_day: None,
                location: Some(WELL.into()),
            },
        );
        state.narrative.tension = 30;
        assert!(!choice.is_eligible(MIRA, &state));
        state.player.location = WELL.into();
        assert!(choice.is_eligible(MIRA, &state));
        state.narrative.tension = 61;
        assert!(!choice.is_eligible(MIRA, &state));
    }

    #[test]
    fn npc_restriction() {
        let choice = Choice::new("c", "C", ChoicePool::Leave).for_npc(HALE);
        assert!(choice.offered_to(HALE));
        assert!(!choice.offered_to(MIRA));
        assert!(Choice::leave().offered_to(MIRA));
    }

    #[test]
    fn json_shape_is_flat() {
        let choice: Choice = serde_json::from_str(
            r#"{"id":"x","label":"X","pool":"relationship","min":0,"max":40,
                "effects":[{"type":"tension","delta":2}]}"#,
        )
        .unwrap();
        assert_eq!(choice.pool, ChoicePool::Relationship { min: 0, max: 40 });
        assert_eq!(choice.effects, vec![ChoiceEffect::Tension { delta: 2 }]);
        assert_eq!(choice.priority, 0);
    }
}
