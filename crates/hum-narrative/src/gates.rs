//! Revelation gate eligibility.
//!
//! Each NPC has four gates. Gate `n` may open once the NPC sits at gate
//! `n - 1` and every requirement of its rule holds.

use hum_core::GameState;
use hum_core::cast::{ELSIE, HALE, JONAS, MIRA, TOM};

/// Requirements for one gate of one NPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateRule {
    /// NPC id.
    pub npc: &'static str,
    /// Gate this rule opens (1-4).
    pub gate: u8,
    /// Minimum relationship with the player.
    pub min_relationship: i32,
    /// Minimum global tension.
    pub min_tension: i32,
    /// Minimum act.
    pub min_act: u8,
    /// Flags that must all be set.
    pub required_flags: &'static [&'static str],
}

impl GateRule {
    /// Whether the state satisfies this rule.
    pub fn is_satisfied(&self, state: &GameState) -> bool {
        let Some(npc) = state.npc(self.npc) else {
            return false;
        };
        npc.relationship >= self.min_relationship
            && state.narrative.tension >= self.min_tension
            && state.narrative.current_act >= self.min_act
            && self.required_flags.iter().all(|f| state.has_flag(f))
    }
}

const fn rule(
    npc: &'static str,
    gate: u8,
    min_relationship: i32,
    min_tension: i32,
    min_act: u8,
    required_flags: &'static [&'static str],
) -> GateRule {
    GateRule {
        npc,
        gate,
        min_relationship,
        min_tension,
        min_act,
        required_flags,
    }
}

/// The full gate table.
pub const GATE_RULES: [GateRule; 20] = [
    rule(HALE, 1, 35, 0, 1, &["met_hale"]),
    rule(HALE, 2, 45, 0, 1, &["met_hale", "visited_clinic"]),
    rule(HALE, 3, 60, 40, 2, &[]),
    rule(HALE, 4, 75, 60, 3, &["visited_shaft"]),
    rule(MIRA, 1, 30, 0, 1, &["met_mira"]),
    rule(MIRA, 2, 40, 0, 1, &["visited_well"]),
    rule(MIRA, 3, 55, 45, 2, &["shaft_mentioned"]),
    rule(MIRA, 4, 70, 65, 3, &[]),
    rule(TOM, 1, 25, 0, 1, &["met_tom"]),
    rule(TOM, 2, 40, 30, 1, &["shaft_mentioned"]),
    rule(TOM, 3, 55, 50, 2, &["visited_shaft"]),
    rule(TOM, 4, 70, 70, 3, &[]),
    rule(JONAS, 1, 30, 0, 1, &["met_jonas"]),
    rule(JONAS, 2, 45, 0, 2, &[]),
    rule(JONAS, 3, 60, 50, 2, &["curie_sensed"]),
    rule(JONAS, 4, 75, 70, 3, &[]),
    rule(ELSIE, 1, 45, 0, 1, &["met_elsie"]),
    rule(ELSIE, 2, 50, 0, 1, &["curie_sensed"]),
    rule(ELSIE, 3, 60, 40, 2, &[]),
    rule(ELSIE, 4, 70, 60, 3, &["visited_shaft"]),
];

/// The rule that opens `gate` for `npc`.
pub fn rule_for(npc: &str, gate: u8) -> Option<&'static GateRule> {
    GATE_RULES.iter().find(|r| r.npc == npc && r.gate == gate)
}
