//! Relationship, stress, gates, and conversations.

use tracing::debug;

use hum_core::EventPayload;
use hum_core::flags;
use hum_core::state::{MAX_GATE, MAX_SCALAR};

use super::NarrativeEngine;
use super::effects::Effect;
use crate::gates;
use crate::quest::TriggerCategory;

/// A stress change smaller than or equal to this is not announced.
const STRESS_NOISE: i32 = 5;
/// Stress above this queues the critical check.
const STRESS_WATCH: i32 = 80;
/// Stress above this is a crisis.
const STRESS_CRITICAL: i32 = 90;

impl NarrativeEngine {
    /// Change an NPC's relationship with the player, clamped to 0-100.
    pub fn adjust_relationship(&mut self, npc: &str, delta: i32) {
        self.mutate(|e| e.apply_relationship(npc, delta));
    }

    pub(super) fn apply_relationship(&mut self, npc: &str, delta: i32) {
        if !self.known_npc(npc, "adjust_relationship") {
            return;
        }
        let Some(state) = self.state.npc_mut(npc) else {
            return;
        };
        let old = state.relationship;
        let new = old.saturating_add(delta).clamp(0, MAX_SCALAR);
        state.relationship = new;

        if new != old {
            debug!(npc, old, new, "relationship");
            self.emit(EventPayload::RelationshipChange {
                npc: npc.to_string(),
                old,
                new,
                delta: new - old,
            });
            self.enqueue(Effect::EvaluateQuests(TriggerCategory::RelationshipChange));
        }
        self.enqueue(Effect::CheckGate(npc.to_string()));
    }

    /// Change an NPC's stress, clamped to 0-100. Only changes larger than 5
    /// are announced; stress above 80 queues the crisis check.
    pub fn adjust_npc_stress(&mut self, npc: &str, delta: i32) {
        self.mutate(|e| e.apply_stress(npc, delta));
    }

    pub(super) fn apply_stress(&mut self, npc: &str, delta: i32) {
        if !self.known_npc(npc, "adjust_npc_stress") {
            return;
        }
        let Some(state) = self.state.npc_mut(npc) else {
            return;
        };
        let old = state.stress;
        let new = old.saturating_add(delta).clamp(0, MAX_SCALAR);
        state.stress = new;
        debug!(npc, old, new, "stress");

        if delta.abs() > STRESS_NOISE {
            self.emit(EventPayload::StressChange {
                npc: npc.to_string(),
                old,
                new,
                delta: new - old,
            });
        }
        if new > STRESS_WATCH {
            self.enqueue(Effect::CheckStressCritical(npc.to_string()));
        }
        if new != old {
            self.enqueue(Effect::EvaluateQuests(TriggerCategory::RelationshipChange));
        }
    }

    pub(super) fn run_stress_critical(&mut self, npc: &str) {
        let Some(stress) = self.state.npc(npc).map(|n| n.stress) else {
            return;
        };
        if stress <= STRESS_CRITICAL {
            return;
        }
        let flag = flags::stress_critical(npc);
        if self.state.has_flag(&flag) {
            return;
        }
        debug!(npc, stress, "stress critical");
        self.emit(EventPayload::StressCritical {
            npc: npc.to_string(),
            stress,
        });
        self.insert_flag(flag);
    }

    /// Open the NPC's next gate regardless of the gate rules. No-op at gate 4.
    pub fn unlock_gate(&mut self, npc: &str) -> bool {
        self.mutate(|e| e.known_npc(npc, "unlock_gate") && e.raise_gate(npc, true))
    }

    /// Open the NPC's next gate if the gate rules allow it. Returns whether
    /// a gate opened.
    pub fn check_gate_unlock(&mut self, npc: &str) -> bool {
        self.mutate(|e| e.known_npc(npc, "check_gate_unlock") && e.run_gate_check(npc))
    }

    pub(super) fn run_gate_check(&mut self, npc: &str) -> bool {
        let Some(current) = self.state.npc(npc).map(|n| n.current_gate) else {
            return false;
        };
        if current >= MAX_GATE {
            return false;
        }
        let eligible = gates::rule_for(npc, current + 1).is_some_and(|r| r.is_satisfied(&self.state));
        if !eligible {
            return false;
        }
        let opened = self.raise_gate(npc, false);
        if opened {
            // The next gate may already be eligible too.
            self.enqueue(Effect::CheckGate(npc.to_string()));
        }
        opened
    }

    fn raise_gate(&mut self, npc: &str, forced: bool) -> bool {
        let Some(state) = self.state.npc_mut(npc) else {
            return false;
        };
        if state.current_gate >= MAX_GATE {
            debug!(npc, "already at the last gate");
            return false;
        }
        state.current_gate += 1;
        let gate = state.current_gate;
        debug!(npc, gate, forced, "gate unlocked");
        self.emit(EventPayload::GateUnlock {
            npc: npc.to_string(),
            gate,
            forced,
        });
        self.insert_flag(flags::gate(npc, gate));
        self.enqueue(Effect::EvaluateQuests(TriggerCategory::RelationshipChange));
        true
    }

    /// Begin talking to an NPC. The first conversation marks them met.
    pub fn start_conversation(&mut self, npc: &str) {
        self.mutate(|e| {
            if !e.known_npc(npc, "start_conversation") {
                return;
            }
            let Some(state) = e.state.npc_mut(npc) else {
                return;
            };
            let first = !state.met;
            state.met = true;
            if first {
                e.emit(EventPayload::NpcMet {
                    npc: npc.to_string(),
                });
                e.insert_flag(flags::met(npc));
            }
            e.emit(EventPayload::DialogueStart {
                npc: npc.to_string(),
            });
        });
    }

    /// Finish talking to an NPC.
    pub fn end_conversation(&mut self, npc: &str) {
        self.mutate(|e| {
            if !e.known_npc(npc, "end_conversation") {
                return;
            }
            let Some(state) = e.state.npc_mut(npc) else {
                return;
            };
            state.conversation_count += 1;
            let conversation_count = state.conversation_count;
            e.emit(EventPayload::DialogueEnd {
                npc: npc.to_string(),
                conversation_count,
            });
            e.enqueue(Effect::EvaluateQuests(TriggerCategory::DialogueEnd));
        });
    }

    /// Move an NPC to another location.
    pub fn move_npc(&mut self, npc: &str, location: &str) {
        self.mutate(|e| {
            if !e.known_npc(npc, "move_npc") || !e.known_location(location, "move_npc") {
                return;
            }
            let Some(state) = e.state.npc_mut(npc) else {
                return;
            };
            if state.location == location {
                return;
            }
            let from = std::mem::replace(&mut state.location, location.to_string());
            e.emit(EventPayload::NpcLocationChange {
                npc: npc.to_string(),
                from,
                to: location.to_string(),
            });
        });
    }

    /// Record how an NPC's story ended.
    pub fn set_npc_outcome(&mut self, npc: &str, outcome: &str) {
        self.mutate(|e| {
            if !e.known_npc(npc, "set_npc_outcome") {
                return;
            }
            let Some(state) = e.state.npc_mut(npc) else {
                return;
            };
            state.outcome = Some(outcome.to_string());
            e.emit(EventPayload::NpcOutcome {
                npc: npc.to_string(),
                outcome: outcome.to_string(),
            });
        });
    }
}
