//! Tension, acts, voices, and the ending.

use tracing::debug;

use hum_core::flags::{self, ENDING_LOCKED};
use hum_core::state::{LAST_ACT, MAX_ACT_PROGRESS, MAX_TENSION};
use hum_core::{ActTrigger, EventPayload, Voice};

use super::NarrativeEngine;
use super::effects::Effect;
use crate::quest::TriggerCategory;
use crate::voice::ending_for;

/// A tension change smaller than or equal to this is not announced.
const TENSION_NOISE: i32 = 3;
/// Tension must exceed this (with `act1to2` armed) to enter act 2.
const ACT_2_TENSION: i32 = 35;
/// Tension must exceed this (with `act2to3` armed) to enter act 3.
const ACT_3_TENSION: i32 = 70;
/// Tension added on entering act 2.
const ACT_2_ENTRY_BONUS: i32 = 15;
/// Tension added on entering act 3.
const ACT_3_ENTRY_BONUS: i32 = 20;
/// Act progress awarded per completed quest.
pub(super) const QUEST_PROGRESS: u32 = 10;

impl NarrativeEngine {
    /// Change global tension, clamped to 0-100. `source` names the cause in
    /// the emitted event. Always queues an act transition check.
    pub fn adjust_tension(&mut self, delta: i32, source: &str) {
        self.mutate(|e| e.apply_tension(delta, source));
    }

    pub(super) fn apply_tension(&mut self, delta: i32, source: &str) {
        let old = self.state.narrative.tension;
        let new = old.saturating_add(delta).clamp(0, MAX_TENSION);
        self.state.narrative.tension = new;
        debug!(old, new, source, "tension");

        if delta.abs() > TENSION_NOISE {
            self.emit(EventPayload::TensionChange {
                old,
                new,
                delta: new - old,
                source: source.to_string(),
            });
        }
        self.enqueue(Effect::CheckActTransition);
        if new != old {
            self.enqueue(Effect::EvaluateQuests(TriggerCategory::TensionChange));
        }
    }

    /// Arm an act trigger. Announced the first time only.
    pub fn set_act_trigger(&mut self, trigger: ActTrigger) {
        self.mutate(|e| e.arm_act_trigger(trigger));
    }

    pub(super) fn arm_act_trigger(&mut self, trigger: ActTrigger) {
        if self.state.narrative.act_triggers.arm(trigger) {
            debug!(%trigger, "act trigger armed");
            self.emit(EventPayload::ActTrigger { trigger });
        }
        self.enqueue(Effect::CheckActTransition);
    }

    /// Move to the next act if its trigger is armed and tension is past its
    /// threshold. Idempotent: the act guard fails after the first move.
    pub fn check_act_transition(&mut self) {
        self.mutate(|e| e.run_act_check());
    }

    pub(super) fn run_act_check(&mut self) {
        let n = &self.state.narrative;
        let next = match n.current_act {
            1 if n.act_triggers.act1to2 && n.tension > ACT_2_TENSION => 2,
            2 if n.act_triggers.act2to3 && n.tension > ACT_3_TENSION => 3,
            _ => return,
        };
        self.enter_act(next);
    }

    /// Enter `act` directly. Acts only move forward and each is entered at
    /// most once; any other call is a no-op.
    pub fn transition_to_act(&mut self, act: u8) {
        self.mutate(|e| e.enter_act(act));
    }

    fn enter_act(&mut self, act: u8) {
        let from = self.state.narrative.current_act;
        let begun = flags::act_begun(act);
        if act <= from || act > LAST_ACT || self.state.has_flag(&begun) {
            debug!(from, act, "act transition refused");
            return;
        }

        let n = &mut self.state.narrative;
        n.current_act = act;
        n.act_progress = 0;
        let tension = n.tension;
        debug!(from, to = act, tension, "act transition");
        self.emit(EventPayload::ActTransition {
            from,
            to: act,
            tension,
        });
        self.insert_flag(begun);

        // The bonus is written directly so it does not loop back through
        // apply_tension; the recheck below is queued instead.
        let bonus = match act {
            2 => ACT_2_ENTRY_BONUS,
            3 => ACT_3_ENTRY_BONUS,
            _ => 0,
        };
        let n = &mut self.state.narrative;
        let old = n.tension;
        n.tension = old.saturating_add(bonus).clamp(0, MAX_TENSION);
        if act == LAST_ACT {
            n.point_of_no_return = true;
        }
        let new = n.tension;
        self.emit(EventPayload::TensionChange {
            old,
            new,
            delta: new - old,
            source: "act_entry".to_string(),
        });

        self.enqueue(Effect::CheckActTransition);
        self.enqueue_gate_checks();
        self.enqueue(Effect::EvaluateQuests(TriggerCategory::TensionChange));
    }

    /// Add progress within the current act, capped at 100.
    pub(super) fn add_act_progress(&mut self, amount: u32) {
        let n = &mut self.state.narrative;
        n.act_progress = n.act_progress.saturating_add(amount).min(MAX_ACT_PROGRESS);
    }

    /// Change a voice score and recompute the ending path unless it is locked.
    pub fn adjust_voice_score(&mut self, voice: Voice, delta: i32) {
        self.mutate(|e| e.apply_voice(voice, delta));
    }

    pub(super) fn apply_voice(&mut self, voice: Voice, delta: i32) {
        let score = self.state.player.voice_scores.add(voice, delta);
        debug!(%voice, delta, score, "voice");
        self.emit(EventPayload::VoiceChange {
            voice,
            delta,
            score,
        });
        self.recompute_ending();
    }

    fn recompute_ending(&mut self) {
        if self.state.narrative.ending_locked {
            return;
        }
        let to = ending_for(self.dominant_voice().voice);
        let from = self.state.narrative.ending_path;
        if from != Some(to) {
            self.state.narrative.ending_path = Some(to);
            debug!(?from, %to, "ending path");
            self.emit(EventPayload::EndingPathChange { from, to });
        }
    }

    /// Freeze the ending path. Computes it first if no voice has moved yet.
    /// A second call does nothing.
    pub fn lock_ending(&mut self) {
        self.mutate(|e| {
            if e.state.narrative.ending_locked {
                return;
            }
            e.recompute_ending();
            let path = ending_for(e.dominant_voice().voice);
            let path = e.state.narrative.ending_path.unwrap_or(path);
            e.state.narrative.ending_path = Some(path);
            e.state.narrative.ending_locked = true;
            debug!(%path, "ending locked");
            e.insert_flag(ENDING_LOCKED.to_string());
            e.emit(EventPayload::EndingLocked {
                path,
                voice_scores: e.state.player.voice_scores,
            });
        });
    }

    /// Record the tone the player opened the game with. Set once.
    pub fn set_initial_tone(&mut self, voice: Voice) {
        self.mutate(|e| {
            if e.state.player.initial_tone.is_some() {
                debug!(%voice, "initial tone already set");
                return;
            }
            e.state.player.initial_tone = Some(voice);
            e.emit(EventPayload::InitialTone { voice });
        });
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::test_support::*;
    use crate::{EngineConfig, NarrativeEngine};
    use hum_core::{ActTrigger, EndingPath, EventKind, EventPayload, TremorIntensity, Voice};

    #[test]
    fn tension_clamps_and_filters_noise() {
        let mut engine = NarrativeEngine::default();
        let events = record(&engine);
        engine.adjust_tension(3, "small");
        assert_eq!(engine.narrative().tension, 23);
        assert_eq!(count(&events, EventKind::TensionChange), 0);

        engine.adjust_tension(500, "huge");
        assert_eq!(engine.narrative().tension, 100);
        engine.adjust_tension(-500, "huge");
        assert_eq!(engine.narrative().tension, 0);
        assert_eq!(count(&events, EventKind::TensionChange), 2);
    }

    #[test]
    fn act_sequencing_from_tremor() {
        let mut engine = engine_with_manifestation(0.0);
        engine.trigger_tremor(TremorIntensity::Heavy);
        let n = engine.narrative();
        assert!(n.act_triggers.act1to2);
        assert_eq!(n.tension, 25);
        assert_eq!(n.current_act, 1);
        assert!((engine.state().curie.activity - 0.4).abs() < 1e-9);

        engine.adjust_tension(15, "x");
        let n = engine.narrative();
        assert_eq!(n.current_act, 2);
        assert_eq!(n.tension, 55);
        assert!(engine.has_flag("act_2_begun"));
    }

    #[test]
    fn armed_trigger_without_tension_waits() {
        let mut engine = NarrativeEngine::default();
        engine.set_act_trigger(ActTrigger::Act1To2);
        assert_eq!(engine.narrative().current_act, 1);
        engine.adjust_tension(16, "x");
        assert_eq!(engine.narrative().current_act, 2);
        assert_eq!(engine.narrative().tension, 51);
    }

    #[test]
    fn act_three_sets_point_of_no_return() {
        let mut engine = NarrativeEngine::default();
        let events = record(&engine);
        engine.set_act_trigger(ActTrigger::Act1To2);
        engine.set_act_trigger(ActTrigger::Act2To3);
        engine.adjust_tension(20, "x");
        // 40 -> act 2 (+15 = 55); 55 is not > 70.
        assert_eq!(engine.narrative().current_act, 2);
        engine.adjust_tension(16, "x");
        // 71 -> act 3 (+20 = 91).
        let n = engine.narrative();
        assert_eq!(n.current_act, 3);
        assert_eq!(n.tension, 91);
        assert!(n.point_of_no_return);
        assert_eq!(count(&events, EventKind::ActTransition), 2);
        assert_eq!(count(&events, EventKind::ActTrigger), 2);
    }

    #[test]
    fn act_trigger_announced_once() {
        let mut engine = NarrativeEngine::default();
        let events = record(&engine);
        engine.set_act_trigger(ActTrigger::Act1To2);
        engine.set_act_trigger(ActTrigger::Act1To2);
        assert_eq!(count(&events, EventKind::ActTrigger), 1);
    }

    #[test]
    fn direct_transition_only_moves_forward() {
        let mut engine = NarrativeEngine::default();
        engine.transition_to_act(2);
        assert_eq!(engine.narrative().current_act, 2);
        assert_eq!(engine.narrative().tension, 35);
        engine.transition_to_act(1);
        engine.transition_to_act(2);
        engine.transition_to_act(4);
        assert_eq!(engine.narrative().current_act, 2);
        assert_eq!(engine.narrative().tension, 35);
    }

    #[test]
    fn entry_bonus_event_carries_source() {
        let mut engine = NarrativeEngine::default();
        let events = record(&engine);
        engine.transition_to_act(2);
        let sources: Vec<String> = events
            .borrow()
            .iter()
            .filter_map(|e| match &e.payload {
                EventPayload::TensionChange { source, .. } => Some(source.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(sources, vec!["act_entry"]);
    }

    #[test]
    fn voice_changes_move_ending_until_locked() {
        let mut engine = NarrativeEngine::default();
        engine.adjust_voice_score(Voice::Empathy, 10);
        assert_eq!(engine.narrative().ending_path, Some(EndingPath::Humanized));

        engine.lock_ending();
        assert!(engine.narrative().ending_locked);
        assert!(engine.has_flag("ending_locked"));

        engine.adjust_voice_score(Voice::Ghost, 50);
        assert_eq!(engine.narrative().ending_path, Some(EndingPath::Humanized));
        assert_eq!(engine.state().player.voice_scores.ghost, 50);
    }

    #[test]
    fn lock_without_voices_is_balanced_and_once() {
        let mut engine = NarrativeEngine::default();
        let events = record(&engine);
        engine.lock_ending();
        engine.lock_ending();
        assert_eq!(engine.narrative().ending_path, Some(EndingPath::Balanced));
        assert_eq!(count(&events, EventKind::EndingLocked), 1);
    }

    #[test]
    fn ending_path_change_only_on_change() {
        let mut engine = NarrativeEngine::default();
        let events = record(&engine);
        engine.adjust_voice_score(Voice::Logic, 20);
        engine.adjust_voice_score(Voice::Logic, 5);
        assert_eq!(count(&events, EventKind::EndingPathChange), 1);
        assert_eq!(engine.narrative().ending_path, Some(EndingPath::Stability));
    }

    #[test]
    fn initial_tone_set_once() {
        let mut engine = NarrativeEngine::new(EngineConfig::default());
        engine.set_initial_tone(Voice::Ghost);
        engine.set_initial_tone(Voice::Logic);
        assert_eq!(engine.state().player.initial_tone, Some(Voice::Ghost));
    }
}
