//! Player movement, the clock, the entity beneath the town, the physical
//! environment, and flags.

use chrono::Utc;
use rand::Rng;
use tracing::debug;

use hum_core::cast::{self, CLINIC, MINE_SHAFT, WELL};
use hum_core::flags::{VISITED_CLINIC, VISITED_SHAFT, VISITED_WELL};
use hum_core::state::TimeOfDay;
use hum_core::{ActTrigger, EventPayload, TremorIntensity, Weather};

use super::NarrativeEngine;
use super::effects::Effect;
use crate::quest::TriggerCategory;

/// Activity above this may manifest.
const MANIFESTATION_THRESHOLD: f64 = 0.7;
/// Manifestations needed (while in act 2) to arm `act2to3`.
const MANIFESTATIONS_FOR_ACT_3: u32 = 3;
/// Tension added by every tremor.
const TREMOR_TENSION: i32 = 5;
/// Tension added by every manifestation.
const MANIFESTATION_TENSION: i32 = 3;
/// A jump of more days than this only starts (and rerolls weather for) the
/// last ones.
const MAX_DAYS_ANNOUNCED: u32 = 7;
/// Activity added when an NPC brings up the shaft.
pub(super) const SHAFT_MENTION_ACTIVITY: f64 = 0.05;

fn tremor_activity(intensity: TremorIntensity) -> f64 {
    match intensity {
        TremorIntensity::Light => 0.05,
        TremorIntensity::Medium => 0.1,
        TremorIntensity::Heavy => 0.2,
    }
}

fn first_visit_flag(location: &str) -> Option<&'static str> {
    match location {
        MINE_SHAFT => Some(VISITED_SHAFT),
        WELL => Some(VISITED_WELL),
        CLINIC => Some(VISITED_CLINIC),
        _ => None,
    }
}

fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

impl NarrativeEngine {
    // ---- Flags ---------------------------------------------------------

    /// Set a flag. Returns `true` and emits `flag:set` only the first time.
    pub fn set_flag(&mut self, flag: &str) -> bool {
        self.mutate(|e| e.insert_flag(flag.to_string()))
    }

    pub(super) fn insert_flag(&mut self, flag: String) -> bool {
        if !self.state.flags.insert(flag.clone()) {
            return false;
        }
        debug!(%flag, "flag set");
        self.emit(EventPayload::FlagSet { flag });
        self.enqueue_gate_checks();
        true
    }

    // ---- Player --------------------------------------------------------

    /// Move the player. Recomputes the hum and marks first visits.
    pub fn move_player(&mut self, location: &str) {
        self.mutate(|e| {
            if !e.known_location(location, "move_player") {
                return;
            }
            if e.state.player.location == location {
                return;
            }
            let from = std::mem::replace(&mut e.state.player.location, location.to_string());
            e.state.player.previous_location = Some(from.clone());
            debug!(%from, to = location, "player moved");
            e.emit(EventPayload::PlayerLocationChange {
                from: Some(from),
                to: location.to_string(),
            });
            e.recompute_hum();
            if let Some(flag) = first_visit_flag(location) {
                e.insert_flag(flag.to_string());
            }
            e.enqueue(Effect::EvaluateQuests(TriggerCategory::LocationChange));
        });
    }

    /// `hum = 0.1 + activity * 0.5 + proximity * 0.3`.
    fn recompute_hum(&mut self) {
        let proximity = cast::proximity(&self.state.player.location).unwrap_or(0.0);
        let new = 0.1 + self.state.curie.activity * 0.5 + proximity * 0.3;
        let old = self.state.environment.hum_intensity;
        if (new - old).abs() > f64::EPSILON {
            self.state.environment.hum_intensity = new;
            self.emit(EventPayload::HumChange { old, new });
        }
    }

    // ---- Time ----------------------------------------------------------

    /// Advance the clock. Each new day rerolls the weather.
    pub fn advance_time(&mut self, hours: u32) {
        self.mutate(|e| {
            if hours == 0 {
                return;
            }
            let before = e.state.time.time_of_day;
            let time = &mut e.state.time;
            let start_day = time.day;
            let total = time.hour % 24 + hours % 24;
            time.hour = total % 24;
            time.day = start_day
                .saturating_add(hours / 24)
                .saturating_add(total / 24);
            time.time_of_day = TimeOfDay::from_hour(time.hour);
            let (day, hour, time_of_day) = (time.day, time.hour, time.time_of_day);
            debug!(hours, day, hour, %time_of_day, "time advanced");

            e.emit(EventPayload::TimeAdvance {
                hours,
                day,
                hour,
                time_of_day,
            });
            if time_of_day != before {
                e.emit(EventPayload::TimePeriodChange {
                    from: before,
                    to: time_of_day,
                });
            }
            let announced = (day - start_day).min(MAX_DAYS_ANNOUNCED);
            if day - start_day > announced {
                debug!(skipped = day - start_day - announced, "long jump; only the last days start");
            }
            for new_day in (day - announced + 1)..=day {
                e.emit(EventPayload::DayStart { day: new_day });
                e.reroll_weather();
            }
            e.enqueue(Effect::EvaluateQuests(TriggerCategory::TimeAdvance));
        });
    }

    fn reroll_weather(&mut self) {
        let to = Weather::ALL[self.rng.random_range(0..Weather::ALL.len())];
        let from = self.state.environment.weather;
        if to != from {
            self.state.environment.weather = to;
            self.emit(EventPayload::WeatherChange { from, to });
        }
    }

    // ---- Curie ---------------------------------------------------------

    /// Change the entity's activity, clamped to 0-1. Above 0.7 a
    /// manifestation may follow, rolled on the engine's RNG.
    pub fn adjust_curie_activity(&mut self, delta: f64) {
        self.mutate(|e| e.apply_activity(delta));
    }

    pub(super) fn apply_activity(&mut self, delta: f64) {
        if !self.finite_delta(delta, "adjust_curie_activity") {
            return;
        }
        let old = self.state.curie.activity;
        let new = clamp_unit(old + delta);
        self.state.curie.activity = new;
        if (new - old).abs() > f64::EPSILON {
            debug!(old, new, "curie activity");
            self.emit(EventPayload::CurieActivityChange { old, new });
            self.enqueue(Effect::EvaluateQuests(TriggerCategory::CurieChange));
        }
        self.recompute_hum();

        if new > MANIFESTATION_THRESHOLD {
            let chance = self.config.manifestation_probability();
            if self.rng.random_bool(chance) {
                self.manifest();
            }
        }
    }

    fn manifest(&mut self) {
        let curie = &mut self.state.curie;
        curie.manifestations += 1;
        let count = curie.manifestations;
        let activity = curie.activity;
        debug!(count, activity, "manifestation");
        self.emit(EventPayload::Manifestation {
            activity,
            count,
            location: self.state.player.location.clone(),
        });
        self.apply_tension(MANIFESTATION_TENSION, "manifestation");
        if self.state.narrative.current_act == 2 && count >= MANIFESTATIONS_FOR_ACT_3 {
            self.arm_act_trigger(ActTrigger::Act2To3);
        }
    }

    /// Change the entity's coherence, clamped to 0-1.
    pub fn adjust_curie_coherence(&mut self, delta: f64) {
        self.mutate(|e| {
            if !e.finite_delta(delta, "adjust_curie_coherence") {
                return;
            }
            let old = e.state.curie.coherence;
            let new = clamp_unit(old + delta);
            e.state.curie.coherence = new;
            if (new - old).abs() > f64::EPSILON {
                e.emit(EventPayload::CurieCoherenceChange { old, new });
            }
        });
    }

    /// Change how attuned the player is to the entity, clamped to 0-1.
    pub fn adjust_player_attunement(&mut self, delta: f64) {
        self.mutate(|e| e.apply_attunement(delta));
    }

    pub(super) fn apply_attunement(&mut self, delta: f64) {
        if !self.finite_delta(delta, "adjust_player_attunement") {
            return;
        }
        let old = self.state.curie.player_attunement;
        let new = clamp_unit(old + delta);
        self.state.curie.player_attunement = new;
        if (new - old).abs() > f64::EPSILON {
            self.emit(EventPayload::AttunementChange { old, new });
        }
    }

    /// Change an NPC's resonance with the entity, clamped to 0-1.
    pub fn adjust_resonance(&mut self, npc: &str, delta: f64) {
        self.mutate(|e| e.apply_resonance(npc, delta));
    }

    pub(super) fn apply_resonance(&mut self, npc: &str, delta: f64) {
        if !self.known_npc(npc, "adjust_resonance")
            || !self.finite_delta(delta, "adjust_resonance")
        {
            return;
        }
        let old = self.state.curie.resonance_of(npc);
        let new = clamp_unit(old + delta);
        self.state.curie.resonance.insert(npc.to_string(), new);
        if (new - old).abs() > f64::EPSILON {
            self.emit(EventPayload::ResonanceChange {
                npc: npc.to_string(),
                old,
                new,
            });
            self.enqueue(Effect::EvaluateQuests(TriggerCategory::CurieChange));
        }
    }

    // ---- Environment ---------------------------------------------------

    /// Shake the town. Raises activity by intensity and tension by 5; a heavy
    /// tremor in act 1 arms `act1to2`.
    pub fn trigger_tremor(&mut self, intensity: TremorIntensity) {
        self.mutate(|e| e.apply_tremor(intensity));
    }

    pub(super) fn apply_tremor(&mut self, intensity: TremorIntensity) {
        let env = &mut self.state.environment;
        env.tremor_count += 1;
        env.last_tremor = Some(Utc::now());
        let count = env.tremor_count;
        debug!(%intensity, count, "tremor");
        self.emit(EventPayload::Tremor { intensity, count });

        self.apply_activity(tremor_activity(intensity));
        self.apply_tension(TREMOR_TENSION, "tremor");
        if intensity == TremorIntensity::Heavy && self.state.narrative.current_act == 1 {
            self.arm_act_trigger(ActTrigger::Act1To2);
        }
    }
}
