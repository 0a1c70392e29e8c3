//! The rule engine.
//!
//! Mutators are grouped by domain in the submodules. Each one follows the
//! same shape: ignore unknown ids with a warning, clamp the input, write the
//! state, emit an event, and push the rule checks that depend on the change
//! onto the effect queue. [`NarrativeEngine::mutate`] drains the queue when
//! the outermost mutator finishes, so mutators called from a check only
//! enqueue.

mod choices;
mod dialogue;
mod effects;
mod narrative;
mod npc;
mod persist;
mod quests;
mod world;

use std::collections::VecDeque;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{trace, warn};

use hum_core::cast::{self, NPC_IDS};
use hum_core::state::{EventLog, LoggedEvent, NarrativeState, NpcState, Quest, TimeState};
use hum_core::{EventBus, EventPayload, GameEvent, GameState};

use crate::choice::ChoiceCatalog;
use crate::config::EngineConfig;
use crate::quest::{QuestMatcher, QuestTrigger};
use crate::voice::{DominantVoice, dominant_voice};

use effects::Effect;

/// Owns the game state and enforces the narrative rules on every change.
pub struct NarrativeEngine {
    state: GameState,
    bus: EventBus,
    config: EngineConfig,
    rng: StdRng,
    quests: QuestMatcher,
    choices: ChoiceCatalog,
    pending: VecDeque<Effect>,
    depth: u32,
    draining: bool,
    session_start: Instant,
    play_time_base: u64,
}

impl std::fmt::Debug for NarrativeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NarrativeEngine")
            .field("session_id", &self.state.session_id)
            .field("act", &self.state.narrative.current_act)
            .field("tension", &self.state.narrative.tension)
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl Default for NarrativeEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl NarrativeEngine {
    /// A new game with the built-in quest triggers and choice catalog.
    pub fn new(config: EngineConfig) -> Self {
        let mut state = GameState::new();
        state.event_log = EventLog::with_capacity(config.event_log_capacity);
        Self {
            state,
            bus: EventBus::with_history_capacity(config.history_capacity),
            rng: StdRng::seed_from_u64(config.seed),
            config,
            quests: QuestMatcher::default(),
            choices: ChoiceCatalog::default(),
            pending: VecDeque::new(),
            depth: 0,
            draining: false,
            session_start: Instant::now(),
            play_time_base: 0,
        }
    }

    /// Replace the random source used for weather and manifestation rolls.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Replace the quest trigger table.
    pub fn with_quest_triggers(mut self, triggers: Vec<QuestTrigger>) -> Self {
        self.quests = QuestMatcher::new(triggers);
        self
    }

    /// Replace the dialogue choice catalog.
    pub fn with_choice_catalog(mut self, catalog: ChoiceCatalog) -> Self {
        self.choices = catalog;
        self
    }

    /// Start a new game, keeping configuration, tables, and subscriptions.
    pub fn reset(&mut self) {
        let mut state = GameState::new();
        state.event_log = EventLog::with_capacity(self.config.event_log_capacity);
        self.state = state;
        self.pending.clear();
        self.session_start = Instant::now();
        self.play_time_base = 0;
        self.emit(EventPayload::GameReset);
    }

    // ---- Queries -------------------------------------------------------

    /// The whole state tree.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The event bus. Clone it to subscribe.
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The quest trigger table.
    pub fn quest_matcher(&self) -> &QuestMatcher {
        &self.quests
    }

    /// The dialogue choice catalog.
    pub fn choice_catalog(&self) -> &ChoiceCatalog {
        &self.choices
    }

    /// State of one NPC.
    pub fn npc(&self, id: &str) -> Option<&NpcState> {
        self.state.npc(id)
    }

    /// Whether a flag is set.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.state.has_flag(flag)
    }

    /// The in-game clock.
    pub fn time(&self) -> &TimeState {
        &self.state.time
    }

    /// Story-level progress.
    pub fn narrative(&self) -> &NarrativeState {
        &self.state.narrative
    }

    /// Quests in progress.
    pub fn active_quests(&self) -> &[Quest] {
        &self.state.quests.active
    }

    /// Quests finished successfully.
    pub fn completed_quests(&self) -> &[Quest] {
        &self.state.quests.completed
    }

    /// Quests that failed.
    pub fn failed_quests(&self) -> &[Quest] {
        &self.state.quests.failed
    }

    /// The persisted event log.
    pub fn event_log(&self) -> &EventLog {
        &self.state.event_log
    }

    /// The player's current lean.
    pub fn dominant_voice(&self) -> DominantVoice {
        dominant_voice(
            &self.state.player.voice_scores,
            self.config.voice_thresholds,
        )
    }

    /// Dotted-path lookup into the state tree, for consoles and debugging.
    pub fn get(&self, path: &str) -> Option<serde_json::Value> {
        self.state.get(path)
    }

    /// Seconds played: the total carried in from the loaded save plus the
    /// time since this session started.
    pub fn play_time(&self) -> u64 {
        self.play_time_base + self.session_start.elapsed().as_secs()
    }

    // ---- Plumbing ------------------------------------------------------

    /// Publish on the bus and append to the persisted log.
    fn emit(&mut self, payload: EventPayload) -> GameEvent {
        let event = self.bus.emit(payload);
        self.state.event_log.push(LoggedEvent::from_event(
            &event,
            self.state.time.day,
            self.state.narrative.current_act,
        ));
        event
    }

    /// Run a mutation. The outermost call drains the effect queue afterward.
    fn mutate<R>(&mut self, op: impl FnOnce(&mut Self) -> R) -> R {
        self.depth += 1;
        let out = op(self);
        self.depth -= 1;
        if self.depth == 0 && !self.draining {
            self.drain_effects();
        }
        out
    }

    fn enqueue(&mut self, effect: Effect) {
        if !self.pending.contains(&effect) {
            self.pending.push_back(effect);
        }
    }

    fn enqueue_gate_checks(&mut self) {
        for npc in NPC_IDS {
            self.enqueue(Effect::CheckGate(npc.to_string()));
        }
    }

    /// Run queued checks until none are left or the iteration cap is hit.
    fn drain_effects(&mut self) {
        self.draining = true;
        let mut steps = 0;
        while let Some(effect) = self.pending.pop_front() {
            if steps >= self.config.max_effect_iterations {
                warn!(
                    dropped = self.pending.len() + 1,
                    cap = self.config.max_effect_iterations,
                    "effect queue did not settle; dropping remaining effects"
                );
                self.pending.clear();
                break;
            }
            steps += 1;
            trace!(?effect, "run effect");
            self.run_effect(effect);
        }
        self.draining = false;
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::CheckActTransition => self.run_act_check(),
            Effect::CheckGate(npc) => {
                self.run_gate_check(&npc);
            }
            Effect::CheckStressCritical(npc) => self.run_stress_critical(&npc),
            Effect::EvaluateQuests(category) => self.run_quest_triggers(category),
        }
    }

    fn known_npc(&self, npc: &str, op: &'static str) -> bool {
        if self.state.npcs.contains_key(npc) {
            true
        } else {
            warn!(npc, op, "unknown npc; ignoring");
            false
        }
    }

    fn finite_delta(&self, delta: f64, op: &'static str) -> bool {
        if delta.is_finite() {
            true
        } else {
            warn!(delta, op, "non-finite delta; ignoring");
            false
        }
    }

    fn known_location(&self, location: &str, op: &'static str) -> bool {
        if cast::is_location(location) {
            true
        } else {
            warn!(location, op, "unknown location; ignoring");
            false
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::cell::RefCell;
    use std::rc::Rc;

    use hum_core::{EventKind, GameEvent};

    use super::*;

    /// An engine whose manifestation roll always succeeds (or never does).
    pub fn engine_with_manifestation(chance: f64) -> NarrativeEngine {
        NarrativeEngine::new(EngineConfig::default().with_manifestation_chance(chance))
    }

    /// Record every event emitted on the bus.
    pub fn record(engine: &NarrativeEngine) -> Rc<RefCell<Vec<GameEvent>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        engine.bus().on_any(move |e| {
            sink.borrow_mut().push(e.clone());
            Ok(())
        });
        seen
    }

    pub fn count(events: &Rc<RefCell<Vec<GameEvent>>>, kind: EventKind) -> usize {
        events.borrow().iter().filter(|e| e.kind == kind).count()
    }
}
