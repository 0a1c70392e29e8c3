//! Export and import of save snapshots.

use std::time::Instant;

use tracing::info;

use hum_core::EventPayload;

use super::NarrativeEngine;
use crate::error::SaveResult;
use crate::save::SaveGame;

impl NarrativeEngine {
    /// Snapshot the game. Emits `game:saved` before the snapshot is taken, so
    /// the save's own event log records it.
    pub fn export_state(&mut self) -> SaveGame {
        let play_time = self.play_time();
        self.emit(EventPayload::GameSaved { play_time });
        SaveGame::new(self.state.clone(), play_time)
    }

    /// Replace the game with a snapshot. Subscriptions, configuration, and
    /// the rule tables are kept. On error the current game is untouched.
    pub fn import_state(&mut self, save: SaveGame) -> SaveResult<()> {
        save.check_version()?;
        let SaveGame { meta, mut state } = save;
        state.event_log.set_capacity(self.config.event_log_capacity);

        info!(
            version = %meta.version,
            session = %state.session_id,
            play_time = meta.play_time,
            "loading save"
        );
        self.state = state;
        self.pending.clear();
        self.play_time_base = meta.play_time;
        self.session_start = Instant::now();
        self.emit(EventPayload::GameLoaded {
            version: meta.version,
        });
        Ok(())
    }

    /// Snapshot the game as JSON.
    pub fn save_json(&mut self) -> SaveResult<String> {
        self.export_state().to_json()
    }

    /// Replace the game with a JSON snapshot.
    pub fn load_json(&mut self, json: &str) -> SaveResult<()> {
        let save = SaveGame::from_json(json)?;
        self.import_state(save)
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::test_support::*;
    use crate::error::SaveError;
    use crate::{EngineConfig, NarrativeEngine};
    use hum_core::cast::{MINE_SHAFT, TOM};
    use hum_core::{EventKind, TremorIntensity, Voice};

    fn played_engine() -> NarrativeEngine {
        let mut engine = NarrativeEngine::default();
        engine.start_conversation(TOM);
        engine.adjust_relationship(TOM, 12);
        engine.move_player(MINE_SHAFT);
        engine.trigger_tremor(TremorIntensity::Heavy);
        engine.adjust_voice_score(Voice::Ghost, 4);
        engine.advance_time(5);
        engine
    }

    #[test]
    fn export_then_import_restores_state() {
        let mut engine = played_engine();
        let save = engine.export_state();
        let snapshot = engine.state().clone();

        let mut other = NarrativeEngine::default();
        other.import_state(save).unwrap();
        assert_eq!(other.state().npcs, snapshot.npcs);
        assert_eq!(other.state().narrative, snapshot.narrative);
        assert_eq!(other.state().flags, snapshot.flags);
        assert_eq!(other.state().session_id, snapshot.session_id);
        assert_eq!(other.event_log().of_kind(EventKind::GameSaved).len(), 1);
    }

    #[test]
    fn play_time_carries_over() {
        let mut engine = NarrativeEngine::default();
        let mut save = engine.export_state();
        save.meta.play_time = 3_600;
        engine.import_state(save).unwrap();
        assert!(engine.play_time() >= 3_600);

        let again = engine.export_state();
        assert!(again.meta.play_time >= 3_600);
    }

    #[test]
    fn json_helpers_round_trip() {
        let mut engine = played_engine();
        let json = engine.save_json().unwrap();
        let mut other = NarrativeEngine::default();
        let events = record(&other);
        other.load_json(&json).unwrap();
        assert_eq!(other.npc(TOM), engine.npc(TOM));
        assert_eq!(count(&events, EventKind::GameLoaded), 1);
    }

    #[test]
    fn incompatible_save_leaves_game_untouched() {
        let mut engine = played_engine();
        let mut save = engine.export_state();
        save.meta.version = "0.9.0".into();

        let mut other = NarrativeEngine::default();
        let before = other.state().clone();
        let err = other.import_state(save).unwrap_err();
        assert!(matches!(err, SaveError::IncompatibleVersion { .. }));
        assert_eq!(other.state(), &before);
    }

    #[test]
    fn import_applies_configured_log_capacity() {
        let mut engine = played_engine();
        let save = engine.export_state();
        let mut other = NarrativeEngine::new(EngineConfig::default().with_event_log_capacity(3));
        other.import_state(save).unwrap();
        assert_eq!(other.event_log().capacity(), 3);
        assert!(other.event_log().len() <= 3);
    }
}
