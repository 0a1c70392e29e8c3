//! Subcommand implementations and the save-file plumbing they share.

pub mod apply;
/// `hum choices`.
pub mod choices;
/// `hum context`.
pub mod context;
pub mod events;
/// `hum new`.
pub mod new;
pub mod status;

use std::fs;
use std::path::Path;

use hum_core::HumError;
use hum_core::cast;
use hum_narrative::{EngineConfig, NarrativeEngine, SaveGame};

/// Seed for commands that only read the game.
const DEFAULT_SEED: u64 = 42;

/// Clap parser for NPC arguments; accepts any casing.
pub fn parse_npc(input: &str) -> Result<String, HumError> {
    cast::resolve_npc(input).map(str::to_string)
}

/// Clap parser for location arguments; accepts any casing.
pub fn parse_location(input: &str) -> Result<String, HumError> {
    cast::resolve_location(input).map(str::to_string)
}

/// Read a save file without starting an engine.
fn read_save(path: &Path) -> Result<SaveGame, String> {
    let json = fs::read_to_string(path)
        .map_err(|e| format!("cannot read '{}': {e}", path.display()))?;
    SaveGame::from_json(&json).map_err(|e| format!("cannot load '{}': {e}", path.display()))
}

/// Start an engine and load the save into it.
fn load_engine(path: &Path, seed: u64) -> Result<NarrativeEngine, String> {
    let save = read_save(path)?;
    let mut engine = NarrativeEngine::new(EngineConfig::default().with_seed(seed));
    engine
        .import_state(save)
        .map_err(|e| format!("cannot load '{}': {e}", path.display()))?;
    Ok(engine)
}

/// Snapshot the engine and write it to `path`.
fn write_save(engine: &mut NarrativeEngine, path: &Path) -> Result<(), String> {
    let json = engine
        .save_json()
        .map_err(|e| format!("cannot serialize game: {e}"))?;
    fs::write(path, json).map_err(|e| format!("cannot write '{}': {e}", path.display()))
}
