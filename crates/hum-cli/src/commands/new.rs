use std::path::Path;

use colored::Colorize;

use hum_narrative::{EngineConfig, NarrativeEngine};

/// Write a fresh game to `path`, refusing to overwrite unless `force`.
pub fn run(path: &Path, seed: u64, force: bool) -> Result<(), String> {
    if path.exists() && !force {
        return Err(format!(
            "'{}' already exists (use --force to overwrite)",
            path.display()
        ));
    }

    let mut engine = NarrativeEngine::new(EngineConfig::default().with_seed(seed));
    super::write_save(&mut engine, path)?;

    let state = engine.state();
    println!("  {} new game in {}", "Started".green().bold(), path.display());
    println!(
        "  Day {}, {:02}:00 ({}) | Act {} | Tension {}",
        state.time.day,
        state.time.hour,
        state.time.time_of_day,
        state.narrative.current_act,
        state.narrative.tension
    );
    println!("  Session {}", state.session_id.to_string().dimmed());
    Ok(())
}
