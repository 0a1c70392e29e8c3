use std::path::Path;

/// Print the dialogue context for `npc` as pretty JSON.
pub fn run(path: &Path, npc: &str) -> Result<(), String> {
    let engine = super::load_engine(path, super::DEFAULT_SEED)?;
    let context = engine
        .dialogue_context(npc)
        .ok_or_else(|| format!("unknown npc '{npc}'"))?;
    let out = serde_json::to_string_pretty(&context).map_err(|e| e.to_string())?;
    println!("{out}");
    Ok(())
}
