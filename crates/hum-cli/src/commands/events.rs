//! `hum events`: the tail of the persisted event log.

use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use hum_core::EventKind;

/// Print the last `limit` logged events, optionally of one kind.
pub fn run(path: &Path, kind: Option<EventKind>, limit: usize) -> Result<(), String> {
    let save = super::read_save(path)?;
    let log = &save.state.event_log;

    let mut entries: Vec<_> = log
        .iter()
        .filter(|e| kind.is_none_or(|k| e.kind == k))
        .collect();
    let skip = entries.len().saturating_sub(limit);
    entries.drain(..skip);

    if entries.is_empty() {
        println!("  No events logged.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Day", "Act", "Event", "NPC"]);
    for entry in &entries {
        table.add_row(vec![
            entry.day.to_string(),
            entry.act.to_string(),
            entry.kind.to_string(),
            entry.payload.npc().unwrap_or("-").to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} of {} events", entries.len(), log.len());
    Ok(())
}
