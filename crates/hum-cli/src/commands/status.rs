//! `hum status`: a summary of a saved game.

use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use hum_core::{GameState, Quest};
use hum_narrative::{SaveGame, VoiceThresholds, dominant_voice};

/// Print the save as a summary, as raw JSON, or as one dotted-path value.
pub fn run(path: &Path, json: bool, get: Option<&str>) -> Result<(), String> {
    let save = super::read_save(path)?;

    if let Some(dotted) = get {
        let value = save
            .state
            .get(dotted)
            .ok_or_else(|| format!("no value at '{dotted}'"))?;
        println!("{value}");
        return Ok(());
    }

    if json {
        let out = serde_json::to_string_pretty(&save.state).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    print_summary(&save);
    print_npcs(&save.state);
    print_quests(&save.state);
    Ok(())
}

fn print_summary(save: &SaveGame) {
    let s = &save.state;
    let lean = dominant_voice(&s.player.voice_scores, VoiceThresholds::default());
    let ending = match (s.narrative.ending_path, s.narrative.ending_locked) {
        (Some(path), true) => format!("{path} (locked)"),
        (Some(path), false) => path.to_string(),
        (None, _) => "undecided".to_string(),
    };

    println!(
        "  {} {}",
        "Hum".bold(),
        format!("(save {}, {}s played)", save.meta.version, save.meta.play_time).dimmed()
    );
    println!(
        "  Day {}, {:02}:00 ({}) | {} | hum {:.2}",
        s.time.day, s.time.hour, s.time.time_of_day, s.environment.weather, s.environment.hum_intensity
    );
    println!(
        "  Act {} | Tension {} | Progress {}",
        s.narrative.current_act, s.narrative.tension, s.narrative.act_progress
    );
    println!("  Player at {} | Voice {} ({})", s.player.location, lean.voice, lean.confidence);
    println!("  Ending: {ending}");
    println!(
        "  Curie: activity {:.2}, coherence {:.2}, attunement {:.2}, {} manifestations",
        s.curie.activity, s.curie.coherence, s.curie.player_attunement, s.curie.manifestations
    );
    println!("  {} flags set", s.flags.len());
    println!();
}

fn print_npcs(state: &GameState) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["NPC", "Location", "Rel", "Stress", "Gate", "Talks", "Resonance"]);

    for (id, npc) in &state.npcs {
        let name = if npc.met { id.clone() } else { format!("{id} (unmet)") };
        table.add_row(vec![
            name,
            npc.location.clone(),
            npc.relationship.to_string(),
            npc.stress.to_string(),
            npc.current_gate.to_string(),
            npc.conversation_count.to_string(),
            format!("{:.2}", state.curie.resonance_of(id)),
        ]);
    }

    println!("{table}");
    println!();
}

fn print_quests(state: &GameState) {
    let q = &state.quests;
    if q.total() == 0 {
        println!("  No quests yet.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Quest", "Archetype", "Status", "Day"]);

    let rows = q
        .active
        .iter()
        .map(|quest| (quest, "active".yellow()))
        .chain(q.completed.iter().map(|quest| (quest, "completed".green())))
        .chain(q.failed.iter().map(|quest| (quest, "failed".red())));
    for (quest, status) in rows {
        add_quest_row(&mut table, quest, &status.to_string());
    }

    println!("{table}");
}

fn add_quest_row(table: &mut Table, quest: &Quest, status: &str) {
    table.add_row(vec![
        quest.id.clone(),
        quest.archetype.to_string(),
        status.to_string(),
        quest.day_started.to_string(),
    ]);
}
