use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use hum_narrative::{ChoiceEffect, ChoicePool};

/// Print the choices `npc` offers in the saved game.
pub fn run(path: &Path, npc: &str) -> Result<(), String> {
    let engine = super::load_engine(path, super::DEFAULT_SEED)?;
    let choices = engine.available_choices(npc);

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Choice", "Label", "Pool", "Effects"]);

    for choice in &choices {
        let effects = choice
            .effects
            .iter()
            .map(effect_label)
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            choice.id.clone(),
            choice.label.clone(),
            pool_label(&choice.pool).to_string(),
            if effects.is_empty() { "-".to_string() } else { effects },
        ]);
    }

    println!("{table}");
    Ok(())
}

fn pool_label(pool: &ChoicePool) -> &'static str {
    match pool {
        ChoicePool::Story { .. } => "story",
        ChoicePool::Relationship { .. } => "relationship",
        ChoicePool::Situational { .. } => "situational",
        ChoicePool::Voice { .. } => "voice",
        ChoicePool::Leave => "leave",
    }
}

fn effect_label(effect: &ChoiceEffect) -> String {
    match effect {
        ChoiceEffect::Relationship { delta } => format!("relationship {delta:+}"),
        ChoiceEffect::Stress { delta } => format!("stress {delta:+}"),
        ChoiceEffect::Tension { delta } => format!("tension {delta:+}"),
        ChoiceEffect::Voice { voice, delta } => format!("{voice} {delta:+}"),
        ChoiceEffect::SetFlag { flag } => format!("flag {flag}"),
        ChoiceEffect::Resonance { delta } => format!("resonance {delta:+.2}"),
    }
}
