//! `hum apply`: one mutation, its events, and the save written back.

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use colored::Colorize;

use hum_core::{EventKind, GameEvent};
use hum_narrative::{DialogueReply, NarrativeEngine};

use crate::Action;

/// Load the save, perform `action`, print every emitted event, and save.
pub fn run(path: &Path, seed: u64, action: Action) -> Result<(), String> {
    let mut engine = super::load_engine(path, seed)?;

    let seen: Rc<RefCell<Vec<GameEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    engine.bus().on_any(move |event| {
        sink.borrow_mut().push(event.clone());
        Ok(())
    });

    perform(&mut engine, action)?;

    let events = seen.take();
    if events.is_empty() {
        println!("  {}", "(nothing happened)".dimmed());
    }
    for event in &events {
        println!("  {} {}", colorize_kind(event.kind), describe(event));
    }

    super::write_save(&mut engine, path)
}

fn perform(engine: &mut NarrativeEngine, action: Action) -> Result<(), String> {
    match action {
        Action::Move { location } => engine.move_player(&location),
        Action::Tension { delta, source } => engine.adjust_tension(delta, &source),
        Action::Relationship { npc, delta } => engine.adjust_relationship(&npc, delta),
        Action::Stress { npc, delta } => engine.adjust_npc_stress(&npc, delta),
        Action::Voice { voice, delta } => engine.adjust_voice_score(voice, delta),
        Action::Tremor { intensity } => engine.trigger_tremor(intensity),
        Action::Activity { delta } => engine.adjust_curie_activity(delta),
        Action::Flag { name } => {
            engine.set_flag(&name);
        }
        Action::Time { hours } => engine.advance_time(hours),
        Action::Gate { npc, force } => {
            let opened = if force {
                engine.unlock_gate(&npc)
            } else {
                engine.check_gate_unlock(&npc)
            };
            if !opened {
                println!("  {}", format!("{npc}'s next gate stays closed").yellow());
            }
        }
        Action::Act { act } => engine.transition_to_act(act),
        Action::LockEnding => engine.lock_ending(),
        Action::Talk { npc } => engine.start_conversation(&npc),
        Action::Choose { npc, choice } => {
            if !engine.apply_choice(&npc, &choice) {
                return Err(format!("'{choice}' is not a choice {npc} offers"));
            }
        }
        Action::Reply { npc, reply } => {
            let json = fs::read_to_string(&reply)
                .map_err(|e| format!("cannot read '{}': {e}", reply.display()))?;
            let reply: DialogueReply =
                serde_json::from_str(&json).map_err(|e| format!("invalid reply: {e}"))?;
            engine.handle_reply(&npc, &reply);
        }
        Action::QuestComplete { id } => {
            if !engine.complete_quest(&id) {
                return Err(format!("no active quest '{id}'"));
            }
        }
        Action::QuestFail { id } => {
            if !engine.fail_quest(&id) {
                return Err(format!("no active quest '{id}'"));
            }
        }
    }
    Ok(())
}

fn colorize_kind(kind: EventKind) -> colored::ColoredString {
    let label = format!("[{kind}]");
    match kind.domain() {
        "narrative" => label.magenta().bold(),
        "npc" => label.cyan(),
        "curie" | "environment" => label.red(),
        "quest" => label.green(),
        "flag" => label.yellow(),
        _ => label.dimmed(),
    }
}

/// The payload's fields as `key=value` pairs.
fn describe(event: &GameEvent) -> String {
    let Ok(value) = serde_json::to_value(&event.payload) else {
        return String::new();
    };
    let Some(fields) = value.get("data").and_then(|d| d.as_object()) else {
        return String::new();
    };
    fields
        .iter()
        .map(|(k, v)| match v.as_str() {
            Some(s) => format!("{k}={s}"),
            None => format!("{k}={v}"),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
