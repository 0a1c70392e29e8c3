//! Integration tests for the hum CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn hum() -> Command {
    Command::cargo_bin("hum").unwrap()
}

/// Create a temp directory holding a fresh save.
fn new_game() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let save = dir.path().join("game.json");
    hum().arg("new").arg(&save).assert().success();
    (dir, save)
}

fn apply(save: &Path, args: &[&str]) -> assert_cmd::assert::Assert {
    hum().arg("apply").arg(save).args(args).assert()
}

// ---------------------------------------------------------------------------
// new
// ---------------------------------------------------------------------------

#[test]
fn new_writes_a_versioned_save() {
    let dir = TempDir::new().unwrap();
    let save = dir.path().join("game.json");
    hum()
        .arg("new")
        .arg(&save)
        .assert()
        .success()
        .stdout(predicate::str::contains("new game"));

    let json = fs::read_to_string(&save).unwrap();
    assert!(json.contains("\"version\": \"1.1.0\""));
}

#[test]
fn new_refuses_to_overwrite() {
    let (_dir, save) = new_game();
    hum()
        .arg("new")
        .arg(&save)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    hum().arg("new").arg(&save).arg("--force").assert().success();
}

// ---------------------------------------------------------------------------
// status
// ---------------------------------------------------------------------------

#[test]
fn status_shows_summary_and_cast() {
    let (_dir, save) = new_game();
    hum()
        .arg("status")
        .arg(&save)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Act 1")
                .and(predicate::str::contains("Tension 20"))
                .and(predicate::str::contains("hale"))
                .and(predicate::str::contains("No quests yet")),
        );
}

#[test]
fn status_get_reads_a_path() {
    let (_dir, save) = new_game();
    hum()
        .args(["status", "--get", "npcs.mira.relationship"])
        .arg(&save)
        .assert()
        .success()
        .stdout("25\n");
}

#[test]
fn status_fails_on_missing_file() {
    let dir = TempDir::new().unwrap();
    hum()
        .arg("status")
        .arg(dir.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn status_rejects_incompatible_save() {
    let (_dir, save) = new_game();
    let json = fs::read_to_string(&save)
        .unwrap()
        .replace("\"version\": \"1.1.0\"", "\"version\": \"2.0.0\"");
    fs::write(&save, json).unwrap();

    hum()
        .arg("status")
        .arg(&save)
        .assert()
        .failure()
        .stderr(predicate::str::contains("incompatible save version"));
}

// ---------------------------------------------------------------------------
// apply
// ---------------------------------------------------------------------------

#[test]
fn apply_tension_persists() {
    let (_dir, save) = new_game();
    apply(&save, &["tension", "10"])
        .success()
        .stdout(predicate::str::contains("narrative:tension_change"));

    hum()
        .args(["status", "--get", "narrative.tension"])
        .arg(&save)
        .assert()
        .success()
        .stdout("30\n");
}

#[test]
fn apply_accepts_negative_deltas() {
    let (_dir, save) = new_game();
    apply(&save, &["stress", "mira", "-20"]).success();
    hum()
        .args(["status", "--get", "npcs.mira.stress"])
        .arg(&save)
        .assert()
        .success()
        .stdout("25\n");
}

#[test]
fn heavy_tremor_then_tension_enters_act_two() {
    let (_dir, save) = new_game();
    apply(&save, &["tremor", "heavy"])
        .success()
        .stdout(predicate::str::contains("narrative:act_trigger"));
    apply(&save, &["tension", "15"])
        .success()
        .stdout(predicate::str::contains("narrative:act_transition"));

    hum()
        .args(["status", "--get", "narrative.tension"])
        .arg(&save)
        .assert()
        .success()
        .stdout("55\n");
}

#[test]
fn nan_activity_leaves_a_loadable_save() {
    let (_dir, save) = new_game();
    apply(&save, &["activity", "NaN"]).success();
    hum()
        .args(["status", "--get", "curie.activity"])
        .arg(&save)
        .assert()
        .success()
        .stdout("0.2\n");
}

#[test]
fn huge_time_jump_does_not_crash() {
    let (_dir, save) = new_game();
    apply(&save, &["time", "4294967295"]).success();
    hum()
        .args(["status", "--get", "time.hour"])
        .arg(&save)
        .assert()
        .success()
        .stdout("23\n");
}

#[test]
fn forced_gate_unlock() {
    let (_dir, save) = new_game();
    apply(&save, &["gate", "tom", "--force"])
        .success()
        .stdout(predicate::str::contains("npc:gate_unlock"));
    apply(&save, &["gate", "tom"])
        .success()
        .stdout(predicate::str::contains("stays closed"));
}

#[test]
fn unknown_npc_is_rejected_by_the_parser() {
    let (_dir, save) = new_game();
    apply(&save, &["relationship", "nobody", "5"])
        .failure()
        .stderr(predicate::str::contains("unknown npc"));
}

#[test]
fn talking_twice_to_hale_starts_a_quest() {
    let (_dir, save) = new_game();
    for _ in 0..2 {
        apply(&save, &["talk", "hale"]).success();
        apply(&save, &["choose", "hale", "leave"]).success();
    }
    hum()
        .arg("status")
        .arg(&save)
        .assert()
        .success()
        .stdout(predicate::str::contains("hale_house_call"));

    apply(&save, &["quest-complete", "hale_house_call"])
        .success()
        .stdout(predicate::str::contains("quest:complete"));
    apply(&save, &["quest-complete", "hale_house_call"])
        .failure()
        .stderr(predicate::str::contains("no active quest"));
}

#[test]
fn choose_rejects_foreign_choice() {
    let (_dir, save) = new_game();
    apply(&save, &["choose", "mira", "hale_symptoms"])
        .failure()
        .stderr(predicate::str::contains("not a choice"));
}

#[test]
fn reply_file_is_applied() {
    let (dir, save) = new_game();
    let reply = dir.path().join("reply.json");
    fs::write(
        &reply,
        r#"{"response": "Don't go near the shaft.", "triggers": [{"type": "shaft_mentioned"}, {"type": "humming"}]}"#,
    )
    .unwrap();

    hum()
        .arg("apply")
        .arg(&save)
        .args(["reply", "tom"])
        .arg(&reply)
        .assert()
        .success()
        .stdout(predicate::str::contains("dialogue:trigger"));
    hum()
        .args(["status", "--get", "flags"])
        .arg(&save)
        .assert()
        .success()
        .stdout(predicate::str::contains("shaft_mentioned"));
}

// ---------------------------------------------------------------------------
// choices / context / events
// ---------------------------------------------------------------------------

#[test]
fn choices_end_with_leave() {
    let (_dir, save) = new_game();
    hum()
        .args(["choices"])
        .arg(&save)
        .arg("HALE")
        .assert()
        .success()
        .stdout(predicate::str::contains("hale_symptoms").and(predicate::str::contains("leave")));
}

#[test]
fn context_is_json() {
    let (_dir, save) = new_game();
    let output = hum().arg("context").arg(&save).arg("elsie").output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["npc"], "elsie");
    assert_eq!(value["act"], 1);
}

#[test]
fn events_filters_by_kind() {
    let (_dir, save) = new_game();
    apply(&save, &["flag", "bell_rang"]).success();
    apply(&save, &["move", "well"]).success();
    hum()
        .args(["events", "--kind", "flag:set"])
        .arg(&save)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("flag:set")
                .and(predicate::str::contains("player:location_change").not()),
        );
}
