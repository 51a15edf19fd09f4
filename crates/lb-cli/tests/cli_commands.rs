//! Integration tests for the lb-cli commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Create a temp directory with a small outcome pack.
fn test_pack() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "data/luckbox/outcomes/bell.json",
        r#"{"type": "sound", "luck": 1, "sound_event": "minecraft:block.bell.use", "pos": "{blockX},{blockY}+2,{blockZ}"}"#,
    );
    write(
        root,
        "data/luckbox/outcomes/thunder.json",
        r#"{"type": "sound", "luck": -2, "chance": 2, "delay": 3, "volume": "4", "sound_event": "minecraft:entity.lightning_bolt.thunder"}"#,
    );
    write(
        root,
        "data/luckbox/outcomes/speed.json",
        r#"{"type": "effect", "status_effect": {"id": "minecraft:speed", "duration": 200, "amplifier": 1}}"#,
    );
    write(
        root,
        "data/luckbox/outcomes/nonrandom/fanfare.json",
        r#"{"type": "sound", "sound_event": "minecraft:ui.toast.challenge_complete"}"#,
    );
    write(root, "data/luckbox/outcomes/broken.json", "{ not json");
    write(root, "data/luckbox/outcomes/bad.json", r#"{"type": "explosion"}"#);
    dir
}

fn luckbox() -> Command {
    let mut cmd = Command::cargo_bin("luckbox").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

#[test]
fn list_shows_both_partitions() {
    let dir = test_pack();
    luckbox()
        .args(["list", "-d", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("luckbox:bell")
                .and(predicate::str::contains("luckbox:thunder"))
                .and(predicate::str::contains("luckbox:nonrandom/fanfare"))
                .and(predicate::str::contains("4 outcomes (3 random, 1 nonrandom)")),
        );
}

#[test]
fn list_reports_skipped_definitions() {
    let dir = test_pack();
    luckbox()
        .args(["list", "-d", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 skipped").and(predicate::str::contains("luckbox:bad")))
        .stderr(predicate::str::contains("broken.json"));
}

#[test]
fn list_with_custom_reserved_prefix() {
    let dir = test_pack();
    luckbox()
        .args([
            "list",
            "-d",
            dir.path().to_str().unwrap(),
            "--reserved-prefix",
            "fixed/",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 outcomes (4 random, 0 nonrandom)"));
}

#[test]
fn list_without_data_dir_fails() {
    let dir = TempDir::new().unwrap();
    luckbox()
        .args(["list", "-d", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no data directory"));
}

#[test]
fn list_empty_pack() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("data/luckbox/outcomes")).unwrap();
    luckbox()
        .args(["list", "-d", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No outcomes found"));
}

// ---------------------------------------------------------------------------
// draw
// ---------------------------------------------------------------------------

#[test]
fn draw_tallies_random_partition_only() {
    let dir = test_pack();
    luckbox()
        .args(["draw", "-d", dir.path().to_str().unwrap(), "--count", "200", "--seed", "7"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("200 draws")
                .and(predicate::str::contains("luckbox:bell"))
                .and(predicate::str::contains("luckbox:speed"))
                .and(predicate::str::contains("fanfare").not()),
        );
}

#[test]
fn draw_accepts_negative_luck() {
    let dir = test_pack();
    luckbox()
        .args(["draw", "-d", dir.path().to_str().unwrap(), "--luck=-20", "--count", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("luck=-20"));
}

#[test]
fn draw_from_empty_pack_fails() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("data/luckbox/outcomes")).unwrap();
    luckbox()
        .args(["draw", "-d", dir.path().to_str().unwrap(), "--count", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no outcomes loaded"));
}

// ---------------------------------------------------------------------------
// resolve
// ---------------------------------------------------------------------------

#[test]
fn resolve_arithmetic_on_parameters() {
    luckbox()
        .args(["resolve", "{blockPosY}+3", "--pos", "0,64,0"])
        .assert()
        .success()
        .stdout("67\n");
}

#[test]
fn resolve_player_parameters() {
    luckbox()
        .args([
            "resolve",
            "{playerPosX} {playerName}",
            "--player",
            "Alex",
            "--player-pos",
            "3.5,64,-9.5",
        ])
        .assert()
        .success()
        .stdout("3 Alex\n");
}

#[test]
fn resolve_functions() {
    luckbox()
        .args(["resolve", "randomBetween(5,5)*2"])
        .assert()
        .success()
        .stdout("10\n");
}

#[test]
fn resolve_unknown_parameter_fails() {
    luckbox()
        .args(["resolve", "{nope}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown parameter: nope"));
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

#[test]
fn run_delayed_outcome_fires_after_its_delay() {
    let dir = test_pack();
    luckbox()
        .args(["run", "luckbox:thunder", "-d", dir.path().to_str().unwrap(), "--ticks", "5"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("scheduled as #0 to fire in 3 ticks")
                .and(predicate::str::contains("[tick   3]"))
                .and(predicate::str::contains("minecraft:entity.lightning_bolt.thunder"))
                .and(predicate::str::contains("range 64"))
                .and(predicate::str::contains("1 side effects performed")),
        );
}

#[test]
fn run_leaves_unfired_outcomes_pending() {
    let dir = test_pack();
    luckbox()
        .args(["run", "luckbox:thunder", "-d", dir.path().to_str().unwrap(), "--ticks", "1"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("0 side effects performed")
                .and(predicate::str::contains("1 still pending")),
        );
}

#[test]
fn run_effect_targets_player() {
    let dir = test_pack();
    luckbox()
        .args(["run", "luckbox:speed", "-d", dir.path().to_str().unwrap(), "--player", "Alex"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("EFFECT")
                .and(predicate::str::contains("minecraft:speed (level 2, 200 ticks) on Alex")),
        );
}

#[test]
fn run_sound_uses_resolved_position() {
    let dir = test_pack();
    luckbox()
        .args(["run", "luckbox:bell", "-d", dir.path().to_str().unwrap(), "--pos", "1,10,1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("minecraft:block.bell.use at 1.5,12.5,1.5"));
}

#[test]
fn run_nonrandom_by_id() {
    let dir = test_pack();
    luckbox()
        .args(["run", "luckbox:nonrandom/fanfare", "-d", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("minecraft:ui.toast.challenge_complete"));
}

#[test]
fn run_random_draw() {
    let dir = test_pack();
    luckbox()
        .args(["run", "-d", dir.path().to_str().unwrap(), "--seed", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Outcome luckbox:").and(predicate::str::contains("fanfare").not()));
}

#[test]
fn run_unknown_id_fails() {
    let dir = test_pack();
    luckbox()
        .args(["run", "luckbox:missing", "-d", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outcome 'luckbox:missing' does not exist"));
}
