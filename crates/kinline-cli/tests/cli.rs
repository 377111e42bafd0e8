//! CLI E2E tests.
//!
//! Tests run the built `kinline` binary against a temporary home directory
//! and a small snapshot store.

use std::path::{Path, PathBuf};
use std::process::Command;

use kinline_core::model::ChildRef;
use kinline_core::{Citation, Date, Event, EventType, Family, Gender, MemoryStore, Person};
use tempfile::TempDir;

struct Env {
    home: TempDir,
    snapshot: PathBuf,
}

/// Parents `I1` and `I2` with child `I3`.
fn setup() -> Env {
    let home = TempDir::new().unwrap();
    let mut store = MemoryStore::new();

    let mut father = Person::new("I1", Gender::Male).with_name("John", "Smith");
    father.event_refs = vec!["E1".into(), "E2".into()];
    father.birth_ref = Some("E1".into());
    father.death_ref = Some("E2".into());
    father.family_list.push("F1".into());
    father.citations.push("C1".into());

    let mut mother = Person::new("I2", Gender::Female).with_name("Mary", "Jones");
    mother.event_refs.push("E3".into());
    mother.birth_ref = Some("E3".into());
    mother.family_list.push("F1".into());

    let mut child = Person::new("I3", Gender::Female).with_name("Ann", "Smith");
    child.event_refs.push("E4".into());
    child.birth_ref = Some("E4".into());
    child.parent_family_list.push("F1".into());

    let mut family = Family::new("F1");
    family.father = Some("I1".into());
    family.mother = Some("I2".into());
    family.child_refs.push(ChildRef::new("I3"));
    family.event_refs.push("E5".into());

    store
        .insert_person(father)
        .insert_person(mother)
        .insert_person(child)
        .insert_family(family)
        .insert_event(Event::new("E1", EventType::Birth, Date::new(1850, 4, 2)).with_citations(&["C2"]))
        .insert_event(Event::new("E2", EventType::Death, Date::new(1920, 9, 30)).with_citations(&["C2"]))
        .insert_event(Event::new("E3", EventType::Birth, Date::new(1855, 1, 1)))
        .insert_event(Event::new("E4", EventType::Birth, Date::new(1880, 6, 15)))
        .insert_event(Event::new("E5", EventType::Marriage, Date::empty()))
        .insert_citation(Citation::new("C1", 4))
        .insert_citation(Citation::new("C2", 3));

    let snapshot = home.path().join("tree.json");
    store.snapshot().save(&snapshot).unwrap();
    Env { home, snapshot }
}

fn run_cli(home: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_kinline"))
        .args(args)
        .env("HOME", home)
        .env_remove("KINLINE_ENV")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);
    (code, stdout, stderr)
}

#[test]
fn test_person_timeline_json() {
    let env = setup();
    let store = env.snapshot.to_str().unwrap();
    let (code, stdout, stderr) = run_cli(
        env.home.path(),
        &[
            "--store", store, "timeline", "person", "I1", "--ancestors", "0", "--offspring", "0",
            "--json",
        ],
    );
    assert_eq!(code, 0, "stderr: {stderr}");

    let rows: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let handles: Vec<&str> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["event_handle"].as_str().unwrap())
        .collect();
    // The undated marriage sits just before the child's birth.
    assert_eq!(handles, vec!["E1", "E5", "E2"]);
    assert_eq!(rows[2]["age"], "70 years");
    assert_eq!(rows[0]["relation"], "self");
}

#[test]
fn test_person_timeline_with_relatives() {
    let env = setup();
    let store = env.snapshot.to_str().unwrap();
    let (code, stdout, stderr) = run_cli(
        env.home.path(),
        &[
            "--store", store, "timeline", "person", "I1", "--ancestors", "1", "--offspring", "1",
            "--relative-events", "vital",
        ],
    );
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("[wife]"));
    assert!(stdout.contains("[daughter]"));
}

#[test]
fn test_relative_rows_show_subject_age() {
    let env = setup();
    let store = env.snapshot.to_str().unwrap();
    let (code, stdout, stderr) = run_cli(
        env.home.path(),
        &[
            "--store", store, "timeline", "person", "I3", "--ancestors", "1", "--offspring", "0",
            "--relatives", "father", "--relative-events", "vital", "--precision", "1", "--json",
        ],
    );
    assert_eq!(code, 0, "stderr: {stderr}");

    let rows: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let death = rows
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["event_handle"] == "E2")
        .expect("father's death is listed");
    assert_eq!(death["relation"], "father");
    // I3 was born 1880-06-15, so the father's 1920 death is at age 40.
    assert_eq!(death["age"], "40 years");
}

#[test]
fn test_family_timeline_text() {
    let env = setup();
    let store = env.snapshot.to_str().unwrap();
    let (code, stdout, _) = run_cli(
        env.home.path(),
        &["--store", store, "timeline", "family", "F1"],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("John Smith"));
    assert!(stdout.contains("Mary Jones"));
    assert!(stdout.contains("Ann Smith"));
}

#[test]
fn test_import_then_status() {
    let env = setup();
    let db = env.home.path().join("tree.sqlite");
    let (code, stdout, stderr) = run_cli(
        env.home.path(),
        &[
            "--store",
            db.to_str().unwrap(),
            "import",
            env.snapshot.to_str().unwrap(),
        ],
    );
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("imported 3 people"));

    let (code, stdout, stderr) = run_cli(
        env.home.path(),
        &["--store", db.to_str().unwrap(), "status", "person", "I1", "--json"],
    );
    assert_eq!(code, 0, "stderr: {stderr}");
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(
        report["missing_text"],
        "Missing Events: Burial"
    );
    assert!(report["rank"]["tier"].as_u64().is_some());
}

#[test]
fn test_config_set_and_get() {
    let env = setup();
    let (code, stdout, _) = run_cli(env.home.path(), &["config", "set", "timeline.ancestors", "3"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "ok");

    let (code, stdout, _) = run_cli(env.home.path(), &["config", "get", "timeline.ancestors"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "3");

    let (code, _, stderr) = run_cli(env.home.path(), &["config", "get", "timeline.nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_unknown_handle_fails() {
    let env = setup();
    let store = env.snapshot.to_str().unwrap();
    let (code, _, stderr) = run_cli(
        env.home.path(),
        &["--store", store, "timeline", "person", "I99"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_unknown_event_filter_fails() {
    let env = setup();
    let store = env.snapshot.to_str().unwrap();
    let (code, _, stderr) = run_cli(
        env.home.path(),
        &["--store", store, "timeline", "person", "I1", "--events", "Bogus"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("Bogus"));
}
