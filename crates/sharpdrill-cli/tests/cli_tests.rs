//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

const MATERIAL: &str = r#"{
    "Noun": {
        "1001": ["m", "Hund", "Hunde", ["dog"]]
    },
    "Verb": {
        "2001": ["gehen", "gehe", "gehst", "geht", "gegangen", "geh!", ["to go"]]
    },
    "Adjective+preposition": {
        "3001": ["stolz", "auf", "Akkusativ"]
    }
}"#;

const RECORDS: &str = r#"{
    "1001": [3.0, 4, 0.4],
    "2001": [0.0, 0, 2.0],
    "3001": [0.5, 1, 0.8]
}"#;

/// Command running in `dir`, isolated from the user's environment.
fn sharpdrill(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("sharpdrill").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("NO_COLOR", "1")
        .env_remove("SHARPDRILL_MATERIAL")
        .env_remove("SHARPDRILL_RECORDS")
        .env_remove("RUST_LOG");
    cmd
}

fn workspace(material: &str, records: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("material.json"), material).unwrap();
    std::fs::write(dir.path().join("records.json"), records).unwrap();
    dir
}

fn read_records(dir: &Path) -> Value {
    let content = std::fs::read_to_string(dir.join("records.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    sharpdrill(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("drill"))
        .stdout(predicate::str::contains("stats"))
        .stdout(predicate::str::contains("reset"))
        .stdout(predicate::str::contains("backup"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn version_flag() {
    let dir = TempDir::new().unwrap();
    sharpdrill(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sharpdrill"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    sharpdrill(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created sharpdrill.toml"))
        .stdout(predicate::str::contains("Created material.json"))
        .stdout(predicate::str::contains("Created records.json"));

    let records = read_records(dir.path());
    assert_eq!(records["1001"], json!([0.0, 0, 2.0]));
    assert_eq!(records["3004"], json!([0.0, 0, 2.0]));

    sharpdrill(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("sharpdrill.toml already exists"))
        .stdout(predicate::str::contains("records.json already exists"));
}

#[test]
fn init_material_is_valid() {
    let dir = TempDir::new().unwrap();
    sharpdrill(dir.path()).arg("init").assert().success();

    sharpdrill(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("12 items"))
        .stdout(predicate::str::contains("All material valid."));
}

#[test]
fn validate_reports_warnings() {
    let dir = workspace(
        r#"{
            "Noun": {
                "1001": ["m", "Hund", " ", ["dog", "dog"]]
            }
        }"#,
        r#"{"9999": [0.0, 0, 2.0]}"#,
    );

    sharpdrill(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("[1001] WARNING: item has a blank field"))
        .stdout(predicate::str::contains("[9999] WARNING"))
        .stdout(predicate::str::contains("no Verb items"))
        .stdout(predicate::str::contains("5 warning(s) found."));
}

#[test]
fn validate_rejects_unknown_question_type() {
    let dir = workspace(r#"{"Idiom": {}}"#, "{}");

    sharpdrill(dir.path())
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: invalid material in material.json"))
        .stderr(predicate::str::contains("unknown question type: Idiom"));
}

#[test]
fn missing_material_is_fatal() {
    let dir = TempDir::new().unwrap();

    sharpdrill(dir.path())
        .args(["drill", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: failed to read material file"));
}

#[test]
fn missing_config_is_fatal() {
    let dir = workspace(MATERIAL, RECORDS);

    sharpdrill(dir.path())
        .args(["--config", "nope.toml", "stats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn new_material_is_added_to_records() {
    let dir = workspace(MATERIAL, r#"{"1001": [3.0, 4, 0.4]}"#);

    sharpdrill(dir.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added item 2001 to records"))
        .stdout(predicate::str::contains("Added item 3001 to records"));

    let records = read_records(dir.path());
    assert_eq!(records["1001"], json!([3.0, 4, 0.4]));
    assert_eq!(records["2001"], json!([0.0, 0, 2.0]));
}

#[test]
fn stats_lists_items_by_weight() {
    let dir = workspace(MATERIAL, RECORDS);

    let output = sharpdrill(dir.path())
        .args(["stats", "--limit", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Weight"))
        .stdout(predicate::str::contains("Total: 3 item(s)"))
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).unwrap();
    let verb = text.find("2001").unwrap();
    let adj = text.find("3001").unwrap();
    assert!(verb < adj);
    assert!(!text.contains("1001"));
}

#[test]
fn stats_shows_accuracy() {
    let dir = workspace(MATERIAL, RECORDS);

    let output = sharpdrill(dir.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Accuracy"))
        .stdout(predicate::str::contains("75%"))
        .stdout(predicate::str::contains("50%"))
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).unwrap();
    let verb_row = text.lines().find(|l| l.contains("2001")).unwrap();
    assert!(verb_row.contains(" - "));
}

#[test]
fn reset_with_yes() {
    let dir = workspace(MATERIAL, RECORDS);

    sharpdrill(dir.path())
        .args(["reset", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Record reset successful"));

    let records = read_records(dir.path());
    for id in ["1001", "2001", "3001"] {
        assert_eq!(records[id], json!([0.0, 0, 2.0]));
    }
}

#[test]
fn reset_declined() {
    let dir = workspace(MATERIAL, RECORDS);

    sharpdrill(dir.path())
        .arg("reset")
        .write_stdin("maybe\nN\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Record reset aborted"));

    assert_eq!(read_records(dir.path())["1001"], json!([3.0, 4, 0.4]));
}

#[test]
fn backup_copies_records() {
    let dir = workspace(MATERIAL, RECORDS);
    let target = dir.path().join("copy.json");

    sharpdrill(dir.path())
        .args(["backup", "--target", "copy.json"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Record backup successful"));

    assert_eq!(
        std::fs::read(&target).unwrap(),
        std::fs::read(dir.path().join("records.json")).unwrap()
    );
}

#[test]
fn backup_declined_writes_nothing() {
    let dir = workspace(MATERIAL, RECORDS);

    sharpdrill(dir.path())
        .args(["backup", "--target", "copy.json"])
        .write_stdin("no\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Record backup aborted"));

    assert!(!dir.path().join("copy.json").exists());
}

#[test]
fn drill_updates_records() {
    let dir = workspace(MATERIAL, RECORDS);

    sharpdrill(dir.path())
        .args([
            "drill", "--yes", "--no-review", "-q", "1", "--types", "adjprep", "--seed", "7",
        ])
        .write_stdin("auf\nAkkusativ\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("* Noun: 1 (disabled)"))
        .stdout(predicate::str::contains("* Adjective+preposition: 1\n"))
        .stdout(predicate::str::contains("Adjective with preposition: stolz"))
        .stdout(predicate::str::contains("Final score: 1 out of 1 (100%)"))
        .stdout(predicate::str::contains("Records saved"));

    let records = read_records(dir.path());
    let updated = &records["3001"];
    assert_eq!(updated[0], json!(1.5));
    assert_eq!(updated[1], json!(2));
    let weight = updated[2].as_f64().unwrap();
    assert!((weight - 2.0 / 3.25).abs() < 1e-9);
    assert_eq!(records["1001"], json!([3.0, 4, 0.4]));
}

#[test]
fn drill_reduces_oversized_request() {
    let dir = workspace(MATERIAL, RECORDS);

    sharpdrill(dir.path())
        .args(["drill", "--yes", "--no-review", "-q", "5", "--types", "adjprep"])
        .write_stdin("auf\nDativ\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Drill reduced to 1 questions"))
        .stdout(predicate::str::contains("So-so"));
}

#[test]
fn casual_drill_leaves_records_alone() {
    let dir = workspace(MATERIAL, RECORDS);
    let before = std::fs::read(dir.path().join("records.json")).unwrap();

    sharpdrill(dir.path())
        .args(["drill", "--yes", "--no-review", "-q", "1", "--types", "adjprep", "--casual"])
        .write_stdin("auf\nAkkusativ\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Casual mode: ON"))
        .stdout(predicate::str::contains("records not saved"));

    assert_eq!(std::fs::read(dir.path().join("records.json")).unwrap(), before);
}

#[test]
fn drill_with_review() {
    let dir = workspace(MATERIAL, RECORDS);

    sharpdrill(dir.path())
        .args(["drill", "--yes", "--review", "-q", "1", "--types", "adjprep"])
        .write_stdin("auf\nAkkusativ\nyes\nIch bin stolz auf dich.\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("The concepts featured in the questions were"))
        .stdout(predicate::str::contains("stolz auf (Akkusativ)"));
}

#[test]
fn interactive_settings_can_be_kept() {
    let dir = workspace(MATERIAL, RECORDS);
    std::fs::write(
        dir.path().join("sharpdrill.toml"),
        "questions = 1\nreview = false\nenabled_types = [\"Adjective+preposition\"]\n",
    )
    .unwrap();

    sharpdrill(dir.path())
        .arg("drill")
        .write_stdin("\nauf\nAkkusativ\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("number of questions: 1"))
        .stdout(predicate::str::contains("ENTER to continue"))
        .stdout(predicate::str::contains("Final score: 1 out of 1"));
}

#[test]
fn closed_input_aborts_drill() {
    let dir = workspace(MATERIAL, RECORDS);
    let before = std::fs::read(dir.path().join("records.json")).unwrap();

    sharpdrill(dir.path())
        .args(["drill", "--yes", "--no-review", "-q", "1", "--types", "adjprep"])
        .write_stdin("auf\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input closed"));

    assert_eq!(std::fs::read(dir.path().join("records.json")).unwrap(), before);
}

#[test]
fn records_path_from_environment() {
    let dir = workspace(MATERIAL, RECORDS);
    std::fs::rename(
        dir.path().join("records.json"),
        dir.path().join("elsewhere.json"),
    )
    .unwrap();

    sharpdrill(dir.path())
        .env("SHARPDRILL_RECORDS", "elsewhere.json")
        .args(["reset", "--yes"])
        .assert()
        .success();

    let content = std::fs::read_to_string(dir.path().join("elsewhere.json")).unwrap();
    let records: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(records["1001"], json!([0.0, 0, 2.0]));
}
