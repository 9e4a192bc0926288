use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn readz(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("readz").unwrap();
    cmd.current_dir(home)
        .env("READZ_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn stored(home: &Path) -> serde_json::Value {
    let raw = std::fs::read_to_string(home.join("power-systems-chapters.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn test_fresh_home_lists_defaults() {
    let temp_dir = tempfile::tempdir().unwrap();

    readz(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Using default chapters"))
        .stdout(predicate::str::contains("0/12 chapters (0%)"))
        .stdout(predicate::str::contains("Chapter 1: Introduction"))
        .stdout(predicate::str::contains("Chapter 12: Power System Controls"));

    // listing alone never writes
    assert!(!temp_dir.path().join("power-systems-chapters.json").exists());
}

#[test]
fn test_toggle_delete_add_scenario() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    readz(home)
        .args(["done", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed: Power Transformers"))
        .stdout(predicate::str::contains("✓ Saved"))
        .stdout(predicate::str::contains("1/12 chapters (8%)"));

    readz(home)
        .args(["delete", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chapter deleted (3): Power Transformers"));

    readz(home)
        .args(["add", "Extra", "--number", "13", "--pages", "681-700"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added chapter 13 (13): Extra"));

    let doc = stored(home);
    let chapters = doc.as_array().unwrap();
    assert_eq!(chapters.len(), 12);
    assert!(chapters.iter().all(|ch| ch["id"] != 3));
    let last = chapters.last().unwrap();
    assert_eq!(last["id"], 13);
    assert_eq!(last["number"], "13");
    assert_eq!(last["pages"], "681-700");
    assert_eq!(last["completed"], false);
}

#[test]
fn test_unknown_id_warns_without_saving() {
    let temp_dir = tempfile::tempdir().unwrap();

    readz(temp_dir.path())
        .args(["done", "99"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No chapter with id 99"))
        .stdout(predicate::str::contains("✓ Saved").not());
}

#[test]
fn test_notes_and_show() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    readz(home)
        .args(["notes", "1", "Review per-unit system"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Notes updated: Introduction"));

    readz(home).args(["edit", "1"]).assert().success();
    readz(home).args(["edit", "1"]).assert().success();

    readz(home)
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Review per-unit system"))
        .stdout(predicate::str::contains("(editing notes)").not());

    let doc = stored(home);
    assert_eq!(doc[0]["notes"], "Review per-unit system");
    assert_eq!(doc[0]["editing"], false);
}

#[test]
fn test_show_missing_chapter_fails() {
    let temp_dir = tempfile::tempdir().unwrap();

    readz(temp_dir.path())
        .args(["show", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Chapter not found: 42"));
}

#[test]
fn test_export_reset_import_round_trip() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    readz(home).args(["done", "2", "5"]).assert().success();
    readz(home)
        .args(["add", "Appendix A"])
        .assert()
        .success();

    readz(home)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Exported"));
    let backup = home.join("power-systems-reading-progress.json");
    let exported = std::fs::read_to_string(&backup).unwrap();
    assert!(exported.starts_with("[\n  {"));

    readz(home)
        .args(["reset", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Reset to defaults"));
    readz(home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("0/12 chapters (0%)"));

    readz(home)
        .arg("import")
        .arg(&backup)
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Imported successfully"))
        .stdout(predicate::str::contains("13 chapters imported"));

    let out = home.join("again.json");
    readz(home)
        .args(["export", "--output"])
        .arg(&out)
        .assert()
        .success();
    assert_eq!(std::fs::read_to_string(&out).unwrap(), exported);
}

#[test]
fn test_export_to_stdout() {
    let temp_dir = tempfile::tempdir().unwrap();

    readz(temp_dir.path())
        .args(["export", "-o", "-"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"Symmetrical Faults\""));
}

#[test]
fn test_malformed_import_keeps_state() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    readz(home).args(["done", "1"]).assert().success();

    let bad = home.join("bad.json");
    std::fs::write(&bad, "{ definitely not json").unwrap();

    readz(home)
        .arg("import")
        .arg(&bad)
        .assert()
        .success()
        .stdout(predicate::str::contains("⚠ Import failed"));

    assert_eq!(stored(home)[0]["completed"], true);
}

#[test]
fn test_import_missing_file_is_an_error() {
    let temp_dir = tempfile::tempdir().unwrap();

    readz(temp_dir.path())
        .args(["import", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_reset_requires_confirmation() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    readz(home).args(["delete", "1"]).assert().success();

    readz(home)
        .arg("reset")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reset cancelled."));
    assert_eq!(stored(home).as_array().unwrap().len(), 11);

    readz(home)
        .arg("reset")
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Reset to defaults"));
    assert_eq!(stored(home).as_array().unwrap().len(), 12);
}

#[test]
fn test_corrupt_store_falls_back_to_defaults() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    std::fs::write(home.join("power-systems-chapters.json"), "[{\"id\": 1,").unwrap();

    readz(home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved data found, using defaults"))
        .stdout(predicate::str::contains("0/12 chapters (0%)"));
}

#[test]
fn test_shell_batches_changes() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    readz(home)
        .args(["config", "save-debounce-ms", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("save-debounce-ms = 10"));

    readz(home)
        .arg("shell")
        .write_stdin(
            "done 1\ndone 2\ndraft number 13\ndraft pages 681-700\nadd Extra\nnotes 2 tricky\nquit\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Added chapter 13 (13): Extra"))
        .stdout(predicate::str::contains("✓ Saved"));

    let doc = stored(home);
    let chapters = doc.as_array().unwrap();
    assert_eq!(chapters.len(), 13);
    assert_eq!(chapters[0]["completed"], true);
    assert_eq!(chapters[1]["notes"], "tricky");
    assert_eq!(chapters[12]["pages"], "681-700");
}

#[test]
fn test_config_roundtrip_and_unknown_key() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    readz(home)
        .args(["config", "export-filename", "progress.json"])
        .assert()
        .success();
    readz(home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("export-filename = progress.json"))
        .stdout(predicate::str::contains("storage-key = power-systems-chapters"));

    readz(home).arg("export").assert().success();
    assert!(home.join("progress.json").exists());

    readz(home)
        .args(["config", "colour"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}
