//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `lingo` invocation isolated from the user's config and credentials.
fn lingo(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("lingo").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("OPENAI_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

fn write_store(dir: &TempDir, json: &str) {
    std::fs::write(dir.path().join("slang.json"), json).unwrap();
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    lingo(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Learn Gen Z slang"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    lingo(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lingo"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    lingo(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created lingo.toml"))
        .stdout(predicate::str::contains("Created slang.json"));

    assert!(dir.path().join("lingo.toml").exists());
    let saved = std::fs::read_to_string(dir.path().join("slang.json")).unwrap();
    assert!(saved.contains("\"delulu\""));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    lingo(&dir).arg("init").assert().success();

    lingo(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn learn_lists_default_terms() {
    let dir = TempDir::new().unwrap();

    lingo(&dir)
        .arg("learn")
        .assert()
        .success()
        .stdout(predicate::str::contains("rizz"))
        .stdout(predicate::str::contains("lowkey"))
        .stdout(predicate::str::contains("Definition"));

    // Browsing never writes the store.
    assert!(!dir.path().join("slang.json").exists());
}

#[test]
fn learn_single_term_ignores_case() {
    let dir = TempDir::new().unwrap();

    lingo(&dir)
        .args(["learn", "RIZZ"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rizz"))
        .stdout(predicate::str::contains("Charisma or charm"));
}

#[test]
fn learn_unknown_term_fails() {
    let dir = TempDir::new().unwrap();

    lingo(&dir)
        .args(["learn", "skibidi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown term 'skibidi'"));
}

#[test]
fn learn_explain_without_key_warns() {
    let dir = TempDir::new().unwrap();

    lingo(&dir)
        .args(["learn", "mid", "--explain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mediocre"))
        .stderr(predicate::str::contains("not configured"));
}

#[test]
fn add_with_definition_persists() {
    let dir = TempDir::new().unwrap();

    lingo(&dir)
        .args(["add", "  FR ", "--definition", "For real."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added fr!"));

    let saved = std::fs::read_to_string(dir.path().join("slang.json")).unwrap();
    assert!(saved.contains("\"fr\": \"For real.\""));
    // Defaults are saved alongside the first custom term.
    assert!(saved.contains("\"yeet\""));

    lingo(&dir)
        .args(["learn", "fr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("For real."));
}

#[test]
fn add_without_key_warns_but_saves() {
    let dir = TempDir::new().unwrap();

    lingo(&dir)
        .args(["add", "npc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added npc!"))
        .stderr(predicate::str::contains("Warning"));

    let saved = std::fs::read_to_string(dir.path().join("slang.json")).unwrap();
    assert!(saved.contains("\"npc\": \"No definition yet.\""));
}

#[test]
fn add_empty_term_fails() {
    let dir = TempDir::new().unwrap();

    lingo(&dir)
        .args(["add", "   ", "--definition", "nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be empty"));
}

#[test]
fn custom_store_path() {
    let dir = TempDir::new().unwrap();

    lingo(&dir)
        .args(["--store", "data/terms.json", "add", "bussin", "--definition", "Very good."])
        .assert()
        .success();

    assert!(dir.path().join("data/terms.json").exists());
    assert!(!dir.path().join("slang.json").exists());
}

#[test]
fn store_path_from_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("lingo.toml"),
        "store_path = \"mine.json\"\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("mine.json"),
        r#"{"bet": "agreement", "cap": "lie"}"#,
    )
    .unwrap();

    lingo(&dir)
        .arg("learn")
        .assert()
        .success()
        .stdout(predicate::str::contains("agreement"))
        .stdout(predicate::str::contains("rizz").not());
}

#[test]
fn corrupt_store_is_reported() {
    let dir = TempDir::new().unwrap();
    write_store(&dir, "not json");

    lingo(&dir)
        .arg("learn")
        .assert()
        .failure()
        .stderr(predicate::str::contains("corrupt"));
}

#[test]
fn quiz_runs_requested_rounds() {
    let dir = TempDir::new().unwrap();

    lingo(&dir)
        .args(["quiz", "--rounds", "3", "--seed", "5"])
        .write_stdin("1\n2\n3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Definition:"))
        .stdout(predicate::str::is_match(r"Final score: [0-3] / 3").unwrap());
}

#[test]
fn quiz_is_reproducible_with_seed() {
    let dir = TempDir::new().unwrap();

    let run = || {
        lingo(&dir)
            .args(["quiz", "--rounds", "4", "--seed", "123"])
            .write_stdin("1\n1\n2\n4\n")
            .output()
            .unwrap()
            .stdout
    };

    assert_eq!(run(), run());
}

#[test]
fn quiz_quit_immediately() {
    let dir = TempDir::new().unwrap();

    lingo(&dir)
        .arg("quiz")
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Final score: 0 / 0"));
}

#[test]
fn quiz_accepts_numeric_term_by_name() {
    let dir = TempDir::new().unwrap();
    write_store(&dir, r#"{"404": "clueless", "bet": "agreement"}"#);

    lingo(&dir)
        .args(["quiz", "--rounds", "1", "--seed", "1"])
        .write_stdin("404\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pick a number").not())
        .stdout(predicate::str::is_match(r"Final score: [01] / 1").unwrap());
}

#[test]
fn quiz_needs_two_terms() {
    let dir = TempDir::new().unwrap();
    write_store(&dir, r#"{"bet": "agreement"}"#);

    lingo(&dir)
        .arg("quiz")
        .write_stdin("1\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 2 terms"));
}

#[test]
fn ask_without_key_is_not_fatal() {
    let dir = TempDir::new().unwrap();

    lingo(&dir)
        .args(["ask", "what does delulu mean?"])
        .assert()
        .success()
        .stderr(predicate::str::contains("AI helper unavailable"));
}

#[test]
fn rust_log_enables_debug_output() {
    let dir = TempDir::new().unwrap();

    lingo(&dir)
        .env("RUST_LOG", "lingo=debug")
        .arg("learn")
        .assert()
        .success()
        .stderr(predicate::str::contains("configuration loaded"));
}

#[test]
fn default_log_level_hides_debug_output() {
    let dir = TempDir::new().unwrap();

    lingo(&dir)
        .arg("learn")
        .assert()
        .success()
        .stderr(predicate::str::contains("configuration loaded").not());
}

#[test]
fn missing_explicit_config_fails() {
    let dir = TempDir::new().unwrap();

    lingo(&dir)
        .args(["--config", "nope.toml", "learn"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}
