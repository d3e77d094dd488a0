use assert_cmd::Command;
use predicates::prelude::*;

/// Run the binary in a scratch directory so tests never touch the real
/// config or catalog files.
fn aircheck(tmp: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("aircheck").unwrap();
    cmd.current_dir(tmp.path());
    cmd.env("XDG_CONFIG_HOME", tmp.path());
    cmd.env("HOME", tmp.path());
    cmd
}

#[test]
fn parse_text_output() {
    let tmp = tempfile::tempdir().unwrap();
    aircheck(&tmp)
        .args(["parse", "AnswersInGenesis_100424.wav"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Show:   Answers In Genesis"))
        .stdout(predicate::str::contains("October 04, 2024"));
}

#[test]
fn parse_json_output_matches_api_shape() {
    let tmp = tempfile::tempdir().unwrap();
    aircheck(&tmp)
        .args(["parse", "AIG_010125.wav", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"show_name\": \"AIG\""))
        .stdout(predicate::str::contains("\"date\": \"2025-01-01\""))
        .stdout(predicate::str::contains("\"success\": true"));
}

#[test]
fn parse_failure_is_reported_not_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    aircheck(&tmp)
        .args(["parse", "BadName.wav"])
        .assert()
        .success()
        .stdout(predicate::str::contains("doesn't match expected pattern"));
}

#[test]
fn suggest_builds_canonical_filename() {
    let tmp = tempfile::tempdir().unwrap();
    aircheck(&tmp)
        .args(["suggest", "Answers In Genesis", "2024-10-04"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AnswersInGenesis_100424.wav"));
}

#[test]
fn suggest_rejects_malformed_date() {
    let tmp = tempfile::tempdir().unwrap();
    aircheck(&tmp)
        .args(["suggest", "FOF", "10/04/2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn validate_accepts_and_rejects_templates() {
    let tmp = tempfile::tempdir().unwrap();
    aircheck(&tmp)
        .args(["validate", "ShowName_123456"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));

    let tmp = tempfile::tempdir().unwrap();
    aircheck(&tmp)
        .args(["validate", "Show_Name_123456"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("exactly one underscore"));
}

#[test]
fn match_finds_seeded_show_by_alias() {
    let tmp = tempfile::tempdir().unwrap();
    aircheck(&tmp)
        .args(["match", "FOF_123199.mp3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Matched show: Focus On The Family"));
}

#[test]
fn shows_lists_seeded_catalog() {
    let tmp = tempfile::tempdir().unwrap();
    aircheck(&tmp)
        .args(["shows"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Answers In Genesis"))
        .stdout(predicate::str::contains("Unshackled"));
}
