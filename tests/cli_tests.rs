// Command-line tests that need no ffprobe on the machine

use assert_cmd::Command;
use predicates::prelude::*;

fn diffmovie() -> Command {
    let mut cmd = Command::cargo_bin("diffmovie").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("DIFFMOVIE_CONFIG");
    cmd
}

#[test]
fn test_presets_are_listed() {
    diffmovie()
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("youtube-hd"))
        .stdout(predicate::str::contains("prores-master"));
}

#[test]
fn test_presets_as_json() {
    let output = diffmovie().args(["presets", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let list: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let first = &list[0];
    assert_eq!(first["name"], "youtube-hd");
    assert_eq!(first["fields"]["resolution"], "1920x1080");
}

#[test]
fn test_inspect_missing_file_reports_error_record() {
    diffmovie()
        .args(["inspect", "definitely-missing.mp4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("file not found"));
}

#[test]
fn test_compare_missing_file_against_preset() {
    diffmovie()
        .args(["compare", "definitely-missing.mp4", "--preset", "twitter", "--summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("preset:twitter (base)"))
        .stdout(predicate::str::contains("fields differ"))
        .stdout(predicate::str::contains("preset entry"));
}

#[test]
fn test_compare_rejects_unknown_preset() {
    diffmovie()
        .args(["compare", "--preset", "vhs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown preset: vhs"));
}

#[test]
fn test_compare_rejects_out_of_range_base() {
    diffmovie()
        .args(["compare", "--preset", "tiktok", "--base", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_compare_with_nothing_fails() {
    diffmovie()
        .arg("compare")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to compare"));
}

#[test]
fn test_command_refuses_failed_entries() {
    diffmovie()
        .args(["command", "missing-a.mp4", "missing-b.mp4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot synthesize"));
}

#[test]
fn test_shell_session_from_stdin() {
    diffmovie()
        .arg("shell")
        .write_stdin("preset youtube-hd\npreset tiktok\nbase 0\nlist\nfilter on\nshow\nbogus\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("0  preset:youtube-hd (base)"))
        .stdout(predicate::str::contains("fields differ"))
        .stderr(predicate::str::contains("unknown command: bogus"));
}

#[test]
fn test_bad_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diffmovie.toml");
    std::fs::write(&path, "[diffmovie]\nprobe_timeout_secs = \"soon\"\n").unwrap();

    diffmovie()
        .args(["--config", path.to_str().unwrap(), "presets"])
        .assert()
        .failure();
}
