use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

/// `skit` isolated from the user's global config and `SKIT_*` variables.
fn skit() -> Command {
    let mut cmd = Command::cargo_bin("skit").unwrap();
    cmd.env("XDG_CONFIG_HOME", env!("CARGO_TARGET_TMPDIR"))
        .env_remove("SKIT_CONFIG")
        .env_remove("SKIT_ROBOT")
        .env_remove("SKIT_WEEK_START")
        .env_remove("SKIT_DATE_FORMATS")
        .env_remove("SKIT_TRASH_DIR")
        .env_remove("RUST_LOG");
    cmd
}

fn robot_json(args: &[&str]) -> Value {
    let output = skit().arg("--robot").args(args).output().unwrap();
    assert!(output.status.success(), "skit {args:?} failed");
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_cli_help() {
    skit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_cli_version() {
    skit()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_text_slugify() {
    skit()
        .args(["text", "slugify", "Hello World! How are you?"])
        .assert()
        .success()
        .stdout("hello-world-how-are-you\n");
}

#[test]
fn test_text_reads_stdin() {
    skit()
        .args(["text", "slugify", "-", "--separator", "_"])
        .write_stdin("Crème Brûlée\n")
        .assert()
        .success()
        .stdout("creme_brulee\n");
}

#[test]
fn test_robot_envelope() {
    let json = robot_json(&["text", "emails", "mail hello@example.com or ops@test.org"]);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["command"], "text emails");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(
        json["data"],
        serde_json::json!(["hello@example.com", "ops@test.org"])
    );
}

#[test]
fn test_text_words_top() {
    let json = robot_json(&["text", "words", "the cat and the hat and the bat", "-n", "2"]);
    assert_eq!(json["data"][0]["word"], "the");
    assert_eq!(json["data"][0]["count"], 3);
    assert_eq!(json["data"][1]["word"], "and");
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[test]
fn test_text_phones_region_and_bad_region() {
    let json = robot_json(&["text", "phones", "Ring +44 1234 567890 today", "--region", "uk"]);
    assert_eq!(json["data"], serde_json::json!(["+44 1234 567890"]));

    skit()
        .args(["text", "phones", "x", "--region", "fr"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected us|uk"));
}

#[test]
fn test_robot_error_on_stdout() {
    let output = skit()
        .args(["--robot", "text", "truncate", "hello world", "-m", "1"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["error"], Value::Bool(true));
    assert_eq!(json["code"], "invalid_argument");
}

#[test]
fn test_human_error_on_stderr() {
    skit()
        .args(["date", "parse", "not a date"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("not a date"));
}

#[test]
fn test_date_business_days_with_holiday() {
    skit()
        .args(["date", "business-days", "2024-01-01", "2024-01-08"])
        .assert()
        .success()
        .stdout("5\n");
    skit()
        .args([
            "date",
            "business-days",
            "2024-01-01",
            "2024-01-08",
            "--holiday",
            "2024-01-01",
        ])
        .assert()
        .success()
        .stdout("4\n");
}

#[test]
fn test_date_duration_granularity() {
    skit()
        .args(["date", "duration", "3661", "-g", "3"])
        .assert()
        .success()
        .stdout("1 hour, 1 minute, 1 second\n");
    skit()
        .args(["date", "duration", "3661"])
        .assert()
        .success()
        .stdout("1 hour, 1 minute\n");
}

#[test]
fn test_date_week_start_from_env() {
    let output = skit()
        .env("SKIT_WEEK_START", "sunday")
        .args(["--robot", "date", "week", "2024-01-03"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["data"][0], "2023-12-31");
    assert_eq!(json["data"][6], "2024-01-06");
}

#[test]
fn test_date_quarter_bounds() {
    let json = robot_json(&["date", "quarter", "--quarter", "1", "--year", "2024"]);
    assert_eq!(json["data"]["start"], "2024-01-01");
    assert_eq!(json["data"]["end"], "2024-03-31");
}

#[test]
fn test_date_leap_year() {
    skit()
        .args(["date", "leap-year", "1900"])
        .assert()
        .success()
        .stdout("false\n");
}

#[test]
fn test_url_encode_and_decode() {
    skit()
        .args(["url", "encode", "q=hello world", "page=2"])
        .assert()
        .success()
        .stdout("q=hello+world&page=2\n");

    let json = robot_json(&["url", "decode", "?a=1&b=x+y"]);
    assert_eq!(json["data"], serde_json::json!({"a": "1", "b": "x y"}));
}

#[test]
fn test_url_parse_and_domain() {
    let json = robot_json(&["url", "parse", "https://user@Example.com:8080/p?q=1#top"]);
    assert_eq!(json["data"]["host"], "example.com");
    assert_eq!(json["data"]["port"], 8080);
    assert_eq!(json["data"]["username"], "user");
    assert_eq!(json["data"]["fragment"], "top");

    skit()
        .args(["url", "domain", "https://www.example.com/path"])
        .assert()
        .success()
        .stdout("example.com\n");
    skit()
        .args(["url", "domain", "https://www.example.com:99999/search?q=%FF"])
        .assert()
        .success()
        .stdout("example.com\n");
}

#[test]
fn test_file_rename_dry_run_leaves_files() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("draft_a.txt"), "a").unwrap();
    std::fs::write(dir.path().join("draft_b.txt"), "b").unwrap();

    skit()
        .args(["file", "rename"])
        .arg(dir.path())
        .args(["draft_", "final_", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("draft_a.txt -> final_a.txt"));

    assert!(dir.path().join("draft_a.txt").exists());
    assert!(!dir.path().join("final_a.txt").exists());
}

#[test]
fn test_file_rename_conflict_changes_nothing() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("a1.txt"), "1").unwrap();
    std::fs::write(dir.path().join("b1.txt"), "2").unwrap();

    let output = skit()
        .arg("--robot")
        .args(["file", "rename"])
        .arg(dir.path())
        .args(["a", "b"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["code"], "conflict");
    assert!(dir.path().join("a1.txt").exists());
}

#[test]
fn test_file_organize() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("a.TXT"), "a").unwrap();
    std::fs::write(dir.path().join("b.txt"), "b").unwrap();
    std::fs::write(dir.path().join("README"), "r").unwrap();

    skit()
        .args(["file", "organize"])
        .arg(dir.path())
        .assert()
        .success();

    assert!(dir.path().join("txt/a.TXT").exists());
    assert!(dir.path().join("txt/b.txt").exists());
    assert!(dir.path().join("no_extension/README").exists());
}

#[test]
fn test_file_dupes_by_size() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), "abc").unwrap();
    std::fs::write(dir.path().join("b.txt"), "xyz").unwrap();
    let root = dir.path().to_str().unwrap();

    let json = robot_json(&["file", "dupes", root, "--by", "size"]);
    assert_eq!(json["data"]["3"].as_array().unwrap().len(), 2);

    let json = robot_json(&["file", "dupes", root]);
    assert_eq!(json["data"], serde_json::json!({}));
}

#[test]
fn test_file_delete_uses_configured_trash() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("notes.md");
    std::fs::write(&target, "bye").unwrap();

    skit()
        .env("SKIT_TRASH_DIR", ".bin")
        .args(["file", "delete"])
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("moved to"));

    assert!(!target.exists());
    let trashed: Vec<_> = std::fs::read_dir(dir.path().join(".bin"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(trashed.len(), 1);
    assert!(trashed[0].starts_with("notes_"));
    assert!(trashed[0].ends_with(".md"));
}

#[test]
fn test_file_delete_missing_is_not_found() {
    let dir = tempdir().unwrap();
    let output = skit()
        .arg("--robot")
        .args(["file", "delete"])
        .arg(dir.path().join("absent.txt"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["code"], "not_found");
}

#[test]
fn test_sys_info() {
    let json = robot_json(&["sys", "info"]);
    assert_eq!(json["data"]["os"], std::env::consts::OS);
    assert_eq!(json["data"]["toolkit_version"], env!("CARGO_PKG_VERSION"));
}

#[cfg(unix)]
#[test]
fn test_sys_run_captures_output() {
    let json = robot_json(&["sys", "run", "echo hi; exit 2"]);
    assert_eq!(json["data"]["stdout"], "hi");
    assert_eq!(json["data"]["exit_code"], 2);
    assert_eq!(json["data"]["success"], Value::Bool(false));
}

#[cfg(unix)]
#[test]
fn test_sys_run_timeout() {
    let output = skit()
        .args(["--robot", "sys", "run", "sleep 5", "--timeout", "200ms"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["code"], "timeout");
}

#[test]
fn test_config_from_explicit_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("skit.toml");
    std::fs::write(&config_path, "[dates]\nduration_granularity = 1\n").unwrap();

    skit()
        .arg("--config")
        .arg(&config_path)
        .args(["date", "duration", "3661"])
        .assert()
        .success()
        .stdout("1 hour\n");

    let output = skit()
        .arg("--config")
        .arg(&config_path)
        .args(["--robot", "config"])
        .output()
        .unwrap();
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["data"]["config"]["dates"]["duration_granularity"], 1);
    assert_eq!(json["data"]["config"]["files"]["trash_dir"], ".trash");
}

#[test]
fn test_config_robot_from_env() {
    let output = skit()
        .env("SKIT_ROBOT", "1")
        .args(["url", "validate", "https://example.com"])
        .output()
        .unwrap();
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["data"], Value::Bool(true));
}

#[test]
fn test_invalid_config_fails() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("broken.toml");
    std::fs::write(&config_path, "[dates\n").unwrap();

    skit()
        .arg("--config")
        .arg(&config_path)
        .args(["text", "slugify", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config error"));
}
