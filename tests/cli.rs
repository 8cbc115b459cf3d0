#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const FORMATTED_PREFIX: &str = r"^\[\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{6}\] ";

/// A `timewolf` command isolated from the user's config and colour settings.
fn timewolf_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("timewolf").unwrap();
    cmd.env("TIMEWOLF_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("CLICOLOR_FORCE");
    cmd
}

#[test]
fn test_say_writes_raw_stdout() {
    let home = TempDir::new().unwrap();
    timewolf_cmd(&home)
        .args(["say", "acquisition started"])
        .assert()
        .success()
        .stdout("acquisition started\n")
        .stderr("");
}

#[test]
fn test_say_err_writes_formatted_stderr() {
    let home = TempDir::new().unwrap();
    let pattern = format!("{}collect: collector - disk not found\n$", FORMATTED_PREFIX);

    timewolf_cmd(&home)
        .args([
            "--sender",
            "collector",
            "--program-name",
            "collect",
            "say",
            "--err",
            "disk not found",
        ])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::is_match(pattern).unwrap());
}

#[test]
fn test_say_die_exits_with_reason() {
    let home = TempDir::new().unwrap();
    let pattern = format!("{}collect: collector - cannot continue\n$", FORMATTED_PREFIX);

    timewolf_cmd(&home)
        .args([
            "--sender",
            "collector",
            "--program-name",
            "collect",
            "say",
            "--die",
            "cannot continue",
        ])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::is_match(pattern).unwrap());
}

#[test]
fn test_verbose_only_respects_flag() {
    let home = TempDir::new().unwrap();
    timewolf_cmd(&home)
        .args(["say", "--verbose-only", "detail"])
        .assert()
        .success()
        .stdout("")
        .stderr("");

    timewolf_cmd(&home)
        .args(["-v", "--sender", "s", "say", "--verbose-only", "detail"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains(": s - detail\n"));
}

#[test]
fn test_verbose_from_config_file() {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join("config.json"),
        r#"{ "verbose": true, "sender": "from-config" }"#,
    )
    .unwrap();

    timewolf_cmd(&home)
        .args(["say", "--verbose-only", "detail"])
        .assert()
        .success()
        .stderr(predicate::str::contains(": from-config - detail"));
}

#[test]
fn test_tz_valid_name() {
    let home = TempDir::new().unwrap();
    timewolf_cmd(&home)
        .args(["tz", "America/New_York", "UTC"])
        .assert()
        .success()
        .stdout("America/New_York: valid\nUTC: valid\n");
}

#[test]
fn test_tz_unknown_name_fails() {
    let home = TempDir::new().unwrap();
    timewolf_cmd(&home)
        .args(["tz", "America/New_York", "Not/AZone"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Not/AZone: unknown"))
        .stderr(predicate::str::contains("1 unknown timezone name(s)"));
}

#[test]
fn test_tz_list() {
    let home = TempDir::new().unwrap();
    timewolf_cmd(&home)
        .args(["tz", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\nEurope/Berlin\n"))
        .stdout(predicate::str::contains("\nAmerica/New_York\n"));
}

#[test]
fn test_read_echoes_pairs() {
    let home = TempDir::new().unwrap();
    timewolf_cmd(&home)
        .arg("read")
        .write_stdin("a b\nc d e\n")
        .assert()
        .success()
        .stdout("a\tb\nc\td\n");
}

#[test]
fn test_read_stops_at_malformed_line() {
    let home = TempDir::new().unwrap();
    timewolf_cmd(&home)
        .arg("read")
        .write_stdin("a b\nonlyonetoken\nc d\n")
        .assert()
        .code(1)
        .stdout("a\tb\n")
        .stderr(predicate::str::contains("Malformed input on stdin"));
}

#[test]
fn test_credentials_from_explicit_store() {
    let home = TempDir::new().unwrap();
    let netrc = home.path().join("netrc");
    fs::write(
        &netrc,
        "machine example.com\n  login stored\n  password do-not-print\n",
    )
    .unwrap();

    timewolf_cmd(&home)
        .args(["credentials", "example.com", "--user", "bob", "--netrc"])
        .arg(&netrc)
        .assert()
        .success()
        .stdout("stored\n")
        .stderr(predicate::str::contains("do-not-print").not());
}

#[test]
fn test_credentials_default_entry() {
    let home = TempDir::new().unwrap();
    let netrc = home.path().join("netrc");
    fs::write(&netrc, "default login anonymous password guest@\n").unwrap();

    timewolf_cmd(&home)
        .args(["-v", "creds", "files.example.org", "-u", "bob", "--netrc"])
        .arg(&netrc)
        .assert()
        .success()
        .stdout("anonymous\n")
        .stderr(predicate::str::contains("guest@").not());
}

#[cfg(unix)]
#[test]
fn test_credentials_from_home_netrc() {
    use std::os::unix::fs::PermissionsExt;

    let home = TempDir::new().unwrap();
    let netrc = home.path().join(".netrc");
    fs::write(&netrc, "machine example.com login stored password pw\n").unwrap();
    fs::set_permissions(&netrc, fs::Permissions::from_mode(0o600)).unwrap();

    timewolf_cmd(&home)
        .env("HOME", home.path())
        .args(["credentials", "example.com", "--user", "bob"])
        .assert()
        .success()
        .stdout("stored\n");
}

#[test]
fn test_config_shows_effective_values() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("config.json"), r#"{ "sender": "triage" }"#).unwrap();

    timewolf_cmd(&home)
        .args(["--program-name", "dftimewolf", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""sender": "triage""#))
        .stdout(predicate::str::contains(r#""program_name": "dftimewolf""#))
        .stdout(predicate::str::contains(r#""verbose": false"#));
}
