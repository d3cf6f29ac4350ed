//! CLI integration tests.
//!
//! Each test runs the built binary with an isolated home directory so no
//! user config leaks in.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn slideway(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("slideway").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("SLIDEWAY_CONFIG")
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("SLIDEWAY_LOG");
    cmd
}

#[test]
fn routes_lists_default_table_in_order() {
    let home = TempDir::new().unwrap();
    slideway(&home)
        .arg("routes")
        .assert()
        .success()
        .stdout(predicate::str::contains("  0  /\n"))
        .stdout(predicate::str::contains("  9  /about"))
        .stdout(predicate::str::contains(" 10  /contact"));
}

#[test]
fn routes_reads_site_config() {
    let home = TempDir::new().unwrap();
    let site = TempDir::new().unwrap();
    fs::write(
        site.path().join("slideway.toml"),
        "routes = [\"/\", \"/work\", \"/cv\"]\n",
    )
    .unwrap();

    slideway(&home)
        .args(["routes", "--json", "--site"])
        .arg(site.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"/work\""))
        .stdout(predicate::str::contains("/saudade").not());
}

#[test]
fn invalid_site_config_fails() {
    let home = TempDir::new().unwrap();
    let site = TempDir::new().unwrap();
    fs::write(site.path().join("slideway.toml"), "routes = [\"nope\"]\n").unwrap();

    slideway(&home)
        .arg("routes")
        .arg("--site")
        .arg(site.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn plan_reports_direction_and_capped_scroll() {
    let home = TempDir::new().unwrap();
    slideway(&home)
        .args(["plan", "/", "/about", "--scroll", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("forward"))
        .stdout(predicate::str::contains("wait 400ms"))
        .stdout(predicate::str::contains("settle:    700ms"));
}

#[test]
fn plan_json_backward() {
    let home = TempDir::new().unwrap();
    let out = slideway(&home)
        .args(["plan", "/contact", "/", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let plan: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(plan["direction"], -1);
    assert_eq!(plan["scroll_wait_ms"], 10);
    assert_eq!(plan["accepted"], true);
}

#[test]
fn plan_same_route_does_nothing() {
    let home = TempDir::new().unwrap();
    slideway(&home)
        .args(["plan", "/about", "/about"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to do"));
}

#[test]
fn plan_rejects_malformed_route() {
    let home = TempDir::new().unwrap();
    slideway(&home)
        .args(["plan", "/", "about"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid 'to' route"));
}

#[test]
fn simulate_drops_second_rapid_request() {
    let home = TempDir::new().unwrap();
    slideway(&home)
        .args(["simulate", "/saudade", "/amped-up", "--transition-ms", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("accepted / -> /saudade"))
        .stdout(predicate::str::contains(
            "ignored /amped-up (navigation already in progress)",
        ))
        .stdout(predicate::str::contains("final route: /saudade"));
}

#[test]
fn simulate_json_has_journal_and_final_state() {
    let home = TempDir::new().unwrap();
    let out = slideway(&home)
        .args([
            "simulate",
            "/lumen",
            "--scroll",
            "200",
            "--transition-ms",
            "0",
            "--json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(report["final_state"]["current_path"], "/lumen");
    assert_eq!(report["final_state"]["is_navigating"], false);
    let journal = report["journal"].as_array().unwrap();
    assert!(journal
        .iter()
        .any(|e| e["type"] == "scroll_requested" && e["wait_ms"] == 100));
    assert!(journal.iter().any(|e| e["type"] == "committed"));
}

#[test]
fn config_init_writes_site_file_once() {
    let home = TempDir::new().unwrap();
    let site = TempDir::new().unwrap();

    slideway(&home)
        .args(["config", "init", "--site"])
        .arg(site.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let written = fs::read_to_string(site.path().join("slideway.toml")).unwrap();
    assert!(written.contains("/saudade"));

    slideway(&home)
        .args(["config", "init", "--site"])
        .arg(site.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    slideway(&home)
        .args(["config", "init", "--force", "--site"])
        .arg(site.path())
        .assert()
        .success();
}

#[test]
fn config_show_merges_global_timing() {
    let home = TempDir::new().unwrap();
    let global = home.path().join("custom.toml");
    fs::write(&global, "[timing]\ntransition_ms = 250\n").unwrap();

    slideway(&home)
        .env("SLIDEWAY_CONFIG", &global)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("transition_ms:     250"))
        .stdout(predicate::str::contains("unknown_route_policy: forward"));
}

#[test]
fn quiet_suppresses_output() {
    let home = TempDir::new().unwrap();
    slideway(&home)
        .args(["routes", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn completion_generates_script() {
    let home = TempDir::new().unwrap();
    slideway(&home)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("slideway"));
}
