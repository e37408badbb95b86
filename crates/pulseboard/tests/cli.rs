use assert_cmd::prelude::*;

use predicates::prelude::*;
use predicates::str::contains;
use std::process::Command;
use std::sync::mpsc;
use tokio::net::TcpListener;

use ledger::seed_fixtures;
use pulseboard::server::startup::serve_on;
use pulseboard::server::state::AppState;

/// Start a seeded server on an ephemeral port and return its base URL.
/// The server thread lives until the test process exits.
fn spawn_server() -> String {
  let (tx, rx) = mpsc::channel();
  std::thread::spawn(move || {
    let runtime = tokio::runtime::Runtime::new().expect("runtime starts");
    runtime.block_on(async move {
      let state = AppState::in_memory();
      seed_fixtures(&state.ledger).await.expect("fixtures seed");
      let listener = TcpListener::bind("127.0.0.1:0").await.expect("ephemeral port binds");
      tx.send(listener.local_addr().expect("bound address")).expect("address sent");
      serve_on(listener, state).await.expect("server runs");
    });
  });
  format!("http://{}", rx.recv().expect("server address"))
}

/// Helper to create a Command for the `pulseboard` binary pointed at a server
fn pulseboard_cmd(url: &str) -> Command {
  let mut cmd = Command::cargo_bin("pulseboard").expect("binary exists");
  cmd.env("NO_COLOR", "1").args(["--url", url]);
  cmd
}

#[test]
fn test_health() {
  let url = spawn_server();
  pulseboard_cmd(&url).arg("health").assert().success().stdout(contains("healthy").and(contains("v1.0.0")));
}

#[test]
fn test_overview_and_details() {
  let url = spawn_server();

  pulseboard_cmd(&url)
    .arg("overview")
    .assert()
    .success()
    .stdout(contains("Sprint Progress").and(contains("73%")).and(contains("High Risk")));

  pulseboard_cmd(&url)
    .arg("schedule")
    .assert()
    .success()
    .stdout(contains("Sprint 12").and(contains("65 / 89 points completed (73%)")));

  pulseboard_cmd(&url)
    .arg("budget")
    .assert()
    .success()
    .stdout(contains("$27,500").and(contains("At Risk")).and(contains("Jan")));
}

#[test]
fn test_risk_listing() {
  let url = spawn_server();

  pulseboard_cmd(&url)
    .args(["risks", "--min-severity", "4"])
    .assert()
    .success()
    .stdout(contains("3 total").and(contains("High (4)")).and(contains("Security Compliance").not()));

  pulseboard_cmd(&url)
    .args(["risks", "--limit", "-1"])
    .assert()
    .success()
    .stdout(contains("4 total"));
}

#[test]
fn test_risk_lifecycle() {
  let url = spawn_server();

  pulseboard_cmd(&url)
    .args(["risk", "add", "Vendor Lock-in", "--severity", "5", "--owner", "Priya"])
    .assert()
    .success()
    .stdout(contains("Added risk"));

  pulseboard_cmd(&url)
    .arg("risks")
    .assert()
    .success()
    .stdout(contains("6 total").and(contains("Vendor Lock-in")).and(contains("owner: Priya")));

  pulseboard_cmd(&url)
    .args(["risk", "add", "Too severe", "--severity", "9"])
    .assert()
    .failure()
    .stderr(contains("Failed to create risk"));

  pulseboard_cmd(&url)
    .args(["risk", "delete", "6f9c1c8e-0000-4000-8000-000000000000"])
    .assert()
    .failure()
    .stderr(contains("Risk not found"));

  pulseboard_cmd(&url).args(["risk", "delete", "not-a-uuid"]).assert().failure();
}

#[test]
fn test_insights() {
  let url = spawn_server();

  pulseboard_cmd(&url)
    .arg("insights")
    .assert()
    .success()
    .stdout(contains("Critical API Dependency Risk").and(contains("budgetEfficiency")));

  // The seeded report is fresh, so regenerating returns it unchanged
  pulseboard_cmd(&url)
    .args(["insights", "--regenerate"])
    .assert()
    .success()
    .stdout(contains("Critical API Dependency Risk"));
}

#[test]
fn test_export() {
  let url = spawn_server();

  pulseboard_cmd(&url)
    .args(["export", "--format", "csv"])
    .assert()
    .success()
    .stdout(contains("section,item,field,value").and(contains("budget,,remainingBudget,27500")));

  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("dashboard.json");
  pulseboard_cmd(&url)
    .args(["export", "--output"])
    .arg(&path)
    .assert()
    .success()
    .stdout(contains("Exported dashboard"));

  let exported: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
  assert_eq!(exported["schedule"]["completionPercentage"], 73);
  assert_eq!(exported["risks"]["summary"]["total"], 5);
}

#[test]
fn test_unreachable_server() {
  pulseboard_cmd("http://127.0.0.1:9")
    .args(["--timeout", "2", "health"])
    .assert()
    .failure();
}
