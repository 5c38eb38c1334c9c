use predicates::prelude::*;
use test_support::{jira_fixture_env, pull_metrics};

fn cells(stdout: &str, name: &str) -> Vec<String> {
  stdout
    .lines()
    .find(|l| l.split('|').nth(1).map(str::trim) == Some(name))
    .unwrap_or_else(|| panic!("no row for {name} in:\n{stdout}"))
    .split('|')
    .map(|c| c.trim().to_string())
    .collect()
}

#[test]
fn counts_latest_in_progress_transition_per_person() {
  let (_cwd, mut cmd) = pull_metrics();
  let out = cmd.envs(jira_fixture_env()).args(["2024-02-28", "2024-03-15"]).output().unwrap();
  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
  let stdout = String::from_utf8(out.stdout).unwrap();

  let jira = stdout.split("\n\n").nth(1).unwrap();
  assert!(jira.starts_with("3 tickets were moved into progress between 2024-02-28 00:00:00 UTC - 2024-03-15 23:59:59 UTC\n"));
  assert!(jira.contains("Spike In Progress"));

  assert_eq!(&cells(jira, "Ann Lee")[2..4], &["2", "1"]);
  assert_eq!(&cells(jira, "Cat Moss")[2..4], &["1", "0"]);
  // Ben moved OPS-3 first, but Cat made the latest transition
  assert!(!jira.contains("Ben Ode"));
  assert!(!jira.contains("Averages"));
}

#[test]
fn malformed_search_response_aborts() {
  let (_cwd, mut cmd) = pull_metrics();
  cmd
    .envs(jira_fixture_env())
    .env("PM_TEST_JIRA_PAGES_JSON", r#"[{"total":"many","issues":[]}]"#)
    .args(["2024-02-28", "2024-03-15"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("decoding Jira search response"));
}
