use predicates::prelude::*;
use test_support::{jira_fixture_env, pull_metrics, read_fixture_json};

#[test]
fn no_settings_skips_both_reports() {
  let (_cwd, mut cmd) = pull_metrics();
  let out = cmd.args(["2024-02-28", "2024-03-15"]).output().unwrap();

  assert!(out.status.success());
  assert_eq!(
    String::from_utf8_lossy(&out.stdout),
    "GITHUB_TOKEN not provided. Skipping this report.\n\nJIRA_BASE_URL not provided. Skipping this report.\n"
  );
}

#[test]
fn missing_github_setting_is_named() {
  let (_cwd, mut cmd) = pull_metrics();
  cmd
    .envs([("GITHUB_TOKEN", "t"), ("GITHUB_OWNER", "acme")])
    .args(["2024-02-28", "2024-03-15"])
    .assert()
    .success()
    .stdout(predicate::str::starts_with("GITHUB_REPO not provided. Skipping this report."));
}

#[test]
fn github_skip_still_runs_jira() {
  let (_cwd, mut cmd) = pull_metrics();
  cmd
    .envs(jira_fixture_env())
    .args(["2024-02-28", "2024-03-15"])
    .assert()
    .success()
    .stdout(predicate::str::starts_with("GITHUB_TOKEN not provided. Skipping this report.\n\n3 tickets"));
}

#[test]
fn require_github_turns_skip_into_failure() {
  let (_cwd, mut cmd) = pull_metrics();
  cmd
    .envs(jira_fixture_env())
    .args(["2024-02-28", "2024-03-15", "--require-github"])
    .assert()
    .failure()
    .stdout(predicate::str::contains("tickets").not())
    .stderr(predicate::str::contains("GITHUB_TOKEN not provided"));
}

#[test]
fn settings_can_come_from_dotenv_file() {
  let (cwd, mut cmd) = pull_metrics();
  std::fs::write(
    cwd.path().join(".env"),
    "JIRA_BASE_URL=https://jira.example.test\nJIRA_USER=bot@example.test\nJIRA_TOKEN=secret\nJIRA_PROJECT=OPS\n",
  )
  .unwrap();
  let pages: serde_json::Value = read_fixture_json("jira_pages.json");

  cmd
    .env("PM_TEST_JIRA_PAGES_JSON", pages.to_string())
    .args(["2024-02-28", "2024-03-15"])
    .assert()
    .success()
    .stdout(predicate::str::contains("3 tickets were moved into progress"));
}
