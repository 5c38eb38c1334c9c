use predicates::prelude::*;
use test_support::{FIXED_NOW, full_fixture_env, pull_metrics};

#[test]
fn missing_start_is_a_usage_error() {
  let (_cwd, mut cmd) = pull_metrics();
  cmd
    .assert()
    .failure()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("<START>"));
}

#[test]
fn malformed_start_fails_before_any_report() {
  let (_cwd, mut cmd) = pull_metrics();
  cmd
    .envs(full_fixture_env())
    .arg("28/02/2024")
    .assert()
    .failure()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("parsing start date"));
}

#[test]
fn start_after_end_is_rejected() {
  let (_cwd, mut cmd) = pull_metrics();
  cmd
    .args(["2024-03-15", "2024-02-28"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("is after end"));
}

#[test]
fn malformed_end_falls_back_to_now() {
  let (_cwd, mut cmd) = pull_metrics();
  cmd
    .envs(full_fixture_env())
    .args(["2024-02-28", "not-a-date", "--now-override", FIXED_NOW])
    .assert()
    .success()
    .stdout(predicate::str::contains("between 2024-02-28 00:00:00 UTC - 2024-03-20 12:00:00 UTC"));
}

#[test]
fn help_lists_public_flags() {
  let (_cwd, mut cmd) = pull_metrics();
  cmd
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("--require-github"))
    .stdout(predicate::str::contains("--loose-status"))
    .stdout(predicate::str::contains("--gen-man").not());
}
