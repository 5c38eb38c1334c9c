use predicates::prelude::*;
use test_support::{github_fixture_env, pull_metrics};

fn github_stdout(extra: &[&str]) -> String {
  let (_cwd, mut cmd) = pull_metrics();
  let out = cmd.envs(github_fixture_env()).args(["2024-02-28", "2024-03-15"]).args(extra).output().unwrap();
  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
  String::from_utf8(out.stdout).unwrap()
}

fn row<'a>(stdout: &'a str, first_cell: &str) -> &'a str {
  stdout
    .lines()
    .find(|l| l.split('|').nth(1).map(str::trim) == Some(first_cell))
    .unwrap_or_else(|| panic!("no row for {first_cell} in:\n{stdout}"))
}

#[test]
fn counts_only_prs_created_inside_the_window() {
  let stdout = github_stdout(&[]);
  assert!(stdout.starts_with("4 PRs were created between 2024-02-28 00:00:00 UTC - 2024-03-15 23:59:59 UTC\n"));

  // carol is newer than the window, dave is older and stops the walk before erin's page
  assert!(!stdout.contains("carol"));
  assert!(!stdout.contains("dave"));
  assert!(!stdout.contains("erin"));
}

#[test]
fn rows_are_per_login_with_display_names() {
  let stdout = github_stdout(&[]);
  assert!(row(&stdout, "alice").contains("Alice Liddell"));
  assert!(row(&stdout, "bob").contains("Bob Builder"));
  // deleted author: no lookup, empty name
  let ghost: Vec<&str> = row(&stdout, "ghost").split('|').map(str::trim).collect();
  assert_eq!(ghost[2], "");

  let order: Vec<usize> = ["alice", "bob", "ghost", "Averages"]
    .iter()
    .map(|cell| stdout.lines().position(|l| l == row(&stdout, cell)).unwrap())
    .collect();
  assert!(order.windows(2).all(|w| w[0] < w[1]), "unexpected row order: {order:?}");
}

#[test]
fn merges_after_the_window_count_as_open_by_default() {
  let stdout = github_stdout(&[]);
  let alice: Vec<&str> = row(&stdout, "alice").split('|').map(str::trim).collect();
  // ID | Name | Total | Merged | Merged % | Open | Added | Removed | Files
  assert_eq!(&alice[3..10], &["2", "1", "50.0%", "1", "140", "30", "7"]);

  let ghost: Vec<&str> = row(&stdout, "ghost").split('|').map(str::trim).collect();
  assert_eq!(&ghost[3..7], &["1", "0", "0.0%", "0"]);
}

#[test]
fn loose_status_counts_current_merge_state() {
  let stdout = github_stdout(&["--loose-status"]);
  let alice: Vec<&str> = row(&stdout, "alice").split('|').map(str::trim).collect();
  assert_eq!(&alice[3..7], &["2", "2", "100.0%", "0"]);
}

#[test]
fn averages_footer_uses_one_decimal() {
  let stdout = github_stdout(&[]);
  let averages: Vec<&str> = row(&stdout, "Averages").split('|').map(str::trim).collect();
  assert_eq!(averages[3], "1.3");
  assert_eq!(averages[4], "0.3");
  assert_eq!(&averages[7..10], &["50.7", "20.0", "3.7"]);
}

#[test]
fn graphql_errors_abort_the_run() {
  let (_cwd, mut cmd) = pull_metrics();
  cmd
    .envs(github_fixture_env())
    .env("PM_TEST_GITHUB_PAGES_JSON", r#"[{"data":null,"errors":[{"message":"Bad credentials"}]}]"#)
    .args(["2024-02-28", "2024-03-15"])
    .assert()
    .failure()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("Bad credentials"));
}
