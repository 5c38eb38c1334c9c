//! test-support: helpers for the pull-metrics CLI tests.
//!
//! ```rust
//! use test_support::{pull_metrics, read_fixture_text};
//!
//! #[test]
//! fn example() {
//!     let (_cwd, mut cmd) = pull_metrics();
//!     cmd.env("PM_TEST_JIRA_PAGES_JSON", read_fixture_text("jira_pages.json"));
//! }
//! ```

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, EnvFilter};

use std::env;
use std::path::{Path, PathBuf};

/// Fixed "now" passed through `--now-override` so open-ended windows are reproducible.
pub const FIXED_NOW: &str = "2024-03-20T12:00:00Z";

/// Initialize `tracing` once, honoring `RUST_LOG` and writing via the test writer.
pub fn init_tracing() {
    static INIT: Lazy<()> = Lazy::new(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("warn,test=info"))
            .unwrap();
        let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
    });
    Lazy::force(&INIT);
}

/// Return the path to the repository's `tests/fixtures` directory.
///
/// This crate lives in `<repo>/tests/support`, so fixtures sit one level up.
pub fn fixtures_dir() -> PathBuf {
    let support_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    support_dir
        .parent()
        .map(|tests| tests.join("fixtures"))
        .unwrap_or_else(|| support_dir.join("fixtures"))
}

/// Read a UTF-8 text fixture into a string.
pub fn read_fixture_text<P: AsRef<Path>>(rel_path: P) -> String {
    let path = fixtures_dir().join(rel_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
}

/// Deserialize a JSON fixture into `T` (enable `serde` feature).
#[cfg(feature = "serde")]
pub fn read_fixture_json<T, P>(rel_path: P) -> T
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = fixtures_dir().join(rel_path);
    let file = std::fs::File::open(&path)
        .unwrap_or_else(|e| panic!("failed to open fixture {}: {e}", path.display()));
    serde_json::from_reader::<_, T>(file)
        .unwrap_or_else(|e| panic!("failed to parse JSON fixture {}: {e}", path.display()))
}

/// Create a temp directory that deletes on drop.
pub fn tempdir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create tempdir")
}

/// Run a binary target with `assert_cmd`, returning the ready-to-run `Command`.
pub fn cmd_bin(bin: &str) -> assert_cmd::Command {
    init_tracing();
    assert_cmd::Command::cargo_bin(bin).expect("binary target not found")
}

/// A `pull-metrics` command isolated from the caller's environment.
///
/// The environment is cleared (no stray GITHUB_* / JIRA_* settings, no RUST_LOG) and the
/// working directory is a fresh temp dir, so no `.env` file is picked up unless the test
/// writes one there. Keep the returned `TempDir` alive until the command has run.
pub fn pull_metrics() -> (tempfile::TempDir, assert_cmd::Command) {
    let cwd = tempdir();
    let mut cmd = cmd_bin("pull-metrics");
    cmd.env_clear().current_dir(cwd.path());
    (cwd, cmd)
}

/// Settings for both reports plus the fixture-backed API payloads.
pub fn full_fixture_env() -> Vec<(&'static str, String)> {
    let mut vars = github_fixture_env();
    vars.extend(jira_fixture_env());
    vars
}

pub fn github_fixture_env() -> Vec<(&'static str, String)> {
    vec![
        ("GITHUB_TOKEN", "gh-test-token".to_string()),
        ("GITHUB_OWNER", "acme".to_string()),
        ("GITHUB_REPO", "widgets".to_string()),
        ("PM_TEST_GITHUB_PAGES_JSON", read_fixture_text("github_pages.json")),
        ("PM_TEST_GITHUB_USERS_JSON", read_fixture_text("github_users.json")),
    ]
}

pub fn jira_fixture_env() -> Vec<(&'static str, String)> {
    vec![
        ("JIRA_BASE_URL", "https://jira.example.test/".to_string()),
        ("JIRA_USER", "bot@example.test".to_string()),
        ("JIRA_TOKEN", "jira-test-token".to_string()),
        ("JIRA_PROJECT", "OPS".to_string()),
        ("PM_TEST_JIRA_PAGES_JSON", read_fixture_text("jira_pages.json")),
    ]
}
