// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Read GitHub and Jira connection settings from the environment (optionally seeded by a .env file)
// role: config/environment
// inputs: Variable lookup function (process env in production, a map in tests); ./.env when present
// outputs: GithubSettings / JiraSettings, or the name of the first missing variable
// side_effects: load_env_file mutates the process environment from ./.env
// invariants: Empty or whitespace-only values count as missing; variables are checked in a fixed order
// errors: MissingSetting names the variable; callers decide between skip-with-notice and fatal
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{var} not provided")]
pub struct MissingSetting {
  pub var: &'static str,
}

#[derive(Clone, PartialEq, Eq)]
pub struct GithubSettings {
  pub token: String,
  pub owner: String,
  pub repo: String,
}

// Token stays out of logs.
impl std::fmt::Debug for GithubSettings {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("GithubSettings")
      .field("token", &"<redacted>")
      .field("owner", &self.owner)
      .field("repo", &self.repo)
      .finish()
  }
}

impl GithubSettings {
  pub fn from_env() -> Result<Self, MissingSetting> {
    Self::from_lookup(|k| std::env::var(k).ok())
  }

  pub fn from_lookup<F>(lookup: F) -> Result<Self, MissingSetting>
  where
    F: Fn(&str) -> Option<String>,
  {
    Ok(Self {
      token: required(&lookup, "GITHUB_TOKEN")?,
      owner: required(&lookup, "GITHUB_OWNER")?,
      repo: required(&lookup, "GITHUB_REPO")?,
    })
  }
}

#[derive(Clone, PartialEq, Eq)]
pub struct JiraSettings {
  pub base_url: String,
  pub user: String,
  pub token: String,
  pub project: String,
}

impl std::fmt::Debug for JiraSettings {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("JiraSettings")
      .field("base_url", &self.base_url)
      .field("user", &self.user)
      .field("token", &"<redacted>")
      .field("project", &self.project)
      .finish()
  }
}

impl JiraSettings {
  pub fn from_env() -> Result<Self, MissingSetting> {
    Self::from_lookup(|k| std::env::var(k).ok())
  }

  pub fn from_lookup<F>(lookup: F) -> Result<Self, MissingSetting>
  where
    F: Fn(&str) -> Option<String>,
  {
    let base_url = required(&lookup, "JIRA_BASE_URL")?;

    Ok(Self {
      base_url: base_url.trim_end_matches('/').to_string(),
      user: required(&lookup, "JIRA_USER")?,
      token: required(&lookup, "JIRA_TOKEN")?,
      project: required(&lookup, "JIRA_PROJECT")?,
    })
  }
}

fn required<F>(lookup: &F, var: &'static str) -> Result<String, MissingSetting>
where
  F: Fn(&str) -> Option<String>,
{
  match lookup(var) {
    Some(v) if !v.trim().is_empty() => Ok(v),
    _ => Err(MissingSetting { var }),
  }
}

/// Load `.env` from the working directory if it exists.
pub fn load_env_file() -> Result<()> {
  if Path::new(".env").exists() {
    dotenvy::dotenv().context("loading .env")?;
    tracing::info!("loaded environment variables from .env");
  }

  Ok(())
}
