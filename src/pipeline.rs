// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Run the GitHub and Jira reports end to end (settings -> fetch -> aggregate -> render -> write)
// role: orchestration/pipeline
// inputs: EffectiveConfig, environment settings, injected API clients, output writer
// outputs: Summary line + table per report written to `out`
// side_effects: Network calls through the API clients; writes to `out`
// invariants:
// - Missing settings print a skip notice and leave the other report untouched (unless GitHub is required)
// - Fetch/lookup failures propagate and abort the whole run; nothing partial is printed for that report's table
// - Reports run sequentially: GitHub first, then Jira
// errors: Propagated with context; main turns them into a non-zero exit
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::Write;

use anyhow::{Context, Result};

use crate::cli::EffectiveConfig;
use crate::config::{GithubSettings, JiraSettings, MissingSetting};
use crate::github::aggregate::{PullRequestAggregator, StatusRule};
use crate::github::api::{self as github_api, GithubApi, PullRequestQuery};
use crate::github::fetch as github_fetch;
use crate::jira::aggregate::InProgressAggregator;
use crate::jira::api::{self as jira_api, JiraApi, SearchRequest};
use crate::jira::fetch as jira_fetch;
use crate::render;
use crate::window::DateWindow;

/// Turn a settings lookup into "run", "skip with notice" or "fail".
pub fn resolve_settings<T>(settings: Result<T, MissingSetting>, required: bool, out: &mut dyn Write) -> Result<Option<T>> {
  match settings {
    Ok(s) => Ok(Some(s)),
    Err(missing) if required => Err(missing).context("required configuration is missing"),
    Err(missing) => {
      tracing::warn!(var = missing.var, "skipping report");
      writeln!(out, "{}", render::skip_notice(missing.var))?;
      Ok(None)
    }
  }
}

pub fn run_all(cfg: &EffectiveConfig, out: &mut dyn Write) -> Result<()> {
  run_github(cfg, out)?;
  writeln!(out)?;
  run_jira(cfg, out)
}

pub fn run_github(cfg: &EffectiveConfig, out: &mut dyn Write) -> Result<()> {
  let Some(settings) = resolve_settings(GithubSettings::from_env(), cfg.require_github, out)? else {
    return Ok(());
  };

  let api = github_api::build_api(&settings);
  github_report(api.as_ref(), &settings, &cfg.window, cfg.status_rule, out)
}

pub fn github_report(
  api: &dyn GithubApi,
  settings: &GithubSettings,
  window: &DateWindow,
  rule: StatusRule,
  out: &mut dyn Write,
) -> Result<()> {
  // Phase 1: walk pages newest-first, folding in-window PRs as they arrive
  let mut agg = PullRequestAggregator::new(window.end(), rule);
  let query = PullRequestQuery::first_page(&settings.owner, &settings.repo);
  let pages = github_fetch::for_each_in_window(api, query, window, |pr| agg.record(&pr))?;
  tracing::info!(pages, accepted = agg.accepted(), "pull request walk finished");

  writeln!(out, "{}", render::github_summary(agg.accepted(), window))?;

  // Phase 2: names, then render
  let rows = agg.finish(api)?;
  write!(out, "{}", render::github_table(&rows)?)?;

  Ok(())
}

pub fn run_jira(cfg: &EffectiveConfig, out: &mut dyn Write) -> Result<()> {
  let Some(settings) = resolve_settings(JiraSettings::from_env(), false, out)? else {
    return Ok(());
  };

  let api = jira_api::build_api(&settings);
  jira_report(api.as_ref(), &settings, &cfg.window, out)
}

pub fn jira_report(api: &dyn JiraApi, settings: &JiraSettings, window: &DateWindow, out: &mut dyn Write) -> Result<()> {
  let request = SearchRequest::first_page(jira_api::in_progress_jql(&settings.project, window));

  let mut agg = InProgressAggregator::new();
  let total = jira_fetch::for_each_issue(api, request, |issue| agg.record_issue(&issue))?;
  tracing::info!(total, "Jira search finished");

  writeln!(out, "{}", render::jira_summary(total, window))?;
  write!(out, "{}", render::jira_table(&agg.finish())?)?;

  Ok(())
}
