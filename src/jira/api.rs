// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Jira REST issue search with embedded changelogs, windowed server-side by JQL
// role: jira/api
// inputs: JiraSettings (base URL, basic credentials, project); SearchRequest; PM_TEST_JIRA_PAGES_JSON in tests
// outputs: SearchPage (total + issues with changelog histories)
// side_effects: POST {base}/rest/api/2/search (HTTP backend only)
// invariants: `total` is the match count across all pages, repeated on every page
// errors: Transport, status and decode failures propagate (callers treat them as fatal)
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;

use crate::config::JiraSettings;
use crate::http;
use crate::window::DateWindow;

pub const PAGE_SIZE: usize = 50;
pub const SEARCH_PATH: &str = "/rest/api/2/search";

/// JQL selecting issues moved into "In Progress" during the window, epics and sub-tasks excluded.
pub fn in_progress_jql(project: &str, window: &DateWindow) -> String {
  let (start, end) = window.date_strings();
  format!(
    "project = \"{}\" and status changed DURING ({}, {}) TO \"In Progress\" and issuetype not in (Epic, sub-task) ORDER BY assignee ASC",
    project, start, end
  )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
  pub jql: String,
  pub start_at: usize,
  pub max_results: usize,
}

impl SearchRequest {
  pub fn first_page(jql: String) -> Self {
    Self { jql, start_at: 0, max_results: PAGE_SIZE }
  }

  pub fn body(&self) -> serde_json::Value {
    json!({
      "fields": ["summary", "assignee", "issuetype"],
      "expand": ["changelog"],
      "jql": self.jql,
      "startAt": self.start_at,
      "maxResults": self.max_results,
    })
  }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SearchPage {
  #[serde(default)]
  pub total: i64,
  #[serde(default)]
  pub issues: Vec<Issue>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Issue {
  #[serde(default)]
  pub key: String,
  #[serde(default)]
  pub fields: IssueFields,
  #[serde(default)]
  pub changelog: Changelog,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct IssueFields {
  pub summary: Option<String>,
  pub assignee: Option<JiraUser>,
  #[serde(rename = "issuetype")]
  pub issue_type: Option<IssueType>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct JiraUser {
  #[serde(rename = "displayName", default)]
  pub display_name: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct IssueType {
  #[serde(default)]
  pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Changelog {
  /// Oldest first, as returned by the search endpoint.
  #[serde(default)]
  pub histories: Vec<History>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct History {
  pub author: Option<JiraUser>,
  #[serde(default)]
  pub items: Vec<ChangeItem>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ChangeItem {
  #[serde(default)]
  pub field: String,
  #[serde(rename = "toString")]
  pub to_value: Option<String>,
}

impl Issue {
  pub fn type_name(&self) -> &str {
    self.fields.issue_type.as_ref().map(|t| t.name.as_str()).unwrap_or_default()
  }
}

// --- Trait seam for Jira API ---
pub trait JiraApi {
  fn search(&self, request: &SearchRequest) -> Result<SearchPage>;
}

pub struct JiraHttpApi {
  agent: ureq::Agent,
  search_url: String,
  authorization: String,
}

impl JiraHttpApi {
  pub fn new(settings: &JiraSettings) -> Self {
    Self {
      agent: http::agent(),
      search_url: format!("{}{}", settings.base_url, SEARCH_PATH),
      authorization: http::basic(&settings.user, &settings.token),
    }
  }
}

impl JiraApi for JiraHttpApi {
  fn search(&self, request: &SearchRequest) -> Result<SearchPage> {
    let v = http::post_json(&self.agent, &self.search_url, &self.authorization, &request.body())?;
    serde_json::from_value(v).context("decoding Jira search response")
  }
}

const ENV_PAGES: &str = "PM_TEST_JIRA_PAGES_JSON";

/// Serves search responses from `PM_TEST_JIRA_PAGES_JSON`, one array element per page,
/// selected by `startAt / maxResults`.
struct JiraEnvApi;

impl JiraApi for JiraEnvApi {
  fn search(&self, request: &SearchRequest) -> Result<SearchPage> {
    let raw = std::env::var(ENV_PAGES).unwrap_or_else(|_| "[]".to_string());
    let mut pages: Vec<serde_json::Value> = serde_json::from_str(&raw).with_context(|| format!("parsing {ENV_PAGES}"))?;
    let index = request.start_at / request.max_results.max(1);

    // Past the last page the server still reports the match count.
    if index >= pages.len() {
      let total = pages.last().and_then(|p| p.get("total")).and_then(serde_json::Value::as_i64).unwrap_or(0);
      return Ok(SearchPage { total, issues: Vec::new() });
    }

    serde_json::from_value(pages.swap_remove(index)).context("decoding Jira search response")
  }
}

/// Build the client for a run; fixture env vars select the env-backed backend.
pub fn build_api(settings: &JiraSettings) -> Box<dyn JiraApi> {
  if std::env::var(ENV_PAGES).is_ok() {
    tracing::debug!("using fixture-backed Jira API");
    Box::new(JiraEnvApi)
  } else {
    Box::new(JiraHttpApi::new(settings))
  }
}
