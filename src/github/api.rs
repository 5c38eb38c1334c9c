// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: GitHub GraphQL access for pull request pages and user display names
// role: github/api
// inputs: GithubSettings (bearer token, owner, repo); typed PullRequestQuery; PM_TEST_GITHUB_* fixtures in tests
// outputs: PullRequestPage (records + cursor state) and optional display names
// side_effects: Network calls to api.github.com/graphql (HTTP backend only)
// invariants:
// - A query with cursor None always means "first page"
// - GraphQL `errors` or a missing `data` payload is an error, never an empty page
// - Deleted authors (null) are reported as the `ghost` login
// errors: Transport, status, GraphQL and decode failures all propagate (callers treat them as fatal)
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::config::GithubSettings;
use crate::ext::serde_json::JsonFetch;
use crate::http;
use crate::model::{GHOST_LOGIN, PullRequestRecord};

pub const GRAPHQL_URL: &str = "https://api.github.com/graphql";
pub const PAGE_SIZE: usize = 100;

const PULL_REQUESTS_QUERY: &str = r#"
query($owner: String!, $repo: String!, $first: Int!, $cursor: String) {
  repository(owner: $owner, name: $repo) {
    pullRequests(first: $first, orderBy: {direction: DESC, field: CREATED_AT}, after: $cursor) {
      nodes {
        author { login }
        title
        createdAt
        additions
        deletions
        changedFiles
        totalCommentsCount
        closed
        closedAt
        merged
        mergedAt
      }
      pageInfo { hasNextPage endCursor }
    }
  }
}
"#;

const USER_NAME_QUERY: &str = r#"
query($login: String!) {
  user(login: $login) { name }
}
"#;

/// Variables for one pull request page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestQuery {
  pub owner: String,
  pub repo: String,
  pub first: usize,
  pub cursor: Option<String>,
}

impl PullRequestQuery {
  pub fn first_page(owner: &str, repo: &str) -> Self {
    Self { owner: owner.to_string(), repo: repo.to_string(), first: PAGE_SIZE, cursor: None }
  }

  #[cfg(test)]
  pub fn with_page_size(mut self, first: usize) -> Self {
    self.first = first;
    self
  }

  fn variables(&self) -> serde_json::Value {
    json!({
      "owner": self.owner,
      "repo": self.repo,
      "first": self.first,
      "cursor": self.cursor,
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestPage {
  pub records: Vec<PullRequestRecord>,
  pub has_next_page: bool,
  pub end_cursor: Option<String>,
}

// --- Trait seam for GitHub API ---
pub trait GithubApi {
  fn pull_requests(&self, query: &PullRequestQuery) -> Result<PullRequestPage>;
  /// `Ok(None)` when the user has no public name set.
  fn user_name(&self, login: &str) -> Result<Option<String>>;
}

// --- Wire shapes ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullRequestConnection {
  #[serde(default)]
  nodes: Vec<Option<PullRequestNode>>,
  page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
  has_next_page: bool,
  end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Actor {
  login: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullRequestNode {
  author: Option<Actor>,
  #[serde(default)]
  title: String,
  created_at: DateTime<Utc>,
  #[serde(default)]
  additions: i64,
  #[serde(default)]
  deletions: i64,
  #[serde(default)]
  changed_files: i64,
  #[serde(default)]
  total_comments_count: i64,
  closed: bool,
  closed_at: Option<DateTime<Utc>>,
  merged: bool,
  merged_at: Option<DateTime<Utc>>,
}

impl From<PullRequestNode> for PullRequestRecord {
  fn from(n: PullRequestNode) -> Self {
    Self {
      author_login: n.author.map(|a| a.login).unwrap_or_else(|| GHOST_LOGIN.to_string()),
      title: n.title,
      created_at: n.created_at,
      additions: n.additions,
      deletions: n.deletions,
      changed_files: n.changed_files,
      total_comments_count: n.total_comments_count,
      closed: n.closed,
      closed_at: n.closed_at,
      merged: n.merged,
      merged_at: n.merged_at,
    }
  }
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
  message: String,
}

/// Unwrap a GraphQL response envelope into its `data` payload.
pub fn graphql_data(envelope: serde_json::Value) -> Result<serde_json::Value> {
  if let Some(errors) = envelope.fetch("errors").to::<Vec<GraphqlError>>() {
    if !errors.is_empty() {
      let message = errors.into_iter().map(|e| e.message).collect::<Vec<_>>().join("; ");
      bail!("GitHub GraphQL query failed: {message}");
    }
  }

  envelope.fetch("data").require::<serde_json::Value>()
}

pub fn parse_pull_request_page(data: &serde_json::Value) -> Result<PullRequestPage> {
  let conn = data
    .fetch("repository.pullRequests")
    .require::<PullRequestConnection>()
    .context("reading pull request page")?;

  Ok(PullRequestPage {
    records: conn.nodes.into_iter().flatten().map(PullRequestRecord::from).collect(),
    has_next_page: conn.page_info.has_next_page,
    end_cursor: conn.page_info.end_cursor,
  })
}

pub fn parse_user_name(data: &serde_json::Value) -> Option<String> {
  data.fetch("user.name").to::<String>().filter(|n| !n.trim().is_empty())
}

// --- HTTP backend ---

pub struct GithubHttpApi {
  agent: ureq::Agent,
  endpoint: String,
  authorization: String,
}

impl GithubHttpApi {
  pub fn new(token: &str) -> Self {
    Self { agent: http::agent(), endpoint: GRAPHQL_URL.to_string(), authorization: http::bearer(token) }
  }

  fn execute(&self, query: &str, variables: serde_json::Value) -> Result<serde_json::Value> {
    let body = json!({ "query": query, "variables": variables });
    let envelope = http::post_json(&self.agent, &self.endpoint, &self.authorization, &body)?;
    graphql_data(envelope)
  }
}

impl GithubApi for GithubHttpApi {
  fn pull_requests(&self, query: &PullRequestQuery) -> Result<PullRequestPage> {
    let data = self.execute(PULL_REQUESTS_QUERY, query.variables())?;
    parse_pull_request_page(&data)
  }

  fn user_name(&self, login: &str) -> Result<Option<String>> {
    let data = self.execute(USER_NAME_QUERY, json!({ "login": login }))?;
    Ok(parse_user_name(&data))
  }
}

// --- Env-backed backend (fixtures for CLI tests) ---

const ENV_PAGES: &str = "PM_TEST_GITHUB_PAGES_JSON";
const ENV_USERS: &str = "PM_TEST_GITHUB_USERS_JSON";

/// Serves GraphQL envelopes from `PM_TEST_GITHUB_PAGES_JSON` (an array, one envelope per page,
/// chained through `endCursor`) and names from `PM_TEST_GITHUB_USERS_JSON` (login -> name).
struct GithubEnvApi;

impl GithubEnvApi {
  fn pages() -> Result<Vec<serde_json::Value>> {
    let raw = std::env::var(ENV_PAGES).unwrap_or_else(|_| "[]".to_string());
    serde_json::from_str(&raw).with_context(|| format!("parsing {ENV_PAGES}"))
  }
}

impl GithubApi for GithubEnvApi {
  fn pull_requests(&self, query: &PullRequestQuery) -> Result<PullRequestPage> {
    let pages = Self::pages()?;

    let index = match &query.cursor {
      None => 0,
      Some(cursor) => {
        let prev = pages
          .iter()
          .position(|p| p.fetch("data.repository.pullRequests.pageInfo.endCursor").to::<String>().as_deref() == Some(cursor))
          .ok_or_else(|| anyhow!("unknown cursor {cursor:?}"))?;
        prev + 1
      }
    };

    match pages.get(index) {
      Some(envelope) => parse_pull_request_page(&graphql_data(envelope.clone())?),
      None => Ok(PullRequestPage { records: Vec::new(), has_next_page: false, end_cursor: None }),
    }
  }

  fn user_name(&self, login: &str) -> Result<Option<String>> {
    let raw = std::env::var(ENV_USERS).unwrap_or_else(|_| "{}".to_string());
    let users: serde_json::Value = serde_json::from_str(&raw).with_context(|| format!("parsing {ENV_USERS}"))?;

    Ok(users.fetch(login).to::<String>())
  }
}

fn env_wants_mock() -> bool {
  std::env::var(ENV_PAGES).is_ok() || std::env::var(ENV_USERS).is_ok()
}

/// Build the client for a run; fixture env vars select the env-backed backend.
pub fn build_api(settings: &GithubSettings) -> Box<dyn GithubApi> {
  if env_wants_mock() {
    tracing::debug!("using fixture-backed GitHub API");
    Box::new(GithubEnvApi)
  } else {
    Box::new(GithubHttpApi::new(&settings.token))
  }
}
