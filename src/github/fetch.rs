// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Walk pull request pages newest-first and hand every PR created inside the window to a consumer
// role: github/fetch
// inputs: &dyn GithubApi, first-page PullRequestQuery, DateWindow
// outputs: Count of pages requested; accepted records streamed to the caller's closure
// invariants:
// - created_at > end: skipped, scanning continues
// - start < created_at <= end: accepted exactly once
// - created_at <= start: the whole walk stops (pages are ordered by creation date, descending)
// - the cursor only advances to a page's endCursor after that page is fully scanned
// errors: Any API error aborts the walk with context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::github::api::{GithubApi, PullRequestQuery};
use crate::model::PullRequestRecord;
use crate::pagination::{self, Flow, Page, PageSource};
use crate::window::DateWindow;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Placement {
  TooNew,
  InWindow,
  TooOld,
}

pub fn place(window: &DateWindow, created_at: DateTime<Utc>) -> Placement {
  if created_at > window.end() {
    Placement::TooNew
  } else if window.contains(created_at) {
    Placement::InWindow
  } else {
    Placement::TooOld
  }
}

/// Cursor-driven page source over a repository's pull requests.
pub struct PullRequestPages<'a> {
  api: &'a dyn GithubApi,
  query: PullRequestQuery,
}

impl<'a> PullRequestPages<'a> {
  pub fn new(api: &'a dyn GithubApi, query: PullRequestQuery) -> Self {
    Self { api, query }
  }
}

impl PageSource for PullRequestPages<'_> {
  type Item = PullRequestRecord;

  fn next_page(&mut self) -> Result<Page<PullRequestRecord>> {
    match &self.query.cursor {
      None => tracing::info!("requesting first page of pull requests"),
      Some(cursor) => tracing::info!(%cursor, "requesting page of pull requests"),
    }

    let page = self
      .api
      .pull_requests(&self.query)
      .with_context(|| format!("querying pull requests for {}/{}", self.query.owner, self.query.repo))?;

    let done = !page.has_next_page || page.end_cursor.is_none();
    if page.end_cursor.is_some() {
      self.query.cursor = page.end_cursor;
    }

    Ok(Page { items: page.records, done })
  }
}

/// Stream every pull request created inside `window` to `accept`, newest first.
pub fn for_each_in_window<F>(api: &dyn GithubApi, query: PullRequestQuery, window: &DateWindow, mut accept: F) -> Result<usize>
where
  F: FnMut(PullRequestRecord),
{
  let mut pages = PullRequestPages::new(api, query);

  pagination::drain(&mut pages, |pr| match place(window, pr.created_at) {
    Placement::TooNew => {
      tracing::debug!(title = %pr.title, created_at = %pr.created_at, "skipping pull request created after window");
      Flow::Continue
    }
    Placement::InWindow => {
      tracing::debug!(title = %pr.title, author = %pr.author_login, comments = pr.total_comments_count, "accepting pull request");
      accept(pr);
      Flow::Continue
    }
    Placement::TooOld => {
      tracing::debug!(created_at = %pr.created_at, start = %window.start(), "reached pull requests older than window; stopping");
      Flow::Stop
    }
  })
}
