// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Offset-paged walk over Jira search results
// role: jira/fetch
// inputs: &dyn JiraApi, first-page SearchRequest
// outputs: Issues streamed to the caller; the reported match total (from the last page seen)
// invariants:
// - startAt advances by the page size after every page
// - a page holding fewer issues than the page size is the last one, whatever `total` says
// - total is overwritten per page, never summed
// errors: Any API error aborts the walk with the offset in context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result};

use crate::jira::api::{Issue, JiraApi, SearchRequest};
use crate::pagination::{self, Flow, Page, PageSource};

pub struct IssuePages<'a> {
  api: &'a dyn JiraApi,
  request: SearchRequest,
  total: i64,
}

impl<'a> IssuePages<'a> {
  pub fn new(api: &'a dyn JiraApi, request: SearchRequest) -> Self {
    Self { api, request, total: 0 }
  }

  pub fn total(&self) -> i64 {
    self.total
  }
}

impl PageSource for IssuePages<'_> {
  type Item = Issue;

  fn next_page(&mut self) -> Result<Page<Issue>> {
    tracing::info!(start_at = self.request.start_at, max_results = self.request.max_results, "requesting Jira issues");

    let page = self
      .api
      .search(&self.request)
      .with_context(|| format!("searching Jira issues at offset {}", self.request.start_at))?;

    self.total = page.total;
    let done = page.issues.len() < self.request.max_results;
    self.request.start_at += self.request.max_results;

    Ok(Page { items: page.issues, done })
  }
}

/// Visit every issue the search returns; yields the reported total.
pub fn for_each_issue<F>(api: &dyn JiraApi, request: SearchRequest, mut visit: F) -> Result<i64>
where
  F: FnMut(Issue),
{
  let mut pages = IssuePages::new(api, request);

  pagination::drain(&mut pages, |issue| {
    visit(issue);
    Flow::Continue
  })?;

  Ok(pages.total())
}
