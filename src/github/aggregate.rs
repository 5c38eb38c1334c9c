// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Fold accepted pull requests into per-author totals and classify each PR's status as of the window end
// role: github/aggregate
// inputs: PullRequestRecord stream, window end, StatusRule; &dyn GithubApi for display names
// outputs: GithubPersonMetrics rows sorted by login
// invariants:
// - Every recorded PR increments exactly one author's total; merged/open are disjoint
// - Strict: merged iff merged && merged_at <= end; else open iff !closed || closed_at > end
// - Loose: merged iff merged; else open iff !closed
// - One display-name lookup per distinct login, in login order
// errors: Lookup failures propagate with the login in context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::github::api::GithubApi;
use crate::model::{GHOST_LOGIN, GithubPersonMetrics, PullRequestRecord};

/// How closed/merged timestamps are compared against the window end.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum StatusRule {
  /// State as observed at the window end.
  #[default]
  Strict,
  /// Current state flags only; timestamps ignored.
  Loose,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PrStatus {
  Merged,
  Open,
  ClosedUnmerged,
}

pub fn classify(pr: &PullRequestRecord, end: DateTime<Utc>, rule: StatusRule) -> PrStatus {
  let (merged, open) = match rule {
    StatusRule::Strict => (
      pr.merged && pr.merged_at.is_some_and(|at| at <= end),
      !pr.closed || pr.closed_at.is_some_and(|at| at > end),
    ),
    StatusRule::Loose => (pr.merged, !pr.closed),
  };

  if merged {
    PrStatus::Merged
  } else if open {
    PrStatus::Open
  } else {
    PrStatus::ClosedUnmerged
  }
}

pub struct PullRequestAggregator {
  end: DateTime<Utc>,
  rule: StatusRule,
  by_login: BTreeMap<String, GithubPersonMetrics>,
  accepted: usize,
}

impl PullRequestAggregator {
  pub fn new(end: DateTime<Utc>, rule: StatusRule) -> Self {
    Self { end, rule, by_login: BTreeMap::new(), accepted: 0 }
  }

  pub fn record(&mut self, pr: &PullRequestRecord) {
    let person = self
      .by_login
      .entry(pr.author_login.clone())
      .or_insert_with(|| GithubPersonMetrics::new(&pr.author_login));

    person.total_prs += 1;
    person.added_lines += pr.additions;
    person.removed_lines += pr.deletions;
    person.changed_files += pr.changed_files;

    match classify(pr, self.end, self.rule) {
      PrStatus::Merged => person.merged_prs += 1,
      PrStatus::Open => person.open_prs += 1,
      PrStatus::ClosedUnmerged => {}
    }

    self.accepted += 1;
  }

  /// Number of pull requests folded in so far.
  pub fn accepted(&self) -> usize {
    self.accepted
  }

  /// Attach display names and return rows ordered by login.
  pub fn finish(self, api: &dyn GithubApi) -> Result<Vec<GithubPersonMetrics>> {
    let mut rows = Vec::with_capacity(self.by_login.len());

    for (login, mut person) in self.by_login {
      if login != GHOST_LOGIN {
        tracing::debug!(%login, "resolving display name");
        person.display_name = api
          .user_name(&login)
          .with_context(|| format!("resolving display name for {login}"))?
          .unwrap_or_default();
      }

      rows.push(person);
    }

    Ok(rows)
  }
}
