// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the records fetched from GitHub/Jira and the per-person aggregates built from them
// role: model/types
// outputs: PullRequestRecord, IssueChangeRecord, GithubPersonMetrics, JiraPersonMetrics
// invariants: Records are transient (fetch -> fold); aggregates only ever grow while folding
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, Utc};
/// Placeholder login GitHub uses for deleted accounts.
pub const GHOST_LOGIN: &str = "ghost";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRecord {
  pub author_login: String,
  pub title: String,
  pub created_at: DateTime<Utc>,
  pub additions: i64,
  pub deletions: i64,
  pub changed_files: i64,
  pub total_comments_count: i64,
  pub closed: bool,
  pub closed_at: Option<DateTime<Utc>>,
  pub merged: bool,
  pub merged_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueChangeRecord {
  pub issue_key: String,
  pub actor_display_name: String,
  pub issue_type: String,
  /// The search JQL only returns issues moved to In Progress during the window, so scanned
  /// records always carry `true`; the flag is kept for logging.
  pub entered_in_progress_within_window: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GithubPersonMetrics {
  pub login: String,
  pub display_name: String,
  pub total_prs: i64,
  pub merged_prs: i64,
  pub open_prs: i64,
  pub added_lines: i64,
  pub removed_lines: i64,
  pub changed_files: i64,
}

impl GithubPersonMetrics {
  pub fn new(login: &str) -> Self {
    Self { login: login.to_string(), ..Default::default() }
  }

  pub fn merged_percentage(&self) -> f64 {
    if self.total_prs == 0 {
      return 0.0;
    }

    (self.merged_prs * 100) as f64 / self.total_prs as f64
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JiraPersonMetrics {
  pub display_name: String,
  pub total_in_progress: i64,
  pub spike_in_progress: i64,
}

/// Unweighted means across authors; `None` when there are no authors.
#[derive(Debug, Clone, PartialEq)]
pub struct GithubAverages {
  pub total_prs: f64,
  pub merged_prs: f64,
  pub added_lines: f64,
  pub removed_lines: f64,
  pub changed_files: f64,
}

impl GithubAverages {
  pub fn of(people: &[GithubPersonMetrics]) -> Option<Self> {
    if people.is_empty() {
      return None;
    }

    let n = people.len() as f64;
    let mean = |f: fn(&GithubPersonMetrics) -> i64| people.iter().map(f).sum::<i64>() as f64 / n;

    Some(Self {
      total_prs: mean(|p| p.total_prs),
      merged_prs: mean(|p| p.merged_prs),
      added_lines: mean(|p| p.added_lines),
      removed_lines: mean(|p| p.removed_lines),
      changed_files: mean(|p| p.changed_files),
    })
  }
}
