// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Find the latest "moved to In Progress" transition per issue and count it against the person who made it
// role: jira/aggregate
// inputs: Issues with changelog histories (oldest first)
// outputs: IssueChangeRecord per attributable issue; JiraPersonMetrics rows
// invariants:
// - Histories are scanned newest-first; the first qualifying item wins and ends the scan
// - An issue counts at most once; issues with no qualifying item count for nobody
// - spike_in_progress only grows for issue type exactly "Spike"
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;

use crate::jira::api::Issue;
use crate::model::{IssueChangeRecord, JiraPersonMetrics};

pub const STATUS_FIELD: &str = "status";
pub const IN_PROGRESS: &str = "In Progress";
pub const SPIKE: &str = "Spike";

pub fn latest_in_progress(issue: &Issue) -> Option<IssueChangeRecord> {
  let history = issue.changelog.histories.iter().rev().find(|h| {
    h.items
      .iter()
      .any(|item| item.field == STATUS_FIELD && item.to_value.as_deref() == Some(IN_PROGRESS))
  })?;

  Some(IssueChangeRecord {
    issue_key: issue.key.clone(),
    actor_display_name: history.author.as_ref().map(|a| a.display_name.clone()).unwrap_or_default(),
    issue_type: issue.type_name().to_string(),
    entered_in_progress_within_window: true,
  })
}

#[derive(Default)]
pub struct InProgressAggregator {
  by_person: BTreeMap<String, JiraPersonMetrics>,
}

impl InProgressAggregator {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn record_issue(&mut self, issue: &Issue) {
    match latest_in_progress(issue) {
      Some(change) => {
        tracing::debug!(
          key = %change.issue_key,
          summary = issue.fields.summary.as_deref().unwrap_or_default(),
          assignee = issue.fields.assignee.as_ref().map(|a| a.display_name.as_str()).unwrap_or_default(),
          actor = %change.actor_display_name,
          within_window = change.entered_in_progress_within_window,
          "issue moved to In Progress"
        );
        self.record(&change);
      }
      None => tracing::debug!(key = %issue.key, "no In Progress transition in changelog"),
    }
  }

  pub fn record(&mut self, change: &IssueChangeRecord) {
    let person = self
      .by_person
      .entry(change.actor_display_name.clone())
      .or_insert_with(|| JiraPersonMetrics { display_name: change.actor_display_name.clone(), ..Default::default() });

    person.total_in_progress += 1;
    if change.issue_type == SPIKE {
      person.spike_in_progress += 1;
    }
  }

  pub fn finish(self) -> Vec<JiraPersonMetrics> {
    self.by_person.into_values().collect()
  }
}
