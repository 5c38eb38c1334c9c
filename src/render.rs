// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Turn per-person metrics into the text printed on stdout (summary line + table)
// role: render/text
// inputs: GithubPersonMetrics / JiraPersonMetrics rows, counts, DateWindow
// outputs: Strings; nothing is written here
// invariants:
// - GitHub rows keep caller order and get an "Averages" footer; Jira rows get no footer
// - Numeric columns are center-aligned; averages and percentages use one decimal
// - Empty row sets render a single placeholder line instead of a table
// errors: Table rendering failures surface as anyhow errors
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Result, anyhow};
use markdown_table::{Heading, HeadingAlignment, MarkdownTable};

use crate::model::{GithubAverages, GithubPersonMetrics, JiraPersonMetrics};
use crate::window::DateWindow;

pub fn github_summary(count: usize, window: &DateWindow) -> String {
  format!("{} PRs were created between {}", count, window)
}

pub fn jira_summary(total: i64, window: &DateWindow) -> String {
  format!("{} tickets were moved into progress between {}", total, window)
}

pub fn skip_notice(var: &str) -> String {
  format!("{} not provided. Skipping this report.", var)
}

/// Keep free text inside its cell: pipes are escaped, line breaks flattened.
fn cell(text: &str) -> String {
  text.replace('|', "\\|").replace("\r\n", " ").replace(['\n', '\r'], " ")
}

fn headings(labels: &[&str]) -> Vec<Heading> {
  labels
    .iter()
    .enumerate()
    .map(|(i, label)| {
      let align = if i == 0 || (i == 1 && labels.len() > 3) { None } else { Some(HeadingAlignment::Center) };
      Heading::new(label.to_string(), align)
    })
    .collect()
}

fn table(labels: &[&str], rows: Vec<Vec<String>>) -> Result<String> {
  let mut t = MarkdownTable::new(rows);
  t.with_headings(headings(labels));
  t.as_markdown().map_err(|_| anyhow!("rendering {} table", labels[0]))
}

pub fn github_table(people: &[GithubPersonMetrics]) -> Result<String> {
  if people.is_empty() {
    return Ok("(no pull requests in window)\n".to_string());
  }

  let mut rows: Vec<Vec<String>> = people
    .iter()
    .map(|p| {
      vec![
        cell(&p.login),
        cell(&p.display_name),
        p.total_prs.to_string(),
        p.merged_prs.to_string(),
        format!("{:.1}%", p.merged_percentage()),
        p.open_prs.to_string(),
        p.added_lines.to_string(),
        p.removed_lines.to_string(),
        p.changed_files.to_string(),
      ]
    })
    .collect();

  if let Some(avg) = GithubAverages::of(people) {
    rows.push(vec![
      "Averages".to_string(),
      String::new(),
      format!("{:.1}", avg.total_prs),
      format!("{:.1}", avg.merged_prs),
      String::new(),
      String::new(),
      format!("{:.1}", avg.added_lines),
      format!("{:.1}", avg.removed_lines),
      format!("{:.1}", avg.changed_files),
    ]);
  }

  table(
    &["ID", "Name", "Total PRs", "Merged PRs", "Merged PRs (%)", "Open PRs", "Added lines", "Removed lines", "Changed files"],
    rows,
  )
}

pub fn jira_table(people: &[JiraPersonMetrics]) -> Result<String> {
  if people.is_empty() {
    return Ok("(no tickets moved into progress)\n".to_string());
  }

  let rows = people
    .iter()
    .map(|p| vec![cell(&p.display_name), p.total_in_progress.to_string(), p.spike_in_progress.to_string()])
    .collect();

  table(&["Name", "Total In Progress", "Spike In Progress"], rows)
}
