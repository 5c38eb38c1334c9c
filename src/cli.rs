// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Command-line surface and its normalization into an effective run configuration
// role: cli/config
// inputs: argv (start date, optional end date, behavior flags)
// outputs: EffectiveConfig with a validated DateWindow
// invariants: No network access happens before normalize succeeds
// errors: Missing start is a clap usage error; malformed start or start > end fails normalize
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::Result;
use clap::Parser;

use crate::github::aggregate::StatusRule;
use crate::window::{self, DateWindow};

#[derive(Parser, Debug)]
#[command(
    name = "pull-metrics",
    version,
    about = "Per-person GitHub pull request and Jira progress metrics for a date window",
    long_about = None,
    after_help = "Example: pull-metrics 2024-02-28 2024-03-15"
)]
pub struct Cli {
  /// First day of the window (YYYY-MM-DD); PRs created at exactly midnight of this day are excluded
  #[arg(required_unless_present = "gen_man")]
  pub start: Option<String>,

  /// Last day of the window, inclusive (YYYY-MM-DD); defaults to now
  pub end: Option<String>,

  /// Fail instead of skipping the GitHub report when GITHUB_* settings are missing
  #[arg(long)]
  pub require_github: bool,

  /// Classify PRs by their current merged/closed flags, ignoring when they were merged or closed
  #[arg(long)]
  pub loose_status: bool,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override the "now" instant used when no end date is given (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EffectiveConfig {
  pub window: DateWindow,
  pub require_github: bool,
  pub status_rule: StatusRule,
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  let start = cli
    .start
    .as_deref()
    .ok_or_else(|| anyhow::anyhow!("pull-metrics <start date> [<end date>]. E.g.: pull-metrics 2024-02-28 2024-03-15"))?;
  let now = window::parse_now_override(cli.now_override.as_deref());
  let window = DateWindow::parse(start, cli.end.as_deref(), now)?;

  let status_rule = if cli.loose_status { StatusRule::Loose } else { StatusRule::Strict };

  Ok(EffectiveConfig { window, require_github: cli.require_github, status_rule })
}
