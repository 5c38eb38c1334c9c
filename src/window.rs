// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Parse the caller's start/end dates into the immutable reporting window shared by both pipelines
// role: window/time
// inputs: start date string (required), optional end date string, optional "now" override
// outputs: DateWindow with UTC instants; membership test used by the GitHub filter
// invariants:
// - start <= end, otherwise construction fails
// - end given as a date is normalized to 23:59:59 of that day; absent/malformed end means "now"
// - contains(t) is start < t <= end (strict lower, inclusive upper)
// errors: malformed start surfaces with context; malformed end is tolerated
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DateWindow {
  start: DateTime<Utc>,
  end: DateTime<Utc>,
}

impl DateWindow {
  /// Build a window from raw CLI strings.
  ///
  /// `now` replaces the wall clock when resolving a missing end date.
  pub fn parse(start: &str, end: Option<&str>, now: Option<DateTime<Utc>>) -> Result<Self> {
    let start_day = parse_day(start).with_context(|| format!("parsing start date {start:?} (expected YYYY-MM-DD)"))?;
    let start = start_of_day(start_day);

    let end = match end.map(parse_day) {
      Some(Ok(day)) => end_of_day(day),
      Some(Err(err)) => {
        tracing::warn!("ignoring unparseable end date ({err:#}); using now");
        now.unwrap_or_else(Utc::now)
      }
      None => now.unwrap_or_else(Utc::now),
    };

    Self::new(start, end)
  }

  pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
    if start > end {
      bail!("start {} is after end {}", start.to_rfc3339(), end.to_rfc3339());
    }

    Ok(Self { start, end })
  }

  pub fn start(&self) -> DateTime<Utc> {
    self.start
  }

  pub fn end(&self) -> DateTime<Utc> {
    self.end
  }

  /// Strict lower bound, inclusive upper bound.
  pub fn contains(&self, t: DateTime<Utc>) -> bool {
    self.start < t && t <= self.end
  }

  /// Calendar dates of both bounds, as used in JQL clauses.
  pub fn date_strings(&self) -> (String, String) {
    (
      self.start.format(DATE_FORMAT).to_string(),
      self.end.format(DATE_FORMAT).to_string(),
    )
  }
}

impl std::fmt::Display for DateWindow {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{} - {}",
      self.start.format("%Y-%m-%d %H:%M:%S UTC"),
      self.end.format("%Y-%m-%d %H:%M:%S UTC")
    )
  }
}

fn parse_day(raw: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).with_context(|| format!("invalid date {raw:?}"))
}

fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
  Utc.from_utc_datetime(&day.and_time(chrono::NaiveTime::default()))
}

fn end_of_day(day: NaiveDate) -> DateTime<Utc> {
  start_of_day(day) + chrono::Duration::days(1) - chrono::Duration::seconds(1)
}

/// Parse a `--now-override` string.
/// Accepts RFC3339 (e.g. 2024-03-20T12:00:00Z) or a naive local timestamp
/// formatted as `%Y-%m-%dT%H:%M:%S`.
pub fn parse_now_override(s: Option<&str>) -> Option<DateTime<Utc>> {
  s.and_then(|raw| {
    DateTime::parse_from_rfc3339(raw)
      .ok()
      .map(|dt| dt.with_timezone(&Utc))
      .or_else(|| {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
          .ok()
          .and_then(|ndt| ndt.and_local_timezone(Local).single())
          .map(|dt| dt.with_timezone(&Utc))
      })
  })
}
