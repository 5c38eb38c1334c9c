// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Process-level helpers: logging bootstrap and man page rendering
// role: utilities/helpers
// inputs: RUST_LOG; clap CommandFactory
// outputs: Installed tracing subscriber (stderr); man page text
// side_effects: init_logging installs the global subscriber once
// invariants: Logs never go to stdout; stdout is reserved for reports
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use clap::CommandFactory;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG` (default `info`).
pub fn init_logging() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

  let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}

pub fn render_man_page<T: CommandFactory>() -> anyhow::Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
