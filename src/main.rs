use std::io::Write;

use anyhow::Result;
use clap::Parser;

mod cli;
mod config;
mod ext;
mod github;
mod http;
mod jira;
mod model;
mod pagination;
mod pipeline;
mod render;
mod util;
mod window;

use crate::cli::{Cli, normalize};

fn main() -> Result<()> {
  util::init_logging();
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  // Phase 1: settings file + window
  config::load_env_file()?;
  let cfg = normalize(cli)?;
  tracing::info!(window = %cfg.window, "starting reports");

  // Phase 2: GitHub, then Jira
  let stdout = std::io::stdout();
  let mut out = stdout.lock();
  pipeline::run_all(&cfg, &mut out)?;
  out.flush()?;

  Ok(())
}
