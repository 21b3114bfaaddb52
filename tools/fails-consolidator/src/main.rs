//! Binary entrypoint: consolidate one report file, write one JSON object to stdout.
//!
//! Output is `{ "<signature>": ["<scenario>", ...], ... }` in first-seen order,
//! or the list of groups with fingerprints when `--with-fingerprints` is set.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use fails_consolidator::{Config, Consolidator};
use tracing_subscriber::EnvFilter;

/// Group failed Cucumber scenarios by probable cause of failure
#[derive(Parser, Debug)]
#[command(name = "fails-consolidator")]
#[command(version)]
struct Cli {
  /// Path to the Cucumber JSON report
  report: PathBuf,

  /// JSON config file; flags below override its values
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Step status that marks a failure
  #[arg(long)]
  failed_status: Option<String>,

  /// Regex cutting the display name out of the scenario name
  #[arg(long)]
  name_pattern: Option<String>,

  /// Prefix for scenarios the name pattern does not match
  #[arg(long)]
  unknown_prefix: Option<String>,

  /// Substring marking a stack frame as probable cause (repeatable)
  #[arg(long = "probable-cause")]
  probable_cause: Vec<String>,

  /// Substring excluding a stack frame from probable causes (repeatable)
  #[arg(long = "exclude-cause")]
  exclude_cause: Vec<String>,

  /// Emit groups with fingerprints instead of the plain map
  #[arg(long)]
  with_fingerprints: bool,

  /// Pretty-print the JSON output
  #[arg(long)]
  pretty: bool,

  /// Log debug details to stderr
  #[arg(short, long)]
  verbose: bool,
}

impl Cli {
  fn resolve_config(&self) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &self.config {
      Some(path) => Config::load(path)?,
      None => Config::default(),
    };
    if let Some(status) = &self.failed_status {
      config.failed_status = status.clone();
    }
    if let Some(pattern) = &self.name_pattern {
      config.scenario_name_pattern = Some(pattern.clone());
    }
    if let Some(prefix) = &self.unknown_prefix {
      config.unknown_scenario_prefix = prefix.clone();
    }
    if !self.probable_cause.is_empty() {
      config.probable_cause_markers = self.probable_cause.clone();
    }
    if !self.exclude_cause.is_empty() {
      config.excluded_cause_markers = self.exclude_cause.clone();
    }
    Ok(config)
  }
}

fn main() {
  let cli = Cli::parse();
  let level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
    .init();

  if let Err(e) = run_binary(&cli) {
    let _ = writeln!(io::stderr(), "fails-consolidator error: {}", e);
    std::process::exit(1);
  }
}

fn run_binary(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
  let config = cli.resolve_config()?;
  let consolidation = Consolidator::new(&config)?.consolidate_file(&cli.report)?;

  let stdout = io::stdout();
  let mut out = io::BufWriter::new(stdout.lock());
  match (cli.with_fingerprints, cli.pretty) {
    (true, true) => serde_json::to_writer_pretty(&mut out, consolidation.groups())?,
    (true, false) => serde_json::to_writer(&mut out, consolidation.groups())?,
    (false, true) => serde_json::to_writer_pretty(&mut out, &consolidation)?,
    (false, false) => serde_json::to_writer(&mut out, &consolidation)?,
  }
  writeln!(out)?;
  out.flush()?;
  Ok(())
}
