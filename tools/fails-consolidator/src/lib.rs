//! Cucumber JSON report fails consolidator — deterministic, rule-based.
//!
//! Reads a Cucumber-style JSON report, keeps the scenarios with a failed step,
//! picks the probable cause line from each failing step's stack trace and
//! groups scenario names under a short cause signature such as
//! `"World.addToCart (cart.steps.ts:42:7)"`.
//!
//! No DB, no network; pure computation over one report.

pub mod cause;
pub mod config;
pub mod consolidate;
pub mod error;
pub mod fingerprint;
pub mod naming;
pub mod report;
pub mod shorten;
pub mod types;

pub use cause::{CauseFinder, CauseRule, ProbableCause};
pub use config::Config;
pub use consolidate::Consolidator;
pub use error::ConsolidateError;
pub use types::{CauseGroup, Consolidation, Report};

/// Consolidate the report at `path` with `config`.
pub fn consolidate_file(
  path: &std::path::Path,
  config: &Config,
) -> Result<Consolidation, ConsolidateError> {
  Consolidator::new(config)?.consolidate_file(path)
}
