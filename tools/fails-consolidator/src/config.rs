//! Consolidator configuration with sane defaults.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConsolidateError;

/// Recognized options. Any subset may be set from a JSON config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Step status literal that marks a step as failed.
  pub failed_status: String,
  /// Regex used to cut a display name out of the full scenario name.
  /// `None` keeps the full name.
  pub scenario_name_pattern: Option<String>,
  /// Prefix for synthetic names given to scenarios the pattern does not match.
  pub unknown_scenario_prefix: String,
  /// A stack frame containing any of these is a probable cause.
  pub probable_cause_markers: Vec<String>,
  /// A stack frame containing any of these is never a probable cause.
  pub excluded_cause_markers: Vec<String>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      failed_status: "failed".into(),
      scenario_name_pattern: None,
      unknown_scenario_prefix: "unknown-scenario".into(),
      probable_cause_markers: Vec::new(),
      excluded_cause_markers: vec!["node_modules".into(), "node:internal".into()],
    }
  }
}

impl Config {
  /// Load a config from a JSON file; omitted fields keep their defaults.
  pub fn load(path: &Path) -> Result<Self, ConsolidateError> {
    let raw = fs::read_to_string(path).map_err(|e| ConsolidateError::io(path, e))?;
    let config = serde_json::from_str(&raw)?;
    Ok(config)
  }
}
