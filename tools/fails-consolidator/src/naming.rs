//! Display names for failed scenarios.

use regex::Regex;

use crate::config::Config;
use crate::error::ConsolidateError;

/// Compiled naming rules. Holds no per-run state.
#[derive(Debug, Clone)]
pub struct NameRule {
  pattern: Option<Regex>,
  unknown_prefix: String,
}

impl NameRule {
  /// An empty pattern counts as no pattern.
  pub fn new(pattern: Option<&str>, unknown_prefix: &str) -> Result<Self, ConsolidateError> {
    let pattern = pattern
      .filter(|p| !p.is_empty())
      .map(Regex::new)
      .transpose()
      .map_err(|e| ConsolidateError::invalid_pattern("scenario_name_pattern", e))?;
    Ok(Self {
      pattern,
      unknown_prefix: unknown_prefix.to_string(),
    })
  }

  pub fn from_config(config: &Config) -> Result<Self, ConsolidateError> {
    Self::new(
      config.scenario_name_pattern.as_deref(),
      &config.unknown_scenario_prefix,
    )
  }

  /// Fresh namer for one consolidation run; synthetic names restart at 1.
  pub fn namer(&self) -> ScenarioNamer<'_> {
    ScenarioNamer {
      rule: self,
      unknown_count: 0,
    }
  }
}

impl Default for NameRule {
  fn default() -> Self {
    Self {
      pattern: None,
      unknown_prefix: Config::default().unknown_scenario_prefix,
    }
  }
}

/// Per-run naming state.
#[derive(Debug)]
pub struct ScenarioNamer<'a> {
  rule: &'a NameRule,
  unknown_count: u64,
}

impl ScenarioNamer<'_> {
  /// Full name without a pattern; first match with one; `<prefix>-<n>` on no match.
  pub fn display_name(&mut self, full_name: &str) -> String {
    let Some(pattern) = &self.rule.pattern else {
      return full_name.to_string();
    };
    match pattern.find(full_name) {
      Some(m) => m.as_str().to_string(),
      None => {
        self.unknown_count += 1;
        format!("{}-{}", self.rule.unknown_prefix, self.unknown_count)
      }
    }
  }
}
