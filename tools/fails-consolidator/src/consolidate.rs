//! Core consolidator: failed scenarios -> probable cause -> grouped by short signature.

use std::path::Path;

use crate::cause::CauseFinder;
use crate::config::Config;
use crate::error::ConsolidateError;
use crate::naming::NameRule;
use crate::report;
use crate::shorten;
use crate::types::{Consolidation, Report, Scenario};

/// Groups failed scenarios by cause. Holds compiled config only, so one
/// instance can consolidate any number of reports independently.
#[derive(Debug, Clone)]
pub struct Consolidator {
  failed_status: String,
  names: NameRule,
  causes: CauseFinder,
}

impl Consolidator {
  pub fn new(config: &Config) -> Result<Self, ConsolidateError> {
    Ok(Self {
      failed_status: config.failed_status.clone(),
      names: NameRule::from_config(config)?,
      causes: CauseFinder::from_config(config),
    })
  }

  pub fn with_defaults() -> Self {
    let config = Config::default();
    Self {
      names: NameRule::default(),
      causes: CauseFinder::from_config(&config),
      failed_status: config.failed_status,
    }
  }

  /// Read a report file and consolidate it.
  pub fn consolidate_file(&self, path: &Path) -> Result<Consolidation, ConsolidateError> {
    let report = report::load(path)?;
    self.consolidate(&report)
  }

  /// Parse report text and consolidate it.
  pub fn consolidate_str(&self, raw: &str) -> Result<Consolidation, ConsolidateError> {
    let report = report::parse(raw)?;
    self.consolidate(&report)
  }

  /// Consolidate a parsed report. Each call starts from an empty grouping and
  /// a fresh synthetic-name counter.
  pub fn consolidate(&self, report: &Report) -> Result<Consolidation, ConsolidateError> {
    let failed = report::failed_scenarios(report, &self.failed_status);
    let mut namer = self.names.namer();
    let mut consolidation = Consolidation::new();

    tracing::debug!("start to enrich failed scenarios consolidation");
    for scenario in failed {
      let name = namer.display_name(&scenario.name);
      let signature = self.signature(scenario)?;
      let added = consolidation.insert(&signature, &name);
      tracing::debug!(scenario = %name, %signature, added, "consolidated failed scenario");
    }
    tracing::info!(
      groups = consolidation.len(),
      failed_scenarios = consolidation.failed_scenarios(),
      "consolidation finished"
    );

    Ok(consolidation)
  }

  /// Short cause signature of a scenario known to contain a failed step.
  fn signature(&self, scenario: &Scenario) -> Result<String, ConsolidateError> {
    let step = report::first_failed_step(scenario, &self.failed_status).ok_or_else(|| {
      ConsolidateError::malformed(format!("scenario '{}' has no failed step", scenario.name))
    })?;
    let error_message = step.result.error_message.as_deref().ok_or_else(|| {
      ConsolidateError::malformed(format!(
        "failed step of scenario '{}' has no error_message",
        scenario.name
      ))
    })?;

    let cause = self
      .causes
      .find(error_message)
      .ok_or_else(|| ConsolidateError::NoStackFrame {
        scenario: scenario.name.clone(),
      })?;
    tracing::debug!(cause = %cause.line.trim(), rule = ?cause.rule, "scenario's cause of fall");

    shorten::shorten(&cause.line)
  }
}
