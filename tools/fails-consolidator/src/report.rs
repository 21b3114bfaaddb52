//! Load a Cucumber JSON report and pick out the failed scenarios.

use std::fs;
use std::path::Path;

use serde_json::error::Category;

use crate::error::ConsolidateError;
use crate::types::{Report, Scenario, Step};

/// Parse report text. Schema mismatches surface as `Malformed`, bad JSON as `Json`.
pub fn parse(raw: &str) -> Result<Report, ConsolidateError> {
  serde_json::from_str(raw).map_err(|e| match e.classify() {
    Category::Data => ConsolidateError::malformed(e.to_string()),
    _ => ConsolidateError::Json(e),
  })
}

/// Read and parse a report file (UTF-8).
pub fn load(path: &Path) -> Result<Report, ConsolidateError> {
  let raw = fs::read_to_string(path).map_err(|e| ConsolidateError::io(path, e))?;
  parse(&raw)
}

/// Scenarios with at least one failed step, flattened across features in report order.
pub fn failed_scenarios<'a>(report: &'a Report, failed_status: &str) -> Vec<&'a Scenario> {
  tracing::info!("collecting report failed scenarios");
  let failed: Vec<&Scenario> = report
    .iter()
    .flat_map(|feature| feature.elements.iter())
    .filter(|scenario| is_failed(scenario, failed_status))
    .collect();
  tracing::info!(count = failed.len(), "collected report failed scenarios");
  failed
}

pub fn is_failed(scenario: &Scenario, failed_status: &str) -> bool {
  scenario
    .steps
    .iter()
    .any(|step| step.result.status == failed_status)
}

/// First step whose status is the failed status.
pub fn first_failed_step<'a>(scenario: &'a Scenario, failed_status: &str) -> Option<&'a Step> {
  scenario
    .steps
    .iter()
    .find(|step| step.result.status == failed_status)
}
