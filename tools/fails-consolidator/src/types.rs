//! Core types for the consolidator (report JSON contract + grouping output).

use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::fingerprint;

// ---------------------------------------------------------------------------
// Report types (JSON contract — what the test runner writes)
// ---------------------------------------------------------------------------

/// A parsed Cucumber JSON report: features in file order.
pub type Report = Vec<Feature>;

/// One feature. Unknown fields (uri, name, keyword, tags...) are silently ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
  pub elements: Vec<Scenario>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
  pub name: String,
  pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Step {
  #[serde(default)]
  pub name: String,
  pub result: StepResult,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StepResult {
  pub status: String,
  #[serde(default)]
  pub error_message: Option<String>,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Scenarios that failed for the same short cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CauseGroup {
  pub signature: String,
  pub fingerprint: String,
  pub scenarios: Vec<String>,
}

/// Signature -> scenario names, both in first-seen order. Append-only.
///
/// Serializes as a JSON object keyed by signature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Consolidation {
  groups: Vec<CauseGroup>,
  index: HashMap<String, usize>,
  failed_scenarios: usize,
}

impl Consolidation {
  pub fn new() -> Self {
    Self::default()
  }

  /// Record one failed scenario under `signature`.
  ///
  /// Returns `false` when the name was already listed for that signature.
  pub fn insert(&mut self, signature: &str, scenario: &str) -> bool {
    self.failed_scenarios += 1;
    match self.index.get(signature) {
      Some(&i) => {
        let group = &mut self.groups[i];
        if group.scenarios.iter().any(|s| s == scenario) {
          return false;
        }
        group.scenarios.push(scenario.to_string());
        true
      }
      None => {
        self.index.insert(signature.to_string(), self.groups.len());
        self.groups.push(CauseGroup {
          signature: signature.to_string(),
          fingerprint: fingerprint::compute(signature),
          scenarios: vec![scenario.to_string()],
        });
        true
      }
    }
  }

  pub fn get(&self, signature: &str) -> Option<&[String]> {
    self
      .index
      .get(signature)
      .map(|&i| self.groups[i].scenarios.as_slice())
  }

  /// Groups in order of first occurrence.
  pub fn groups(&self) -> &[CauseGroup] {
    &self.groups
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
    self
      .groups
      .iter()
      .map(|g| (g.signature.as_str(), g.scenarios.as_slice()))
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.groups.iter().map(|g| g.signature.as_str())
  }

  /// Number of distinct signatures.
  pub fn len(&self) -> usize {
    self.groups.len()
  }

  pub fn is_empty(&self) -> bool {
    self.groups.is_empty()
  }

  /// Failed scenarios recorded, including names deduplicated away.
  pub fn failed_scenarios(&self) -> usize {
    self.failed_scenarios
  }
}

impl Serialize for Consolidation {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.groups.len()))?;
    for group in &self.groups {
      map.serialize_entry(&group.signature, &group.scenarios)?;
    }
    map.end()
  }
}
