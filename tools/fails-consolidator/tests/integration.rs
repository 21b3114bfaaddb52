//! Integration tests for the fails consolidator.

use std::io::Write;

use fails_consolidator::{consolidate_file, Config, ConsolidateError, Consolidator};

fn fixture_report() -> &'static str {
  r#"[
    {
      "uri": "features/cart.feature",
      "name": "Cart",
      "keyword": "Feature",
      "elements": [
        {
          "name": "@QA-101 Add single item",
          "type": "scenario",
          "steps": [
            {"keyword": "Given ", "name": "an empty cart", "result": {"status": "passed", "duration": 1200}},
            {"keyword": "When ", "name": "I add an item", "result": {
              "status": "failed",
              "error_message": "AssertionError: expected 0 to equal 1\n    at Object.equal (/ci/app/node_modules/chai/lib/assert.js:120:11)\n    at World.addToCart (/ci/app/features/steps/cart.steps.ts:42:7)\n    at processTicksAndRejections (node:internal/process/task_queues:95:5)"
            }},
            {"keyword": "Then ", "name": "the cart has one item", "result": {"status": "skipped"}}
          ]
        },
        {
          "name": "@QA-102 Add two items",
          "type": "scenario",
          "steps": [
            {"keyword": "When ", "name": "I add two items", "result": {
              "status": "failed",
              "error_message": "AssertionError: expected 0 to equal 2\r\n    at Object.equal (/ci/app/node_modules/chai/lib/assert.js:120:11)\r\n    at World.addToCart (/ci/app/features/steps/cart.steps.ts:42:7)"
            }}
          ]
        },
        {
          "name": "@QA-103 Remove item",
          "type": "scenario",
          "steps": [
            {"keyword": "When ", "name": "I remove an item", "result": {"status": "passed"}}
          ]
        }
      ]
    },
    {
      "uri": "features/login.feature",
      "name": "Login",
      "elements": [
        {
          "name": "Login without ticket key",
          "steps": [
            {"keyword": "When ", "name": "I submit", "result": {
              "status": "failed",
              "error_message": "TimeoutError: waiting for selector\n    at LoginPage.submit (/ci/app/features/pages/login.page.ts:18:5)"
            }}
          ]
        },
        {
          "name": "@QA-101 Add single item retried",
          "steps": [
            {"keyword": "When ", "name": "I add an item", "result": {
              "status": "failed",
              "error_message": "AssertionError\n    at World.addToCart (/ci/app/features/steps/cart.steps.ts:42:7)"
            }}
          ]
        }
      ]
    }
  ]"#
}

fn ci_config() -> Config {
  Config {
    probable_cause_markers: vec!["features/".into()],
    ..Config::default()
  }
}

#[test]
fn groups_failures_by_probable_cause() {
  let c = Consolidator::new(&ci_config()).unwrap();
  let result = c.consolidate_str(fixture_report()).unwrap();

  let keys: Vec<&str> = result.keys().collect();
  assert_eq!(
    keys,
    vec![
      "World.addToCart (cart.steps.ts:42:7)",
      "LoginPage.submit (login.page.ts:18:5)"
    ]
  );
  assert_eq!(
    result.get("World.addToCart (cart.steps.ts:42:7)").unwrap(),
    [
      "@QA-101 Add single item",
      "@QA-102 Add two items",
      "@QA-101 Add single item retried"
    ]
  );
  assert_eq!(
    result.get("LoginPage.submit (login.page.ts:18:5)").unwrap(),
    ["Login without ticket key"]
  );
}

#[test]
fn passing_scenarios_never_appear() {
  let c = Consolidator::new(&ci_config()).unwrap();
  let result = c.consolidate_str(fixture_report()).unwrap();
  assert!(result
    .iter()
    .all(|(_, names)| names.iter().all(|n| !n.contains("QA-103"))));
  assert_eq!(result.failed_scenarios(), 4);
}

#[test]
fn name_pattern_dedups_and_numbers_unknowns() {
  let config = Config {
    scenario_name_pattern: Some(r"@QA-\d+".into()),
    unknown_scenario_prefix: "UNKNOWN".into(),
    ..ci_config()
  };
  let result = Consolidator::new(&config)
    .unwrap()
    .consolidate_str(fixture_report())
    .unwrap();

  assert_eq!(
    result.get("World.addToCart (cart.steps.ts:42:7)").unwrap(),
    ["@QA-101", "@QA-102"]
  );
  assert_eq!(
    result.get("LoginPage.submit (login.page.ts:18:5)").unwrap(),
    ["UNKNOWN-1"]
  );
}

#[test]
fn without_markers_first_valid_frame_is_used() {
  let result = Consolidator::with_defaults()
    .consolidate_str(fixture_report())
    .unwrap();
  assert!(result.get("Object.equal (assert.js:120:11)").is_some());
}

#[test]
fn deterministic_output_across_runs() {
  let c1 = Consolidator::new(&ci_config()).unwrap();
  let c2 = Consolidator::new(&ci_config()).unwrap();
  let json1 = serde_json::to_string(&c1.consolidate_str(fixture_report()).unwrap()).unwrap();
  let json2 = serde_json::to_string(&c2.consolidate_str(fixture_report()).unwrap()).unwrap();
  assert_eq!(json1, json2, "Same inputs must produce identical JSON output");

  let again = serde_json::to_string(&c1.consolidate_str(fixture_report()).unwrap()).unwrap();
  assert_eq!(json1, again, "Reusing a consolidator must not carry state over");
}

#[test]
fn groups_carry_stable_fingerprints() {
  let result = Consolidator::new(&ci_config())
    .unwrap()
    .consolidate_str(fixture_report())
    .unwrap();
  let group = &result.groups()[0];
  assert_eq!(group.signature, "World.addToCart (cart.steps.ts:42:7)");
  assert_eq!(
    group.fingerprint,
    fails_consolidator::fingerprint::compute(&group.signature)
  );
}

#[test]
fn consolidates_report_file_with_config_file() {
  let mut report = tempfile::NamedTempFile::new().unwrap();
  report.write_all(fixture_report().as_bytes()).unwrap();
  let mut config_file = tempfile::NamedTempFile::new().unwrap();
  config_file
    .write_all(br#"{"probable_cause_markers": ["pages/"]}"#)
    .unwrap();

  let config = Config::load(config_file.path()).unwrap();
  let result = consolidate_file(report.path(), &config).unwrap();
  assert_eq!(
    result.get("LoginPage.submit (login.page.ts:18:5)").unwrap(),
    ["Login without ticket key"]
  );
}

#[test]
fn missing_report_file_is_io_error() {
  let dir = tempfile::tempdir().unwrap();
  let err = consolidate_file(&dir.path().join("missing.json"), &Config::default()).unwrap_err();
  assert!(matches!(err, ConsolidateError::Io { .. }), "{}", err);
  assert!(err.to_string().contains("missing.json"));
}

#[test]
fn invalid_json_fails_without_partial_result() {
  let err = Consolidator::with_defaults()
    .consolidate_str(r#"[{"elements": [}"#)
    .unwrap_err();
  assert!(matches!(err, ConsolidateError::Json(_)), "{}", err);
}

#[test]
fn step_without_result_is_malformed() {
  let json = r#"[{"elements": [{"name": "s", "steps": [{"keyword": "Given "}]}]}]"#;
  let err = Consolidator::with_defaults().consolidate_str(json).unwrap_err();
  assert!(
    err.to_string().contains("result"),
    "Error should mention the field: {}",
    err
  );
}

#[test]
fn invalid_name_pattern_is_rejected_up_front() {
  let config = Config {
    scenario_name_pattern: Some("[unclosed".into()),
    ..Config::default()
  };
  let err = Consolidator::new(&config).unwrap_err();
  assert!(matches!(err, ConsolidateError::InvalidPattern { .. }), "{}", err);
}

#[test]
fn empty_report_gives_empty_consolidation() {
  let result = Consolidator::with_defaults().consolidate_str("[]").unwrap();
  assert!(result.is_empty());
  assert_eq!(serde_json::to_string(&result).unwrap(), "{}");
}
