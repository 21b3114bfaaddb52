//! Pick the probable cause of a failure out of a stack trace.
//!
//! Only stack frames (lines starting with whitespace then `at`) are considered.
//! Ladder, first hit wins:
//! 1. first frame that contains a probable-cause marker and no excluded marker;
//! 2. first frame without an invalid marker (` X:` such as a drive letter);
//! 3. the first frame.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Config;

static LINE_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|\n|\r").unwrap());
static STACK_FRAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+at").unwrap());
static INVALID_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r" [A-Za-z0-9_]:").unwrap());

/// Which rung of the ladder produced the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CauseRule {
  Probable,
  FirstValid,
  FirstFrame,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbableCause {
  pub line: String,
  pub rule: CauseRule,
}

#[derive(Debug, Clone, Default)]
pub struct CauseFinder {
  probable_markers: Vec<String>,
  excluded_markers: Vec<String>,
}

impl CauseFinder {
  pub fn new(probable_markers: Vec<String>, excluded_markers: Vec<String>) -> Self {
    Self {
      probable_markers,
      excluded_markers,
    }
  }

  pub fn from_config(config: &Config) -> Self {
    Self::new(
      config.probable_cause_markers.clone(),
      config.excluded_cause_markers.clone(),
    )
  }

  /// Stack frame lines of an error message, in order.
  pub fn frames<'a>(&self, error_message: &'a str) -> Vec<&'a str> {
    LINE_SPLIT
      .split(error_message)
      .filter(|line| STACK_FRAME.is_match(line))
      .collect()
  }

  /// Returns `None` when the message holds no stack frame at all.
  pub fn find(&self, error_message: &str) -> Option<ProbableCause> {
    let frames = self.frames(error_message);
    let first = *frames.first()?;

    let (line, rule) = if let Some(line) = frames.iter().find(|l| self.is_probable(l)) {
      (*line, CauseRule::Probable)
    } else if let Some(line) = frames.iter().find(|l| !INVALID_MARKER.is_match(l)) {
      (*line, CauseRule::FirstValid)
    } else {
      (first, CauseRule::FirstFrame)
    };

    Some(ProbableCause {
      line: line.to_string(),
      rule,
    })
  }

  fn is_probable(&self, line: &str) -> bool {
    self.probable_markers.iter().any(|m| line.contains(m.as_str()))
      && !self.excluded_markers.iter().any(|m| line.contains(m.as_str()))
  }
}
