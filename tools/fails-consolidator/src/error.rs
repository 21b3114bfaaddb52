//! Structured error types for the fails consolidator.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsolidateError {
  #[error("io: {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),

  #[error("malformed report: {reason}")]
  Malformed { reason: String },

  #[error("invalid pattern: {field}: {source}")]
  InvalidPattern {
    field: String,
    #[source]
    source: regex::Error,
  },

  #[error("no stack frame found in error message of scenario '{scenario}'")]
  NoStackFrame { scenario: String },

  #[error("cannot shorten cause '{line}': expected at least a method and a location")]
  ShortCause { line: String },
}

impl ConsolidateError {
  pub fn io(path: &Path, source: std::io::Error) -> Self {
    Self::Io {
      path: path.to_path_buf(),
      source,
    }
  }

  pub fn malformed(reason: impl Into<String>) -> Self {
    Self::Malformed {
      reason: reason.into(),
    }
  }

  pub fn invalid_pattern(field: &str, source: regex::Error) -> Self {
    Self::InvalidPattern {
      field: field.to_string(),
      source,
    }
  }
}
