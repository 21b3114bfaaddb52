//! Stable fingerprint for a cause signature.

/// Short stable id for a signature: first 16 hex chars of its blake3 hash.
///
/// Lets dashboards track a group across runs without keying on the raw text.
pub fn compute(signature: &str) -> String {
  let hash = blake3::hash(signature.as_bytes());
  hash.to_hex()[..16].to_string()
}
