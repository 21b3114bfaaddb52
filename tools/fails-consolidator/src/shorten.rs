//! Reduce a full cause line to a short grouping signature.

use crate::error::ConsolidateError;

/// `"    at Cart.add (/app/steps/cart.ts:7:3)"` -> `"Cart.add (cart.ts:7:3)"`.
///
/// Location is the last token cut after its last path separator, method is the
/// token before it. Only `(` is added: a frame location written as `(path)`
/// brings its own closing parenthesis, a bare one stays open.
///
/// Tokens are split on runs of whitespace, so trailing whitespace is ignored.
pub fn shorten(cause_line: &str) -> Result<String, ConsolidateError> {
  let mut tokens = cause_line.split_whitespace().rev();
  let (location, method) = match (tokens.next(), tokens.next()) {
    (Some(location), Some(method)) => (location, method),
    _ => {
      return Err(ConsolidateError::ShortCause {
        line: cause_line.to_string(),
      })
    }
  };
  Ok(format!("{} ({}", method, short_location(location)))
}

/// Part of a location after its last `/` or `\`.
fn short_location(location: &str) -> &str {
  match location.rfind(['/', '\\']) {
    Some(i) => &location[i + 1..],
    None => location,
  }
}
