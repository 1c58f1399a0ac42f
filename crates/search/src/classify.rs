//! Maps a failed request's message text to a user-facing category.
//!
//! Matching is substring-based on known failure-signal tokens,
//! case-insensitive, first match wins in priority order. No match falls
//! back to a generic failure message; this never fails to produce a
//! displayable string.

/// User-facing failure categories for a search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
  Timeout,
  Network,
  ServerError,
  Unknown,
}

const TIMEOUT_TOKENS: &[&str] = &["timeout", "timed out"];
const NETWORK_TOKENS: &[&str] = &["network error", "connection refused", "unreachable", "connect"];
const SERVER_TOKENS: &[&str] = &["500", "502", "503", "504"];

impl FailureKind {
  pub fn user_message(self) -> &'static str {
    match self {
      FailureKind::Timeout => "The catalog took too long to respond. Please try again.",
      FailureKind::Network => "Could not reach the catalog service. Check your connection.",
      FailureKind::ServerError => "The catalog service ran into a problem. Please try again later.",
      FailureKind::Unknown => "Search failed. Please try again.",
    }
  }
}

/// Classify a failure by its rendered message.
pub fn classify(message: &str) -> FailureKind {
  let lower = message.to_lowercase();
  let contains_any = |tokens: &[&str]| tokens.iter().any(|t| lower.contains(t));

  if contains_any(TIMEOUT_TOKENS) {
    FailureKind::Timeout
  } else if contains_any(NETWORK_TOKENS) {
    FailureKind::Network
  } else if contains_any(SERVER_TOKENS) {
    FailureKind::ServerError
  } else {
    FailureKind::Unknown
  }
}

/// Shorthand for the displayable string of a classified failure.
pub fn user_message_for(message: &str) -> &'static str {
  classify(message).user_message()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_timeout_tokens() {
    assert_eq!(classify("timeout of 60000ms exceeded"), FailureKind::Timeout);
    assert_eq!(classify("operation timed out"), FailureKind::Timeout);
    assert_eq!(classify("Request Timeout"), FailureKind::Timeout);
  }

  #[test]
  fn test_network_tokens() {
    assert_eq!(classify("Network Error"), FailureKind::Network);
    assert_eq!(classify("connection refused (os error 111)"), FailureKind::Network);
    assert_eq!(classify("error trying to connect: dns error"), FailureKind::Network);
    assert_eq!(classify("host unreachable"), FailureKind::Network);
  }

  #[test]
  fn test_server_tokens() {
    assert_eq!(classify("Catalog returned 500: internal error"), FailureKind::ServerError);
    assert_eq!(classify("Catalog returned 503: Search service unavailable"), FailureKind::ServerError);
    assert_eq!(classify("bad gateway: 502"), FailureKind::ServerError);
  }

  #[test]
  fn test_priority_order() {
    // A message matching several categories resolves to the first in order
    assert_eq!(classify("connection timed out"), FailureKind::Timeout);
    assert_eq!(classify("Network Error after 500"), FailureKind::Network);
  }

  #[test]
  fn test_unknown_fallback() {
    assert_eq!(classify("something inexplicable"), FailureKind::Unknown);
    assert_eq!(classify(""), FailureKind::Unknown);
  }

  #[test]
  fn test_every_kind_has_a_message() {
    for kind in [
      FailureKind::Timeout,
      FailureKind::Network,
      FailureKind::ServerError,
      FailureKind::Unknown,
    ] {
      assert!(!kind.user_message().is_empty());
    }
  }
}
