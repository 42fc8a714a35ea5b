/* src/server/core/rust/src/method.rs */

use std::fmt;
use std::str::FromStr;

use crate::errors::PageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
  Get,
  Post,
  Put,
  Patch,
  Delete,
}

impl HttpMethod {
  pub const ALL: [HttpMethod; 5] = [Self::Get, Self::Post, Self::Put, Self::Patch, Self::Delete];

  /// Upper-case verb as sent on the wire.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Get => "GET",
      Self::Post => "POST",
      Self::Put => "PUT",
      Self::Patch => "PATCH",
      Self::Delete => "DELETE",
    }
  }

  /// Variant name, used when emitting `HttpMethod::X` in generated code.
  pub fn variant(self) -> &'static str {
    match self {
      Self::Get => "Get",
      Self::Post => "Post",
      Self::Put => "Put",
      Self::Patch => "Patch",
      Self::Delete => "Delete",
    }
  }
}

impl fmt::Display for HttpMethod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for HttpMethod {
  type Err = PageError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|m| m.as_str().eq_ignore_ascii_case(s))
      .ok_or_else(|| PageError::validation(format!("unknown HTTP method: {s}")))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_case_insensitively() {
    assert_eq!("delete".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
    assert_eq!("PUT".parse::<HttpMethod>().unwrap(), HttpMethod::Put);
    assert!("TRACE".parse::<HttpMethod>().is_err());
  }

  #[test]
  fn display_and_variant() {
    assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
    assert_eq!(HttpMethod::Patch.variant(), "Patch");
  }
}
