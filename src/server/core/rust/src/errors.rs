/* src/server/core/rust/src/errors.rs */

// Failure returned by loaders, actions, descriptors and guards. The HTTP
// adapter turns it into `{ ok: false, error: { code, message } }` with the
// status of its kind.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
  Validation,
  Unauthorized,
  NotFound,
  Definition,
  Internal,
}

impl Kind {
  fn code(self) -> &'static str {
    match self {
      Self::Validation => "VALIDATION_ERROR",
      Self::Unauthorized => "UNAUTHORIZED",
      Self::NotFound => "NOT_FOUND",
      Self::Definition => "INVALID_DEFINITION",
      Self::Internal => "INTERNAL_ERROR",
    }
  }

  fn status(self) -> u16 {
    match self {
      Self::Validation => 422,
      Self::Unauthorized => 401,
      Self::NotFound => 404,
      Self::Definition | Self::Internal => 500,
    }
  }
}

#[derive(Debug, Clone)]
pub struct PageError {
  kind: Kind,
  message: String,
}

impl PageError {
  fn of(kind: Kind, message: impl Into<String>) -> Self {
    Self { kind, message: message.into() }
  }

  /// Rejected payload or query input; rendered as 422.
  pub fn validation(msg: impl Into<String>) -> Self {
    Self::of(Kind::Validation, msg)
  }

  /// A route-model binding or lookup that found nothing.
  pub fn not_found(msg: impl Into<String>) -> Self {
    Self::of(Kind::NotFound, msg)
  }

  pub fn internal(msg: impl Into<String>) -> Self {
    Self::of(Kind::Internal, msg)
  }

  /// Raised by middleware guards.
  pub fn unauthorized(msg: impl Into<String>) -> Self {
    Self::of(Kind::Unauthorized, msg)
  }

  /// A page definition that cannot be loaded or does not satisfy the contract.
  pub fn definition(msg: impl Into<String>) -> Self {
    Self::of(Kind::Definition, msg)
  }

  pub fn code(&self) -> &'static str {
    self.kind.code()
  }

  pub fn message(&self) -> &str {
    &self.message
  }

  pub fn status(&self) -> u16 {
    self.kind.status()
  }
}

impl fmt::Display for PageError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.code(), self.message)
  }
}

impl std::error::Error for PageError {}

/// Malformed JSON payloads are a client error.
impl From<serde_json::Error> for PageError {
  fn from(err: serde_json::Error) -> Self {
    Self::validation(err.to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn kinds_map_to_code_and_status() {
    let cases = [
      (PageError::validation("x"), "VALIDATION_ERROR", 422),
      (PageError::unauthorized("x"), "UNAUTHORIZED", 401),
      (PageError::not_found("x"), "NOT_FOUND", 404),
      (PageError::definition("x"), "INVALID_DEFINITION", 500),
      (PageError::internal("x"), "INTERNAL_ERROR", 500),
    ];
    for (err, code, status) in cases {
      assert_eq!(err.code(), code);
      assert_eq!(err.status(), status);
    }
  }

  #[test]
  fn malformed_json_is_a_validation_error() {
    let err: PageError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
    assert_eq!(err.status(), 422);
  }

  #[test]
  fn display_format() {
    let err = PageError::not_found("Todo 7");
    assert_eq!(err.to_string(), "NOT_FOUND: Todo 7");
  }
}
