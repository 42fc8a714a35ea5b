/* src/cli/codegen/src/error.rs */

use std::io;
use std::path::PathBuf;

use pagekit::PageError;

/// Fatal generation failures. Any of these aborts the run before a single
/// file is written.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
  #[error("pages directory not found: {}", .0.display())]
  MissingPagesDir(PathBuf),

  #[error("failed to load definition for page `{base}`: {source}")]
  Definition {
    base: String,
    #[source]
    source: PageError,
  },

  #[error("invalid definition for page `{base}`: {message}")]
  InvalidDefinition { base: String, message: String },

  #[error("pages `{first}` and `{second}` both map to handler module `{module}`")]
  ModuleCollision { module: String, first: String, second: String },

  #[error("page `{base}`: actions `{first}` and `{second}` both map to handler fn `{function}`")]
  HandlerCollision { base: String, function: String, first: String, second: String },

  #[error("route name `{name}` is produced by both `{first}` and `{second}`")]
  RouteCollision { name: String, first: String, second: String },

  #[error("invalid ignore pattern `{pattern}`: {source}")]
  InvalidIgnorePattern {
    pattern: String,
    #[source]
    source: regex::Error,
  },

  #[error("{}: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

impl GenerateError {
  pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
    let path = path.into();
    move |source| Self::Io { path, source }
  }
}

pub type Result<T, E = GenerateError> = std::result::Result<T, E>;
