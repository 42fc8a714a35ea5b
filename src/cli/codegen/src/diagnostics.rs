/* src/cli/codegen/src/diagnostics.rs */

// Recoverable, per-page findings. Each one is logged when recorded and kept
// in the run report so the CLI can summarize it.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
  Info,
  Warn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
  pub level: Level,
  /// Page base the finding belongs to, if any.
  pub page: Option<String>,
  pub message: String,
}

impl fmt::Display for Diagnostic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.page {
      Some(page) => write!(f, "{page}: {}", self.message),
      None => f.write_str(&self.message),
    }
  }
}

#[derive(Debug, Default)]
pub struct Diagnostics {
  items: Vec<Diagnostic>,
}

impl Diagnostics {
  pub fn info(&mut self, page: Option<&str>, message: impl Into<String>) {
    let message = message.into();
    tracing::info!(page = page.unwrap_or("-"), "{message}");
    self.items.push(Diagnostic { level: Level::Info, page: page.map(str::to_string), message });
  }

  pub fn warn(&mut self, page: Option<&str>, message: impl Into<String>) {
    let message = message.into();
    tracing::warn!(page = page.unwrap_or("-"), "{message}");
    self.items.push(Diagnostic { level: Level::Warn, page: page.map(str::to_string), message });
  }

  pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
    self.items.iter().filter(|d| d.level == Level::Warn)
  }

  pub fn into_vec(self) -> Vec<Diagnostic> {
    self.items
  }
}
