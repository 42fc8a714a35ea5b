/* src/server/core/rust/src/prop.rs */

use std::fmt;
use std::sync::Arc;

use crate::errors::PageError;
use crate::value::Value;

pub type PropFn = Arc<dyn Fn() -> Result<Value, PageError> + Send + Sync>;

/// When the client runtime should receive a prop relative to the initial render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropStrategy {
  /// Fetched by the client right after the first render.
  Defer,
  /// Sent only when a partial reload asks for it.
  Optional,
  /// Appended to the list the client already holds.
  Merge,
  /// Deep-merged into the client's existing value.
  DeepMerge,
  /// Resent on every visit, including partial reloads.
  Always,
}

impl PropStrategy {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Defer => "defer",
      Self::Optional => "optional",
      Self::Merge => "merge",
      Self::DeepMerge => "deepMerge",
      Self::Always => "always",
    }
  }

  /// Whether the field may be absent from the first response.
  pub fn is_optional(self) -> bool {
    match self {
      Self::Defer | Self::Optional => true,
      Self::Merge | Self::DeepMerge | Self::Always => false,
    }
  }
}

impl fmt::Display for PropStrategy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A value-producing callback tagged with a delivery strategy.
#[derive(Clone)]
pub struct Prop {
  strategy: PropStrategy,
  callback: PropFn,
  group: Option<String>,
}

impl Prop {
  fn new<F>(strategy: PropStrategy, callback: F) -> Self
  where
    F: Fn() -> Result<Value, PageError> + Send + Sync + 'static,
  {
    Self { strategy, callback: Arc::new(callback), group: None }
  }

  pub fn defer<F>(callback: F) -> Self
  where
    F: Fn() -> Result<Value, PageError> + Send + Sync + 'static,
  {
    Self::new(PropStrategy::Defer, callback)
  }

  pub fn optional<F>(callback: F) -> Self
  where
    F: Fn() -> Result<Value, PageError> + Send + Sync + 'static,
  {
    Self::new(PropStrategy::Optional, callback)
  }

  pub fn merge<F>(callback: F) -> Self
  where
    F: Fn() -> Result<Value, PageError> + Send + Sync + 'static,
  {
    Self::new(PropStrategy::Merge, callback)
  }

  pub fn deep_merge<F>(callback: F) -> Self
  where
    F: Fn() -> Result<Value, PageError> + Send + Sync + 'static,
  {
    Self::new(PropStrategy::DeepMerge, callback)
  }

  pub fn always<F>(callback: F) -> Self
  where
    F: Fn() -> Result<Value, PageError> + Send + Sync + 'static,
  {
    Self::new(PropStrategy::Always, callback)
  }

  /// Label deferred props so the client fetches them in one request.
  pub fn group(mut self, group: impl Into<String>) -> Self {
    self.group = Some(group.into());
    self
  }

  pub fn strategy(&self) -> PropStrategy {
    self.strategy
  }

  pub fn group_name(&self) -> Option<&str> {
    self.group.as_deref()
  }

  pub fn callback(&self) -> &PropFn {
    &self.callback
  }

  pub fn into_parts(self) -> (PropStrategy, PropFn, Option<String>) {
    (self.strategy, self.callback, self.group)
  }

  /// Invoke the callback.
  pub fn resolve(&self) -> Result<Value, PageError> {
    (self.callback)()
  }
}

impl fmt::Debug for Prop {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Prop").field("strategy", &self.strategy).field("group", &self.group).finish()
  }
}

#[cfg(test)]
mod tests {
  use std::sync::atomic::{AtomicUsize, Ordering};

  use super::*;

  #[test]
  fn constructors_tag_strategy() {
    let ok = || Ok(Value::Null);
    assert_eq!(Prop::defer(ok).strategy(), PropStrategy::Defer);
    assert_eq!(Prop::optional(ok).strategy(), PropStrategy::Optional);
    assert_eq!(Prop::merge(ok).strategy(), PropStrategy::Merge);
    assert_eq!(Prop::deep_merge(ok).strategy(), PropStrategy::DeepMerge);
    assert_eq!(Prop::always(ok).strategy(), PropStrategy::Always);
  }

  #[test]
  fn defer_without_group() {
    assert!(Prop::defer(|| Ok(Value::Null)).group_name().is_none());
  }

  #[test]
  fn defer_with_group() {
    let prop = Prop::defer(|| Ok(Value::Null)).group("sidebar");
    assert_eq!(prop.strategy(), PropStrategy::Defer);
    assert_eq!(prop.group_name(), Some("sidebar"));
  }

  #[test]
  fn callback_runs_only_on_resolve() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let prop = Prop::defer(move || {
      counter.fetch_add(1, Ordering::SeqCst);
      Ok(Value::from(42))
    });
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(prop.resolve().unwrap(), Value::Int(42));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
  }

  #[test]
  fn wire_names() {
    assert_eq!(PropStrategy::Defer.as_str(), "defer");
    assert_eq!(PropStrategy::Optional.as_str(), "optional");
    assert_eq!(PropStrategy::Merge.as_str(), "merge");
    assert_eq!(PropStrategy::DeepMerge.as_str(), "deepMerge");
    assert_eq!(PropStrategy::Always.as_str(), "always");
  }

  #[test]
  fn only_defer_and_optional_are_optional() {
    assert!(PropStrategy::Defer.is_optional());
    assert!(PropStrategy::Optional.is_optional());
    assert!(!PropStrategy::Merge.is_optional());
    assert!(!PropStrategy::DeepMerge.is_optional());
    assert!(!PropStrategy::Always.is_optional());
  }
}
