/* src/server/core/rust/src/props.rs */

use indexmap::IndexMap;
use indexmap::map::IntoIter;

use crate::prop::Prop;
use crate::value::Value;

/// One field returned by a loader: an eager value or a deferred descriptor.
#[derive(Debug, Clone)]
pub enum PropEntry {
  Value(Value),
  Prop(Prop),
}

impl From<Prop> for PropEntry {
  fn from(prop: Prop) -> Self {
    Self::Prop(prop)
  }
}

impl From<Value> for PropEntry {
  fn from(value: Value) -> Self {
    Self::Value(value)
  }
}

/// Ordered field record returned by a loader.
#[derive(Debug, Clone, Default)]
pub struct Props {
  fields: IndexMap<String, PropEntry>,
}

impl Props {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add an eagerly computed field.
  pub fn value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
    self.fields.insert(key.into(), PropEntry::Value(value.into()));
    self
  }

  /// Add a descriptor-wrapped field.
  pub fn prop(mut self, key: impl Into<String>, prop: Prop) -> Self {
    self.fields.insert(key.into(), PropEntry::Prop(prop));
    self
  }

  pub fn insert(&mut self, key: impl Into<String>, entry: impl Into<PropEntry>) {
    self.fields.insert(key.into(), entry.into());
  }

  pub fn get(&self, key: &str) -> Option<&PropEntry> {
    self.fields.get(key)
  }

  pub fn contains(&self, key: &str) -> bool {
    self.fields.contains_key(key)
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.fields.keys().map(String::as_str)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &PropEntry)> {
    self.fields.iter().map(|(k, v)| (k.as_str(), v))
  }

  pub fn len(&self) -> usize {
    self.fields.len()
  }

  pub fn is_empty(&self) -> bool {
    self.fields.is_empty()
  }
}

impl IntoIterator for Props {
  type Item = (String, PropEntry);
  type IntoIter = IntoIter<String, PropEntry>;

  fn into_iter(self) -> Self::IntoIter {
    self.fields.into_iter()
  }
}
