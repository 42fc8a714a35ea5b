/* src/server/core/rust/src/args.rs */

// Named arguments handed to loaders and actions. Generated handlers build
// them in signature order; definitions read them back by name.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::entity::Entity;
use crate::errors::PageError;
use crate::value::Value;

/// JSON object body of the incoming request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
  fields: serde_json::Map<String, serde_json::Value>,
}

impl Payload {
  pub fn new(fields: serde_json::Map<String, serde_json::Value>) -> Self {
    Self { fields }
  }

  /// Accept an object body; `null` is treated as an empty payload.
  pub fn from_json(json: serde_json::Value) -> Result<Self, PageError> {
    match json {
      serde_json::Value::Object(fields) => Ok(Self { fields }),
      serde_json::Value::Null => Ok(Self::default()),
      other => Err(PageError::validation(format!("expected a JSON object body, got {other}"))),
    }
  }

  pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
    self.fields.get(key)
  }

  pub fn str(&self, key: &str) -> Option<&str> {
    self.get(key).and_then(serde_json::Value::as_str)
  }

  pub fn bool(&self, key: &str) -> Option<bool> {
    self.get(key).and_then(serde_json::Value::as_bool)
  }

  pub fn i64(&self, key: &str) -> Option<i64> {
    self.get(key).and_then(serde_json::Value::as_i64)
  }

  /// Non-empty string field, or a validation error naming the field.
  pub fn require_str(&self, key: &str) -> Result<&str, PageError> {
    match self.str(key).map(str::trim) {
      Some(s) if !s.is_empty() => Ok(s),
      _ => Err(PageError::validation(format!("The {key} field is required."))),
    }
  }

  pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, PageError> {
    Ok(serde_json::from_value(serde_json::Value::Object(self.fields.clone()))?)
  }

  pub fn is_empty(&self) -> bool {
    self.fields.is_empty()
  }

  pub fn to_value(&self) -> Value {
    Value::from_json(serde_json::Value::Object(self.fields.clone()))
  }
}

#[derive(Debug, Clone)]
pub enum Arg {
  Entity(Arc<dyn Entity>),
  Payload(Payload),
  Value(Value),
}

#[derive(Debug, Clone, Default)]
pub struct Args {
  items: Vec<(String, Arg)>,
}

impl Args {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_entity(mut self, name: impl Into<String>, entity: Arc<dyn Entity>) -> Self {
    self.items.push((name.into(), Arg::Entity(entity)));
    self
  }

  pub fn with_payload(mut self, name: impl Into<String>, payload: Payload) -> Self {
    self.items.push((name.into(), Arg::Payload(payload)));
    self
  }

  pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
    self.items.push((name.into(), Arg::Value(value.into())));
    self
  }

  pub fn get(&self, name: &str) -> Option<&Arg> {
    self.items.iter().find(|(n, _)| n == name).map(|(_, arg)| arg)
  }

  /// Bound entity downcast to its concrete type.
  pub fn entity<T: Entity>(&self, name: &str) -> Result<&T, PageError> {
    match self.get(name) {
      Some(Arg::Entity(entity)) => entity.downcast_ref::<T>().ok_or_else(|| {
        PageError::internal(format!("argument `{name}` is a {}", entity.entity_name()))
      }),
      _ => Err(PageError::internal(format!("missing entity argument `{name}`"))),
    }
  }

  pub fn payload(&self, name: &str) -> Result<&Payload, PageError> {
    match self.get(name) {
      Some(Arg::Payload(payload)) => Ok(payload),
      _ => Err(PageError::internal(format!("missing payload argument `{name}`"))),
    }
  }

  pub fn value(&self, name: &str) -> Option<&Value> {
    match self.get(name) {
      Some(Arg::Value(value)) => Some(value),
      _ => None,
    }
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.items.iter().map(|(n, _)| n.as_str())
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }
}
