/* src/server/core/rust/src/value.rs */

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::entity::{Entity, EntityCollection};

/// Insertion-ordered field map.
pub type Map = IndexMap<String, Value>;

/// Dynamically typed prop value produced by loaders, actions and descriptors.
#[derive(Debug, Clone, Default)]
pub enum Value {
  #[default]
  Null,
  Bool(bool),
  Int(i64),
  Float(f64),
  String(String),
  List(Vec<Value>),
  Map(Map),
  Entity(Arc<dyn Entity>),
  Collection(EntityCollection),
}

impl Value {
  pub fn entity(entity: impl Entity) -> Self {
    Self::Entity(Arc::new(entity))
  }

  pub fn collection<E: Entity>(members: impl IntoIterator<Item = E>) -> Self {
    Self::Collection(members.into_iter().collect())
  }

  pub fn is_null(&self) -> bool {
    matches!(self, Self::Null)
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Self::String(s) => Some(s),
      _ => None,
    }
  }

  pub fn as_i64(&self) -> Option<i64> {
    match self {
      Self::Int(n) => Some(*n),
      _ => None,
    }
  }

  pub fn as_bool(&self) -> Option<bool> {
    match self {
      Self::Bool(b) => Some(*b),
      _ => None,
    }
  }

  pub fn as_map(&self) -> Option<&Map> {
    match self {
      Self::Map(m) => Some(m),
      _ => None,
    }
  }

  pub fn as_list(&self) -> Option<&[Value]> {
    match self {
      Self::List(items) => Some(items),
      _ => None,
    }
  }

  /// Convert to JSON. Entities become their attribute maps, collections become
  /// lists of attribute maps, non-finite floats become `null`.
  pub fn to_json(&self) -> serde_json::Value {
    match self {
      Self::Null => serde_json::Value::Null,
      Self::Bool(b) => serde_json::Value::Bool(*b),
      Self::Int(n) => serde_json::Value::from(*n),
      Self::Float(f) => serde_json::Number::from_f64(*f)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null),
      Self::String(s) => serde_json::Value::String(s.clone()),
      Self::List(items) => serde_json::Value::Array(items.iter().map(Self::to_json).collect()),
      Self::Map(map) => map_to_json(map),
      Self::Entity(entity) => map_to_json(&entity.attributes()),
      Self::Collection(members) => {
        serde_json::Value::Array(members.iter().map(|e| map_to_json(&e.attributes())).collect())
      }
    }
  }

  pub fn from_json(json: serde_json::Value) -> Self {
    match json {
      serde_json::Value::Null => Self::Null,
      serde_json::Value::Bool(b) => Self::Bool(b),
      serde_json::Value::Number(n) => match n.as_i64() {
        Some(i) => Self::Int(i),
        None => Self::Float(n.as_f64().unwrap_or(0.0)),
      },
      serde_json::Value::String(s) => Self::String(s),
      serde_json::Value::Array(items) => Self::List(items.into_iter().map(Self::from_json).collect()),
      serde_json::Value::Object(obj) => {
        Self::Map(obj.into_iter().map(|(k, v)| (k, Self::from_json(v))).collect())
      }
    }
  }
}

fn map_to_json(map: &Map) -> serde_json::Value {
  serde_json::Value::Object(map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect())
}

impl Serialize for Value {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    self.to_json().serialize(serializer)
  }
}

impl PartialEq for Value {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Self::Null, Self::Null) => true,
      (Self::Bool(a), Self::Bool(b)) => a == b,
      (Self::Int(a), Self::Int(b)) => a == b,
      (Self::Float(a), Self::Float(b)) => a == b,
      (Self::String(a), Self::String(b)) => a == b,
      (Self::List(a), Self::List(b)) => a == b,
      (Self::Map(a), Self::Map(b)) => a == b,
      (Self::Entity(a), Self::Entity(b)) => {
        a.entity_name() == b.entity_name() && a.attributes() == b.attributes()
      }
      (Self::Collection(a), Self::Collection(b)) => {
        a.len() == b.len()
          && a.iter().zip(b.iter()).all(|(x, y)| {
            x.entity_name() == y.entity_name() && x.attributes() == y.attributes()
          })
      }
      _ => false,
    }
  }
}

// -- Conversions --

impl From<bool> for Value {
  fn from(b: bool) -> Self {
    Self::Bool(b)
  }
}

macro_rules! impl_from_int {
  ($($ty:ty),*) => {
    $(
      impl From<$ty> for Value {
        fn from(n: $ty) -> Self {
          Self::Int(i64::from(n))
        }
      }
    )*
  };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<usize> for Value {
  fn from(n: usize) -> Self {
    i64::try_from(n).map_or(Self::Float(n as f64), Self::Int)
  }
}

impl From<f32> for Value {
  fn from(f: f32) -> Self {
    Self::Float(f64::from(f))
  }
}

impl From<f64> for Value {
  fn from(f: f64) -> Self {
    Self::Float(f)
  }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self {
    Self::String(s.to_string())
  }
}

impl From<String> for Value {
  fn from(s: String) -> Self {
    Self::String(s)
  }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
  fn from(items: Vec<T>) -> Self {
    Self::List(items.into_iter().map(Into::into).collect())
  }
}

impl<T: Into<Value>> From<Option<T>> for Value {
  fn from(opt: Option<T>) -> Self {
    opt.map_or(Self::Null, Into::into)
  }
}

impl From<Map> for Value {
  fn from(map: Map) -> Self {
    Self::Map(map)
  }
}

impl From<EntityCollection> for Value {
  fn from(members: EntityCollection) -> Self {
    Self::Collection(members)
  }
}

impl From<Arc<dyn Entity>> for Value {
  fn from(entity: Arc<dyn Entity>) -> Self {
    Self::Entity(entity)
  }
}

impl From<serde_json::Value> for Value {
  fn from(json: serde_json::Value) -> Self {
    Self::from_json(json)
  }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Self::Map(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
  }
}
