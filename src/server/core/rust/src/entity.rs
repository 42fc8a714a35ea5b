/* src/server/core/rust/src/entity.rs */

// Domain-entity capability: the persistence layer stays outside pagekit and is
// reached only through attribute maps and member lists.

use std::any::Any;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::value::Map;

/// A persisted business object exposed to pages.
pub trait Entity: Send + Sync + 'static {
  /// Short type name, e.g. `Todo`. Used for type declarations and route binding.
  fn entity_name(&self) -> &str;

  /// Attribute map sent to the client and used for structural type inference.
  fn attributes(&self) -> Map;

  fn as_any(&self) -> &dyn Any;
}

impl dyn Entity {
  pub fn downcast_ref<T: Entity>(&self) -> Option<&T> {
    self.as_any().downcast_ref::<T>()
  }
}

impl fmt::Debug for dyn Entity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple(self.entity_name()).field(&self.attributes()).finish()
  }
}

/// Ordered list of entity instances, e.g. the result of `Todo::all()`.
#[derive(Debug, Clone, Default)]
pub struct EntityCollection {
  members: Vec<Arc<dyn Entity>>,
}

impl EntityCollection {
  pub fn new() -> Self {
    Self { members: Vec::new() }
  }

  pub fn push(&mut self, entity: impl Entity) {
    self.members.push(Arc::new(entity));
  }

  pub fn push_shared(&mut self, entity: Arc<dyn Entity>) {
    self.members.push(entity);
  }

  pub fn first(&self) -> Option<&Arc<dyn Entity>> {
    self.members.first()
  }

  pub fn len(&self) -> usize {
    self.members.len()
  }

  pub fn is_empty(&self) -> bool {
    self.members.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Entity>> {
    self.members.iter()
  }
}

impl<E: Entity> FromIterator<E> for EntityCollection {
  fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
    let members = iter.into_iter().map(|e| Arc::new(e) as Arc<dyn Entity>).collect();
    Self { members }
  }
}

impl FromIterator<Arc<dyn Entity>> for EntityCollection {
  fn from_iter<I: IntoIterator<Item = Arc<dyn Entity>>>(iter: I) -> Self {
    Self { members: iter.into_iter().collect() }
  }
}

/// Names of the entity types the application exposes to pages.
#[derive(Debug, Clone, Default)]
pub struct EntityCatalog {
  names: BTreeSet<String>,
}

impl EntityCatalog {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, name: impl Into<String>) {
    self.names.insert(name.into());
  }

  pub fn contains(&self, name: &str) -> bool {
    self.names.contains(name)
  }

  /// Resolve a type reference (`Todo`, `crate::models::Todo`, `App\Models\Todo`)
  /// to a known entity name.
  pub fn resolve<'a>(&self, reference: &'a str) -> Option<&'a str> {
    let name = entity_basename(reference);
    self.contains(name).then_some(name)
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.names.iter().map(String::as_str)
  }

  pub fn is_empty(&self) -> bool {
    self.names.is_empty()
  }
}

impl<S: Into<String>> FromIterator<S> for EntityCatalog {
  fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
    Self { names: iter.into_iter().map(Into::into).collect() }
  }
}

/// Last path segment of a type reference: `crate::models::Todo` -> `Todo`.
pub fn entity_basename(reference: &str) -> &str {
  let trimmed = reference.trim();
  let after_colons = trimmed.rsplit("::").next().unwrap_or(trimmed);
  after_colons.rsplit('\\').next().unwrap_or(after_colons)
}
