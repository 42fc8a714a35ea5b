/* src/server/core/rust/src/runtime/context.rs */

use std::sync::Arc;

use indexmap::IndexMap;

use crate::args::Payload;
use crate::entity::Entity;
use crate::errors::PageError;
use crate::routing::RouteTable;
use crate::value::Value;

/// Looks up entities for route-model binding.
pub trait EntityResolver: Send + Sync {
  /// `Ok(None)` means no entity with that key exists.
  fn resolve(&self, entity: &str, key: &str) -> Result<Option<Arc<dyn Entity>>, PageError>;
}

/// Resolver for apps without bound routes: every lookup misses.
pub struct NoEntities;

impl EntityResolver for NoEntities {
  fn resolve(&self, _entity: &str, _key: &str) -> Result<Option<Arc<dyn Entity>>, PageError> {
    Ok(None)
  }
}

/// Partial reload request (`X-Inertia-Partial-*` headers).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialReload {
  pub component: String,
  pub only: Vec<String>,
  pub except: Vec<String>,
}

impl PartialReload {
  pub fn new(component: impl Into<String>) -> Self {
    Self { component: component.into(), ..Self::default() }
  }

  pub fn only<I, S>(mut self, keys: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.only = keys.into_iter().map(Into::into).collect();
    self
  }

  pub fn except<I, S>(mut self, keys: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.except = keys.into_iter().map(Into::into).collect();
    self
  }

  /// `only` takes precedence; `except` applies when `only` is empty.
  pub fn wants(&self, key: &str) -> bool {
    if !self.only.is_empty() {
      return self.only.iter().any(|k| k == key);
    }
    !self.except.iter().any(|k| k == key)
  }
}

/// Everything a generated handler may ask about the current request.
pub struct RequestContext {
  routes: Arc<RouteTable>,
  resolver: Arc<dyn EntityResolver>,
  route_name: Option<String>,
  params: IndexMap<String, String>,
  query: IndexMap<String, String>,
  payload: Payload,
  partial: Option<PartialReload>,
}

impl RequestContext {
  pub fn new(routes: Arc<RouteTable>, resolver: Arc<dyn EntityResolver>) -> Self {
    Self {
      routes,
      resolver,
      route_name: None,
      params: IndexMap::new(),
      query: IndexMap::new(),
      payload: Payload::default(),
      partial: None,
    }
  }

  pub fn with_route_name(mut self, name: impl Into<String>) -> Self {
    self.route_name = Some(name.into());
    self
  }

  pub fn with_params<I, K, V>(mut self, params: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    self.params.extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
    self
  }

  pub fn with_query<I, K, V>(mut self, query: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    self.query.extend(query.into_iter().map(|(k, v)| (k.into(), v.into())));
    self
  }

  pub fn with_payload(mut self, payload: Payload) -> Self {
    self.payload = payload;
    self
  }

  pub fn with_partial(mut self, partial: Option<PartialReload>) -> Self {
    self.partial = partial;
    self
  }

  pub fn route_name(&self) -> Option<&str> {
    self.route_name.as_deref()
  }

  pub fn param(&self, name: &str) -> Option<&str> {
    self.params.get(name).map(String::as_str)
  }

  pub fn partial(&self) -> Option<&PartialReload> {
    self.partial.as_ref()
  }

  /// Route-model binding: resolve the path parameter `param` as `entity`.
  /// A missing parameter or an unknown key is a 404.
  pub fn bind_entity(&self, param: &str, entity: &str) -> Result<Arc<dyn Entity>, PageError> {
    let key = self
      .param(param)
      .ok_or_else(|| PageError::not_found(format!("route parameter `{param}` is missing")))?;
    tracing::debug!(param, entity, key, "binding route model");
    self
      .resolver
      .resolve(entity, key)?
      .ok_or_else(|| PageError::not_found(format!("{entity} {key} not found")))
  }

  pub fn payload(&self) -> Payload {
    self.payload.clone()
  }

  /// Plain argument: path parameter, then body field, then query string.
  pub fn plain(&self, name: &str) -> Value {
    if let Some(v) = self.param(name) {
      return Value::from(v);
    }
    if let Some(v) = self.payload.get(name) {
      return Value::from_json(v.clone());
    }
    self.query.get(name).map_or(Value::Null, |v| Value::from(v.as_str()))
  }

  /// URL of a named route, filled from the current request's path params.
  pub fn route_url(&self, name: &str) -> Result<String, PageError> {
    self.routes.url_for(name, &self.params)
  }
}
