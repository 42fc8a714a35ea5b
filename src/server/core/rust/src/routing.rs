/* src/server/core/rust/src/routing.rs */

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::errors::PageError;
use crate::method::HttpMethod;
use crate::runtime::{RequestContext, Response};

pub type Handler = fn(&mut RequestContext) -> Result<Response, PageError>;

#[derive(Clone)]
pub struct Route {
  pub method: HttpMethod,
  /// Path with `{param}` placeholders, e.g. `/users/{user}/edit`.
  pub uri: String,
  pub name: String,
  pub middleware: Vec<String>,
  pub handler: Handler,
}

impl Route {
  /// Placeholder names in path order.
  pub fn params(&self) -> Vec<&str> {
    placeholders(&self.uri)
  }
}

/// Named routes in registration order.
#[derive(Clone, Default)]
pub struct RouteTable {
  routes: Vec<Route>,
  names: HashSet<String>,
}

impl RouteTable {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add(
    &mut self,
    method: HttpMethod,
    uri: &str,
    name: &str,
    middleware: &[&str],
    handler: Handler,
  ) -> Result<(), PageError> {
    if !self.names.insert(name.to_string()) {
      return Err(PageError::definition(format!("route name `{name}` is already registered")));
    }
    self.routes.push(Route {
      method,
      uri: uri.to_string(),
      name: name.to_string(),
      middleware: middleware.iter().map(|m| m.to_string()).collect(),
      handler,
    });
    Ok(())
  }

  pub fn get(&self, name: &str) -> Option<&Route> {
    self.routes.iter().find(|r| r.name == name)
  }

  pub fn iter(&self) -> impl Iterator<Item = &Route> {
    self.routes.iter()
  }

  pub fn len(&self) -> usize {
    self.routes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.routes.is_empty()
  }

  /// Build the URL of a named route, substituting `{param}` placeholders.
  pub fn url_for(&self, name: &str, params: &IndexMap<String, String>) -> Result<String, PageError> {
    let route =
      self.get(name).ok_or_else(|| PageError::internal(format!("route `{name}` is not defined")))?;
    let mut url = String::with_capacity(route.uri.len());
    let mut rest = route.uri.as_str();
    while let Some(start) = rest.find('{') {
      let Some(len) = rest[start..].find('}') else { break };
      let param = &rest[start + 1..start + len];
      let value = params.get(param).ok_or_else(|| {
        PageError::internal(format!("missing parameter `{param}` for route `{name}`"))
      })?;
      url.push_str(&rest[..start]);
      url.push_str(value);
      rest = &rest[start + len + 1..];
    }
    url.push_str(rest);
    Ok(url)
  }
}

fn placeholders(uri: &str) -> Vec<&str> {
  uri
    .split('/')
    .filter_map(|seg| seg.strip_prefix('{').and_then(|s| s.strip_suffix('}')))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn handler(_: &mut RequestContext) -> Result<Response, PageError> {
    Ok(Response::RedirectBack)
  }

  fn table() -> RouteTable {
    let mut routes = RouteTable::new();
    routes.add(HttpMethod::Get, "/todos", "todos.index", &["web"], handler).unwrap();
    routes.add(HttpMethod::Post, "/todos/store", "todos.index.store", &["web"], handler).unwrap();
    routes.add(HttpMethod::Get, "/users/{user}/edit", "users.user.edit", &["web", "auth"], handler).unwrap();
    routes
  }

  #[test]
  fn keeps_registration_order() {
    let names: Vec<_> = table().iter().map(|r| r.name.clone()).collect();
    assert_eq!(names, vec!["todos.index", "todos.index.store", "users.user.edit"]);
  }

  #[test]
  fn rejects_duplicate_names() {
    let mut routes = table();
    let err = routes.add(HttpMethod::Get, "/other", "todos.index", &[], handler).unwrap_err();
    assert_eq!(err.code(), "INVALID_DEFINITION");
    assert_eq!(routes.len(), 3);
  }

  #[test]
  fn url_for_static_route() {
    assert_eq!(table().url_for("todos.index.store", &IndexMap::new()).unwrap(), "/todos/store");
  }

  #[test]
  fn url_for_fills_placeholders() {
    let mut params = IndexMap::new();
    params.insert("user".to_string(), "42".to_string());
    assert_eq!(table().url_for("users.user.edit", &params).unwrap(), "/users/42/edit");
  }

  #[test]
  fn url_for_missing_param_or_route() {
    assert!(table().url_for("users.user.edit", &IndexMap::new()).is_err());
    assert!(table().url_for("nope", &IndexMap::new()).is_err());
  }

  #[test]
  fn route_params_in_path_order() {
    let routes = table();
    assert_eq!(routes.get("users.user.edit").unwrap().params(), vec!["user"]);
    assert!(routes.get("todos.index").unwrap().params().is_empty());
  }
}
