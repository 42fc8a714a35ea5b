/* src/server/adapter/axum/src/lib.rs */

mod error;
mod handler;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use axum::Router;
use axum::http::HeaderMap;
use axum::routing::MethodRouter;
use pagekit::{EntityResolver, NoEntities, PageError, RouteTable};

pub use error::AxumError;
/// Re-export pagekit core for convenience
pub use pagekit;

/// Named middleware: inspects request headers and rejects with a `PageError`.
pub type Guard = Arc<dyn Fn(&HeaderMap) -> Result<(), PageError> + Send + Sync>;

/// Wraps the `<div id="app" data-page="...">` element in a full HTML document.
pub type Shell = fn(&str) -> String;

/// Base middleware group every generated route carries.
pub const WEB_GROUP: &str = "web";

pub(crate) struct AppState {
  pub routes: Arc<RouteTable>,
  pub resolver: Arc<dyn EntityResolver>,
  pub guards: HashMap<String, Guard>,
  pub version: Option<String>,
  pub shell: Shell,
}

/// Builder that serves a generated `RouteTable` over axum.
pub struct PageApp {
  routes: RouteTable,
  resolver: Arc<dyn EntityResolver>,
  guards: HashMap<String, Guard>,
  version: Option<String>,
  shell: Shell,
}

impl PageApp {
  pub fn new(routes: RouteTable) -> Self {
    let mut guards: HashMap<String, Guard> = HashMap::new();
    guards.insert(WEB_GROUP.to_string(), Arc::new(|_: &HeaderMap| Ok(())));
    Self { routes, resolver: Arc::new(NoEntities), guards, version: None, shell: default_shell }
  }

  /// Resolver used for route-model binding.
  pub fn resolver(mut self, resolver: impl EntityResolver + 'static) -> Self {
    self.resolver = Arc::new(resolver);
    self
  }

  pub fn middleware<F>(mut self, name: &str, guard: F) -> Self
  where
    F: Fn(&HeaderMap) -> Result<(), PageError> + Send + Sync + 'static,
  {
    self.guards.insert(name.to_string(), Arc::new(guard));
    self
  }

  /// Asset version; Inertia GET visits with a different version get a 409.
  pub fn version(mut self, version: impl Into<String>) -> Self {
    self.version = Some(version.into());
    self
  }

  pub fn shell(mut self, shell: Shell) -> Self {
    self.shell = shell;
    self
  }

  /// Build the router. Fails when a route names unknown middleware or two
  /// routes share a method and URI.
  pub fn into_router(self) -> Result<Router, PageError> {
    for route in self.routes.iter() {
      if !route.uri.starts_with('/') {
        return Err(PageError::definition(format!(
          "route `{}` has a relative uri `{}`",
          route.name, route.uri
        )));
      }
      if let Some(missing) = route.middleware.iter().find(|m| !self.guards.contains_key(*m)) {
        return Err(PageError::definition(format!(
          "route `{}` uses unregistered middleware `{missing}`",
          route.name
        )));
      }
    }

    let routes = Arc::new(self.routes);
    let state = Arc::new(AppState {
      routes: routes.clone(),
      resolver: self.resolver,
      guards: self.guards,
      version: self.version,
      shell: self.shell,
    });

    let mut seen = HashSet::new();
    let mut by_uri: Vec<(String, MethodRouter)> = Vec::new();
    for route in routes.iter() {
      if !seen.insert((route.uri.as_str(), route.method)) {
        return Err(PageError::definition(format!(
          "{} {} is registered twice (route `{}`)",
          route.method, route.uri, route.name
        )));
      }
      let method_router = handler::route_handler(state.clone(), route.clone());
      match by_uri.iter().position(|(uri, _)| *uri == route.uri) {
        Some(i) => {
          let (uri, existing) = by_uri.remove(i);
          by_uri.insert(i, (uri, existing.merge(method_router)));
        }
        None => by_uri.push((route.uri.clone(), method_router)),
      }
    }

    let mut router = Router::new();
    for (uri, method_router) in by_uri {
      tracing::debug!(uri, "mounting route");
      router = router.route(&uri, method_router);
    }
    Ok(router)
  }

  pub async fn serve(self, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let router = self.into_router()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!("pagekit app running on http://localhost:{}", local_addr.port());
    axum::serve(listener, router).await?;
    Ok(())
  }
}

fn default_shell(app: &str) -> String {
  format!(
    "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n</head>\n<body>\n{app}\n</body>\n</html>\n"
  )
}

#[cfg(test)]
mod tests;
