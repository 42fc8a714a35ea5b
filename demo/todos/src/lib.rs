/* demo/todos/src/lib.rs */

pub mod models;
pub mod pages;

pub mod generated {
  pub mod handlers;
  pub mod routes;
}

use axum::Router;
use axum::http::{HeaderMap, header};
use pagekit::{PageError, PageRegistry, RouteTable};
use pagekit_axum::PageApp;

/// Definitions and entities, as handed to the `pagekit` command.
pub fn registry() -> PageRegistry {
  let mut registry = PageRegistry::new().entity("Todo");
  pagekit::register!(registry,
    "todos/index" => pages::todos_index,
    "todos/[todo]/edit" => pages::todos_todo_edit,
  );
  registry
}

pub fn route_table() -> Result<RouteTable, PageError> {
  let mut routes = RouteTable::new();
  generated::routes::register(&mut routes)?;
  Ok(routes)
}

/// Demo sessions are a `session` cookie with any value.
fn auth(headers: &HeaderMap) -> Result<(), PageError> {
  let has_session = headers
    .get_all(header::COOKIE)
    .iter()
    .filter_map(|v| v.to_str().ok())
    .flat_map(|v| v.split(';'))
    .any(|c| c.trim_start().starts_with("session="));
  if has_session { Ok(()) } else { Err(PageError::unauthorized("login required")) }
}

pub fn app() -> Result<Router, PageError> {
  PageApp::new(route_table()?)
    .resolver(models::Resolver)
    .middleware("auth", auth)
    .version("1")
    .into_router()
}
