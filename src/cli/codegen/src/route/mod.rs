/* src/cli/codegen/src/route/mod.rs */

mod render;


use pagekit::{Action, HttpMethod, PageDefinition, Signature};

use crate::discover::PageBase;
use crate::naming;

pub use render::render_route_table;

/// One line of the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
  pub method: HttpMethod,
  pub uri: String,
  pub name: String,
  pub middleware: Vec<String>,
  /// Handler module the target fn lives in.
  pub module: String,
  /// Handler fn inside `module`.
  pub function: String,
}

impl RouteEntry {
  /// `module::function`, relative to the handlers module.
  pub fn handler_path(&self) -> String {
    format!("{}::{}", self.module, self.function)
  }
}

/// Page URI: bracket segments become `{param}`, a trailing `index` is
/// dropped, the root page is `/`.
pub fn page_uri(page: &PageBase) -> String {
  let mut segments = page.segments();
  if page.is_index() {
    segments.pop();
  }
  let parts: Vec<String> = segments.iter().map(|s| s.uri()).collect();
  format!("/{}", parts.join("/"))
}

/// Route name: clean segments joined by `.`, `index` kept, reserved words
/// suffixed with `_`.
pub fn route_name(page: &PageBase) -> String {
  let parts: Vec<String> = page.segments().iter().map(|s| naming::route_segment(s.clean())).collect();
  parts.join(".")
}

/// Verb for an action without an explicit one: entity + payload is an
/// update, entity alone a delete, anything else a create.
pub fn detect_method(signature: &Signature) -> HttpMethod {
  match (signature.has_entity(), signature.has_payload()) {
    (true, true) => HttpMethod::Put,
    (true, false) => HttpMethod::Delete,
    (false, _) => HttpMethod::Post,
  }
}

pub fn action_method(action: &Action) -> HttpMethod {
  action.method().unwrap_or_else(|| detect_method(action.signature()))
}

pub fn action_uri(page_uri: &str, action: &str, signature: &Signature) -> String {
  let base = page_uri.trim_end_matches('/');
  match signature.first_entity() {
    Some(param) => format!("{base}/{action}/{{{}}}", param.name),
    None => format!("{base}/{action}"),
  }
}

/// Base group first, then the page's own middleware, without repeats.
pub fn page_middleware(base_group: &str, definition: Option<&PageDefinition>) -> Vec<String> {
  let mut middleware = vec![base_group.to_string()];
  for name in definition.map(PageDefinition::middlewares).unwrap_or_default() {
    if !middleware.contains(name) {
      middleware.push(name.clone());
    }
  }
  middleware
}

/// Index route plus one route per action, in declaration order.
pub fn page_routes(
  page: &PageBase,
  definition: Option<&PageDefinition>,
  module: &str,
  action_fns: &[String],
  base_group: &str,
) -> Vec<RouteEntry> {
  let uri = page_uri(page);
  let name = route_name(page);
  let middleware = page_middleware(base_group, definition);

  let mut routes = vec![RouteEntry {
    method: HttpMethod::Get,
    uri: uri.clone(),
    name: name.clone(),
    middleware: middleware.clone(),
    module: module.to_string(),
    function: "index".to_string(),
  }];

  let actions = definition.map(PageDefinition::actions).unwrap_or_default();
  for (action, function) in actions.iter().zip(action_fns) {
    routes.push(RouteEntry {
      method: action_method(action),
      uri: action_uri(&uri, action.name(), action.signature()),
      name: format!("{name}.{}", action.name()),
      middleware: middleware.clone(),
      module: module.to_string(),
      function: function.clone(),
    });
  }
  routes
}
