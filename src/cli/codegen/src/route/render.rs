/* src/cli/codegen/src/route/render.rs */

use std::fmt::Write as _;

use super::RouteEntry;
use crate::options::GENERATED_MARKER;

/// Render the route-table source: one `routes.add(...)` per entry, in order.
pub fn render_route_table(routes: &[RouteEntry], handlers_module: &str) -> String {
  let mut out = String::new();
  out.push_str(GENERATED_MARKER);
  out.push_str("\n\nuse pagekit::{HttpMethod, PageError, RouteTable};\n\n");
  out.push_str("pub fn register(routes: &mut RouteTable) -> Result<(), PageError> {\n");
  if routes.is_empty() {
    out.push_str("  let _ = routes;\n");
  }
  for route in routes {
    let middleware: Vec<String> = route.middleware.iter().map(|m| format!("{m:?}")).collect();
    let _ = writeln!(
      out,
      "  routes.add(HttpMethod::{}, {:?}, {:?}, &[{}], {handlers_module}::{})?;",
      route.method.variant(),
      route.uri,
      route.name,
      middleware.join(", "),
      route.handler_path(),
    );
  }
  out.push_str("  Ok(())\n}\n");
  out
}
