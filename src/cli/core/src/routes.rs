/* src/cli/core/src/routes.rs */

// `pagekit routes`: print the route table a generation run would emit.

use std::path::Path;

use anyhow::{Context, Result};
use pagekit::DefinitionSource;
use pagekit_codegen::{Generator, RouteEntry};
use serde::Serialize;

use crate::config::PagekitConfig;
use crate::ui::{self, BOLD, CYAN, DIM, RESET};

#[derive(Debug, Serialize)]
struct RouteRow<'a> {
  method: &'a str,
  uri: &'a str,
  name: &'a str,
  handler: String,
  middleware: &'a [String],
}

impl<'a> RouteRow<'a> {
  fn new(route: &'a RouteEntry, handlers_module: &str) -> Self {
    Self {
      method: route.method.as_str(),
      uri: &route.uri,
      name: &route.name,
      handler: format!("{handlers_module}::{}", route.handler_path()),
      middleware: &route.middleware,
    }
  }
}

pub fn run_routes(
  config: &PagekitConfig,
  base_dir: &Path,
  source: &dyn DefinitionSource,
  json: bool,
) -> Result<()> {
  let options = config.to_options(base_dir);
  let plan = Generator::new(&options, source).plan().context("failed to build route table")?;
  let rows: Vec<RouteRow<'_>> =
    plan.routes.iter().map(|r| RouteRow::new(r, &options.handlers_module)).collect();

  if json {
    ui::line(&serde_json::to_string_pretty(&rows).context("failed to serialize routes")?);
    return Ok(());
  }
  for row in format_table(&rows) {
    ui::line(&row);
  }
  ui::blank();
  ui::line(&format!("  {DIM}{} routes{RESET}", rows.len()));
  Ok(())
}

fn format_table(rows: &[RouteRow<'_>]) -> Vec<String> {
  let uri_width = rows.iter().map(|r| r.uri.len()).max().unwrap_or(0).max(3);
  let name_width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0).max(4);
  let mut lines = vec![format!(
    "  {BOLD}{:<7} {:<uri_width$} {:<name_width$} HANDLER{RESET}",
    "METHOD", "URI", "NAME"
  )];
  for row in rows {
    lines.push(format!(
      "  {CYAN}{:<7}{RESET} {:<uri_width$} {:<name_width$} {} {DIM}[{}]{RESET}",
      row.method,
      row.uri,
      row.name,
      row.handler,
      row.middleware.join(", "),
    ));
  }
  lines
}
