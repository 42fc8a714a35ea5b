/* src/cli/core/src/generate.rs */

// `pagekit generate`: one full pass over the pages directory. `--check`
// plans without writing and fails when anything is out of date.

use std::path::Path;

use anyhow::{Context, Result, bail};
use pagekit::DefinitionSource;
use pagekit_codegen::{Generator, Level, Plan};

use crate::config::PagekitConfig;
use crate::ui;

pub fn run_generate(
  config: &PagekitConfig,
  base_dir: &Path,
  source: &dyn DefinitionSource,
  check: bool,
) -> Result<()> {
  let options = config.to_options(base_dir);
  let plan = Generator::new(&options, source).plan().context("generation failed")?;
  print_diagnostics(&plan);

  if check {
    let outdated = plan.outdated();
    if outdated.is_empty() {
      ui::ok("generated files are up to date");
      return Ok(());
    }
    for path in &outdated {
      ui::detail(&relative(base_dir, path));
    }
    bail!("{} generated file(s) out of date, run `pagekit generate`", outdated.len());
  }

  let report = plan.write().context("failed to write generated files")?;
  for path in &report.written {
    ui::detail_ok(&format!("wrote {}", relative(base_dir, path)));
  }
  for path in &report.removed {
    ui::detail(&format!("removed stale {}", relative(base_dir, path)));
  }
  ui::ok(&format!(
    "{} pages, {} routes, {} interfaces ({} written, {} unchanged)",
    plan.pages,
    plan.routes.len(),
    plan.interfaces,
    report.written.len(),
    report.unchanged,
  ));
  Ok(())
}

fn print_diagnostics(plan: &Plan) {
  for (base, pattern) in &plan.ignored {
    ui::detail(&format!("ignored {base} (pattern \"{pattern}\")"));
  }
  for diag in &plan.diagnostics {
    match diag.level {
      Level::Warn => ui::warn(&diag.to_string()),
      Level::Info => ui::detail(&diag.to_string()),
    }
  }
}

pub(crate) fn relative(base_dir: &Path, path: &Path) -> String {
  path.strip_prefix(base_dir).unwrap_or(path).display().to_string()
}
