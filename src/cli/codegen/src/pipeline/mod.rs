/* src/cli/codegen/src/pipeline/mod.rs */

// One generation run: discover, load every definition, synthesize all
// artifacts in memory, then write. Any fatal error aborts before the first
// write.

#[cfg(test)]
mod tests;

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use pagekit::{DefinitionSource, PageDefinition};

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::discover::{IgnoreSet, PageBase, discover};
use crate::error::{GenerateError, Result};
use crate::handler::{self, StubInput};
use crate::naming;
use crate::options::GenerateOptions;
use crate::route::{self, RouteEntry};
use crate::types::{self, PageInterface, TypeContext};

/// A file the run owns, with its full new contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
  pub path: PathBuf,
  pub contents: String,
}

impl Artifact {
  fn new(path: PathBuf, contents: String) -> Self {
    Self { path, contents }
  }

  /// Missing or different on disk.
  pub fn is_outdated(&self) -> bool {
    !fs::read_to_string(&self.path).is_ok_and(|current| current == self.contents)
  }
}

/// Everything a run would produce, computed before touching the disk.
#[derive(Debug)]
pub struct Plan {
  /// Routes file, handler stubs, handlers `mod.rs`, types module.
  pub files: Vec<Artifact>,
  /// Generated stubs whose page is gone.
  pub stale: Vec<PathBuf>,
  pub routes: Vec<RouteEntry>,
  pub interfaces: usize,
  pub pages: usize,
  /// Bases filtered by ignore patterns, with the matching pattern.
  pub ignored: Vec<(String, String)>,
  pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Default)]
pub struct GenerateReport {
  pub written: Vec<PathBuf>,
  pub unchanged: usize,
  pub removed: Vec<PathBuf>,
}

impl Plan {
  /// Paths a write would create, change or delete.
  pub fn outdated(&self) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> =
      self.files.iter().filter(|f| f.is_outdated()).map(|f| f.path.clone()).collect();
    paths.extend(self.stale.iter().cloned());
    paths
  }

  /// Write changed files and delete stale stubs. Files whose contents are
  /// already current are left untouched.
  pub fn write(&self) -> Result<GenerateReport> {
    let mut report = GenerateReport::default();
    for file in &self.files {
      if !file.is_outdated() {
        report.unchanged += 1;
        continue;
      }
      if let Some(parent) = file.path.parent() {
        fs::create_dir_all(parent).map_err(GenerateError::io(parent))?;
      }
      fs::write(&file.path, &file.contents).map_err(GenerateError::io(&file.path))?;
      tracing::debug!(path = %file.path.display(), "wrote");
      report.written.push(file.path.clone());
    }
    for path in &self.stale {
      fs::remove_file(path).map_err(GenerateError::io(path))?;
      tracing::info!(path = %path.display(), "removed stale handler");
      report.removed.push(path.clone());
    }
    Ok(report)
  }
}

pub struct Generator<'a> {
  options: &'a GenerateOptions,
  source: &'a dyn DefinitionSource,
}

impl<'a> Generator<'a> {
  pub fn new(options: &'a GenerateOptions, source: &'a dyn DefinitionSource) -> Self {
    Self { options, source }
  }

  pub fn plan(&self) -> Result<Plan> {
    let options = self.options;
    let ignore = IgnoreSet::new(&options.ignore)?;
    let discovery = discover(options, &ignore)?;

    let mut diags = Diagnostics::default();
    let mut files = Vec::new();
    let mut routes: Vec<RouteEntry> = Vec::new();
    let mut interfaces: Vec<PageInterface> = Vec::new();
    let mut modules: BTreeMap<String, String> = BTreeMap::new();
    let mut route_owners: BTreeMap<String, String> = BTreeMap::new();

    for page in &discovery.pages {
      let loaded = self.load(page)?;
      let definition = loaded.as_ref().map(|(def, _, _)| def);

      let module = handler::module_name(page);
      if let Some(first) = modules.insert(module.clone(), page.base.clone()) {
        return Err(GenerateError::ModuleCollision { module, first, second: page.base.clone() });
      }
      let action_fns = handler::action_fn_names(page, definition)?;

      let page_routes =
        route::page_routes(page, definition, &module, &action_fns, &options.base_middleware);
      for entry in &page_routes {
        if let Some(first) = route_owners.insert(entry.name.clone(), page.base.clone()) {
          return Err(GenerateError::RouteCollision {
            name: entry.name.clone(),
            first,
            second: page.base.clone(),
          });
        }
      }
      routes.extend(page_routes);

      let stub = handler::render_handler(&StubInput {
        page,
        definition,
        module_path: loaded.as_ref().map(|(_, path, _)| path.as_str()),
        route_name: &route::route_name(page),
        action_fns: &action_fns,
        definitions_crate: &options.definitions_crate,
      });
      let stub_path = options.handlers_dir.join(format!("{}.rs", naming::module_file_stem(&module)));
      files.push(Artifact::new(stub_path, stub));

      if let Some((definition, _, source_text)) = &loaded {
        let used = types::scan_used_names(source_text);
        let cx = TypeContext {
          catalog: self.source.entities(),
          used: &used,
          models_import: &options.models_import,
        };
        if let Some(interface) = types::infer_page(page, definition, &cx, &mut diags) {
          interfaces.push(interface);
        }
      }
    }

    let module_names: Vec<String> = modules.keys().cloned().collect();
    files.push(Artifact::new(options.handlers_dir.join("mod.rs"), handler::render_mod(&module_names)));
    files.push(Artifact::new(
      options.routes_file.clone(),
      route::render_route_table(&routes, &options.handlers_module),
    ));
    files.push(Artifact::new(
      options.types_file.clone(),
      types::render_module(&interfaces, &options.shared_type, &options.shared_import),
    ));

    let mut keep: BTreeSet<String> =
      module_names.iter().map(|m| naming::module_file_stem(m).to_string()).collect();
    keep.insert("mod".to_string());
    let stale = handler::stale_handlers(&options.handlers_dir, &keep)?;
    for path in &stale {
      diags.info(None, format!("stale handler {} will be removed", path.display()));
    }

    tracing::debug!(
      pages = discovery.pages.len(),
      routes = routes.len(),
      interfaces = interfaces.len(),
      "planned generation"
    );
    Ok(Plan {
      files,
      stale,
      routes,
      interfaces: interfaces.len(),
      pages: discovery.pages.len(),
      ignored: discovery.ignored,
      diagnostics: diags.into_vec(),
    })
  }

  /// Definition, module path and source text for a page with a definition
  /// file. The definition is rebuilt from its factory on every run.
  fn load(&self, page: &PageBase) -> Result<Option<(PageDefinition, String, String)>> {
    if !page.has_definition {
      return Ok(None);
    }
    let base = page.base.as_str();
    let loaded = self
      .source
      .load(base)
      .map_err(|source| GenerateError::Definition { base: base.to_string(), source })?;
    loaded.definition.validate().map_err(|err| GenerateError::InvalidDefinition {
      base: base.to_string(),
      message: err.message().to_string(),
    })?;
    let path = definition_path(self.options, base);
    let text = fs::read_to_string(&path).map_err(GenerateError::io(&path))?;
    tracing::debug!(page = base, module = %loaded.module_path, "loaded definition");
    Ok(Some((loaded.definition, loaded.module_path, text)))
  }
}

fn definition_path(options: &GenerateOptions, base: &str) -> PathBuf {
  options.pages_dir.join(format!("{base}{}", options.definition_suffix))
}

/// Plan and write in one go.
pub fn generate(options: &GenerateOptions, source: &dyn DefinitionSource) -> Result<(Plan, GenerateReport)> {
  let plan = Generator::new(options, source).plan()?;
  let report = plan.write()?;
  Ok((plan, report))
}

/// Files a previous run produced and `clean` may delete: the routes file and
/// handler stubs carrying the generated marker, and the types module.
pub fn generated_files(options: &GenerateOptions) -> Result<Vec<PathBuf>> {
  let mut found = Vec::new();
  if options.routes_file.is_file() && handler::is_generated(&options.routes_file)? {
    found.push(options.routes_file.clone());
  }
  found.extend(handler::stale_handlers(&options.handlers_dir, &BTreeSet::new())?);
  if options.types_file.is_file() && is_generated_types(&options.types_file)? {
    found.push(options.types_file.clone());
  }
  Ok(found)
}

fn is_generated_types(path: &Path) -> Result<bool> {
  let text = fs::read_to_string(path).map_err(GenerateError::io(path))?;
  Ok(text.starts_with(types::BANNER))
}
