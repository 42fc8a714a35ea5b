/* src/cli/core/src/config/types.rs */

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Result, bail};
use pagekit_codegen::GenerateOptions;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct PagekitConfig {
  pub pages: PagesSection,
  #[serde(default)]
  pub routes: RoutesSection,
  #[serde(default)]
  pub handlers: HandlersSection,
  #[serde(default)]
  pub types: TypesSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PagesSection {
  pub dir: String,
  #[serde(default = "default_definition_suffix")]
  pub definition_suffix: String,
  #[serde(default = "default_views")]
  pub views: Vec<String>,
  #[serde(default)]
  pub ignore: Vec<String>,
}

fn default_definition_suffix() -> String {
  ".server.rs".to_string()
}

fn default_views() -> Vec<String> {
  ["tsx", "vue", "svelte", "jsx"].map(String::from).to_vec()
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoutesSection {
  #[serde(default = "default_routes_file")]
  pub file: String,
  /// Base middleware group every route starts with.
  #[serde(default = "default_middleware")]
  pub middleware: String,
}

impl Default for RoutesSection {
  fn default() -> Self {
    Self { file: default_routes_file(), middleware: default_middleware() }
  }
}

fn default_routes_file() -> String {
  "src/generated/routes.rs".to_string()
}

fn default_middleware() -> String {
  "web".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct HandlersSection {
  #[serde(default = "default_handlers_dir")]
  pub dir: String,
  #[serde(default = "default_handlers_module")]
  pub module: String,
  #[serde(default = "default_definitions_crate")]
  pub definitions_crate: String,
}

impl Default for HandlersSection {
  fn default() -> Self {
    Self {
      dir: default_handlers_dir(),
      module: default_handlers_module(),
      definitions_crate: default_definitions_crate(),
    }
  }
}

fn default_handlers_dir() -> String {
  "src/generated/handlers".to_string()
}

fn default_handlers_module() -> String {
  "crate::generated::handlers".to_string()
}

fn default_definitions_crate() -> String {
  "crate".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypesSection {
  #[serde(default = "default_types_file")]
  pub file: String,
  #[serde(default = "default_shared")]
  pub shared: String,
  #[serde(default = "default_shared_import")]
  pub shared_import: String,
  #[serde(default = "default_models_import")]
  pub models_import: String,
}

impl Default for TypesSection {
  fn default() -> Self {
    Self {
      file: default_types_file(),
      shared: default_shared(),
      shared_import: default_shared_import(),
      models_import: default_models_import(),
    }
  }
}

fn default_types_file() -> String {
  "resources/js/types/page-props.d.ts".to_string()
}

fn default_shared() -> String {
  "SharedData".to_string()
}

fn default_shared_import() -> String {
  "./index".to_string()
}

fn default_models_import() -> String {
  "./models".to_string()
}

impl PagekitConfig {
  pub fn validate(&self) -> Result<()> {
    if self.pages.dir.trim().is_empty() {
      bail!("pages.dir must not be empty");
    }
    let suffix = &self.pages.definition_suffix;
    if !suffix.starts_with('.') || suffix.len() < 2 {
      bail!("pages.definition_suffix must start with \".\" (got \"{suffix}\")");
    }
    if self.pages.views.is_empty() {
      bail!("pages.views must not be empty");
    }
    if let Some(view) = self.pages.views.iter().find(|v| v.is_empty() || v.starts_with('.')) {
      bail!("pages.views entries are bare extensions like \"tsx\" (got \"{view}\")");
    }
    if self.routes.middleware.trim().is_empty() {
      bail!("routes.middleware must not be empty");
    }
    if self.handlers.module.trim().is_empty() {
      bail!("handlers.module must not be empty");
    }

    let outputs = [
      ("routes.file", &self.routes.file),
      ("handlers.dir", &self.handlers.dir),
      ("types.file", &self.types.file),
    ];
    let mut seen = HashSet::new();
    for (key, path) in outputs {
      if path.trim().is_empty() {
        bail!("{key} must not be empty");
      }
      if !seen.insert(path.trim_end_matches('/')) {
        bail!("{key} \"{path}\" is used by another output");
      }
    }
    Ok(())
  }

  /// Generation options with every path resolved against `base_dir`.
  pub fn to_options(&self, base_dir: &Path) -> GenerateOptions {
    GenerateOptions {
      pages_dir: base_dir.join(&self.pages.dir),
      definition_suffix: self.pages.definition_suffix.clone(),
      view_extensions: self.pages.views.clone(),
      ignore: self.pages.ignore.clone(),
      routes_file: base_dir.join(&self.routes.file),
      base_middleware: self.routes.middleware.clone(),
      handlers_dir: base_dir.join(&self.handlers.dir),
      handlers_module: self.handlers.module.clone(),
      definitions_crate: self.handlers.definitions_crate.clone(),
      types_file: base_dir.join(&self.types.file),
      shared_type: self.types.shared.clone(),
      shared_import: self.types.shared_import.clone(),
      models_import: self.types.models_import.clone(),
    }
  }
}
