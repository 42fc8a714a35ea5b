/* src/cli/codegen/src/options.rs */

use std::path::PathBuf;

/// First line of every file the generator owns. Stale handler collection
/// only ever deletes files that start with it.
pub const GENERATED_MARKER: &str = "// @generated by pagekit. Do not edit.";

/// Everything a generation run needs to know. Paths are used as given; the
/// CLI resolves them against the project root.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
  pub pages_dir: PathBuf,
  pub definition_suffix: String,
  pub view_extensions: Vec<String>,
  pub ignore: Vec<String>,
  pub routes_file: PathBuf,
  /// Middleware group every route starts with.
  pub base_middleware: String,
  pub handlers_dir: PathBuf,
  /// Rust path of the handlers module as seen from the routes file.
  pub handlers_module: String,
  /// Crate path definition modules are imported from, e.g. `crate` or `my_app`.
  pub definitions_crate: String,
  pub types_file: PathBuf,
  pub shared_type: String,
  pub shared_import: String,
  pub models_import: String,
}

impl Default for GenerateOptions {
  fn default() -> Self {
    Self {
      pages_dir: PathBuf::from("resources/pages"),
      definition_suffix: ".server.rs".to_string(),
      view_extensions: ["tsx", "vue", "svelte", "jsx"].map(String::from).to_vec(),
      ignore: Vec::new(),
      routes_file: PathBuf::from("src/generated/routes.rs"),
      base_middleware: "web".to_string(),
      handlers_dir: PathBuf::from("src/generated/handlers"),
      handlers_module: "crate::generated::handlers".to_string(),
      definitions_crate: "crate".to_string(),
      types_file: PathBuf::from("resources/js/types/page-props.d.ts"),
      shared_type: "SharedData".to_string(),
      shared_import: "./index".to_string(),
      models_import: "./models".to_string(),
    }
  }
}
