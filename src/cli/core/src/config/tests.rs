/* src/cli/core/src/config/tests.rs */

use std::fs;
use std::path::Path;

use super::*;

#[test]
fn parse_minimal_config() {
  let config = parse_config("[pages]\ndir = \"resources/pages\"\n").unwrap();
  assert_eq!(config.pages.dir, "resources/pages");
  assert_eq!(config.pages.definition_suffix, ".server.rs");
  assert_eq!(config.pages.views, vec!["tsx", "vue", "svelte", "jsx"]);
  assert!(config.pages.ignore.is_empty());
  assert_eq!(config.routes.file, "src/generated/routes.rs");
  assert_eq!(config.routes.middleware, "web");
  assert_eq!(config.handlers.module, "crate::generated::handlers");
  assert_eq!(config.types.shared, "SharedData");
}

#[test]
fn parse_full_config() {
  let toml_str = r#"
[pages]
dir = "app/pages"
definition_suffix = ".page.rs"
views = ["vue"]
ignore = ["auth/*", "welcome"]

[routes]
file = "src/routes.rs"
middleware = "api"

[handlers]
dir = "src/handlers"
module = "crate::handlers"
definitions_crate = "my_app"

[types]
file = "web/types/pages.d.ts"
shared = "AppShared"
shared_import = "@/types"
models_import = "@/models"
"#;
  let config = parse_config(toml_str).unwrap();
  assert_eq!(config.pages.ignore, vec!["auth/*", "welcome"]);
  assert_eq!(config.handlers.definitions_crate, "my_app");

  let options = config.to_options(Path::new("/project"));
  assert_eq!(options.pages_dir, Path::new("/project/app/pages"));
  assert_eq!(options.definition_suffix, ".page.rs");
  assert_eq!(options.view_extensions, vec!["vue"]);
  assert_eq!(options.routes_file, Path::new("/project/src/routes.rs"));
  assert_eq!(options.base_middleware, "api");
  assert_eq!(options.handlers_dir, Path::new("/project/src/handlers"));
  assert_eq!(options.handlers_module, "crate::handlers");
  assert_eq!(options.types_file, Path::new("/project/web/types/pages.d.ts"));
  assert_eq!(options.shared_type, "AppShared");
  assert_eq!(options.shared_import, "@/types");
  assert_eq!(options.models_import, "@/models");
}

#[test]
fn missing_pages_section_is_an_error() {
  let err = parse_config("[routes]\nfile = \"x.rs\"\n").unwrap_err();
  assert!(format!("{err:#}").contains("pages"));
}

#[test]
fn rejects_bad_values() {
  let cases = [
    ("[pages]\ndir = \"\"\n", "pages.dir"),
    ("[pages]\ndir = \"p\"\ndefinition_suffix = \"server.rs\"\n", "definition_suffix"),
    ("[pages]\ndir = \"p\"\nviews = []\n", "pages.views"),
    ("[pages]\ndir = \"p\"\nviews = [\".tsx\"]\n", "bare extensions"),
    ("[pages]\ndir = \"p\"\n[routes]\nmiddleware = \" \"\n", "routes.middleware"),
    ("[pages]\ndir = \"p\"\n[types]\nfile = \"src/generated/routes.rs\"\n", "types.file"),
  ];
  for (toml_str, needle) in cases {
    let err = parse_config(toml_str).unwrap_err();
    assert!(format!("{err:#}").contains(needle), "{toml_str}: {err:#}");
  }
}

#[test]
fn find_config_walks_upward() {
  let dir = tempfile::tempdir().unwrap();
  let nested = dir.path().join("src/generated/handlers");
  fs::create_dir_all(&nested).unwrap();
  fs::write(dir.path().join(CONFIG_FILE), "[pages]\ndir = \"resources/pages\"\n").unwrap();

  let found = find_config(&nested).unwrap();
  assert_eq!(found, dir.path().canonicalize().unwrap().join(CONFIG_FILE));
  assert_eq!(load_config(&found).unwrap().pages.dir, "resources/pages");
}

#[test]
fn find_config_reports_missing_file() {
  let dir = tempfile::tempdir().unwrap();
  let err = find_config(dir.path()).unwrap_err();
  assert!(err.to_string().contains("pagekit.toml not found"));
}
