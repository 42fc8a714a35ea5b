/* src/cli/codegen/src/handler/mod.rs */

// Handler synthesis: one Rust module per page bridging the definition into
// the request/response runtime, plus the `mod.rs` that lists them.

mod render;


use std::collections::BTreeSet;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use pagekit::PageDefinition;

use crate::discover::PageBase;
use crate::error::{GenerateError, Result};
use crate::naming;
use crate::options::GENERATED_MARKER;

pub use render::{StubInput, render_handler, render_mod};

/// Module identifier for a page: snake-cased clean segments joined by `_`,
/// `home` for the root. `mod` is taken by the module list.
pub fn module_name(page: &PageBase) -> String {
  let parts: Vec<String> = page
    .segments()
    .iter()
    .map(|s| naming::snake(s.clean()))
    .filter(|s| !s.is_empty())
    .collect();
  if parts.is_empty() {
    return "home".to_string();
  }
  let joined = parts.join("_");
  if joined == "mod" {
    return "mod_".to_string();
  }
  naming::rust_ident(&joined)
}

/// Handler fn per action, in declaration order. Two actions mapping to the
/// same fn, or an action mapping to `index`, is a collision.
pub fn action_fn_names(page: &PageBase, definition: Option<&PageDefinition>) -> Result<Vec<String>> {
  let Some(definition) = definition else { return Ok(Vec::new()) };
  let mut taken: Vec<(String, String)> = vec![("index".to_string(), "index".to_string())];
  let mut names = Vec::new();
  for action in definition.actions() {
    let function = naming::rust_ident(&naming::snake(action.name()));
    if let Some((_, first)) = taken.iter().find(|(f, _)| *f == function) {
      return Err(GenerateError::HandlerCollision {
        base: page.base.clone(),
        function,
        first: first.clone(),
        second: action.name().to_string(),
      });
    }
    taken.push((function.clone(), action.name().to_string()));
    names.push(function);
  }
  Ok(names)
}

/// Previously generated stubs in `dir` whose module is not in `keep`. Files
/// without the generated marker on their first line are never touched.
pub fn stale_handlers(dir: &Path, keep: &BTreeSet<String>) -> Result<Vec<PathBuf>> {
  if !dir.is_dir() {
    return Ok(Vec::new());
  }
  let mut stale = Vec::new();
  for entry in fs::read_dir(dir).map_err(GenerateError::io(dir))? {
    let path = entry.map_err(GenerateError::io(dir))?.path();
    if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("rs") {
      continue;
    }
    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else { continue };
    if keep.contains(stem) || !is_generated(&path)? {
      continue;
    }
    stale.push(path);
  }
  stale.sort();
  Ok(stale)
}

pub(crate) fn is_generated(path: &Path) -> Result<bool> {
  let file = fs::File::open(path).map_err(GenerateError::io(path))?;
  let mut first = String::new();
  BufReader::new(file).read_line(&mut first).map_err(GenerateError::io(path))?;
  Ok(first.trim_end() == GENERATED_MARKER)
}
