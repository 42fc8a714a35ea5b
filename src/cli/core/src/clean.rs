/* src/cli/core/src/clean.rs */

// `pagekit clean` command: removes the routes file, generated handler stubs
// and the types module. Hand-written files in the handlers directory stay.

use std::path::Path;

use anyhow::{Context, Result};
use pagekit_codegen::generated_files;

use crate::config::PagekitConfig;
use crate::generate::relative;
use crate::ui;

pub fn run_clean(config: &PagekitConfig, base_dir: &Path) -> Result<()> {
  ui::arrow("cleaning generated files");
  let options = config.to_options(base_dir);

  let files = generated_files(&options).context("failed to scan generated files")?;
  for path in &files {
    std::fs::remove_file(path).with_context(|| format!("failed to remove {}", path.display()))?;
    ui::detail(&format!("deleted {}", relative(base_dir, path)));
  }
  remove_dir_if_empty(&options.handlers_dir)?;

  ui::ok(&format!("clean complete ({} files)", files.len()));
  Ok(())
}

fn remove_dir_if_empty(path: &Path) -> Result<()> {
  if !path.is_dir() {
    return Ok(());
  }
  let mut entries =
    std::fs::read_dir(path).with_context(|| format!("failed to read {}", path.display()))?;
  if entries.next().is_none() {
    std::fs::remove_dir(path).with_context(|| format!("failed to remove {}", path.display()))?;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use std::fs;

  use pagekit_codegen::GENERATED_MARKER;

  use super::*;
  use crate::config::parse_config;

  fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
  }

  #[test]
  fn removes_only_generated_files() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    let marked = format!("{GENERATED_MARKER}\n");
    write(root, "src/generated/routes.rs", &marked);
    write(root, "src/generated/handlers/mod.rs", &marked);
    write(root, "src/generated/handlers/todos_index.rs", &marked);
    write(root, "src/generated/handlers/custom.rs", "// mine\n");
    write(root, "resources/js/types/page-props.d.ts", "// hand written\n");

    let config = parse_config("[pages]\ndir = \"resources/pages\"\n").unwrap();
    run_clean(&config, root).unwrap();

    assert!(!root.join("src/generated/routes.rs").exists());
    assert!(!root.join("src/generated/handlers/todos_index.rs").exists());
    assert!(root.join("src/generated/handlers/custom.rs").exists());
    assert!(root.join("resources/js/types/page-props.d.ts").exists());
  }

  #[test]
  fn removes_emptied_handlers_dir() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "src/generated/handlers/mod.rs", &format!("{GENERATED_MARKER}\n"));

    let config = parse_config("[pages]\ndir = \"resources/pages\"\n").unwrap();
    run_clean(&config, root).unwrap();
    assert!(!root.join("src/generated/handlers").exists());
  }
}
