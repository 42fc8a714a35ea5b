/* src/cli/codegen/src/discover.rs */

// Page base resolution: walk the pages directory and pair definition files
// with view components by their shared relative base.

use std::collections::BTreeMap;
use std::path::Path;

use regex::Regex;
use walkdir::WalkDir;

use crate::error::{GenerateError, Result};
use crate::options::GenerateOptions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
  Static(String),
  /// `[name]` in the source path.
  Param(String),
}

impl Segment {
  fn parse(raw: &str) -> Self {
    match raw.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
      Some(name) if !name.is_empty() => Self::Param(name.to_string()),
      _ => Self::Static(raw.to_string()),
    }
  }

  /// Name used for route names, module names and interface names.
  pub fn clean(&self) -> &str {
    match self {
      Self::Static(s) | Self::Param(s) => s,
    }
  }

  pub fn uri(&self) -> String {
    match self {
      Self::Static(s) => s.clone(),
      Self::Param(name) => format!("{{{name}}}"),
    }
  }
}

/// One page, identified by its path relative to the pages directory with
/// suffix and extension removed (`users/[user]/edit`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBase {
  pub base: String,
  pub has_definition: bool,
  pub has_view: bool,
}

impl PageBase {
  pub fn new(base: impl Into<String>) -> Self {
    Self { base: base.into(), has_definition: false, has_view: false }
  }

  pub fn segments(&self) -> Vec<Segment> {
    self.base.split('/').filter(|s| !s.is_empty()).map(Segment::parse).collect()
  }

  pub fn is_index(&self) -> bool {
    self.base.rsplit('/').next() == Some("index")
  }
}

/// Compiled ignore patterns. `*` matches any run of characters, `/` included;
/// everything else is literal and the whole base must match.
#[derive(Debug, Default)]
pub struct IgnoreSet {
  patterns: Vec<(String, Regex)>,
}

impl IgnoreSet {
  pub fn new(patterns: &[String]) -> Result<Self> {
    let patterns = patterns
      .iter()
      .map(|pattern| {
        let source = format!("^{}$", regex::escape(pattern).replace(r"\*", ".*"));
        Regex::new(&source)
          .map(|re| (pattern.clone(), re))
          .map_err(|source| GenerateError::InvalidIgnorePattern { pattern: pattern.clone(), source })
      })
      .collect::<Result<Vec<_>>>()?;
    Ok(Self { patterns })
  }

  /// The first pattern matching `base`.
  pub fn matched(&self, base: &str) -> Option<&str> {
    self.patterns.iter().find(|(_, re)| re.is_match(base)).map(|(p, _)| p.as_str())
  }
}

pub struct Discovery {
  /// Surviving pages, sorted by base.
  pub pages: Vec<PageBase>,
  /// Filtered bases with the pattern that excluded them.
  pub ignored: Vec<(String, String)>,
}

pub fn discover(options: &GenerateOptions, ignore: &IgnoreSet) -> Result<Discovery> {
  let root = &options.pages_dir;
  if !root.is_dir() {
    return Err(GenerateError::MissingPagesDir(root.clone()));
  }

  let mut found: BTreeMap<String, PageBase> = BTreeMap::new();
  for entry in WalkDir::new(root).sort_by_file_name() {
    let entry = entry.map_err(|e| {
      let path = e.path().unwrap_or(root.as_path()).to_path_buf();
      GenerateError::Io { path, source: e.into() }
    })?;
    if !entry.file_type().is_file() {
      continue;
    }
    let Some(rel) = relative_base(root, entry.path()) else {
      tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 path");
      continue;
    };

    if let Some(base) = rel.strip_suffix(options.definition_suffix.as_str()) {
      found.entry(base.to_string()).or_insert_with(|| PageBase::new(base)).has_definition = true;
      continue;
    }
    let Some((base, ext)) = rel.rsplit_once('.') else { continue };
    if !base.is_empty() && options.view_extensions.iter().any(|v| v == ext) {
      found.entry(base.to_string()).or_insert_with(|| PageBase::new(base)).has_view = true;
    }
  }

  let mut pages = Vec::new();
  let mut ignored = Vec::new();
  for (base, page) in found {
    match ignore.matched(&base) {
      Some(pattern) => {
        tracing::info!(page = %base, pattern, "ignored by pattern");
        ignored.push((base, pattern.to_string()));
      }
      None => pages.push(page),
    }
  }
  tracing::debug!(pages = pages.len(), ignored = ignored.len(), "discovered pages");
  Ok(Discovery { pages, ignored })
}

/// Path relative to `root`, `/`-separated regardless of platform.
fn relative_base(root: &Path, path: &Path) -> Option<String> {
  let rel = path.strip_prefix(root).ok()?;
  let parts: Option<Vec<&str>> = rel.components().map(|c| c.as_os_str().to_str()).collect();
  Some(parts?.join("/"))
}

#[cfg(test)]
mod tests {
  use std::fs;

  use super::*;

  fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "").unwrap();
  }

  fn options(root: &Path) -> GenerateOptions {
    GenerateOptions { pages_dir: root.to_path_buf(), ..GenerateOptions::default() }
  }

  #[test]
  fn segments_and_index() {
    let page = PageBase::new("users/[user]/edit");
    let segs = page.segments();
    assert_eq!(segs[1], Segment::Param("user".into()));
    assert_eq!(segs[1].uri(), "{user}");
    assert_eq!(segs[1].clean(), "user");
    assert!(!page.is_index());
    assert!(PageBase::new("todos/index").is_index());
    assert!(PageBase::new("index").is_index());
  }

  #[test]
  fn pairs_definitions_with_views() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "todos/index.server.rs");
    touch(dir.path(), "todos/index.tsx");
    touch(dir.path(), "about.vue");
    touch(dir.path(), "users/[user]/edit.server.rs");
    touch(dir.path(), "notes.md");

    let found = discover(&options(dir.path()), &IgnoreSet::default()).unwrap();
    let bases: Vec<_> = found.pages.iter().map(|p| p.base.as_str()).collect();
    assert_eq!(bases, vec!["about", "todos/index", "users/[user]/edit"]);
    assert!(found.pages[0].has_view && !found.pages[0].has_definition);
    assert!(found.pages[1].has_view && found.pages[1].has_definition);
    assert!(!found.pages[2].has_view && found.pages[2].has_definition);
  }

  #[test]
  fn ignore_patterns_filter_bases() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "auth/login.tsx");
    touch(dir.path(), "auth/password/reset.tsx");
    touch(dir.path(), "welcome.tsx");
    touch(dir.path(), "welcome/back.tsx");
    touch(dir.path(), "dashboard.tsx");

    let ignore = IgnoreSet::new(&["auth/*".to_string(), "welcome".to_string()]).unwrap();
    let found = discover(&options(dir.path()), &ignore).unwrap();
    let bases: Vec<_> = found.pages.iter().map(|p| p.base.as_str()).collect();
    assert_eq!(bases, vec!["dashboard", "welcome/back"]);
    assert_eq!(found.ignored.len(), 3);
    assert_eq!(found.ignored[0], ("auth/login".to_string(), "auth/*".to_string()));
  }

  #[test]
  fn ignore_pattern_is_literal_outside_wildcards() {
    let ignore = IgnoreSet::new(&["a.b".to_string()]).unwrap();
    assert!(ignore.matched("a.b").is_some());
    assert!(ignore.matched("axb").is_none());
  }

  #[cfg(target_os = "linux")]
  #[test]
  fn non_utf8_paths_are_skipped() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "about.tsx");
    fs::write(dir.path().join(OsStr::from_bytes(b"bad\xff.tsx")), "").unwrap();

    let found = discover(&options(dir.path()), &IgnoreSet::default()).unwrap();
    let bases: Vec<_> = found.pages.iter().map(|p| p.base.as_str()).collect();
    assert_eq!(bases, vec!["about"]);
  }

  #[test]
  fn missing_pages_dir_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = discover(&options(&dir.path().join("nope")), &IgnoreSet::default()).err().unwrap();
    assert!(matches!(err, GenerateError::MissingPagesDir(_)));
  }
}
