/* src/cli/codegen/src/types/imports.rs */

use std::collections::BTreeMap;
use std::sync::OnceLock;

use pagekit::EntityCatalog;
use regex::Regex;

/// Type imports the declaration module needs: name -> module specifier.
/// Built per page and merged once; iteration is alphabetical.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet {
  names: BTreeMap<String, String>,
}

impl ImportSet {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add(&mut self, name: impl Into<String>, module: impl Into<String>) {
    self.names.insert(name.into(), module.into());
  }

  pub fn merge(&mut self, other: ImportSet) {
    self.names.extend(other.names);
  }

  pub fn contains(&self, name: &str) -> bool {
    self.names.contains_key(name)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.names.iter().map(|(n, m)| (n.as_str(), m.as_str()))
  }

  pub fn is_empty(&self) -> bool {
    self.names.is_empty()
  }
}

/// Names a definition file brings into scope with `use`: local name -> path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsedNames {
  names: BTreeMap<String, String>,
}

impl UsedNames {
  /// Entity a local name refers to, if the catalog knows it.
  pub fn entity<'a>(&'a self, local: &str, catalog: &EntityCatalog) -> Option<&'a str> {
    self.names.get(local).and_then(|path| catalog.resolve(path))
  }

  pub fn get(&self, local: &str) -> Option<&str> {
    self.names.get(local).map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.names.len()
  }

  pub fn is_empty(&self) -> bool {
    self.names.is_empty()
  }
}

fn use_decl_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"(?m)^[ \t]*(?:pub(?:\([^)]*\))?\s+)?use\s+([^;]+);").unwrap())
}

/// Lexical scan of `use` declarations. Groups (`{A, B}`), nested groups and
/// `as` renames are understood; globs are skipped.
pub fn scan_used_names(source: &str) -> UsedNames {
  let mut names = BTreeMap::new();
  for caps in use_decl_re().captures_iter(source) {
    let tree: String = caps[1].split_whitespace().collect::<Vec<_>>().join(" ");
    for (local, path) in expand("", &tree) {
      names.insert(local, path);
    }
  }
  UsedNames { names }
}

fn expand(prefix: &str, tree: &str) -> Vec<(String, String)> {
  let tree = tree.trim();
  if let Some(open) = tree.find('{') {
    let Some(close) = tree.rfind('}') else { return Vec::new() };
    let head = tree[..open].trim().trim_end_matches("::");
    let prefix = join(prefix, head);
    return split_top_level(&tree[open + 1..close])
      .into_iter()
      .flat_map(|item| expand(&prefix, item))
      .collect();
  }

  let (path, alias) = match tree.split_once(" as ") {
    Some((path, alias)) => (path.trim(), Some(alias.trim())),
    None => (tree, None),
  };
  if path.is_empty() || path.ends_with('*') {
    return Vec::new();
  }
  let full = if path == "self" { prefix.to_string() } else { join(prefix, path) };
  let Some(last) = full.rsplit("::").next() else { return Vec::new() };
  let local = alias.unwrap_or(last);
  if local == "_" || local.is_empty() {
    return Vec::new();
  }
  vec![(local.to_string(), full.clone())]
}

fn join(prefix: &str, rest: &str) -> String {
  match (prefix.is_empty(), rest.is_empty()) {
    (true, _) => rest.to_string(),
    (false, true) => prefix.to_string(),
    (false, false) => format!("{prefix}::{rest}"),
  }
}

fn split_top_level(list: &str) -> Vec<&str> {
  let mut items = Vec::new();
  let mut depth = 0usize;
  let mut start = 0;
  for (i, c) in list.char_indices() {
    match c {
      '{' => depth += 1,
      '}' => depth = depth.saturating_sub(1),
      ',' if depth == 0 => {
        items.push(&list[start..i]);
        start = i + 1;
      }
      _ => {}
    }
  }
  items.push(&list[start..]);
  items.into_iter().map(str::trim).filter(|s| !s.is_empty()).collect()
}
