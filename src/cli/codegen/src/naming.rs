/* src/cli/codegen/src/naming.rs */

// Identifier derivation shared by the route, handler and type generators.

use heck::{ToSnakeCase, ToUpperCamelCase};

/// Words the client-side route helpers cannot use as property names. A route
/// name segment equal to one of these gets a trailing `_`.
pub const RESERVED_WORDS: &[&str] = &[
  "break",
  "case",
  "class",
  "const",
  "continue",
  "debugger",
  "default",
  "delete",
  "do",
  "else",
  "export",
  "extends",
  "finally",
  "for",
  "function",
  "if",
  "import",
  "in",
  "instanceof",
  "let",
  "new",
  "return",
  "super",
  "switch",
  "this",
  "throw",
  "try",
  "typeof",
  "var",
  "void",
  "while",
  "with",
];

const RUST_KEYWORDS: &[&str] = &[
  "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do", "dyn",
  "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in", "let",
  "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref", "return",
  "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized", "use",
  "virtual", "where", "while", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const RUST_PATH_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

pub fn is_reserved_word(word: &str) -> bool {
  RESERVED_WORDS.contains(&word)
}

/// Route name segment: reserved words get a `_` suffix.
pub fn route_segment(segment: &str) -> String {
  if is_reserved_word(segment) { format!("{segment}_") } else { segment.to_string() }
}

pub fn studly(s: &str) -> String {
  s.to_upper_camel_case()
}

pub fn snake(s: &str) -> String {
  s.to_snake_case()
}

/// Make `name` usable as a Rust identifier: raw form for keywords, `_`
/// suffix for path keywords, `_` prefix when it starts with a digit.
pub fn rust_ident(name: &str) -> String {
  if RUST_PATH_KEYWORDS.contains(&name) {
    return format!("{name}_");
  }
  if RUST_KEYWORDS.contains(&name) {
    return format!("r#{name}");
  }
  if name.starts_with(|c: char| c.is_ascii_digit()) {
    return format!("_{name}");
  }
  name.to_string()
}

/// File stem for a module identifier (`r#type` lives in `type.rs`).
pub fn module_file_stem(ident: &str) -> &str {
  ident.strip_prefix("r#").unwrap_or(ident)
}

/// Whether `key` can appear unquoted as a TypeScript property name.
pub fn is_ts_identifier(key: &str) -> bool {
  let mut chars = key.chars();
  match chars.next() {
    Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
    _ => return false,
  }
  chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

pub fn quote_key(key: &str) -> String {
  if is_ts_identifier(key) { key.to_string() } else { format!("'{}'", key.replace('\'', "\\'")) }
}

const IRREGULAR: &[(&str, &str)] = &[
  ("people", "person"),
  ("men", "man"),
  ("women", "woman"),
  ("children", "child"),
  ("mice", "mouse"),
  ("geese", "goose"),
  ("feet", "foot"),
  ("teeth", "tooth"),
  ("data", "datum"),
];

const UNCOUNTABLE: &[&str] =
  &["equipment", "information", "rice", "money", "species", "series", "fish", "sheep", "news"];

/// English singular of the last word in `word`, good enough for collection
/// keys such as `todos`, `categories` or `addresses`.
pub fn singularize(word: &str) -> String {
  let lower = word.to_ascii_lowercase();
  if UNCOUNTABLE.iter().any(|u| lower.ends_with(u)) {
    return word.to_string();
  }
  for (plural, single) in IRREGULAR {
    if lower.ends_with(plural) {
      let stem = &word[..word.len() - plural.len()];
      return format!("{stem}{single}");
    }
  }
  if lower.ends_with("ies") && word.len() > 3 {
    return format!("{}y", &word[..word.len() - 3]);
  }
  for suffix in ["sses", "shes", "ches", "xes", "zes"] {
    if lower.ends_with(suffix) {
      return word[..word.len() - 2].to_string();
    }
  }
  if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
    return word.to_string();
  }
  if let Some(stem) = word.strip_suffix('s').or_else(|| word.strip_suffix('S')) {
    return stem.to_string();
  }
  word.to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn reserved_route_segments() {
    assert_eq!(route_segment("delete"), "delete_");
    assert_eq!(route_segment("new"), "new_");
    assert_eq!(route_segment("todos"), "todos");
  }

  #[test]
  fn rust_ident_escapes() {
    assert_eq!(rust_ident("type"), "r#type");
    assert_eq!(rust_ident("self"), "self_");
    assert_eq!(rust_ident("404"), "_404");
    assert_eq!(rust_ident("add_todo"), "add_todo");
    assert_eq!(module_file_stem("r#type"), "type");
  }

  #[test]
  fn casing() {
    assert_eq!(studly("todo_item"), "TodoItem");
    assert_eq!(studly("index"), "Index");
    assert_eq!(snake("deleteTodo"), "delete_todo");
    assert_eq!(snake("my-page"), "my_page");
  }

  #[test]
  fn quoting() {
    assert_eq!(quote_key("title"), "title");
    assert_eq!(quote_key("$ref"), "$ref");
    assert_eq!(quote_key("created-at"), "'created-at'");
    assert_eq!(quote_key("1st"), "'1st'");
  }

  #[test]
  fn singular_forms() {
    assert_eq!(singularize("todos"), "todo");
    assert_eq!(singularize("categories"), "category");
    assert_eq!(singularize("addresses"), "address");
    assert_eq!(singularize("boxes"), "box");
    assert_eq!(singularize("branches"), "branch");
    assert_eq!(singularize("people"), "person");
    assert_eq!(singularize("teamMembers"), "teamMember");
    assert_eq!(singularize("status"), "status");
    assert_eq!(singularize("news"), "news");
    assert_eq!(singularize("user"), "user");
  }
}
