/* src/cli/codegen/src/types/render.rs */

use std::fmt::Write as _;

use super::{ImportSet, PageInterface, TsType};
use crate::naming;

pub(crate) const BANNER: &str = "\
/**
 * -----------------------------------------------------------
 * THIS FILE IS AUTO-GENERATED by `pagekit generate`. Do not edit.
 * -----------------------------------------------------------
 */
";

pub fn render_type(ty: &TsType) -> String {
  match ty {
    TsType::Null => "null".to_string(),
    TsType::Boolean => "boolean".to_string(),
    TsType::Number => "number".to_string(),
    TsType::String => "string".to_string(),
    TsType::Unknown => "unknown".to_string(),
    TsType::Any => "any".to_string(),
    TsType::Entity(name) => name.clone(),
    TsType::Array(inner) => format!("{}[]", render_type(inner)),
    TsType::Object(fields) if fields.is_empty() => "Record<string, never>".to_string(),
    TsType::Object(fields) => {
      let body: Vec<String> = fields
        .iter()
        .map(|(key, ty)| format!("{}: {}", naming::quote_key(key), render_type(ty)))
        .collect();
      format!("{{ {} }}", body.join("; "))
    }
  }
}

pub fn render_interface(interface: &PageInterface, shared_type: &str) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "export interface {} extends {shared_type} {{", interface.name);
  if !interface.actions.is_empty() {
    out.push_str("  actions: {\n");
    for action in &interface.actions {
      let mark = if action.optional { "?" } else { "" };
      let _ = writeln!(out, "    {}{mark}: string;", naming::quote_key(&action.name));
    }
    out.push_str("  };\n");
  }
  for field in &interface.fields {
    let mark = if field.optional { "?" } else { "" };
    let _ = write!(out, "  {}{mark}: {};", naming::quote_key(&field.key), render_type(&field.ty));
    if let Some(note) = &field.note {
      let _ = write!(out, " // {note}");
    }
    out.push('\n');
  }
  out.push_str("  [key: string]: unknown; // Allow additional props\n}\n");
  out
}

/// Whole declaration module: banner, imports, then interfaces in the order
/// given.
pub fn render_module(interfaces: &[PageInterface], shared_type: &str, shared_import: &str) -> String {
  let mut imports = ImportSet::new();
  imports.add(shared_type, shared_import);
  for interface in interfaces {
    imports.merge(interface.imports.clone());
  }

  let mut out = String::from(BANNER);
  out.push('\n');
  for (name, module) in imports.iter() {
    let _ = writeln!(out, "import type {{ {name} }} from '{module}';");
  }
  for interface in interfaces {
    out.push('\n');
    out.push_str(&render_interface(interface, shared_type));
  }
  out
}
