/* src/cli/codegen/src/handler/render.rs */

use std::fmt::Write as _;

use pagekit::{PageDefinition, ParamKind, Signature, entity_basename};

use crate::discover::PageBase;
use crate::naming;
use crate::options::GENERATED_MARKER;

pub struct StubInput<'a> {
  pub page: &'a PageBase,
  pub definition: Option<&'a PageDefinition>,
  /// Definition module path inside the definitions crate.
  pub module_path: Option<&'a str>,
  pub route_name: &'a str,
  /// Handler fn per action, parallel to `definition.actions()`.
  pub action_fns: &'a [String],
  pub definitions_crate: &'a str,
}

pub fn render_handler(input: &StubInput<'_>) -> String {
  let definition = input.definition;
  let loader_sig = definition.and_then(PageDefinition::page_loader).map(|l| l.signature());
  let actions = definition.map(PageDefinition::actions).unwrap_or_default();
  let url_actions: Vec<&str> =
    actions.iter().filter(|a| !a.signature().has_entity()).map(|a| a.name()).collect();

  let mut imports = vec!["Inertia", "Map", "PageError", "RequestContext", "Response"];
  if loader_sig.is_some() || !actions.is_empty() {
    imports.push("Args");
  }
  if loader_sig.is_some() {
    imports.extend(["PropEntry", "PropStrategy"]);
  }
  if !url_actions.is_empty() {
    imports.push("Value");
  }
  imports.sort_unstable();

  let mut out = String::new();
  out.push_str(GENERATED_MARKER);
  let _ = writeln!(out, "\n// page: {}\n", input.page.base);
  let _ = writeln!(out, "use pagekit::{{{}}};", imports.join(", "));
  let needs_definition = loader_sig.is_some() || !actions.is_empty();
  if let Some(module_path) = input.module_path.filter(|_| needs_definition) {
    let _ = writeln!(out, "\nuse {}::{module_path} as definition;", input.definitions_crate);
  }

  let component = match definition {
    Some(def) => def.component().to_string(),
    None => input.page.base.clone(),
  };

  // -- Index handler --

  let uses_ctx = loader_sig.is_some_and(|s| !s.is_empty()) || !url_actions.is_empty();
  let _ = writeln!(
    out,
    "\npub fn index({}: &mut RequestContext) -> Result<Response, PageError> {{",
    ctx_name(uses_ctx)
  );
  if let Some(sig) = loader_sig {
    out.push_str("  let page = definition::page();\n");
    let _ = writeln!(out, "  let args = {};", args_expr(sig));
    out.push_str(PROPS_LOOP);
  } else {
    out.push_str("  let mut props = Inertia::props();\n");
  }
  if url_actions.is_empty() {
    out.push_str("  props.insert(\"actions\".to_string(), Inertia::now(Map::new()));\n");
  } else {
    out.push_str("  let mut actions = Map::new();\n");
    for name in &url_actions {
      let route = format!("{}.{name}", input.route_name);
      let _ = writeln!(
        out,
        "  actions.insert({:?}.to_string(), Value::from(ctx.route_url({route:?})?));",
        name
      );
    }
    out.push_str("  props.insert(\"actions\".to_string(), Inertia::now(actions));\n");
  }
  let _ = writeln!(out, "  Ok(Response::Page(Inertia::render({component:?}, props)))\n}}");

  // -- Action handlers --

  for (action, function) in actions.iter().zip(input.action_fns) {
    let sig = action.signature();
    let _ = writeln!(
      out,
      "\npub fn {function}({}: &mut RequestContext) -> Result<Response, PageError> {{",
      ctx_name(!sig.is_empty())
    );
    let _ = writeln!(out, "  let args = {};", args_expr(sig));
    let _ = writeln!(out, "  Ok(definition::page().invoke({:?}, args)?.into_response())\n}}", action.name());
  }
  out
}

/// `mod.rs` for the handlers directory, modules in sorted order.
pub fn render_mod(modules: &[String]) -> String {
  let mut sorted: Vec<&String> = modules.iter().collect();
  sorted.sort_by(|a, b| naming::module_file_stem(a).cmp(naming::module_file_stem(b)));
  let mut out = String::new();
  out.push_str(GENERATED_MARKER);
  out.push_str("\n\n");
  for module in sorted {
    let _ = writeln!(out, "pub mod {module};");
  }
  out
}

const PROPS_LOOP: &str = "  let mut props = Inertia::props();
  for (key, entry) in page.load(&args)? {
    let value = match entry {
      PropEntry::Value(value) => Inertia::now(value),
      PropEntry::Prop(prop) => {
        let (strategy, callback, group) = prop.into_parts();
        match strategy {
          PropStrategy::Defer => Inertia::defer(callback, group),
          PropStrategy::Optional => Inertia::optional(callback),
          PropStrategy::Merge => Inertia::merge(callback),
          PropStrategy::DeepMerge => Inertia::deep_merge(callback),
          PropStrategy::Always => Inertia::always(callback),
        }
      }
    };
    props.insert(key, value);
  }
";

fn ctx_name(used: bool) -> &'static str {
  if used { "ctx" } else { "_ctx" }
}

/// `Args` builder in signature order.
fn args_expr(sig: &Signature) -> String {
  let mut expr = String::from("Args::new()");
  for param in sig.params() {
    let name = &param.name;
    match &param.kind {
      ParamKind::Entity(ty) => {
        let _ = write!(
          expr,
          "\n    .with_entity({name:?}, ctx.bind_entity({name:?}, {:?})?)",
          entity_basename(ty)
        );
      }
      ParamKind::Payload => {
        let _ = write!(expr, "\n    .with_payload({name:?}, ctx.payload())");
      }
      ParamKind::Plain => {
        let _ = write!(expr, "\n    .with_value({name:?}, ctx.plain({name:?}))");
      }
    }
  }
  expr
}
