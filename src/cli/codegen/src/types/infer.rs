/* src/cli/codegen/src/types/infer.rs */

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use indexmap::IndexMap;
use pagekit::{Args, EntityCatalog, Map, PageDefinition, Prop, PropEntry, Value};

use super::{ActionField, ImportSet, InferredField, PageInterface, TsType, UsedNames};
use crate::diagnostics::Diagnostics;
use crate::discover::PageBase;
use crate::naming;

/// Prop key the index handler fills with action URLs.
const ACTIONS_KEY: &str = "actions";

pub const EMPTY_COLLECTION_NOTE: &str = "WARN: Could not infer type for empty collection";

/// What inference needs beyond the definition itself.
pub struct TypeContext<'a> {
  pub catalog: &'a EntityCatalog,
  /// Names the definition file imports, for the empty-collection heuristic.
  pub used: &'a UsedNames,
  pub models_import: &'a str,
}

/// `users/[user]/edit` -> `UsersUserEditProps`.
pub fn interface_name(page: &PageBase) -> String {
  let stem: String = page.segments().iter().map(|s| naming::studly(s.clean())).collect();
  format!("{stem}Props")
}

/// Infer the props interface for one page. `None` means the page is left out
/// of the declaration module; the reason has been recorded in `diags`.
pub fn infer_page(
  page: &PageBase,
  definition: &PageDefinition,
  cx: &TypeContext<'_>,
  diags: &mut Diagnostics,
) -> Option<PageInterface> {
  let base = page.base.as_str();
  let Some(loader) = definition.page_loader() else {
    tracing::debug!(page = base, "no loader, no props interface");
    return None;
  };

  let mut imports = ImportSet::new();
  let hints = resolve_hints(base, definition.type_hints(), cx, &mut imports, diags);
  let actions: Vec<ActionField> = definition
    .actions()
    .iter()
    .map(|a| ActionField { name: a.name().to_string(), optional: a.signature().has_entity() })
    .collect();

  let mut fields = if loader.is_bound() {
    if hints.is_empty() {
      diags.warn(
        Some(base),
        "skipped: route-model-bound loader has no explicit types; add .types(...) to enable type generation",
      );
      return None;
    }
    tracing::debug!(page = base, "bound loader, using explicit types only");
    hints.iter().map(|(key, ty)| field(key, ty.clone(), false, None)).collect()
  } else {
    let sample = match panic::catch_unwind(AssertUnwindSafe(|| loader.call(&Args::new()))) {
      Ok(Ok(props)) => props,
      Ok(Err(err)) => {
        diags.warn(Some(base), format!("skipped: loader failed: {err}"));
        return None;
      }
      Err(payload) => {
        diags.warn(Some(base), format!("skipped: loader panicked: {}", panic_message(&*payload)));
        return None;
      }
    };

    let mut fields = Vec::new();
    for (key, entry) in sample {
      let inferred = match entry {
        PropEntry::Prop(prop) => {
          let optional = prop.strategy().is_optional();
          match hints.get(&key) {
            Some(ty) => field(&key, ty.clone(), optional, None),
            None => match sample_prop(&prop) {
              Ok(value) => infer_field(base, &key, &value, optional, cx, &mut imports, diags),
              Err(reason) => {
                diags.warn(Some(base), format!("could not resolve prop `{key}` for type inference: {reason}"));
                field(&key, TsType::Unknown, optional, None)
              }
            },
          }
        }
        PropEntry::Value(value) => match hints.get(&key) {
          Some(ty) => field(&key, ty.clone(), false, None),
          None => infer_field(base, &key, &value, false, cx, &mut imports, diags),
        },
      };
      fields.push(inferred);
    }
    for (key, ty) in &hints {
      if !fields.iter().any(|f: &InferredField| &f.key == key) {
        fields.push(field(key, ty.clone(), false, None));
      }
    }
    fields
  };

  if !actions.is_empty() && fields.iter().any(|f| f.key == ACTIONS_KEY) {
    diags.warn(Some(base), "loader prop `actions` is replaced by the generated action URLs");
    fields.retain(|f| f.key != ACTIONS_KEY);
  }

  Some(PageInterface { name: interface_name(page), actions, fields, imports })
}

fn field(key: &str, ty: TsType, optional: bool, note: Option<String>) -> InferredField {
  InferredField { key: key.to_string(), ty, optional, note }
}

/// Explicit hints in declaration order. `X` and `X[]` must name a known
/// entity; anything else falls back to `any` / `any[]` with a warning.
fn resolve_hints(
  base: &str,
  hints: &IndexMap<String, String>,
  cx: &TypeContext<'_>,
  imports: &mut ImportSet,
  diags: &mut Diagnostics,
) -> IndexMap<String, TsType> {
  let mut resolved = IndexMap::new();
  for (key, hint) in hints {
    let hint = hint.trim();
    let (inner, is_array) = match hint.strip_suffix("[]") {
      Some(inner) => (inner.trim(), true),
      None => (hint, false),
    };
    let ty = match cx.catalog.resolve(inner) {
      Some(entity) => {
        imports.add(entity, cx.models_import);
        TsType::Entity(entity.to_string())
      }
      None => {
        diags.warn(Some(base), format!("invalid entity in type hint `{hint}` for `{key}`, using any"));
        TsType::Any
      }
    };
    resolved.insert(key.clone(), if is_array { TsType::array(ty) } else { ty });
  }
  resolved
}

fn sample_prop(prop: &Prop) -> Result<Value, String> {
  match panic::catch_unwind(AssertUnwindSafe(|| prop.resolve())) {
    Ok(Ok(value)) => Ok(value),
    Ok(Err(err)) => Err(err.to_string()),
    Err(payload) => Err(format!("panicked: {}", panic_message(&*payload))),
  }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
  if let Some(s) = payload.downcast_ref::<&str>() {
    return (*s).to_string();
  }
  if let Some(s) = payload.downcast_ref::<String>() {
    return s.clone();
  }
  "unknown panic".to_string()
}

/// Top-level field: entities keep their names, everything else is typed by
/// shape.
fn infer_field(
  base: &str,
  key: &str,
  value: &Value,
  optional: bool,
  cx: &TypeContext<'_>,
  imports: &mut ImportSet,
  diags: &mut Diagnostics,
) -> InferredField {
  match value {
    Value::Entity(entity) => {
      let name = entity.entity_name();
      imports.add(name, cx.models_import);
      field(key, TsType::Entity(name.to_string()), optional, None)
    }
    Value::Collection(members) => match members.first() {
      Some(first) => {
        let name = first.entity_name();
        imports.add(name, cx.models_import);
        field(key, TsType::array(TsType::Entity(name.to_string())), optional, None)
      }
      None => {
        let candidate = naming::studly(&naming::singularize(key));
        match cx.used.entity(&candidate, cx.catalog) {
          Some(entity) => {
            tracing::debug!(page = base, key, entity, "empty collection typed from imports");
            imports.add(entity, cx.models_import);
            field(key, TsType::array(TsType::Entity(entity.to_string())), optional, None)
          }
          None => {
            diags.warn(
              Some(base),
              format!("could not infer type for empty collection `{key}`, falling back to unknown[]"),
            );
            field(key, TsType::array(TsType::Unknown), optional, Some(EMPTY_COLLECTION_NOTE.to_string()))
          }
        }
      }
    },
    other => field(key, infer_shape(&normalize(other)), optional, None),
  }
}

/// Replace entities with their attribute maps and collections with lists of
/// them, recursively.
pub(crate) fn normalize(value: &Value) -> Value {
  match value {
    Value::Entity(entity) => Value::Map(normalize_map(&entity.attributes())),
    Value::Collection(members) => {
      Value::List(members.iter().map(|e| Value::Map(normalize_map(&e.attributes()))).collect())
    }
    Value::List(items) => Value::List(items.iter().map(normalize).collect()),
    Value::Map(map) => Value::Map(normalize_map(map)),
    scalar => scalar.clone(),
  }
}

fn normalize_map(map: &Map) -> Map {
  map.iter().map(|(k, v)| (k.clone(), normalize(v))).collect()
}

/// Structural type of a normalized value. Lists are typed by their first
/// element; object fields are sorted by key.
pub(crate) fn infer_shape(value: &Value) -> TsType {
  match value {
    Value::Null => TsType::Null,
    Value::Bool(_) => TsType::Boolean,
    Value::Int(_) | Value::Float(_) => TsType::Number,
    Value::String(_) => TsType::String,
    Value::List(items) => TsType::array(items.first().map_or(TsType::Unknown, infer_shape)),
    Value::Map(map) => {
      let mut fields: Vec<(String, TsType)> =
        map.iter().map(|(k, v)| (k.clone(), infer_shape(v))).collect();
      fields.sort_by(|a, b| a.0.cmp(&b.0));
      TsType::Object(fields)
    }
    Value::Entity(_) | Value::Collection(_) => infer_shape(&normalize(value)),
  }
}
