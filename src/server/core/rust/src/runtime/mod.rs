/* src/server/core/rust/src/runtime/mod.rs */

// Inertia-style response model used by generated handlers. Handlers wrap
// loader output in `PropValue`s; adapters resolve a `PageResponse` into the
// wire page object once they know the request URL and partial-reload headers.

mod context;

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::errors::PageError;
use crate::prop::PropFn;
use crate::value::Value;

pub use context::{EntityResolver, NoEntities, PartialReload, RequestContext};

pub const DEFAULT_DEFER_GROUP: &str = "default";

/// A prop as the response sees it: already computed, or a callback with a
/// delivery rule.
#[derive(Clone)]
pub enum PropValue {
  Now(Value),
  Deferred { callback: PropFn, group: Option<String> },
  Optional(PropFn),
  Merge(PropFn),
  DeepMerge(PropFn),
  Always(PropFn),
}

impl PropValue {
  fn evaluate(&self) -> Result<Value, PageError> {
    match self {
      Self::Now(value) => Ok(value.clone()),
      Self::Deferred { callback, .. }
      | Self::Optional(callback)
      | Self::Merge(callback)
      | Self::DeepMerge(callback)
      | Self::Always(callback) => callback(),
    }
  }

  fn kind(&self) -> &'static str {
    match self {
      Self::Now(_) => "now",
      Self::Deferred { .. } => "defer",
      Self::Optional(_) => "optional",
      Self::Merge(_) => "merge",
      Self::DeepMerge(_) => "deepMerge",
      Self::Always(_) => "always",
    }
  }
}

impl fmt::Debug for PropValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Now(value) => f.debug_tuple("Now").field(value).finish(),
      Self::Deferred { group, .. } => f.debug_struct("Deferred").field("group", group).finish(),
      other => f.write_str(other.kind()),
    }
  }
}

pub type PageProps = IndexMap<String, PropValue>;

/// Constructors for the prop wrappers and page responses.
pub struct Inertia;

impl Inertia {
  pub fn props() -> PageProps {
    PageProps::new()
  }

  pub fn now(value: impl Into<Value>) -> PropValue {
    PropValue::Now(value.into())
  }

  pub fn defer(callback: PropFn, group: Option<String>) -> PropValue {
    PropValue::Deferred { callback, group }
  }

  pub fn optional(callback: PropFn) -> PropValue {
    PropValue::Optional(callback)
  }

  pub fn merge(callback: PropFn) -> PropValue {
    PropValue::Merge(callback)
  }

  pub fn deep_merge(callback: PropFn) -> PropValue {
    PropValue::DeepMerge(callback)
  }

  pub fn always(callback: PropFn) -> PropValue {
    PropValue::Always(callback)
  }

  pub fn render(component: impl Into<String>, props: PageProps) -> PageResponse {
    PageResponse { component: component.into(), props }
  }
}

/// A component plus its unevaluated props.
#[derive(Debug, Clone)]
pub struct PageResponse {
  component: String,
  props: PageProps,
}

/// The page object sent to the client runtime.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageObject {
  pub component: String,
  pub props: IndexMap<String, serde_json::Value>,
  pub url: String,
  pub version: Option<String>,
  #[serde(skip_serializing_if = "IndexMap::is_empty")]
  pub deferred_props: IndexMap<String, Vec<String>>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub merge_props: Vec<String>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub deep_merge_props: Vec<String>,
}

impl PageResponse {
  pub fn component(&self) -> &str {
    &self.component
  }

  pub fn props(&self) -> &PageProps {
    &self.props
  }

  /// Evaluate props for this request. A partial reload only applies when it
  /// targets the same component; otherwise the visit is treated as full.
  pub fn resolve(
    &self,
    url: impl Into<String>,
    version: Option<String>,
    partial: Option<&PartialReload>,
  ) -> Result<PageObject, PageError> {
    let partial = partial.filter(|p| p.component == self.component);
    let mut page = PageObject {
      component: self.component.clone(),
      props: IndexMap::new(),
      url: url.into(),
      version,
      deferred_props: IndexMap::new(),
      merge_props: Vec::new(),
      deep_merge_props: Vec::new(),
    };

    for (key, prop) in &self.props {
      let include = match partial {
        Some(reload) => matches!(prop, PropValue::Always(_)) || reload.wants(key),
        None => match prop {
          PropValue::Deferred { group, .. } => {
            let group = group.as_deref().unwrap_or(DEFAULT_DEFER_GROUP);
            page.deferred_props.entry(group.to_string()).or_default().push(key.clone());
            false
          }
          PropValue::Optional(_) => false,
          PropValue::Now(_) | PropValue::Merge(_) | PropValue::DeepMerge(_) | PropValue::Always(_) => {
            true
          }
        },
      };
      if !include {
        continue;
      }
      match prop {
        PropValue::Merge(_) => page.merge_props.push(key.clone()),
        PropValue::DeepMerge(_) => page.deep_merge_props.push(key.clone()),
        PropValue::Now(_)
        | PropValue::Deferred { .. }
        | PropValue::Optional(_)
        | PropValue::Always(_) => {}
      }
      page.props.insert(key.clone(), prop.evaluate()?.to_json());
    }
    Ok(page)
  }
}

/// What a generated handler returns to the adapter.
#[derive(Debug)]
pub enum Response {
  Page(PageResponse),
  RedirectBack,
}

#[cfg(test)]
mod tests;
