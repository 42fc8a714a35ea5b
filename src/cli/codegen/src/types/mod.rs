/* src/cli/codegen/src/types/mod.rs */

// Page-prop type inference: explicit hints first, then a sample run of the
// loader, rendered into one TypeScript declaration module.

mod imports;
mod infer;
mod render;


pub use imports::{ImportSet, UsedNames, scan_used_names};
pub use infer::{TypeContext, infer_page, interface_name};
pub use render::{render_interface, render_module, render_type};
pub(crate) use render::BANNER;

/// The TypeScript shapes the engine can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsType {
  Null,
  Boolean,
  Number,
  String,
  Unknown,
  Any,
  /// A generated entity interface, e.g. `Todo`.
  Entity(String),
  Array(Box<TsType>),
  /// Inline object; fields are kept sorted by key.
  Object(Vec<(String, TsType)>),
}

impl TsType {
  pub fn array(inner: TsType) -> Self {
    Self::Array(Box::new(inner))
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferredField {
  pub key: String,
  pub ty: TsType,
  pub optional: bool,
  /// Trailing line comment, e.g. a `WARN:` for an uninferable collection.
  pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionField {
  pub name: String,
  /// Entity-bound actions get no pre-computed URL.
  pub optional: bool,
}

/// One page's interface plus the imports it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInterface {
  pub name: String,
  pub actions: Vec<ActionField>,
  pub fields: Vec<InferredField>,
  pub imports: ImportSet,
}
