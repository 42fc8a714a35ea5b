/* src/server/core/rust/src/registry.rs */

// Definitions are compiled into the host application. The registry maps each
// page base to its module so code generation can load and reference it.

use std::collections::BTreeMap;

use crate::entity::EntityCatalog;
use crate::errors::PageError;
use crate::page::PageDefinition;

pub type PageFactory = fn() -> PageDefinition;

/// Anything the generator can load definitions from.
pub trait DefinitionSource {
  fn load(&self, base: &str) -> Result<LoadedDefinition, PageError>;

  /// Entity types the application exposes.
  fn entities(&self) -> &EntityCatalog;
}

/// A freshly built definition plus the module path generated code imports.
pub struct LoadedDefinition {
  pub definition: PageDefinition,
  pub module_path: String,
}

#[derive(Debug, Clone)]
struct RegisteredPage {
  module_path: String,
  factory: PageFactory,
}

#[derive(Debug, Clone, Default)]
pub struct PageRegistry {
  pages: BTreeMap<String, RegisteredPage>,
  entities: EntityCatalog,
}

impl PageRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register a definition module under its page base. Prefer the
  /// [`register!`](crate::register) macro, which fills in the module path.
  pub fn register(&mut self, base: &str, module_path: &str, factory: PageFactory) {
    let module_path: String = module_path.split_whitespace().collect();
    self.pages.insert(base.to_string(), RegisteredPage { module_path, factory });
  }

  pub fn entity(mut self, name: impl Into<String>) -> Self {
    self.entities.insert(name);
    self
  }

  pub fn contains(&self, base: &str) -> bool {
    self.pages.contains_key(base)
  }

  pub fn bases(&self) -> impl Iterator<Item = &str> {
    self.pages.keys().map(String::as_str)
  }

  pub fn module_path(&self, base: &str) -> Option<&str> {
    self.pages.get(base).map(|p| p.module_path.as_str())
  }
}

impl DefinitionSource for PageRegistry {
  /// Builds a fresh definition on every call; nothing is cached between runs.
  fn load(&self, base: &str) -> Result<LoadedDefinition, PageError> {
    let page = self.pages.get(base).ok_or_else(|| {
      PageError::definition(format!("page `{base}` has a definition file but is not registered"))
    })?;
    let definition = (page.factory)();
    definition.validate()?;
    Ok(LoadedDefinition { definition, module_path: page.module_path.clone() })
  }

  fn entities(&self) -> &EntityCatalog {
    &self.entities
  }
}

/// Register definition modules by page base:
///
/// ```ignore
/// pagekit::register!(registry,
///   "todos/index" => pages::todos_index,
///   "users/[user]/edit" => pages::users_user_edit,
/// );
/// ```
///
/// Each module must expose `pub fn page() -> PageDefinition`.
#[macro_export]
macro_rules! register {
  ($registry:expr, $($base:literal => $($module:ident)::+),+ $(,)?) => {
    $(
      $registry.register($base, stringify!($($module)::+), $($module)::+::page);
    )+
  };
}
