/* src/server/core/rust/src/page.rs */

use std::sync::Arc;

use indexmap::IndexMap;

use crate::args::Args;
use crate::errors::PageError;
use crate::method::HttpMethod;
use crate::props::Props;
use crate::runtime::{PageResponse, Response};
use crate::signature::Signature;
use crate::value::Value;

pub type LoaderFn = Arc<dyn Fn(&Args) -> Result<Props, PageError> + Send + Sync>;
pub type ActionFn = Arc<dyn Fn(Args) -> Result<ActionResult, PageError> + Send + Sync>;

/// What an action hands back to its handler.
#[derive(Debug)]
pub enum ActionResult {
  /// A renderable page, returned as-is.
  Page(PageResponse),
  /// Anything else; the handler redirects back.
  Data(Value),
}

impl ActionResult {
  pub fn none() -> Self {
    Self::Data(Value::Null)
  }

  pub fn into_response(self) -> Response {
    match self {
      Self::Page(page) => Response::Page(page),
      Self::Data(_) => Response::RedirectBack,
    }
  }
}

impl From<PageResponse> for ActionResult {
  fn from(page: PageResponse) -> Self {
    Self::Page(page)
  }
}

impl From<Value> for ActionResult {
  fn from(value: Value) -> Self {
    Self::Data(value)
  }
}

#[derive(Clone)]
pub struct Loader {
  signature: Signature,
  callback: LoaderFn,
}

impl Loader {
  pub fn signature(&self) -> &Signature {
    &self.signature
  }

  /// Route-model-bound loaders take entity parameters and cannot be sampled
  /// without a request.
  pub fn is_bound(&self) -> bool {
    self.signature.has_entity()
  }

  pub fn call(&self, args: &Args) -> Result<Props, PageError> {
    (self.callback)(args)
  }
}

#[derive(Clone)]
pub struct Action {
  name: String,
  method: Option<HttpMethod>,
  signature: Signature,
  callback: ActionFn,
}

impl Action {
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Verb chosen by the definition, if any.
  pub fn method(&self) -> Option<HttpMethod> {
    self.method
  }

  pub fn signature(&self) -> &Signature {
    &self.signature
  }

  pub fn call(&self, args: Args) -> Result<ActionResult, PageError> {
    (self.callback)(args)
  }
}

/// Middleware given as one name or many.
pub trait MiddlewareList {
  fn into_names(self) -> Vec<String>;
}

impl MiddlewareList for &str {
  fn into_names(self) -> Vec<String> {
    vec![self.to_string()]
  }
}

impl MiddlewareList for String {
  fn into_names(self) -> Vec<String> {
    vec![self]
  }
}

impl<const N: usize> MiddlewareList for [&str; N] {
  fn into_names(self) -> Vec<String> {
    self.iter().map(|s| s.to_string()).collect()
  }
}

impl MiddlewareList for Vec<&str> {
  fn into_names(self) -> Vec<String> {
    self.into_iter().map(str::to_string).collect()
  }
}

impl MiddlewareList for Vec<String> {
  fn into_names(self) -> Vec<String> {
    self
  }
}

/// Declarative description of one page: view component, loader, named
/// actions, middleware and explicit type hints.
///
/// ```ignore
/// PageDefinition::make("Todos/Index")
///   .middleware("auth")
///   .loader(|| Ok(Props::new().value("todos", Todo::all())))
///   .action("store", Signature::new().payload("request"), store)
/// ```
#[derive(Clone)]
pub struct PageDefinition {
  component: String,
  middleware: Vec<String>,
  loader: Option<Loader>,
  actions: Vec<Action>,
  types: IndexMap<String, String>,
  duplicates: Vec<String>,
}

impl PageDefinition {
  pub fn make(component: impl Into<String>) -> Self {
    Self {
      component: component.into(),
      middleware: Vec::new(),
      loader: None,
      actions: Vec::new(),
      types: IndexMap::new(),
      duplicates: Vec::new(),
    }
  }

  // -- Builder --

  pub fn middleware(mut self, names: impl MiddlewareList) -> Self {
    self.middleware.extend(names.into_names());
    self
  }

  /// Loader without parameters. Such loaders are sampled at generation time
  /// for type inference, so they must be free of side effects.
  pub fn loader<F>(mut self, f: F) -> Self
  where
    F: Fn() -> Result<Props, PageError> + Send + Sync + 'static,
  {
    self.loader = Some(Loader { signature: Signature::new(), callback: Arc::new(move |_| f()) });
    self
  }

  /// Loader receiving route-model-bound entities (and other named params).
  pub fn bound_loader<F>(mut self, signature: Signature, f: F) -> Self
  where
    F: Fn(&Args) -> Result<Props, PageError> + Send + Sync + 'static,
  {
    self.loader = Some(Loader { signature, callback: Arc::new(f) });
    self
  }

  pub fn action<F>(self, name: impl Into<String>, signature: Signature, f: F) -> Self
  where
    F: Fn(Args) -> Result<ActionResult, PageError> + Send + Sync + 'static,
  {
    self.push_action(name.into(), None, signature, Arc::new(f))
  }

  pub fn get<F>(self, name: impl Into<String>, signature: Signature, f: F) -> Self
  where
    F: Fn(Args) -> Result<ActionResult, PageError> + Send + Sync + 'static,
  {
    self.push_action(name.into(), Some(HttpMethod::Get), signature, Arc::new(f))
  }

  pub fn post<F>(self, name: impl Into<String>, signature: Signature, f: F) -> Self
  where
    F: Fn(Args) -> Result<ActionResult, PageError> + Send + Sync + 'static,
  {
    self.push_action(name.into(), Some(HttpMethod::Post), signature, Arc::new(f))
  }

  pub fn put<F>(self, name: impl Into<String>, signature: Signature, f: F) -> Self
  where
    F: Fn(Args) -> Result<ActionResult, PageError> + Send + Sync + 'static,
  {
    self.push_action(name.into(), Some(HttpMethod::Put), signature, Arc::new(f))
  }

  pub fn patch<F>(self, name: impl Into<String>, signature: Signature, f: F) -> Self
  where
    F: Fn(Args) -> Result<ActionResult, PageError> + Send + Sync + 'static,
  {
    self.push_action(name.into(), Some(HttpMethod::Patch), signature, Arc::new(f))
  }

  pub fn delete<F>(self, name: impl Into<String>, signature: Signature, f: F) -> Self
  where
    F: Fn(Args) -> Result<ActionResult, PageError> + Send + Sync + 'static,
  {
    self.push_action(name.into(), Some(HttpMethod::Delete), signature, Arc::new(f))
  }

  /// Explicit type hints, e.g. `[("todos", "Todo[]")]`. A hint wins over
  /// whatever the sampled value suggests.
  pub fn types<K, V>(mut self, hints: impl IntoIterator<Item = (K, V)>) -> Self
  where
    K: Into<String>,
    V: Into<String>,
  {
    self.types.extend(hints.into_iter().map(|(k, v)| (k.into(), v.into())));
    self
  }

  fn push_action(
    mut self,
    name: String,
    method: Option<HttpMethod>,
    signature: Signature,
    callback: ActionFn,
  ) -> Self {
    if self.actions.iter().any(|a| a.name == name) {
      self.duplicates.push(name);
      return self;
    }
    self.actions.push(Action { name, method, signature, callback });
    self
  }

  // -- Accessors --

  pub fn component(&self) -> &str {
    &self.component
  }

  pub fn middlewares(&self) -> &[String] {
    &self.middleware
  }

  pub fn page_loader(&self) -> Option<&Loader> {
    self.loader.as_ref()
  }

  /// Actions in declaration order.
  pub fn actions(&self) -> &[Action] {
    &self.actions
  }

  pub fn find_action(&self, name: &str) -> Option<&Action> {
    self.actions.iter().find(|a| a.name == name)
  }

  pub fn action_method(&self, name: &str) -> Option<HttpMethod> {
    self.find_action(name).and_then(Action::method)
  }

  pub fn type_hints(&self) -> &IndexMap<String, String> {
    &self.types
  }

  // -- Execution --

  /// Run the loader. A page without one yields no props.
  pub fn load(&self, args: &Args) -> Result<Props, PageError> {
    match &self.loader {
      Some(loader) => loader.call(args),
      None => Ok(Props::new()),
    }
  }

  pub fn invoke(&self, name: &str, args: Args) -> Result<ActionResult, PageError> {
    let action = self
      .find_action(name)
      .ok_or_else(|| PageError::not_found(format!("page has no action named `{name}`")))?;
    action.call(args)
  }

  pub fn validate(&self) -> Result<(), PageError> {
    if self.component.trim().is_empty() {
      return Err(PageError::definition("component must not be empty"));
    }
    if let Some(name) = self.duplicates.first() {
      return Err(PageError::definition(format!("action `{name}` is declared more than once")));
    }
    for action in &self.actions {
      if !is_identifier(&action.name) {
        return Err(PageError::definition(format!(
          "action name `{}` is not a valid identifier",
          action.name
        )));
      }
    }
    Ok(())
  }
}

fn is_identifier(name: &str) -> bool {
  let mut chars = name.chars();
  match chars.next() {
    Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
    _ => return false,
  }
  chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
