/* src/server/core/rust/src/signature.rs */

// Explicit parameter signatures for loaders and actions. Code generation
// classifies parameters by inspecting these, never by calling the callback.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind {
  /// Bound from a route path parameter via route-model binding.
  Entity(String),
  /// Bound to the incoming request payload.
  Payload,
  /// Anything else, passed through by name.
  Plain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
  pub name: String,
  pub kind: ParamKind,
}

impl Param {
  pub fn is_entity(&self) -> bool {
    matches!(self.kind, ParamKind::Entity(_))
  }

  pub fn entity_type(&self) -> Option<&str> {
    match &self.kind {
      ParamKind::Entity(ty) => Some(ty),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
  params: Vec<Param>,
}

impl Signature {
  pub fn new() -> Self {
    Self::default()
  }

  /// Entity-typed parameter, e.g. `entity("todo", "Todo")`.
  pub fn entity(mut self, name: impl Into<String>, entity: impl Into<String>) -> Self {
    self.params.push(Param { name: name.into(), kind: ParamKind::Entity(entity.into()) });
    self
  }

  pub fn payload(mut self, name: impl Into<String>) -> Self {
    self.params.push(Param { name: name.into(), kind: ParamKind::Payload });
    self
  }

  pub fn plain(mut self, name: impl Into<String>) -> Self {
    self.params.push(Param { name: name.into(), kind: ParamKind::Plain });
    self
  }

  pub fn params(&self) -> &[Param] {
    &self.params
  }

  pub fn is_empty(&self) -> bool {
    self.params.is_empty()
  }

  pub fn has_entity(&self) -> bool {
    self.params.iter().any(Param::is_entity)
  }

  pub fn has_payload(&self) -> bool {
    self.params.iter().any(|p| p.kind == ParamKind::Payload)
  }

  pub fn first_entity(&self) -> Option<&Param> {
    self.params.iter().find(|p| p.is_entity())
  }

  pub fn entity_params(&self) -> impl Iterator<Item = &Param> {
    self.params.iter().filter(|p| p.is_entity())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn classifies_params_in_order() {
    let sig = Signature::new().entity("todo", "Todo").payload("request").plain("flag");
    assert!(sig.has_entity());
    assert!(sig.has_payload());
    assert_eq!(sig.first_entity().map(|p| p.name.as_str()), Some("todo"));
    assert_eq!(sig.params()[2].kind, ParamKind::Plain);
  }

  #[test]
  fn empty_signature_has_no_roles() {
    let sig = Signature::new();
    assert!(sig.is_empty());
    assert!(!sig.has_entity());
    assert!(!sig.has_payload());
    assert!(sig.first_entity().is_none());
  }

  #[test]
  fn entity_params_skip_other_kinds() {
    let sig = Signature::new().payload("request").entity("user", "User").entity("team", "Team");
    let names: Vec<_> = sig.entity_params().map(|p| p.entity_type().unwrap()).collect();
    assert_eq!(names, vec!["User", "Team"]);
  }
}
