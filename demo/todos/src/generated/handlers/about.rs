// @generated by pagekit. Do not edit.
// page: about

use pagekit::{Inertia, Map, PageError, RequestContext, Response};

pub fn index(_ctx: &mut RequestContext) -> Result<Response, PageError> {
  let mut props = Inertia::props();
  props.insert("actions".to_string(), Inertia::now(Map::new()));
  Ok(Response::Page(Inertia::render("about", props)))
}
