// @generated by pagekit. Do not edit.
// page: todos/[todo]/edit

use pagekit::{Args, Inertia, Map, PageError, PropEntry, PropStrategy, RequestContext, Response, Value};

use crate::pages::todos_todo_edit as definition;

pub fn index(ctx: &mut RequestContext) -> Result<Response, PageError> {
  let page = definition::page();
  let args = Args::new()
    .with_entity("todo", ctx.bind_entity("todo", "Todo")?);
  let mut props = Inertia::props();
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
  let mut actions = Map::new();
  actions.insert("save".to_string(), Value::from(ctx.route_url("todos.todo.edit.save")?));
  props.insert("actions".to_string(), Inertia::now(actions));
  Ok(Response::Page(Inertia::render("Todos/Edit", props)))
}

pub fn save(ctx: &mut RequestContext) -> Result<Response, PageError> {
  let args = Args::new()
    .with_value("todo", ctx.plain("todo"))
    .with_payload("request", ctx.payload());
  Ok(definition::page().invoke("save", args)?.into_response())
}
