/* demo/todos/resources/pages/todos/index.server.rs */

use pagekit::{ActionResult, PageDefinition, Prop, Props, Signature};

use crate::models::{self, Todo};

pub fn page() -> PageDefinition {
  PageDefinition::make("Todos/Index")
    .loader(|| {
      Ok(
        Props::new()
          .value("todos", models::all())
          .value("filter", "all")
          .prop("stats", Prop::defer(|| Ok(models::stats())).group("sidebar")),
      )
    })
    .action("addTodo", Signature::new().payload("request"), |args| {
      let title = args.payload("request")?.require_str("title")?;
      models::insert(title);
      Ok(ActionResult::none())
    })
    .patch("toggleTodo", Signature::new().entity("todo", "Todo"), |args| {
      models::toggle(&args.entity::<Todo>("todo")?.id)?;
      Ok(ActionResult::none())
    })
    .action("deleteTodo", Signature::new().entity("todo", "Todo"), |args| {
      models::remove(&args.entity::<Todo>("todo")?.id);
      Ok(ActionResult::none())
    })
}
