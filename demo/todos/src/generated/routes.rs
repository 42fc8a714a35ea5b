// @generated by pagekit. Do not edit.

use pagekit::{HttpMethod, PageError, RouteTable};

pub fn register(routes: &mut RouteTable) -> Result<(), PageError> {
  routes.add(HttpMethod::Get, "/about", "about", &["web"], crate::generated::handlers::about::index)?;
  routes.add(HttpMethod::Get, "/todos/{todo}/edit", "todos.todo.edit", &["web", "auth"], crate::generated::handlers::todos_todo_edit::index)?;
  routes.add(HttpMethod::Put, "/todos/{todo}/edit/save", "todos.todo.edit.save", &["web", "auth"], crate::generated::handlers::todos_todo_edit::save)?;
  routes.add(HttpMethod::Get, "/todos", "todos.index", &["web"], crate::generated::handlers::todos_index::index)?;
  routes.add(HttpMethod::Post, "/todos/addTodo", "todos.index.addTodo", &["web"], crate::generated::handlers::todos_index::add_todo)?;
  routes.add(HttpMethod::Patch, "/todos/toggleTodo/{todo}", "todos.index.toggleTodo", &["web"], crate::generated::handlers::todos_index::toggle_todo)?;
  routes.add(HttpMethod::Delete, "/todos/deleteTodo/{todo}", "todos.index.deleteTodo", &["web"], crate::generated::handlers::todos_index::delete_todo)?;
  Ok(())
}
