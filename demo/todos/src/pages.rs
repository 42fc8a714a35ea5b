/* demo/todos/src/pages.rs */

// Definition files live next to their views; they are compiled in here.

#[path = "../resources/pages/todos/index.server.rs"]
pub mod todos_index;

#[path = "../resources/pages/todos/[todo]/edit.server.rs"]
pub mod todos_todo_edit;
