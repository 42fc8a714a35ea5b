/* demo/todos/src/models.rs */

use std::any::Any;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use pagekit::{Entity, EntityCollection, EntityResolver, Map, PageError, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
  pub id: String,
  pub title: String,
  pub completed: bool,
}

impl Entity for Todo {
  fn entity_name(&self) -> &str {
    "Todo"
  }

  fn attributes(&self) -> Map {
    let mut map = Map::new();
    map.insert("id".into(), Value::from(self.id.clone()));
    map.insert("title".into(), Value::from(self.title.clone()));
    map.insert("completed".into(), Value::from(self.completed));
    map
  }

  fn as_any(&self) -> &dyn Any {
    self
  }
}

// -- Store --

struct Store {
  next_id: u64,
  todos: Vec<Todo>,
}

static STORE: LazyLock<RwLock<Store>> = LazyLock::new(|| {
  let todos = vec![
    Todo { id: "1".into(), title: "Write the page definitions".into(), completed: true },
    Todo { id: "2".into(), title: "Run pagekit generate".into(), completed: false },
  ];
  RwLock::new(Store { next_id: 3, todos })
});

fn read<T>(f: impl FnOnce(&Store) -> T) -> T {
  f(&STORE.read().unwrap_or_else(PoisonError::into_inner))
}

fn write<T>(f: impl FnOnce(&mut Store) -> T) -> T {
  f(&mut STORE.write().unwrap_or_else(PoisonError::into_inner))
}

pub fn all() -> EntityCollection {
  read(|s| s.todos.iter().cloned().collect())
}

pub fn find(id: &str) -> Option<Todo> {
  read(|s| s.todos.iter().find(|t| t.id == id).cloned())
}

pub fn insert(title: &str) -> Todo {
  write(|s| {
    let todo = Todo { id: s.next_id.to_string(), title: title.to_string(), completed: false };
    s.next_id += 1;
    s.todos.push(todo.clone());
    todo
  })
}

pub fn toggle(id: &str) -> Result<(), PageError> {
  write(|s| {
    let todo = s
      .todos
      .iter_mut()
      .find(|t| t.id == id)
      .ok_or_else(|| PageError::not_found(format!("Todo {id} not found")))?;
    todo.completed = !todo.completed;
    Ok(())
  })
}

pub fn rename(id: &str, title: &str) -> Result<(), PageError> {
  write(|s| {
    let todo = s
      .todos
      .iter_mut()
      .find(|t| t.id == id)
      .ok_or_else(|| PageError::not_found(format!("Todo {id} not found")))?;
    todo.title = title.to_string();
    Ok(())
  })
}

pub fn remove(id: &str) {
  write(|s| s.todos.retain(|t| t.id != id));
}

pub fn stats() -> Value {
  read(|s| {
    let done = s.todos.iter().filter(|t| t.completed).count();
    [("total", Value::from(s.todos.len())), ("done", Value::from(done))].into_iter().collect()
  })
}

/// Route-model binding for the demo's entities.
pub struct Resolver;

impl EntityResolver for Resolver {
  fn resolve(&self, entity: &str, key: &str) -> Result<Option<Arc<dyn Entity>>, PageError> {
    match entity {
      "Todo" => Ok(find(key).map(|t| Arc::new(t) as Arc<dyn Entity>)),
      other => Err(PageError::internal(format!("no resolver for entity `{other}`"))),
    }
  }
}
