/* src/cli/codegen/src/pipeline/tests.rs */

use std::fs;
use std::path::Path;

use pagekit::PageRegistry;
use pretty_assertions::assert_eq;

use super::*;

mod pages {
  pub mod todos_index {
    use pagekit::{ActionResult, EntityCollection, PageDefinition, Props, Signature};

    pub fn page() -> PageDefinition {
      PageDefinition::make("Todos/Index")
        .middleware("auth")
        .loader(|| Ok(Props::new().value("todos", EntityCollection::new())))
        .post("addTodo", Signature::new().payload("request"), |_| Ok(ActionResult::none()))
        .action("deleteTodo", Signature::new().entity("todo", "Todo"), |_| Ok(ActionResult::none()))
    }
  }

  pub mod users_user_edit {
    use pagekit::{PageDefinition, Props, Signature};

    pub fn page() -> PageDefinition {
      PageDefinition::make("Users/Edit")
        .bound_loader(Signature::new().entity("user", "User"), |_| Ok(Props::new()))
    }
  }
}

fn registry() -> PageRegistry {
  let mut registry = PageRegistry::new().entity("Todo").entity("User");
  pagekit::register!(registry,
    "todos/index" => pages::todos_index,
    "users/[user]/edit" => pages::users_user_edit,
  );
  registry
}

fn write(root: &Path, rel: &str, contents: &str) {
  let path = root.join(rel);
  fs::create_dir_all(path.parent().unwrap()).unwrap();
  fs::write(path, contents).unwrap();
}

fn project() -> (tempfile::TempDir, GenerateOptions) {
  let dir = tempfile::tempdir().unwrap();
  let root = dir.path();
  write(root, "resources/pages/todos/index.server.rs", "use crate::models::Todo;\n");
  write(root, "resources/pages/todos/index.tsx", "");
  write(root, "resources/pages/about.tsx", "");
  write(root, "resources/pages/users/[user]/edit.server.rs", "use crate::models::User;\n");
  write(root, "resources/pages/users/[user]/edit.tsx", "");
  let options = GenerateOptions {
    pages_dir: root.join("resources/pages"),
    routes_file: root.join("src/generated/routes.rs"),
    handlers_dir: root.join("src/generated/handlers"),
    types_file: root.join("resources/js/types/page-props.d.ts"),
    definitions_crate: "demo".to_string(),
    ..GenerateOptions::default()
  };
  (dir, options)
}

#[test]
fn plans_routes_in_discovery_order() {
  let (_dir, options) = project();
  let plan = Generator::new(&options, &registry()).plan().unwrap();
  let names: Vec<_> = plan.routes.iter().map(|r| r.name.as_str()).collect();
  assert_eq!(names, vec!["about", "todos.index", "todos.index.addTodo", "todos.index.deleteTodo", "users.user.edit"]);

  let delete = &plan.routes[3];
  assert_eq!(delete.method, pagekit::HttpMethod::Delete);
  assert_eq!(delete.uri, "/todos/deleteTodo/{todo}");
  assert_eq!(delete.middleware, vec!["web", "auth"]);
  assert_eq!(delete.handler_path(), "todos_index::delete_todo");
  assert_eq!(plan.pages, 3);
}

#[test]
fn writes_every_artifact() {
  let (dir, options) = project();
  let (plan, report) = generate(&options, &registry()).unwrap();
  assert_eq!(report.written.len(), plan.files.len());

  let handlers = dir.path().join("src/generated/handlers");
  for stem in ["about", "todos_index", "users_user_edit", "mod"] {
    assert!(handlers.join(format!("{stem}.rs")).is_file(), "{stem}.rs missing");
  }
  let stub = fs::read_to_string(handlers.join("todos_index.rs")).unwrap();
  assert!(stub.contains("use demo::pages::todos_index as definition;"));

  let routes = fs::read_to_string(&options.routes_file).unwrap();
  assert!(routes.contains(
    "routes.add(HttpMethod::Delete, \"/todos/deleteTodo/{todo}\", \"todos.index.deleteTodo\", &[\"web\", \"auth\"], crate::generated::handlers::todos_index::delete_todo)?;"
  ));

  let types = fs::read_to_string(&options.types_file).unwrap();
  assert!(types.contains("import type { Todo } from './models';"));
  assert!(types.contains("export interface TodosIndexProps extends SharedData {"));
  assert!(types.contains("  todos: Todo[];\n"));
  assert!(types.contains("    deleteTodo?: string;\n"));
  assert!(!types.contains("UsersUserEditProps"));
}

#[test]
fn bound_loader_without_types_is_reported() {
  let (_dir, options) = project();
  let plan = Generator::new(&options, &registry()).plan().unwrap();
  assert_eq!(plan.interfaces, 1);
  let warning = plan.diagnostics.iter().find(|d| d.page.as_deref() == Some("users/[user]/edit")).unwrap();
  assert_eq!(warning.level, crate::diagnostics::Level::Warn);
}

#[test]
fn second_run_is_byte_identical() {
  let (_dir, options) = project();
  let registry = registry();
  let (first, _) = generate(&options, &registry).unwrap();
  let before: Vec<String> = first.files.iter().map(|f| fs::read_to_string(&f.path).unwrap()).collect();

  let (second, report) = generate(&options, &registry).unwrap();
  assert!(report.written.is_empty());
  assert_eq!(report.unchanged, second.files.len());
  let after: Vec<String> = second.files.iter().map(|f| fs::read_to_string(&f.path).unwrap()).collect();
  assert_eq!(before, after);
}

#[test]
fn outdated_tracks_pending_writes() {
  let (_dir, options) = project();
  let registry = registry();
  let plan = Generator::new(&options, &registry).plan().unwrap();
  assert_eq!(plan.outdated().len(), plan.files.len());
  plan.write().unwrap();
  assert!(Generator::new(&options, &registry).plan().unwrap().outdated().is_empty());
}

#[test]
fn stale_stubs_are_removed() {
  let (dir, options) = project();
  let handlers = dir.path().join("src/generated/handlers");
  write(&handlers, "old_page.rs", &format!("{}\n", crate::options::GENERATED_MARKER));
  write(&handlers, "custom.rs", "// kept\n");

  let (plan, report) = generate(&options, &registry()).unwrap();
  assert_eq!(report.removed, vec![handlers.join("old_page.rs")]);
  assert!(!handlers.join("old_page.rs").exists());
  assert!(handlers.join("custom.rs").exists());
  assert!(plan.diagnostics.iter().any(|d| d.message.contains("old_page.rs")));
}

#[test]
fn ignored_pages_produce_nothing() {
  let (dir, mut options) = project();
  options.ignore = vec!["users/*".to_string()];
  let (plan, _) = generate(&options, &registry()).unwrap();
  assert_eq!(plan.ignored, vec![("users/[user]/edit".to_string(), "users/*".to_string())]);
  assert!(plan.routes.iter().all(|r| !r.name.starts_with("users")));
  assert!(!dir.path().join("src/generated/handlers/users_user_edit.rs").exists());
}

#[test]
fn unregistered_definition_aborts_before_writing() {
  let (dir, options) = project();
  write(dir.path(), "resources/pages/orphan.server.rs", "");
  let err = generate(&options, &registry()).err().unwrap();
  assert!(matches!(err, GenerateError::Definition { ref base, .. } if base == "orphan"));
  assert!(!options.routes_file.exists());
}

#[test]
fn module_collisions_are_fatal() {
  let (dir, options) = project();
  write(dir.path(), "resources/pages/todos-index.tsx", "");
  let err = Generator::new(&options, &registry()).plan().err().unwrap();
  assert!(matches!(err, GenerateError::ModuleCollision { ref module, .. } if module == "todos_index"));
}

#[test]
fn mod_page_does_not_overwrite_module_list() {
  let (dir, options) = project();
  write(dir.path(), "resources/pages/mod.tsx", "");
  let plan = Generator::new(&options, &registry()).plan().unwrap();

  let handlers = dir.path().join("src/generated/handlers");
  let list = handlers.join("mod.rs");
  let lists: Vec<_> = plan.files.iter().filter(|f| f.path == list).collect();
  assert_eq!(lists.len(), 1);
  assert!(lists[0].contents.contains("pub mod mod_;\n"));
  assert!(plan.files.iter().any(|f| f.path == handlers.join("mod_.rs")));

  let route = plan.routes.iter().find(|r| r.name == "mod").unwrap();
  assert_eq!(route.handler_path(), "mod_::index");
}

#[test]
fn generated_files_skip_hand_written_ones() {
  let (dir, options) = project();
  generate(&options, &registry()).unwrap();
  let handlers = dir.path().join("src/generated/handlers");
  write(&handlers, "custom.rs", "// kept\n");

  let found = generated_files(&options).unwrap();
  assert!(found.contains(&options.routes_file));
  assert!(found.contains(&options.types_file));
  assert!(found.contains(&handlers.join("todos_index.rs")));
  assert!(found.contains(&handlers.join("mod.rs")));
  assert!(!found.contains(&handlers.join("custom.rs")));
}
