/* src/server/adapter/axum/src/tests.rs */

use std::any::Any;
use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use pagekit::{
  Entity, EntityResolver, HttpMethod, Inertia, Map, PageError, RequestContext, Response,
  RouteTable, Value,
};
use tower::ServiceExt;

use super::*;
use crate::handler::{
  PARTIAL_COMPONENT, PARTIAL_DATA, X_INERTIA, X_INERTIA_LOCATION, X_INERTIA_VERSION, escape_attr,
};

struct Todo(String);

impl Entity for Todo {
  fn entity_name(&self) -> &str {
    "Todo"
  }

  fn attributes(&self) -> Map {
    let mut map = Map::new();
    map.insert("id".into(), Value::from(self.0.clone()));
    map
  }

  fn as_any(&self) -> &dyn Any {
    self
  }
}

struct Todos;

impl EntityResolver for Todos {
  fn resolve(&self, entity: &str, key: &str) -> Result<Option<Arc<dyn Entity>>, PageError> {
    Ok((entity == "Todo" && key == "1").then(|| Arc::new(Todo(key.to_string())) as Arc<dyn Entity>))
  }
}

fn index(_: &mut RequestContext) -> Result<Response, PageError> {
  let mut props = Inertia::props();
  props.insert("title".into(), Inertia::now("Todos <&>"));
  props.insert("stats".into(), Inertia::optional(Arc::new(|| Ok(Value::from(3_i64)))));
  Ok(Response::Page(Inertia::render("Todos/Index", props)))
}

fn store(ctx: &mut RequestContext) -> Result<Response, PageError> {
  ctx.payload().require_str("title")?;
  Ok(Response::RedirectBack)
}

fn show(ctx: &mut RequestContext) -> Result<Response, PageError> {
  let todo = ctx.bind_entity("todo", "Todo")?;
  let mut props = Inertia::props();
  props.insert("todo".into(), Inertia::now(todo));
  Ok(Response::Page(Inertia::render("Todos/Show", props)))
}

fn table() -> RouteTable {
  let mut routes = RouteTable::new();
  routes.add(HttpMethod::Get, "/todos", "todos.index", &["web"], index).unwrap();
  routes.add(HttpMethod::Post, "/todos", "todos.index.store", &["web"], store).unwrap();
  routes.add(HttpMethod::Get, "/todos/{todo}", "todos.show", &["web", "auth"], show).unwrap();
  routes
}

fn app() -> Router {
  PageApp::new(table())
    .resolver(Todos)
    .middleware("auth", |headers| {
      if headers.contains_key(header::AUTHORIZATION) {
        Ok(())
      } else {
        Err(PageError::unauthorized("login required"))
      }
    })
    .into_router()
    .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
  let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
  serde_json::from_slice(&bytes).unwrap()
}

#[test]
fn unknown_middleware_is_rejected() {
  let err = PageApp::new(table()).into_router().err().unwrap();
  assert_eq!(err.code(), "INVALID_DEFINITION");
  assert!(err.message().contains("`auth`"));
}

#[test]
fn duplicate_method_and_uri_is_rejected() {
  let mut routes = RouteTable::new();
  routes.add(HttpMethod::Get, "/a", "a.one", &[], index).unwrap();
  routes.add(HttpMethod::Get, "/a", "a.two", &[], index).unwrap();
  assert!(PageApp::new(routes).into_router().is_err());
}

#[tokio::test]
async fn inertia_visit_returns_page_json() {
  let request = Request::get("/todos?page=2").header(X_INERTIA, "true").body(Body::empty()).unwrap();
  let response = app().oneshot(request).await.unwrap();
  assert_eq!(response.status(), StatusCode::OK);
  assert_eq!(response.headers()[X_INERTIA], "true");

  let page = json_body(response).await;
  assert_eq!(page["component"], "Todos/Index");
  assert_eq!(page["url"], "/todos?page=2");
  assert_eq!(page["props"]["title"], "Todos <&>");
  assert!(page["props"].get("stats").is_none());
}

#[tokio::test]
async fn partial_reload_evaluates_requested_props() {
  let request = Request::get("/todos")
    .header(X_INERTIA, "true")
    .header(PARTIAL_COMPONENT, "Todos/Index")
    .header(PARTIAL_DATA, "stats")
    .body(Body::empty())
    .unwrap();
  let page = json_body(app().oneshot(request).await.unwrap()).await;
  assert_eq!(page["props"]["stats"], 3);
  assert!(page["props"].get("title").is_none());
}

#[tokio::test]
async fn first_load_renders_html_shell() {
  let request = Request::get("/todos").body(Body::empty()).unwrap();
  let response = app().oneshot(request).await.unwrap();
  assert_eq!(response.status(), StatusCode::OK);
  let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
  let html = String::from_utf8(bytes.to_vec()).unwrap();
  assert!(html.starts_with("<!DOCTYPE html>"));
  assert!(html.contains("<div id=\"app\" data-page=\"{&quot;component&quot;:&quot;Todos/Index&quot;"));
  assert!(html.contains("Todos &lt;&amp;&gt;"));
}

#[tokio::test]
async fn action_redirects_back() {
  let request = Request::post("/todos")
    .header(header::CONTENT_TYPE, "application/json")
    .header(header::REFERER, "/todos")
    .body(Body::from(r#"{"title":"milk"}"#))
    .unwrap();
  let response = app().oneshot(request).await.unwrap();
  assert_eq!(response.status(), StatusCode::SEE_OTHER);
  assert_eq!(response.headers()[header::LOCATION], "/todos");
}

#[tokio::test]
async fn validation_errors_are_json() {
  let request = Request::post("/todos")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from("{}"))
    .unwrap();
  let response = app().oneshot(request).await.unwrap();
  assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
  let body = json_body(response).await;
  assert_eq!(body["ok"], false);
  assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn non_json_body_is_rejected() {
  let request = Request::post("/todos")
    .header(header::CONTENT_TYPE, "text/plain")
    .body(Body::from("title=milk"))
    .unwrap();
  let response = app().oneshot(request).await.unwrap();
  assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn guard_blocks_before_binding() {
  let request = Request::get("/todos/1").header(X_INERTIA, "true").body(Body::empty()).unwrap();
  let response = app().oneshot(request).await.unwrap();
  assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn route_model_binding() {
  let found = Request::get("/todos/1")
    .header(X_INERTIA, "true")
    .header(header::AUTHORIZATION, "Bearer t")
    .body(Body::empty())
    .unwrap();
  let page = json_body(app().oneshot(found).await.unwrap()).await;
  assert_eq!(page["props"]["todo"]["id"], "1");

  let missing = Request::get("/todos/9")
    .header(header::AUTHORIZATION, "Bearer t")
    .body(Body::empty())
    .unwrap();
  let response = app().oneshot(missing).await.unwrap();
  assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stale_version_gets_conflict() {
  let router = PageApp::new(table())
    .middleware("auth", |_| Ok(()))
    .version("v2")
    .into_router()
    .unwrap();
  let request = Request::get("/todos")
    .header(X_INERTIA, "true")
    .header(X_INERTIA_VERSION, "v1")
    .body(Body::empty())
    .unwrap();
  let response = router.oneshot(request).await.unwrap();
  assert_eq!(response.status(), StatusCode::CONFLICT);
  assert_eq!(response.headers()[X_INERTIA_LOCATION], "/todos");
}

#[test]
fn escapes_attribute_text() {
  assert_eq!(escape_attr(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
}
