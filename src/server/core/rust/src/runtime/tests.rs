/* src/server/core/rust/src/runtime/tests.rs */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;

use super::*;
use crate::prop::PropFn;

fn constant(value: i64) -> PropFn {
  Arc::new(move || Ok(Value::Int(value)))
}

fn counting(calls: &Arc<AtomicUsize>) -> PropFn {
  let calls = calls.clone();
  Arc::new(move || {
    calls.fetch_add(1, Ordering::SeqCst);
    Ok(Value::from("lazy"))
  })
}

fn sample_page(calls: &Arc<AtomicUsize>) -> PageResponse {
  let mut props = Inertia::props();
  props.insert("todos".into(), Inertia::now(vec![1, 2]));
  props.insert("stats".into(), Inertia::defer(counting(calls), None));
  props.insert("sidebar".into(), Inertia::defer(constant(1), Some("aside".into())));
  props.insert("filters".into(), Inertia::optional(counting(calls)));
  props.insert("feed".into(), Inertia::merge(constant(2)));
  props.insert("settings".into(), Inertia::deep_merge(constant(3)));
  props.insert("flash".into(), Inertia::always(constant(4)));
  Inertia::render("Todos/Index", props)
}

#[test]
fn full_visit_defers_and_omits() {
  let calls = Arc::new(AtomicUsize::new(0));
  let page = sample_page(&calls).resolve("/todos", Some("v1".into()), None).unwrap();

  let keys: Vec<_> = page.props.keys().cloned().collect();
  assert_eq!(keys, vec!["todos", "feed", "settings", "flash"]);
  assert_eq!(page.deferred_props.get("default"), Some(&vec!["stats".to_string()]));
  assert_eq!(page.deferred_props.get("aside"), Some(&vec!["sidebar".to_string()]));
  assert_eq!(page.merge_props, vec!["feed"]);
  assert_eq!(page.deep_merge_props, vec!["settings"]);
  assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn partial_reload_sends_requested_and_always() {
  let calls = Arc::new(AtomicUsize::new(0));
  let reload = PartialReload::new("Todos/Index").only(["stats", "filters"]);
  let page = sample_page(&calls).resolve("/todos", None, Some(&reload)).unwrap();

  let keys: Vec<_> = page.props.keys().cloned().collect();
  assert_eq!(keys, vec!["stats", "filters", "flash"]);
  assert!(page.deferred_props.is_empty());
  assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn partial_reload_for_other_component_is_full_visit() {
  let calls = Arc::new(AtomicUsize::new(0));
  let reload = PartialReload::new("Users/Edit").only(["stats"]);
  let page = sample_page(&calls).resolve("/todos", None, Some(&reload)).unwrap();
  assert!(page.props.contains_key("todos"));
  assert!(!page.props.contains_key("stats"));
  assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn callback_error_propagates() {
  let mut props = Inertia::props();
  props.insert("boom".into(), Inertia::always(Arc::new(|| Err(PageError::unauthorized("no")))));
  let err = Inertia::render("X", props).resolve("/", None, None).unwrap_err();
  assert_eq!(err.status(), 401);
}

#[test]
fn page_object_wire_format() {
  let mut props = Inertia::props();
  props.insert("count".into(), Inertia::now(1));
  let page = Inertia::render("Counter", props).resolve("/counter", None, None).unwrap();
  assert_eq!(
    serde_json::to_value(&page).unwrap(),
    json!({ "component": "Counter", "props": { "count": 1 }, "url": "/counter", "version": null })
  );
}
