/* src/server/adapter/axum/src/handler.rs */

// One axum handler per route. Guards run first, then the request is turned
// into a `RequestContext` and the synchronous generated handler runs on the
// blocking pool. Inertia visits get the page object as JSON; first loads get
// an HTML shell with the page object in `data-page`.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Json;
use axum::body::Body;
use axum::extract::{Path, Query, Request};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{MethodFilter, MethodRouter, on};
use pagekit::{
  Handler, HttpMethod, PageError, PageObject, PartialReload, Payload, RequestContext, Route,
};

use crate::AppState;
use crate::error::AxumError;

const BODY_LIMIT: usize = 2 * 1024 * 1024;

pub(crate) const X_INERTIA: &str = "x-inertia";
pub(crate) const X_INERTIA_VERSION: &str = "x-inertia-version";
pub(crate) const X_INERTIA_LOCATION: &str = "x-inertia-location";
pub(crate) const PARTIAL_COMPONENT: &str = "x-inertia-partial-component";
pub(crate) const PARTIAL_DATA: &str = "x-inertia-partial-data";
pub(crate) const PARTIAL_EXCEPT: &str = "x-inertia-partial-except";

enum Outcome {
  Page(PageObject),
  Back,
}

fn method_filter(method: HttpMethod) -> MethodFilter {
  match method {
    HttpMethod::Get => MethodFilter::GET,
    HttpMethod::Post => MethodFilter::POST,
    HttpMethod::Put => MethodFilter::PUT,
    HttpMethod::Patch => MethodFilter::PATCH,
    HttpMethod::Delete => MethodFilter::DELETE,
  }
}

pub(crate) fn route_handler(state: Arc<AppState>, route: Route) -> MethodRouter {
  let filter = method_filter(route.method);
  if route.params().is_empty() {
    on(filter, move |req: Request| dispatch(state, route, HashMap::new(), req))
  } else {
    on(filter, move |Path(params): Path<HashMap<String, String>>, req: Request| {
      dispatch(state, route, params, req)
    })
  }
}

async fn dispatch(
  state: Arc<AppState>,
  route: Route,
  params: HashMap<String, String>,
  req: Request,
) -> Response {
  match respond(&state, &route, params, req).await {
    Ok(response) => response,
    Err(err) => {
      if err.status() >= 500 {
        tracing::error!(route = %route.name, code = err.code(), "{}", err.message());
      } else {
        tracing::debug!(route = %route.name, code = err.code(), "{}", err.message());
      }
      AxumError(err).into_response()
    }
  }
}

async fn respond(
  state: &AppState,
  route: &Route,
  params: HashMap<String, String>,
  req: Request,
) -> Result<Response, PageError> {
  let (parts, body) = req.into_parts();
  for name in &route.middleware {
    if let Some(guard) = state.guards.get(name) {
      guard(&parts.headers)?;
    }
  }

  let url = parts
    .uri
    .path_and_query()
    .map_or_else(|| parts.uri.path().to_string(), |pq| pq.as_str().to_string());
  let inertia = parts.headers.contains_key(X_INERTIA);
  if inertia && parts.method == Method::GET && is_stale(&parts.headers, state.version.as_deref()) {
    return Ok(conflict(&url));
  }

  let query = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
    .map(|Query(q)| q)
    .unwrap_or_default();
  let payload = read_payload(&parts.headers, body).await?;
  let ctx = RequestContext::new(state.routes.clone(), state.resolver.clone())
    .with_route_name(route.name.clone())
    .with_params(params)
    .with_query(query)
    .with_payload(payload)
    .with_partial(partial_reload(&parts.headers));

  let handler = route.handler;
  let version = state.version.clone();
  let outcome = tokio::task::spawn_blocking(move || run(handler, ctx, url, version))
    .await
    .map_err(|e| PageError::internal(format!("handler task failed: {e}")))??;

  match outcome {
    Outcome::Page(page) => render_page(state, &page, inertia),
    Outcome::Back => Ok(redirect_back(&parts.headers)),
  }
}

fn run(
  handler: Handler,
  mut ctx: RequestContext,
  url: String,
  version: Option<String>,
) -> Result<Outcome, PageError> {
  match handler(&mut ctx)? {
    pagekit::Response::Page(page) => Ok(Outcome::Page(page.resolve(url, version, ctx.partial())?)),
    pagekit::Response::RedirectBack => Ok(Outcome::Back),
  }
}

// -- Request --

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
  headers.get(name).and_then(|v| v.to_str().ok())
}

async fn read_payload(headers: &HeaderMap, body: Body) -> Result<Payload, PageError> {
  let bytes = axum::body::to_bytes(body, BODY_LIMIT)
    .await
    .map_err(|e| PageError::validation(format!("failed to read request body: {e}")))?;
  if bytes.iter().all(u8::is_ascii_whitespace) {
    return Ok(Payload::default());
  }
  let is_json = header_str(headers, header::CONTENT_TYPE.as_str())
    .is_none_or(|ct| ct.starts_with("application/json") || ct.contains("+json"));
  if !is_json {
    return Err(PageError::validation("request body must be JSON"));
  }
  let json: serde_json::Value =
    serde_json::from_slice(&bytes).map_err(|e| PageError::validation(e.to_string()))?;
  Payload::from_json(json)
}

fn split_keys(raw: &str) -> impl Iterator<Item = &str> {
  raw.split(',').map(str::trim).filter(|k| !k.is_empty())
}

pub(crate) fn partial_reload(headers: &HeaderMap) -> Option<PartialReload> {
  let component = header_str(headers, PARTIAL_COMPONENT)?;
  let mut partial = PartialReload::new(component);
  if let Some(only) = header_str(headers, PARTIAL_DATA) {
    partial = partial.only(split_keys(only));
  }
  if let Some(except) = header_str(headers, PARTIAL_EXCEPT) {
    partial = partial.except(split_keys(except));
  }
  Some(partial)
}

fn is_stale(headers: &HeaderMap, current: Option<&str>) -> bool {
  current.is_some_and(|v| header_str(headers, X_INERTIA_VERSION).unwrap_or("") != v)
}

// -- Response --

fn conflict(url: &str) -> Response {
  let mut response = StatusCode::CONFLICT.into_response();
  if let Ok(location) = HeaderValue::from_str(url) {
    response.headers_mut().insert(X_INERTIA_LOCATION, location);
  }
  response
}

fn redirect_back(headers: &HeaderMap) -> Response {
  let target = header_str(headers, header::REFERER.as_str()).unwrap_or("/");
  Redirect::to(target).into_response()
}

fn render_page(state: &AppState, page: &PageObject, inertia: bool) -> Result<Response, PageError> {
  if inertia {
    let mut response = Json(page).into_response();
    let headers = response.headers_mut();
    headers.insert(X_INERTIA, HeaderValue::from_static("true"));
    headers.insert(header::VARY, HeaderValue::from_static("X-Inertia"));
    return Ok(response);
  }
  let json = serde_json::to_string(page)
    .map_err(|e| PageError::internal(format!("failed to serialize page: {e}")))?;
  let app = format!("<div id=\"app\" data-page=\"{}\"></div>", escape_attr(&json));
  let mut response = Html((state.shell)(&app)).into_response();
  response.headers_mut().insert(header::VARY, HeaderValue::from_static("X-Inertia"));
  Ok(response)
}

pub(crate) fn escape_attr(raw: &str) -> String {
  let mut out = String::with_capacity(raw.len());
  for c in raw.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      _ => out.push(c),
    }
  }
  out
}
