//! In-process stand-in for the REST back-end.
//!
//! Serves the same surface the client talks to (`/api/authenticate` plus
//! paged CRUD under `/api/{resource}`) from in-memory JSON collections, and
//! records every request so tests can assert on exactly what went over the
//! wire.

#![allow(dead_code)]

use std::{
  collections::HashMap,
  sync::{Arc, Mutex},
};

use axum::{
  Json, Router,
  extract::{Path, Query, Request, State},
  http::{HeaderMap, HeaderValue, Method, StatusCode, header},
  middleware::{self, Next},
  response::{IntoResponse, Response},
  routing::{get, post},
};
use practice_cli::{ApiClient, ApiConfig};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const TOKEN: &str = "stub-token";

// ─── State ────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Inner {
  collections: HashMap<String, Vec<Value>>,
  next_id:     i64,
  log:         Vec<(Method, String)>,
}

/// A running stub server. Cheap to clone; clones share state.
#[derive(Clone, Default)]
pub struct StubApi {
  inner: Arc<Mutex<Inner>>,
  base:  String,
}

/// Authorities are keyed by their name; everything else by a numeric id.
fn key_field(resource: &str) -> &'static str {
  if resource == "authorities" { "name" } else { "id" }
}

fn key_string(value: &Value) -> Option<String> {
  match value {
    Value::String(s) => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    _ => None,
  }
}

impl StubApi {
  /// Bind an ephemeral port and serve in the background.
  pub async fn start() -> Self {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let stub = Self {
      inner: Arc::new(Mutex::new(Inner { next_id: 1000, ..Default::default() })),
      base:  format!("http://{addr}"),
    };

    let app = Router::new()
      .route("/api/authenticate", post(authenticate))
      .route("/api/{resource}", get(list).post(create))
      .route(
        "/api/{resource}/{id}",
        get(find).put(update).patch(update).delete(remove),
      )
      .layer(middleware::from_fn_with_state(stub.clone(), guard))
      .with_state(stub.clone());

    tokio::spawn(async move {
      axum::serve(listener, app).await.unwrap();
    });
    stub
  }

  pub fn base_url(&self) -> &str { &self.base }

  pub fn config(&self) -> ApiConfig {
    ApiConfig { base_url: self.base.clone(), ..ApiConfig::default() }
  }

  /// Signed-in client using the [`credentials`] the stub accepts.
  pub async fn login(&self) -> ApiClient {
    let (username, password) = credentials();
    let config = ApiConfig { username, password, ..self.config() };
    ApiClient::login(config).await.unwrap()
  }

  /// Insert a record directly, assigning an id when it has none.
  pub fn seed(&self, resource: &str, mut record: Value) -> Value {
    let mut inner = self.inner.lock().unwrap();
    if key_field(resource) == "id" && record["id"].is_null() {
      inner.next_id += 1;
      record["id"] = json!(inner.next_id);
    }
    inner
      .collections
      .entry(resource.to_string())
      .or_default()
      .push(record.clone());
    record
  }

  pub fn records(&self, resource: &str) -> Vec<Value> {
    let inner = self.inner.lock().unwrap();
    inner.collections.get(resource).cloned().unwrap_or_default()
  }

  /// How many `method` requests hit exactly `path`.
  pub fn count(&self, method: Method, path: &str) -> usize {
    let inner = self.inner.lock().unwrap();
    inner
      .log
      .iter()
      .filter(|(m, p)| *m == method && p == path)
      .count()
  }

  /// Every request so far, as `"METHOD /path"`.
  pub fn requests(&self) -> Vec<String> {
    let inner = self.inner.lock().unwrap();
    inner.log.iter().map(|(m, p)| format!("{m} {p}")).collect()
  }

  pub fn clear_log(&self) { self.inner.lock().unwrap().log.clear(); }
}

// ─── Middleware ───────────────────────────────────────────────────────────────

/// Log the request, then require the bearer token everywhere but login.
async fn guard(State(stub): State<StubApi>, req: Request, next: Next) -> Response {
  let method = req.method().clone();
  let path = req.uri().path().to_string();
  stub.inner.lock().unwrap().log.push((method, path.clone()));

  if path != "/api/authenticate" {
    let expected = format!("Bearer {TOKEN}");
    let authorized = req
      .headers()
      .get(header::AUTHORIZATION)
      .and_then(|v| v.to_str().ok())
      .is_some_and(|v| v == expected);
    if !authorized {
      return StatusCode::UNAUTHORIZED.into_response();
    }
  }
  next.run(req).await
}

// ─── Handlers ─────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct Login {
  username: String,
  password: String,
}

/// The one account the stub knows: `E2E_USERNAME` / `E2E_PASSWORD`, or
/// `user`/`user`.
pub fn credentials() -> (String, String) {
  (
    std::env::var("E2E_USERNAME").unwrap_or_else(|_| "user".into()),
    std::env::var("E2E_PASSWORD").unwrap_or_else(|_| "user".into()),
  )
}

async fn authenticate(Json(login): Json<Login>) -> Response {
  let (username, password) = credentials();
  if login.username == username && login.password == password {
    Json(json!({ "id_token": TOKEN })).into_response()
  } else {
    StatusCode::UNAUTHORIZED.into_response()
  }
}

#[derive(Deserialize)]
struct Paging {
  page: Option<usize>,
  size: Option<usize>,
}

async fn list(
  State(stub): State<StubApi>,
  Path(resource): Path<String>,
  Query(paging): Query<Paging>,
) -> Response {
  let all = stub.records(&resource);
  let page = paging.page.unwrap_or(0);
  let size = paging.size.unwrap_or(20).max(1);
  let last = all.len().saturating_sub(1) / size;
  let items: Vec<Value> = all.iter().skip(page * size).take(size).cloned().collect();

  let link = |p: usize, rel: &str| {
    format!("<{}/api/{resource}?page={p}&size={size}>; rel=\"{rel}\"", stub.base)
  };
  let mut links = Vec::new();
  if page < last {
    links.push(link(page + 1, "next"));
  }
  if page > 0 {
    links.push(link(page - 1, "prev"));
  }
  links.push(link(last, "last"));
  links.push(link(0, "first"));

  let mut headers = HeaderMap::new();
  if let Ok(value) = HeaderValue::from_str(&links.join(",")) {
    headers.insert(header::LINK, value);
  }
  headers.insert("x-total-count", HeaderValue::from(all.len()));
  (headers, Json(items)).into_response()
}

async fn create(
  State(stub): State<StubApi>,
  Path(resource): Path<String>,
  Json(record): Json<Value>,
) -> Response {
  if key_field(&resource) == "id" && !record["id"].is_null() {
    return (StatusCode::BAD_REQUEST, "A new record cannot already have an ID").into_response();
  }
  let saved = stub.seed(&resource, record);
  (StatusCode::CREATED, Json(saved)).into_response()
}

fn position(inner: &Inner, resource: &str, id: &str) -> Option<usize> {
  let field = key_field(resource);
  inner
    .collections
    .get(resource)?
    .iter()
    .position(|r| key_string(&r[field]).as_deref() == Some(id))
}

async fn find(State(stub): State<StubApi>, Path((resource, id)): Path<(String, String)>) -> Response {
  let inner = stub.inner.lock().unwrap();
  match position(&inner, &resource, &id) {
    Some(i) => Json(inner.collections[&resource][i].clone()).into_response(),
    None => StatusCode::NOT_FOUND.into_response(),
  }
}

/// `PUT` replaces the record, `PATCH` merges non-null fields into it.
async fn update(
  State(stub): State<StubApi>,
  method: Method,
  Path((resource, id)): Path<(String, String)>,
  body: String,
) -> Response {
  let Ok(record) = serde_json::from_str::<Value>(&body) else {
    return StatusCode::BAD_REQUEST.into_response();
  };
  let field = key_field(&resource);
  if key_string(&record[field]).as_deref() != Some(id.as_str()) {
    return (StatusCode::BAD_REQUEST, "ID mismatch").into_response();
  }

  let mut inner = stub.inner.lock().unwrap();
  let Some(i) = position(&inner, &resource, &id) else {
    return StatusCode::NOT_FOUND.into_response();
  };
  let Some(stored) = inner.collections.get_mut(&resource).map(|c| &mut c[i]) else {
    return StatusCode::NOT_FOUND.into_response();
  };
  if method == Method::PATCH {
    if let (Some(target), Value::Object(patch)) = (stored.as_object_mut(), record) {
      for (k, v) in patch {
        if !v.is_null() {
          target.insert(k, v);
        }
      }
    }
  } else {
    *stored = record;
  }
  Json(stored.clone()).into_response()
}

async fn remove(State(stub): State<StubApi>, Path((resource, id)): Path<(String, String)>) -> Response {
  let mut inner = stub.inner.lock().unwrap();
  match position(&inner, &resource, &id) {
    Some(i) => {
      if let Some(collection) = inner.collections.get_mut(&resource) {
        collection.remove(i);
      }
      StatusCode::NO_CONTENT.into_response()
    }
    None => StatusCode::NOT_FOUND.into_response(),
  }
}
