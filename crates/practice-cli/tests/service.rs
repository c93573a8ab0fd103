//! Entity services against the stub back-end.

mod support;

use axum::http::Method;
use practice_cli::{ApiClient, ClientError, service::DeleteService};
use practice_core::{
  Entity,
  model::{Authority, Department, Employee, JobHistory, Task},
  page::PageRequest,
  samples::Samples,
};
use reqwest::StatusCode;
use serde_json::json;
use support::StubApi;

#[tokio::test]
async fn login_attaches_a_token() {
  let stub = StubApi::start().await;
  let client = stub.login().await;
  assert!(client.is_authenticated());
  assert_eq!(stub.count(Method::POST, "/api/authenticate"), 1);
}

#[tokio::test]
async fn bad_credentials_fail_authentication() {
  let stub = StubApi::start().await;
  let (username, password) = support::credentials();
  let config = practice_cli::ApiConfig {
    username,
    password: format!("{password}-wrong"),
    ..stub.config()
  };
  let err = ApiClient::login(config).await.unwrap_err();
  assert!(matches!(err, ClientError::Authentication(StatusCode::UNAUTHORIZED)));
}

#[tokio::test]
async fn stub_accepts_the_configured_account() {
  let stub = StubApi::start().await;
  let (username, password) = support::credentials();
  let config = practice_cli::ApiConfig { username, password, ..stub.config() };
  assert!(ApiClient::login(config).await.unwrap().is_authenticated());
}

#[tokio::test]
async fn unauthenticated_requests_are_rejected() {
  let stub = StubApi::start().await;
  let client = ApiClient::new(stub.config()).unwrap();
  let err = client
    .service::<Task>()
    .query(&PageRequest::default())
    .await
    .unwrap_err();
  assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_returns_created_with_assigned_id() {
  let stub = StubApi::start().await;
  let service = stub.login().await.service::<Employee>();

  let mut draft = Employee::with_full_data();
  draft.id = None;
  let resp = service.create(&draft).await.unwrap();

  assert_eq!(resp.status, StatusCode::CREATED);
  assert!(resp.body.id.is_some());
  assert_eq!(resp.body.full_name(), "Casey Hirthe");
  assert_eq!(stub.records("employees").len(), 1);
}

#[tokio::test]
async fn job_history_can_be_created_from_required_data_only() {
  let stub = StubApi::start().await;
  let service = stub.login().await.service::<JobHistory>();

  let mut draft = JobHistory::with_required_data();
  draft.id = None;
  let resp = service.create(&draft).await.unwrap();

  assert_eq!(resp.status, StatusCode::CREATED);
  assert!(resp.body.id.is_some());
  assert!(resp.body.language.is_none());
}

#[tokio::test]
async fn create_refuses_a_persisted_record() {
  let stub = StubApi::start().await;
  let service = stub.login().await.service::<Task>();

  let err = service.create(&Task::with_full_data()).await.unwrap_err();
  assert!(matches!(err, ClientError::AlreadyPersisted("Task")));
  assert_eq!(stub.count(Method::POST, "/api/tasks"), 0);
}

#[tokio::test]
async fn authority_is_created_under_its_name() {
  let stub = StubApi::start().await;
  let service = stub.login().await.service::<Authority>();

  let resp = service.create(&Authority::with_full_data()).await.unwrap();
  assert_eq!(resp.status, StatusCode::CREATED);
  assert_eq!(resp.body.id().map(String::as_str), Some("ROLE_MANAGER"));

  let err = service.update(&resp.body).await.unwrap_err();
  assert!(matches!(err, ClientError::NotUpdatable(_)));
}

#[tokio::test]
async fn reserved_characters_stay_inside_the_record_id() {
  let stub = StubApi::start().await;
  stub.seed("authorities", json!({ "name": "ROLE_A" }));
  stub.seed("authorities", json!({ "name": "ROLE_A?x/y" }));
  let service = stub.login().await.service::<Authority>();

  let found = service.find(&"ROLE_A?x/y".to_string()).await.unwrap();
  assert_eq!(found.body.name.as_deref(), Some("ROLE_A?x/y"));

  let resp = service.delete(&"ROLE_A?x/y".to_string()).await.unwrap();
  assert_eq!(resp.status, StatusCode::NO_CONTENT);
  assert_eq!(stub.count(Method::DELETE, "/api/authorities/ROLE_A%3Fx%2Fy"), 1);
  assert_eq!(stub.count(Method::DELETE, "/api/authorities/ROLE_A"), 0);

  let remaining = stub.records("authorities");
  assert_eq!(remaining.len(), 1);
  assert_eq!(remaining[0]["name"], "ROLE_A");
}

// ─── Read / update ───────────────────────────────────────────────────────────

#[tokio::test]
async fn update_and_patch_keep_the_id() {
  let stub = StubApi::start().await;
  stub.seed("departments", json!({ "id": 3089, "departmentName": "Research" }));
  let service = stub.login().await.service::<Department>();

  let mut dept = service.find(&3089).await.unwrap().body;
  assert_eq!(dept.department_name, "Research");

  dept.department_name = "Development".into();
  let updated = service.update(&dept).await.unwrap();
  assert_eq!(updated.status, StatusCode::OK);
  assert_eq!(updated.body.id, Some(3089));
  assert_eq!(updated.body.department_name, "Development");

  let patched = service.partial_update(&dept).await.unwrap();
  assert_eq!(patched.body.id, Some(3089));
  assert_eq!(stub.count(Method::PATCH, "/api/departments/3089"), 1);
}

#[tokio::test]
async fn update_needs_an_id() {
  let stub = StubApi::start().await;
  let service = stub.login().await.service::<Task>();
  let err = service.update(&Task::with_new_data()).await.unwrap_err();
  assert!(matches!(err, ClientError::MissingId("Task")));
}

#[tokio::test]
async fn missing_record_surfaces_not_found() {
  let stub = StubApi::start().await;
  let service = stub.login().await.service::<Task>();
  let err = service.find(&404).await.unwrap_err();
  assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
}

// ─── Query ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn query_pages_with_links_and_total() {
  let stub = StubApi::start().await;
  for i in 0..5 {
    stub.seed("tasks", json!({ "title": format!("Task {i}") }));
  }
  let service = stub.login().await.service::<Task>();

  let first = service
    .query(&PageRequest { size: 2, ..PageRequest::default() })
    .await
    .unwrap();
  assert_eq!(first.status, StatusCode::OK);
  assert_eq!(first.body.items.len(), 2);
  assert_eq!(first.body.total_count, Some(5));
  assert_eq!(first.body.links.next(), Some(1));
  assert_eq!(first.body.links.last(), Some(2));
  assert_eq!(first.body.links.prev(), None);

  let last = service
    .query(&PageRequest { page: 2, size: 2, ..PageRequest::default() })
    .await
    .unwrap();
  assert_eq!(last.body.items.len(), 1);
  assert_eq!(last.body.items[0].title.as_deref(), Some("Task 4"));
  assert_eq!(last.body.links.next(), None);
  assert_eq!(last.body.links.prev(), Some(1));
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_returns_no_content() {
  let stub = StubApi::start().await;
  stub.seed("tasks", json!({ "id": 6341, "title": "Quarterly review" }));
  let service = stub.login().await.service::<Task>();

  let resp = service.delete(&6341).await.unwrap();
  assert_eq!(resp.status, StatusCode::NO_CONTENT);
  assert!(stub.records("tasks").is_empty());

  let err = service.delete(&6341).await.unwrap_err();
  assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
}
