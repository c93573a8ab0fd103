//! Task screens driven through key events.

mod support;

use axum::http::Method;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use practice_cli::{
  app::{App, Screen},
  service::DeleteService,
};
use practice_core::model::Task;
use serde_json::json;
use support::StubApi;

const LIST: &str = "/api/tasks";

fn key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

async fn press(app: &mut App, code: KeyCode) -> bool {
  app.handle_key(key(code)).await.unwrap()
}

async fn type_str(app: &mut App, text: &str) {
  for c in text.chars() {
    press(app, KeyCode::Char(c)).await;
  }
}

/// Walk the menu down to the Task entry and open it.
async fn open_tasks(app: &mut App) {
  let index = app
    .router
    .routes()
    .iter()
    .position(|r| r.path == "task")
    .unwrap();
  for _ in 0..index {
    press(app, KeyCode::Down).await;
  }
  press(app, KeyCode::Enter).await;
}

#[tokio::test]
async fn create_task_from_the_keyboard() {
  let stub = StubApi::start().await;
  let mut app = App::new(stub.login().await);
  open_tasks(&mut app).await;
  assert_eq!(app.url, "/task");
  assert_eq!(stub.count(Method::GET, LIST), 1);

  press(&mut app, KeyCode::Char('c')).await;
  assert_eq!(app.url, "/task/new");
  type_str(&mut app, "Quarterly review").await;
  press(&mut app, KeyCode::Tab).await;
  type_str(&mut app, "Q3").await;
  press(&mut app, KeyCode::Enter).await;

  assert_eq!(stub.count(Method::POST, LIST), 1);
  assert_eq!(app.screen(), Screen::List);
  let saved = &stub.records("tasks")[0];
  assert_eq!(saved["title"], "Quarterly review");
  assert_eq!(saved["description"], "Q3");
}

#[tokio::test]
async fn cancelling_the_dialog_deletes_nothing() {
  let stub = StubApi::start().await;
  stub.seed("tasks", json!({ "id": 6341, "title": "Quarterly review" }));
  let mut app = App::new(stub.login().await);
  app.open_menu_item("task").await.unwrap();
  stub.clear_log();

  press(&mut app, KeyCode::Char('d')).await;
  assert_eq!(app.screen(), Screen::DeleteDialog);
  press(&mut app, KeyCode::Char('n')).await;

  assert_eq!(app.screen(), Screen::List);
  assert!(stub.requests().is_empty());
  assert_eq!(stub.records("tasks").len(), 1);
}

#[tokio::test]
async fn confirming_the_dialog_deletes_and_reloads() {
  let stub = StubApi::start().await;
  stub.seed("tasks", json!({ "id": 6341, "title": "Quarterly review" }));
  let mut app = App::new(stub.login().await);
  app.open_menu_item("task").await.unwrap();

  press(&mut app, KeyCode::Char('d')).await;
  press(&mut app, KeyCode::Char('y')).await;

  assert_eq!(stub.count(Method::DELETE, "/api/tasks/6341"), 1);
  assert_eq!(stub.count(Method::GET, LIST), 2);
  assert!(!app.has_table());
  assert_eq!(app.status_msg, "Deleted");
}

#[tokio::test]
async fn failed_delete_keeps_the_dialog_open() {
  let stub = StubApi::start().await;
  stub.seed("tasks", json!({ "id": 6341, "title": "Quarterly review" }));
  let mut app = App::new(stub.login().await);
  app.open_menu_item("task").await.unwrap();
  assert!(app.delete(0).unwrap());

  // Someone else removes the record before the user confirms.
  stub.login().await.service::<Task>().delete(&6341).await.unwrap();

  press(&mut app, KeyCode::Char('y')).await;
  assert_eq!(app.screen(), Screen::DeleteDialog);
  assert!(app.status_msg.contains("404"));

  press(&mut app, KeyCode::Esc).await;
  assert_eq!(app.screen(), Screen::List);
  assert_eq!(stub.count(Method::DELETE, "/api/tasks/6341"), 2);
}

#[tokio::test]
async fn paging_follows_the_link_header() {
  let stub = StubApi::start().await;
  for i in 0..5 {
    stub.seed("tasks", json!({ "title": format!("Task {i}") }));
  }
  let mut app = App::new(stub.login().await).with_page_size(2);
  app.open_menu_item("task").await.unwrap();

  press(&mut app, KeyCode::Char('n')).await;
  assert_eq!(app.url, "/task?page=1");
  press(&mut app, KeyCode::Char('n')).await;
  assert_eq!(app.url, "/task?page=2");
  assert_eq!(app.last_row(), Some(0));

  // No next link on the last page.
  press(&mut app, KeyCode::Char('n')).await;
  assert_eq!(app.url, "/task?page=2");

  press(&mut app, KeyCode::Char('p')).await;
  assert_eq!(app.url, "/task?page=1");

  app.navigate("/task?page=0").await.unwrap();
  assert_eq!(app.url, "/task");
}

#[tokio::test]
async fn broken_deep_link_keeps_the_open_list() {
  let stub = StubApi::start().await;
  stub.seed("tasks", json!({ "id": 6341, "title": "Quarterly review" }));
  let mut app = App::new(stub.login().await);
  app.open_menu_item("task").await.unwrap();

  assert!(app.navigate("/employee/999/view").await.is_err());
  assert_eq!(stub.count(Method::GET, "/api/employees/999"), 1);
  assert!(app.status_msg.contains("404"));
  assert_eq!(app.url, "/task");
  assert_eq!(app.screen(), Screen::List);
  assert_eq!(app.heading(), Some("Task"));
  assert_eq!(app.last_row(), Some(0));
}

#[tokio::test]
async fn broken_deep_link_from_the_menu_stays_on_the_menu() {
  let stub = StubApi::start().await;
  let mut app = App::new(stub.login().await);

  assert!(app.navigate("/employee/999/view").await.is_err());
  assert_eq!(app.url, "/");
  assert_eq!(app.screen(), Screen::Menu);
  assert_eq!(app.heading(), None);
}

#[tokio::test]
async fn search_filters_rows_without_a_request() {
  let stub = StubApi::start().await;
  stub.seed("tasks", json!({ "title": "Quarterly review" }));
  stub.seed("tasks", json!({ "title": "Onboarding" }));
  let mut app = App::new(stub.login().await);
  app.open_menu_item("task").await.unwrap();
  stub.clear_log();

  press(&mut app, KeyCode::Char('/')).await;
  type_str(&mut app, "onb").await;
  press(&mut app, KeyCode::Enter).await;

  assert_eq!(app.last_row(), Some(0));
  assert!(stub.requests().is_empty());

  // `q` quits once the search bar is closed.
  assert!(!press(&mut app, KeyCode::Char('q')).await);
}

#[tokio::test]
async fn escape_returns_to_the_menu() {
  let stub = StubApi::start().await;
  let mut app = App::new(stub.login().await);
  app.open_menu_item("task").await.unwrap();

  press(&mut app, KeyCode::Esc).await;
  assert_eq!(app.screen(), Screen::Menu);
  assert_eq!(app.url, "/");
}
