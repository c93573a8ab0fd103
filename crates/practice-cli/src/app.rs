//! Application state machine and event dispatcher.
//!
//! Every user action goes through a method here. Failures are reported on
//! the status bar and leave the current screen in place; they are also
//! returned so callers (and tests) can inspect them.

use anyhow::Context as _;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use practice_core::{
  page::DEFAULT_PAGE_SIZE,
  routes::{Action, Router},
};
use reqwest::StatusCode;
use tracing::{info, warn};

use crate::{client::ApiClient, dialog::DialogOutcome, feature::AnyFeature};

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// The entity menu at `/`.
  Menu,
  List,
  Detail,
  Form,
  /// The delete dialog is open over the list or detail screen.
  DeleteDialog,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub router:      Router,
  pub client:      ApiClient,
  /// Current client URL, e.g. `/employee/12/view`.
  pub url:         String,
  pub menu_cursor: usize,
  /// The routed feature module; `None` on the menu.
  pub feature:     Option<AnyFeature>,
  /// One-line status message shown in the status bar.
  pub status_msg:  String,
  pub page_size:   u32,
}

impl App {
  pub fn new(client: ApiClient) -> Self {
    Self {
      router: Router::default(),
      client,
      url: "/".to_string(),
      menu_cursor: 0,
      feature: None,
      status_msg: String::new(),
      page_size: DEFAULT_PAGE_SIZE,
    }
  }

  pub fn with_page_size(mut self, page_size: u32) -> Self {
    self.page_size = page_size;
    self
  }

  pub fn screen(&self) -> Screen {
    match &self.feature {
      None => Screen::Menu,
      Some(f) if f.dialog_target().is_some() => Screen::DeleteDialog,
      Some(f) if f.is_editing() => Screen::Form,
      Some(f) if f.is_detail() => Screen::Detail,
      Some(_) => Screen::List,
    }
  }

  /// Heading of the routed entity, e.g. `"Employee"`.
  pub fn heading(&self) -> Option<&'static str> { self.feature.as_ref().map(AnyFeature::heading) }

  pub fn has_table(&self) -> bool { self.feature.as_ref().is_some_and(AnyFeature::has_table) }

  fn sync_url(&mut self) {
    if let Some(feature) = &self.feature {
      self.url = feature.url();
    }
  }

  /// Record the outcome of an action on the status bar.
  fn report<T>(&mut self, result: crate::error::Result<T>, what: &str) -> anyhow::Result<T> {
    self.sync_url();
    match result {
      Ok(v) => {
        self.status_msg.clear();
        Ok(v)
      }
      Err(e) => {
        warn!(error = %e, "{what} failed");
        self.status_msg = format!("Error: {e}");
        Err(e).with_context(|| format!("{what} failed"))
      }
    }
  }

  fn feature_mut(&mut self) -> anyhow::Result<&mut AnyFeature> {
    self.feature.as_mut().context("no entity is open")
  }

  // ── Navigation ────────────────────────────────────────────────────────────

  /// Go to `url`. `/` shows the menu; entity URLs load their feature module
  /// and issue the request the screen needs.
  pub async fn navigate(&mut self, url: &str) -> anyhow::Result<()> {
    if url.trim_matches('/').is_empty() {
      self.feature = None;
      self.url = "/".to_string();
      return Ok(());
    }

    let resolved = match self.router.resolve(url) {
      Ok(r) => r,
      Err(e) => {
        self.status_msg = format!("Error: {e}");
        return Err(e.into());
      }
    };
    info!(url, "navigate");

    // A different entity's module only replaces the open one once its first
    // request succeeds.
    let path = resolved.route.path;
    let same_route = self.feature.as_ref().is_some_and(|f| f.route() == path);
    let mut feature = if same_route {
      self.feature.take()
    } else {
      AnyFeature::for_route(path, &self.client, self.page_size)
    }
    .with_context(|| format!("no entity module for {path:?}"))?;

    let page = resolved
      .query
      .as_deref()
      .and_then(|q| q.split('&').find_map(|kv| kv.strip_prefix("page=")))
      .and_then(|p| p.parse().ok());

    let result = match &resolved.action {
      Action::List => feature.go_to_page(page.unwrap_or(0)).await.map(|_| ()),
      Action::New => {
        feature.open_new();
        Ok(())
      }
      Action::View(id) => feature.open_detail(id).await.map(|_| ()),
      Action::Edit(id) => feature.open_edit(id).await.map(|_| ()),
    };
    if same_route || result.is_ok() {
      self.feature = Some(feature);
    }
    self.report(result, "navigation")
  }

  /// Click an entity menu item such as `"employee"`.
  pub async fn open_menu_item(&mut self, path: &str) -> anyhow::Result<()> {
    self.navigate(&format!("/{path}")).await
  }

  // ── List actions ──────────────────────────────────────────────────────────

  pub async fn reload(&mut self) -> anyhow::Result<StatusCode> {
    let result = self.feature_mut()?.load_list().await;
    self.report(result, "list")
  }

  /// Open the create form for the routed entity.
  pub fn create(&mut self) -> anyhow::Result<()> {
    self.feature_mut()?.open_new();
    self.sync_url();
    Ok(())
  }

  pub async fn view(&mut self, index: usize) -> anyhow::Result<Option<StatusCode>> {
    let result = self.feature_mut()?.open_detail_at(index).await;
    self.report(result, "detail")
  }

  pub async fn edit(&mut self, index: usize) -> anyhow::Result<Option<StatusCode>> {
    let result = self.feature_mut()?.open_edit_at(index).await;
    self.report(result, "edit")
  }

  /// Open the delete dialog for the row at `index`.
  pub fn delete(&mut self, index: usize) -> anyhow::Result<bool> {
    Ok(self.feature_mut()?.request_delete(index))
  }

  pub fn last_row(&self) -> Option<usize> {
    self
      .feature
      .as_ref()
      .map(AnyFeature::row_count)
      .and_then(|n| n.checked_sub(1))
  }

  pub async fn next_page(&mut self) -> anyhow::Result<Option<StatusCode>> {
    let result = self.feature_mut()?.next_page().await;
    self.report(result, "next page")
  }

  pub async fn prev_page(&mut self) -> anyhow::Result<Option<StatusCode>> {
    let result = self.feature_mut()?.prev_page().await;
    self.report(result, "previous page")
  }

  // ── Detail / form actions ─────────────────────────────────────────────────

  /// Back from detail or form to a refreshed list.
  pub async fn back(&mut self) -> anyhow::Result<StatusCode> {
    let result = self.feature_mut()?.back_to_list().await;
    self.report(result, "list")
  }

  pub async fn cancel_form(&mut self) -> anyhow::Result<StatusCode> { self.back().await }

  /// Edit the record shown on the detail screen.
  pub async fn edit_current(&mut self) -> anyhow::Result<Option<StatusCode>> {
    let Some(id) = self.feature.as_ref().and_then(AnyFeature::detail_id) else {
      return Ok(None);
    };
    let result = self.feature_mut()?.open_edit(&id).await;
    self.report(result, "edit").map(Some)
  }

  pub fn type_into(&mut self, field: &str, value: &str) -> anyhow::Result<()> {
    self.feature_mut()?.set_field(field, value);
    Ok(())
  }

  pub fn field_value(&self, field: &str) -> Option<String> {
    self.feature.as_ref().and_then(|f| f.field_value(field))
  }

  /// Submit the open form. Returns the create/update status.
  pub async fn save_form(&mut self) -> anyhow::Result<Option<StatusCode>> {
    let result = self.feature_mut()?.save_form().await;
    let status = self.report(result, "save")?;
    if status.is_some() {
      self.status_msg = "Saved".to_string();
    }
    Ok(status)
  }

  // ── Delete dialog ─────────────────────────────────────────────────────────

  pub async fn confirm_delete(&mut self) -> anyhow::Result<Option<DialogOutcome>> {
    let result = self.feature_mut()?.confirm_delete().await;
    let outcome = self.report(result, "delete")?;
    if outcome.is_some() {
      self.status_msg = "Deleted".to_string();
    }
    Ok(outcome)
  }

  pub fn cancel_delete(&mut self) -> Option<DialogOutcome> {
    self.feature.as_mut().and_then(AnyFeature::cancel_delete)
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  ///
  /// Action failures are already on the status bar, so they do not end the
  /// session.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    let result = match self.screen() {
      Screen::Menu => return self.handle_menu_key(key).await,
      Screen::List => self.handle_list_key(key).await,
      Screen::Detail => self.handle_detail_key(key).await,
      Screen::Form => self.handle_form_key(key).await,
      Screen::DeleteDialog => self.handle_dialog_key(key).await,
    };
    match result {
      Ok(cont) => Ok(cont),
      Err(_) => Ok(true),
    }
  }

  async fn handle_menu_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    let count = self.router.routes().len();
    match key.code {
      KeyCode::Char('q') => return Ok(false),
      KeyCode::Down | KeyCode::Char('j') => {
        if self.menu_cursor + 1 < count {
          self.menu_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.menu_cursor = self.menu_cursor.saturating_sub(1);
      }
      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        let path = self.router.routes()[self.menu_cursor].path;
        // Errors are on the status bar; stay on the menu.
        self.open_menu_item(path).await.ok();
      }
      _ => {}
    }
    Ok(true)
  }

  async fn handle_list_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    let feature = self.feature_mut()?;
    let (_, filtering) = feature.filter();
    if filtering {
      match key.code {
        KeyCode::Esc => feature.clear_filter(),
        KeyCode::Enter => feature.set_filter_active(false),
        KeyCode::Backspace => feature.edit_filter(None),
        KeyCode::Char(c) => feature.edit_filter(Some(c)),
        _ => {}
      }
      return Ok(true);
    }

    let cursor = feature.cursor();
    match key.code {
      KeyCode::Char('q') => return Ok(false),
      KeyCode::Down | KeyCode::Char('j') => feature.cursor_down(),
      KeyCode::Up | KeyCode::Char('k') => feature.cursor_up(),
      KeyCode::Char('/') => {
        feature.clear_filter();
        feature.set_filter_active(true);
      }
      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        self.view(cursor).await?;
      }
      KeyCode::Char('c') => self.create()?,
      KeyCode::Char('e') => {
        self.edit(cursor).await?;
      }
      KeyCode::Char('d') => {
        self.delete(cursor)?;
      }
      KeyCode::Char('n') => {
        self.next_page().await?;
      }
      KeyCode::Char('p') => {
        self.prev_page().await?;
      }
      KeyCode::Char('r') => {
        self.reload().await?;
      }
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => self.navigate("/").await?,
      _ => {}
    }
    Ok(true)
  }

  async fn handle_detail_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
        self.back().await?;
      }
      KeyCode::Char('e') => {
        self.edit_current().await?;
      }
      KeyCode::Char('d') => {
        self.delete(0)?;
      }
      _ => {}
    }
    Ok(true)
  }

  async fn handle_form_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    let feature = self.feature_mut()?;
    match key.code {
      KeyCode::Esc => {
        self.cancel_form().await?;
      }
      KeyCode::Enter => {
        self.save_form().await?;
      }
      KeyCode::Tab | KeyCode::Down => feature.focus_next(),
      KeyCode::BackTab | KeyCode::Up => feature.focus_prev(),
      KeyCode::Backspace => feature.backspace(),
      KeyCode::Char(c) => feature.type_char(c),
      _ => {}
    }
    Ok(true)
  }

  async fn handle_dialog_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('y') | KeyCode::Enter => {
        self.confirm_delete().await?;
      }
      KeyCode::Char('n') | KeyCode::Esc => {
        self.cancel_delete();
      }
      _ => {}
    }
    Ok(true)
  }
}
