//! Feature modules: the list, detail, form, and delete-dialog state for one
//! entity type, plus [`AnyFeature`] to hold whichever one is routed to.

use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use practice_core::{
  Entity,
  form::{FieldKind, FormValues},
  model::{
    Authority, Country, Department, Employee, Job, JobHistory, Location,
    Region, Task,
  },
  page::{Page, PageRequest},
  routes::{Action, url_for},
};
use reqwest::StatusCode;
use tracing::info;

use crate::{
  client::ApiClient,
  dialog::{DeleteDialog, DialogOutcome},
  error::{ClientError, Result},
  service::EntityService,
};

// ─── View models ─────────────────────────────────────────────────────────────

/// The list table, already rendered to strings.
#[derive(Debug, Clone, Default)]
pub struct TableView {
  pub columns: Vec<&'static str>,
  pub rows:    Vec<Vec<String>>,
  /// Rows before filtering.
  pub total:   usize,
}

#[derive(Debug, Clone)]
pub struct FieldView {
  pub label:    &'static str,
  pub value:    String,
  pub kind:     FieldKind,
  pub required: bool,
}

#[derive(Debug, Clone)]
pub struct FormView {
  pub title:  String,
  pub fields: Vec<FieldView>,
  pub focus:  usize,
}

// ─── Feature ─────────────────────────────────────────────────────────────────

/// Create/edit form state. `editing` is `None` for a new record.
#[derive(Debug, Clone)]
pub struct FormState<E: Entity> {
  pub editing: Option<E::Id>,
  pub values:  FormValues,
  pub focus:   usize,
}

#[derive(Debug, Clone)]
pub enum Screen<E: Entity> {
  List,
  Detail(E),
  Form(FormState<E>),
}

/// All view state for entity `E`. Owned exclusively by the app.
pub struct Feature<E: Entity> {
  service:           EntityService<E>,
  pub request:       PageRequest,
  pub page:          Page<E>,
  pub cursor:        usize,
  pub filter:        String,
  pub filter_active: bool,
  pub screen:        Screen<E>,
  pub dialog:        Option<DeleteDialog<EntityService<E>, E::Id>>,
}

impl<E: Entity> Feature<E> {
  pub fn new(service: EntityService<E>, page_size: u32) -> Self {
    Self {
      service,
      request: PageRequest { size: page_size, ..PageRequest::default() },
      page: Page::default(),
      cursor: 0,
      filter: String::new(),
      filter_active: false,
      screen: Screen::List,
      dialog: None,
    }
  }

  fn parse_id(raw: &str) -> Result<E::Id> {
    raw.parse().map_err(|_| {
      ClientError::Invalid(practice_core::Error::InvalidField {
        field:    "id",
        value:    raw.to_string(),
        expected: "a record identifier",
      })
    })
  }

  /// The client URL for the current screen.
  pub fn url(&self) -> String {
    let action = match &self.screen {
      Screen::List => Action::List,
      Screen::Detail(record) => {
        Action::View(record.id().map(ToString::to_string).unwrap_or_default())
      }
      Screen::Form(FormState { editing: None, .. }) => Action::New,
      Screen::Form(FormState { editing: Some(id), .. }) => Action::Edit(id.to_string()),
    };
    let url = url_for(E::ROUTE, &action);
    match (&self.screen, self.request.page) {
      (Screen::List, page) if page > 0 => format!("{url}?page={page}"),
      _ => url,
    }
  }

  // ── List ──────────────────────────────────────────────────────────────────

  /// Fetch the current page and show the list.
  pub async fn load_list(&mut self) -> Result<StatusCode> {
    let resp = self.service.query(&self.request).await?;
    self.page = resp.body;
    self.screen = Screen::List;
    self.cursor = self.cursor.min(self.rows().len().saturating_sub(1));
    info!(entity = E::NAME, rows = self.page.items.len(), "list loaded");
    Ok(resp.status)
  }

  pub async fn go_to_page(&mut self, page: u32) -> Result<StatusCode> {
    self.request = self.request.with_page(page);
    self.cursor = 0;
    self.load_list().await
  }

  /// Follow the `next` link, if the server sent one.
  pub async fn next_page(&mut self) -> Result<Option<StatusCode>> {
    match self.page.links.next() {
      Some(page) => self.go_to_page(page).await.map(Some),
      None => Ok(None),
    }
  }

  pub async fn prev_page(&mut self) -> Result<Option<StatusCode>> {
    match self.page.links.prev() {
      Some(page) => self.go_to_page(page).await.map(Some),
      None => Ok(None),
    }
  }

  /// Whether the list has rows to put in a table.
  pub fn has_table(&self) -> bool { !self.page.items.is_empty() }

  /// Records matching the fuzzy filter, in server order.
  pub fn rows(&self) -> Vec<&E> {
    if self.filter.is_empty() {
      return self.page.items.iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    self
      .page
      .items
      .iter()
      .filter(|record| {
        matcher
          .fuzzy_match(&row_cells(*record).join(" "), &self.filter)
          .is_some()
      })
      .collect()
  }

  fn row_id(&self, index: usize) -> Option<E::Id> {
    self.rows().get(index).and_then(|r| r.id().cloned())
  }

  pub fn cursor_down(&mut self) {
    if self.cursor + 1 < self.rows().len() {
      self.cursor += 1;
    }
  }

  pub fn cursor_up(&mut self) { self.cursor = self.cursor.saturating_sub(1); }

  pub fn table(&self) -> TableView {
    let mut columns = vec!["ID"];
    columns.extend(E::FIELDS.iter().map(|f| f.label));
    TableView {
      columns,
      rows: self.rows().into_iter().map(row_cells).collect(),
      total: self.page.items.len(),
    }
  }

  // ── Detail ────────────────────────────────────────────────────────────────

  pub async fn open_detail(&mut self, id: &str) -> Result<StatusCode> {
    let id = Self::parse_id(id)?;
    let resp = self.service.find(&id).await?;
    self.screen = Screen::Detail(resp.body);
    Ok(resp.status)
  }

  pub async fn open_detail_at(&mut self, index: usize) -> Result<Option<StatusCode>> {
    match self.row_id(index) {
      Some(id) => self.open_detail(&id.to_string()).await.map(Some),
      None => Ok(None),
    }
  }

  pub fn detail(&self) -> Option<Vec<(&'static str, String)>> {
    let Screen::Detail(record) = &self.screen else {
      return None;
    };
    let mut rows = vec![("ID", id_cell(record))];
    rows.extend(E::FIELDS.iter().map(|f| (f.label, record.cell(f.name))));
    Some(rows)
  }

  // ── Form ──────────────────────────────────────────────────────────────────

  pub fn open_new(&mut self) {
    self.screen = Screen::Form(FormState {
      editing: None,
      values:  E::default().to_form(),
      focus:   0,
    });
  }

  pub async fn open_edit(&mut self, id: &str) -> Result<StatusCode> {
    if !E::UPDATABLE {
      return Err(ClientError::NotUpdatable(E::NAME));
    }
    let id = Self::parse_id(id)?;
    let resp = self.service.find(&id).await?;
    self.screen = Screen::Form(FormState {
      editing: Some(id),
      values:  resp.body.to_form(),
      focus:   0,
    });
    Ok(resp.status)
  }

  pub async fn open_edit_at(&mut self, index: usize) -> Result<Option<StatusCode>> {
    match self.row_id(index) {
      Some(id) => self.open_edit(&id.to_string()).await.map(Some),
      None => Ok(None),
    }
  }

  fn form_mut(&mut self) -> Option<&mut FormState<E>> {
    match &mut self.screen {
      Screen::Form(form) => Some(form),
      _ => None,
    }
  }

  pub fn is_editing(&self) -> bool { matches!(self.screen, Screen::Form(_)) }

  /// Type into the field named `field`.
  pub fn set_field(&mut self, field: &str, value: &str) {
    if let Some(form) = self.form_mut() {
      form.values.set(field, value);
    }
  }

  /// Current input of `field` on the open form.
  pub fn field_value(&self, field: &str) -> Option<String> {
    match &self.screen {
      Screen::Form(form) => Some(form.values.get(field).to_string()),
      _ => None,
    }
  }

  pub fn type_char(&mut self, c: char) {
    if let Some(form) = self.form_mut() {
      let field = E::FIELDS[form.focus].name;
      form.values.push_char(field, c);
    }
  }

  pub fn backspace(&mut self) {
    if let Some(form) = self.form_mut() {
      let field = E::FIELDS[form.focus].name;
      form.values.pop_char(field);
    }
  }

  pub fn focus_next(&mut self) {
    if let Some(form) = self.form_mut() {
      form.focus = (form.focus + 1) % E::FIELDS.len();
    }
  }

  pub fn focus_prev(&mut self) {
    if let Some(form) = self.form_mut() {
      form.focus = (form.focus + E::FIELDS.len() - 1) % E::FIELDS.len();
    }
  }

  /// Validate and submit the form, then return to a refreshed list. Returns
  /// the status of the create/update call. On failure the form stays open.
  pub async fn save_form(&mut self) -> Result<Option<StatusCode>> {
    let Screen::Form(form) = &self.screen else {
      return Ok(None);
    };
    let record = E::from_form(form.editing.clone(), &form.values)?;
    let status = if form.editing.is_some() {
      self.service.update(&record).await?.status
    } else {
      self.service.create(&record).await?.status
    };
    self.load_list().await?;
    Ok(Some(status))
  }

  /// Leave the form or detail screen for a refreshed list.
  pub async fn back_to_list(&mut self) -> Result<StatusCode> { self.load_list().await }

  pub fn form_view(&self) -> Option<FormView> {
    let Screen::Form(form) = &self.screen else {
      return None;
    };
    let title = match &form.editing {
      Some(id) => format!("Edit {} {id}", E::NAME),
      None => format!("Create a new {}", E::NAME),
    };
    let fields = E::FIELDS
      .iter()
      .map(|f| FieldView {
        label:    f.label,
        value:    form.values.get(f.name).to_string(),
        kind:     f.kind,
        required: f.required,
      })
      .collect();
    Some(FormView { title, fields, focus: form.focus })
  }

  // ── Delete ────────────────────────────────────────────────────────────────

  /// Open the delete dialog for the row at `index` in the list, or for the
  /// record on the detail screen.
  pub fn request_delete(&mut self, index: usize) -> bool {
    let id = match &self.screen {
      Screen::Detail(record) => record.id().cloned(),
      _ => self.row_id(index),
    };
    match id {
      Some(id) => {
        self.dialog = Some(DeleteDialog::new(self.service.clone(), id));
        true
      }
      None => false,
    }
  }

  /// Confirm the open dialog. On success the dialog closes and the list is
  /// reloaded; on failure the dialog stays open.
  pub async fn confirm_delete(&mut self) -> Result<Option<DialogOutcome>> {
    let Some(dialog) = self.dialog.as_mut() else {
      return Ok(None);
    };
    let id = dialog.target().clone();
    let outcome = dialog.confirm_delete(&id).await?;
    self.dialog = None;
    self.load_list().await?;
    Ok(Some(outcome))
  }

  pub fn cancel_delete(&mut self) -> Option<DialogOutcome> {
    let outcome = self.dialog.as_mut().and_then(DeleteDialog::cancel);
    self.dialog = None;
    outcome
  }

  pub fn dialog_target(&self) -> Option<String> {
    self.dialog.as_ref().map(|d| d.target().to_string())
  }
}

fn id_cell<E: Entity>(record: &E) -> String {
  record.id().map(ToString::to_string).unwrap_or_default()
}

fn row_cells<E: Entity>(record: &E) -> Vec<String> {
  let form = record.to_form();
  let mut cells = vec![id_cell(record)];
  cells.extend(E::FIELDS.iter().map(|f| form.get(f.name).to_string()));
  cells
}

// ─── AnyFeature ──────────────────────────────────────────────────────────────

/// The feature module for whichever entity is currently routed to.
pub enum AnyFeature {
  Authority(Feature<Authority>),
  Region(Feature<Region>),
  Country(Feature<Country>),
  Location(Feature<Location>),
  Department(Feature<Department>),
  Task(Feature<Task>),
  Employee(Feature<Employee>),
  Job(Feature<Job>),
  JobHistory(Feature<JobHistory>),
}

/// Run `$body` against the inner `Feature<E>`, whatever `E` is.
macro_rules! dispatch {
  ($any:expr, $f:ident => $body:expr) => {
    match $any {
      AnyFeature::Authority($f) => $body,
      AnyFeature::Region($f) => $body,
      AnyFeature::Country($f) => $body,
      AnyFeature::Location($f) => $body,
      AnyFeature::Department($f) => $body,
      AnyFeature::Task($f) => $body,
      AnyFeature::Employee($f) => $body,
      AnyFeature::Job($f) => $body,
      AnyFeature::JobHistory($f) => $body,
    }
  };
}

impl AnyFeature {
  /// Build the feature module for a route path such as `"job-history"`.
  pub fn for_route(path: &str, client: &ApiClient, page_size: u32) -> Option<Self> {
    fn make<E: Entity>(client: &ApiClient, page_size: u32) -> Feature<E> {
      Feature::new(client.service(), page_size)
    }
    let feature = match path {
      p if p == Authority::ROUTE => Self::Authority(make(client, page_size)),
      p if p == Region::ROUTE => Self::Region(make(client, page_size)),
      p if p == Country::ROUTE => Self::Country(make(client, page_size)),
      p if p == Location::ROUTE => Self::Location(make(client, page_size)),
      p if p == Department::ROUTE => Self::Department(make(client, page_size)),
      p if p == Task::ROUTE => Self::Task(make(client, page_size)),
      p if p == Employee::ROUTE => Self::Employee(make(client, page_size)),
      p if p == Job::ROUTE => Self::Job(make(client, page_size)),
      p if p == JobHistory::ROUTE => Self::JobHistory(make(client, page_size)),
      _ => return None,
    };
    Some(feature)
  }

  pub fn route(&self) -> &'static str { dispatch!(self, f => f.route()) }

  pub fn heading(&self) -> &'static str { dispatch!(self, f => f.heading()) }

  pub fn url(&self) -> String { dispatch!(self, f => f.url()) }

  pub fn is_list(&self) -> bool { dispatch!(self, f => matches!(f.screen, Screen::List)) }

  pub fn is_detail(&self) -> bool { dispatch!(self, f => matches!(f.screen, Screen::Detail(_))) }

  pub fn is_editing(&self) -> bool { dispatch!(self, f => f.is_editing()) }

  pub fn has_table(&self) -> bool { dispatch!(self, f => f.has_table()) }

  pub fn row_count(&self) -> usize { dispatch!(self, f => f.rows().len()) }

  pub fn cursor(&self) -> usize { dispatch!(self, f => f.cursor) }

  pub fn cursor_down(&mut self) { dispatch!(self, f => f.cursor_down()) }

  pub fn cursor_up(&mut self) { dispatch!(self, f => f.cursor_up()) }

  pub fn table(&self) -> TableView { dispatch!(self, f => f.table()) }

  pub fn detail(&self) -> Option<Vec<(&'static str, String)>> { dispatch!(self, f => f.detail()) }

  pub fn form_view(&self) -> Option<FormView> { dispatch!(self, f => f.form_view()) }

  pub fn dialog_target(&self) -> Option<String> { dispatch!(self, f => f.dialog_target()) }

  pub fn filter(&self) -> (&str, bool) {
    dispatch!(self, f => (f.filter.as_str(), f.filter_active))
  }

  pub fn set_filter_active(&mut self, active: bool) {
    dispatch!(self, f => {
      f.filter_active = active;
      f.cursor = 0;
    })
  }

  pub fn edit_filter(&mut self, c: Option<char>) {
    dispatch!(self, f => {
      match c {
        Some(c) => f.filter.push(c),
        None => { f.filter.pop(); }
      }
      f.cursor = 0;
    })
  }

  pub fn clear_filter(&mut self) {
    dispatch!(self, f => {
      f.filter.clear();
      f.filter_active = false;
      f.cursor = 0;
    })
  }

  pub fn total_count(&self) -> Option<u64> { dispatch!(self, f => f.page.total_count) }

  pub fn page_number(&self) -> u32 { dispatch!(self, f => f.request.page) }

  pub async fn load_list(&mut self) -> Result<StatusCode> { dispatch!(self, f => f.load_list().await) }

  pub async fn go_to_page(&mut self, page: u32) -> Result<StatusCode> {
    dispatch!(self, f => f.go_to_page(page).await)
  }

  pub async fn next_page(&mut self) -> Result<Option<StatusCode>> { dispatch!(self, f => f.next_page().await) }

  pub async fn prev_page(&mut self) -> Result<Option<StatusCode>> { dispatch!(self, f => f.prev_page().await) }

  pub async fn open_detail(&mut self, id: &str) -> Result<StatusCode> {
    dispatch!(self, f => f.open_detail(id).await)
  }

  pub async fn open_detail_at(&mut self, index: usize) -> Result<Option<StatusCode>> {
    dispatch!(self, f => f.open_detail_at(index).await)
  }

  pub fn open_new(&mut self) { dispatch!(self, f => f.open_new()) }

  pub async fn open_edit(&mut self, id: &str) -> Result<StatusCode> {
    dispatch!(self, f => f.open_edit(id).await)
  }

  pub async fn open_edit_at(&mut self, index: usize) -> Result<Option<StatusCode>> {
    dispatch!(self, f => f.open_edit_at(index).await)
  }

  /// The id of the record on the detail screen, if any.
  pub fn detail_id(&self) -> Option<String> {
    dispatch!(self, f => match &f.screen {
      Screen::Detail(record) => record.id().map(ToString::to_string),
      _ => None,
    })
  }

  pub fn set_field(&mut self, field: &str, value: &str) { dispatch!(self, f => f.set_field(field, value)) }

  pub fn field_value(&self, field: &str) -> Option<String> { dispatch!(self, f => f.field_value(field)) }

  pub fn type_char(&mut self, c: char) { dispatch!(self, f => f.type_char(c)) }

  pub fn backspace(&mut self) { dispatch!(self, f => f.backspace()) }

  pub fn focus_next(&mut self) { dispatch!(self, f => f.focus_next()) }

  pub fn focus_prev(&mut self) { dispatch!(self, f => f.focus_prev()) }

  pub async fn save_form(&mut self) -> Result<Option<StatusCode>> { dispatch!(self, f => f.save_form().await) }

  pub async fn back_to_list(&mut self) -> Result<StatusCode> { dispatch!(self, f => f.back_to_list().await) }

  pub fn request_delete(&mut self, index: usize) -> bool { dispatch!(self, f => f.request_delete(index)) }

  pub async fn confirm_delete(&mut self) -> Result<Option<DialogOutcome>> {
    dispatch!(self, f => f.confirm_delete().await)
  }

  pub fn cancel_delete(&mut self) -> Option<DialogOutcome> { dispatch!(self, f => f.cancel_delete()) }
}

impl<E: Entity> Feature<E> {
  pub fn route(&self) -> &'static str { E::ROUTE }

  pub fn heading(&self) -> &'static str { E::NAME }
}
