//! The entity route table.
//!
//! [`ENTITY_ROUTES`] is the ordered registry of top-level entity paths. Each
//! entry carries a page-title key and a deferred loader for its own child
//! routes; a [`Router`] only runs a loader the first time its path is
//! navigated to. Registering a new entity is appending one [`RouteDef`].

use std::sync::OnceLock;

use crate::{Error, Result};

// ─── Definitions ─────────────────────────────────────────────────────────────

/// What a child route shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildKind {
  List,
  New,
  View,
  Edit,
}

/// One child route. `pattern` segments starting with `:` capture a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildRoute {
  pub pattern: &'static str,
  pub kind:    ChildKind,
}

/// A top-level entity route.
#[derive(Debug)]
pub struct RouteDef {
  pub path:          &'static str,
  /// Display/i18n key, e.g. `practiceApp.employee.home.title`.
  pub page_title:    &'static str,
  pub load_children: fn() -> Vec<ChildRoute>,
}

fn crud_children() -> Vec<ChildRoute> {
  vec![
    ChildRoute { pattern: "", kind: ChildKind::List },
    ChildRoute { pattern: ":id/view", kind: ChildKind::View },
    ChildRoute { pattern: "new", kind: ChildKind::New },
    ChildRoute { pattern: ":id/edit", kind: ChildKind::Edit },
  ]
}

/// Authorities are create/delete only.
fn authority_children() -> Vec<ChildRoute> {
  vec![
    ChildRoute { pattern: "", kind: ChildKind::List },
    ChildRoute { pattern: ":id/view", kind: ChildKind::View },
    ChildRoute { pattern: "new", kind: ChildKind::New },
  ]
}

pub static ENTITY_ROUTES: &[RouteDef] = &[
  RouteDef {
    path:          "authority",
    page_title:    "practiceApp.adminAuthority.home.title",
    load_children: authority_children,
  },
  RouteDef {
    path:          "region",
    page_title:    "practiceApp.region.home.title",
    load_children: crud_children,
  },
  RouteDef {
    path:          "country",
    page_title:    "practiceApp.country.home.title",
    load_children: crud_children,
  },
  RouteDef {
    path:          "location",
    page_title:    "practiceApp.location.home.title",
    load_children: crud_children,
  },
  RouteDef {
    path:          "department",
    page_title:    "practiceApp.department.home.title",
    load_children: crud_children,
  },
  RouteDef {
    path:          "task",
    page_title:    "practiceApp.task.home.title",
    load_children: crud_children,
  },
  RouteDef {
    path:          "employee",
    page_title:    "practiceApp.employee.home.title",
    load_children: crud_children,
  },
  RouteDef {
    path:          "job",
    page_title:    "practiceApp.job.home.title",
    load_children: crud_children,
  },
  RouteDef {
    path:          "job-history",
    page_title:    "practiceApp.jobHistory.home.title",
    load_children: crud_children,
  },
];

// ─── Resolution ──────────────────────────────────────────────────────────────

/// A route action with its captured identifier, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
  List,
  New,
  View(String),
  Edit(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
  pub route:  &'static RouteDef,
  pub action: Action,
  /// Raw query string without the leading `?`.
  pub query:  Option<String>,
}

impl PartialEq for RouteDef {
  fn eq(&self, other: &Self) -> bool { self.path == other.path }
}

impl Eq for RouteDef {}

/// Resolves URLs against a route table, loading child tables lazily.
pub struct Router {
  routes:   &'static [RouteDef],
  children: Vec<OnceLock<Vec<ChildRoute>>>,
}

impl Default for Router {
  fn default() -> Self { Self::new(ENTITY_ROUTES) }
}

impl Router {
  pub fn new(routes: &'static [RouteDef]) -> Self {
    Self {
      routes,
      children: routes.iter().map(|_| OnceLock::new()).collect(),
    }
  }

  pub fn routes(&self) -> &'static [RouteDef] { self.routes }

  /// Whether the child table for `path` has been loaded.
  pub fn is_loaded(&self, path: &str) -> bool {
    self
      .routes
      .iter()
      .position(|r| r.path == path)
      .is_some_and(|i| self.children[i].get().is_some())
  }

  /// Map `url` (e.g. `/employee/12/edit?x=1`) to a route and action.
  pub fn resolve(&self, url: &str) -> Result<Resolved> {
    let (path, query) = match url.split_once('?') {
      Some((p, q)) => (p, Some(q.to_string())),
      None => (url, None),
    };
    let segments: Vec<&str> =
      path.split('/').filter(|s| !s.is_empty()).collect();

    let unknown = || Error::UnknownRoute(url.to_string());
    let (head, rest) = segments.split_first().ok_or_else(unknown)?;
    let index = self
      .routes
      .iter()
      .position(|r| r.path == *head)
      .ok_or_else(unknown)?;
    let route = &self.routes[index];
    let children = self.children[index].get_or_init(route.load_children);

    for child in children {
      if let Some(captured) = match_pattern(child.pattern, rest) {
        let action = match child.kind {
          ChildKind::List => Action::List,
          ChildKind::New => Action::New,
          ChildKind::View => Action::View(captured.unwrap_or_default()),
          ChildKind::Edit => Action::Edit(captured.unwrap_or_default()),
        };
        return Ok(Resolved { route, action, query });
      }
    }
    Err(unknown())
  }
}

/// Match `segments` against `pattern`. Returns the `:id` capture on success.
fn match_pattern(pattern: &str, segments: &[&str]) -> Option<Option<String>> {
  let parts: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
  if parts.len() != segments.len() {
    return None;
  }
  let mut captured = None;
  for (part, seg) in parts.iter().zip(segments) {
    if part.starts_with(':') {
      captured = Some(urlencoding::decode(seg).ok()?.into_owned());
    } else if part != seg {
      return None;
    }
  }
  Some(captured)
}

/// Build the URL for `action` under `path`. Identifiers are percent-encoded
/// so [`Router::resolve`] gets the same id back.
pub fn url_for(path: &str, action: &Action) -> String {
  match action {
    Action::List => format!("/{path}"),
    Action::New => format!("/{path}/new"),
    Action::View(id) => format!("/{path}/{}/view", urlencoding::encode(id)),
    Action::Edit(id) => format!("/{path}/{}/edit", urlencoding::encode(id)),
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::*;

  #[test]
  fn paths_are_unique() {
    let paths: HashSet<_> = ENTITY_ROUTES.iter().map(|r| r.path).collect();
    assert_eq!(paths.len(), ENTITY_ROUTES.len());
  }

  #[test]
  fn order_matches_registration() {
    let paths: Vec<_> = ENTITY_ROUTES.iter().map(|r| r.path).collect();
    assert_eq!(
      paths,
      [
        "authority", "region", "country", "location", "department", "task",
        "employee", "job", "job-history",
      ]
    );
  }

  #[test]
  fn resolves_every_crud_action() {
    let router = Router::default();
    assert_eq!(router.resolve("/employee").unwrap().action, Action::List);
    assert_eq!(router.resolve("/employee/new").unwrap().action, Action::New);
    assert_eq!(
      router.resolve("/employee/12/view").unwrap().action,
      Action::View("12".into())
    );
    assert_eq!(
      router.resolve("/job-history/7/edit").unwrap().action,
      Action::Edit("7".into())
    );
  }

  #[test]
  fn query_is_kept_apart_from_the_path() {
    let router = Router::default();
    let resolved = router.resolve("/employee?page=1&size=20").unwrap();
    assert_eq!(resolved.route.path, "employee");
    assert_eq!(resolved.action, Action::List);
    assert_eq!(resolved.query.as_deref(), Some("page=1&size=20"));
  }

  #[test]
  fn children_load_only_on_navigation() {
    let router = Router::default();
    assert!(!router.is_loaded("task"));
    router.resolve("/employee").unwrap();
    assert!(router.is_loaded("employee"));
    assert!(!router.is_loaded("task"));
  }

  #[test]
  fn unknown_paths_fail() {
    let router = Router::default();
    assert!(matches!(router.resolve("/payroll"), Err(Error::UnknownRoute(_))));
    assert!(router.resolve("/").is_err());
    assert!(router.resolve("/employee/12/archive").is_err());
  }

  #[test]
  fn authority_has_no_edit_route() {
    let router = Router::default();
    assert!(router.resolve("/authority/ROLE_USER/edit").is_err());
    assert_eq!(
      router.resolve("/authority/ROLE_USER/view").unwrap().action,
      Action::View("ROLE_USER".into())
    );
  }

  #[test]
  fn title_keys_follow_the_entity() {
    let job_history = ENTITY_ROUTES.iter().find(|r| r.path == "job-history").unwrap();
    assert_eq!(job_history.page_title, "practiceApp.jobHistory.home.title");
  }

  #[test]
  fn url_for_inverts_resolve() {
    let router = Router::default();
    for action in [Action::List, Action::New, Action::View("3".into()), Action::Edit("3".into())] {
      let url = url_for("region", &action);
      assert_eq!(router.resolve(&url).unwrap().action, action);
    }
  }

  #[test]
  fn reserved_characters_round_trip_through_the_url() {
    let router = Router::default();
    let action = Action::View("ROLE_A?x/y#z".into());
    let url = url_for("authority", &action);
    assert_eq!(url, "/authority/ROLE_A%3Fx%2Fy%23z/view");

    let resolved = router.resolve(&url).unwrap();
    assert_eq!(resolved.action, action);
    assert_eq!(resolved.query, None);
  }
}
