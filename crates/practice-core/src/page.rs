//! Paging parameters for list requests and the `link` response header.

use std::collections::BTreeMap;

use crate::{Error, Result};

pub const DEFAULT_PAGE_SIZE: u32 = 20;

// ─── Request ─────────────────────────────────────────────────────────────────

/// Query parameters for a list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
  /// Zero-based page index.
  pub page: u32,
  pub size: u32,
  /// Sort clauses such as `"id,asc"`, each sent as its own `sort` parameter.
  pub sort: Vec<String>,
}

impl Default for PageRequest {
  fn default() -> Self {
    Self {
      page: 0,
      size: DEFAULT_PAGE_SIZE,
      sort: vec!["id,asc".to_string()],
    }
  }
}

impl PageRequest {
  pub fn with_page(&self, page: u32) -> Self {
    Self { page, ..self.clone() }
  }

  pub fn to_query(&self) -> Vec<(&'static str, String)> {
    let mut query = vec![
      ("page", self.page.to_string()),
      ("size", self.size.to_string()),
    ];
    query.extend(self.sort.iter().map(|s| ("sort", s.clone())));
    query
  }
}

// ─── Link header ─────────────────────────────────────────────────────────────

/// Page numbers keyed by relation (`first`, `last`, `next`, `prev`), parsed
/// from a header such as
/// `<http://localhost/api/employees?page=0&size=20>; rel="last",<…>; rel="first"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links {
  pages: BTreeMap<String, u32>,
}

impl Links {
  /// Parse a `link` header. Empty input yields no links; a section that is
  /// not `<url>; rel="name"` is an error. Sections whose URL carries no
  /// `page` parameter are skipped.
  pub fn parse(header: &str) -> Result<Self> {
    let mut pages = BTreeMap::new();
    if header.trim().is_empty() {
      return Ok(Self { pages });
    }

    for section in header.split(',') {
      let (url_part, rel_part) = section
        .split_once(';')
        .ok_or_else(|| Error::InvalidLinkHeader(section.to_string()))?;

      let url = url_part
        .trim()
        .strip_prefix('<')
        .and_then(|s| s.strip_suffix('>'))
        .ok_or_else(|| Error::InvalidLinkHeader(section.to_string()))?;

      let rel = rel_part
        .trim()
        .strip_prefix("rel=")
        .map(|s| s.trim_matches('"'))
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::InvalidLinkHeader(section.to_string()))?;

      if let Some(page) = page_param(url) {
        pages.insert(rel.to_string(), page);
      }
    }

    Ok(Self { pages })
  }

  pub fn get(&self, rel: &str) -> Option<u32> { self.pages.get(rel).copied() }

  pub fn first(&self) -> Option<u32> { self.get("first") }

  pub fn last(&self) -> Option<u32> { self.get("last") }

  pub fn next(&self) -> Option<u32> { self.get("next") }

  pub fn prev(&self) -> Option<u32> { self.get("prev") }

  pub fn is_empty(&self) -> bool { self.pages.is_empty() }
}

fn page_param(url: &str) -> Option<u32> {
  let (_, query) = url.split_once('?')?;
  query
    .split('&')
    .filter_map(|pair| pair.split_once('='))
    .find(|(k, _)| *k == "page")
    .and_then(|(_, v)| v.parse().ok())
}

// ─── Response ────────────────────────────────────────────────────────────────

/// One page of a list response.
#[derive(Debug, Clone, Default)]
pub struct Page<T> {
  pub items:       Vec<T>,
  pub links:       Links,
  /// From the `X-Total-Count` header, when the server sends it.
  pub total_count: Option<u64>,
}

impl<T> Page<T> {
  pub fn is_empty(&self) -> bool { self.items.is_empty() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_first_and_last() {
    let header = r#"<http://localhost/api/employees?page=0&size=20>; rel="last",<http://localhost/api/employees?page=0&size=20>; rel="first""#;
    let links = Links::parse(header).unwrap();
    assert_eq!(links.first(), Some(0));
    assert_eq!(links.last(), Some(0));
    assert_eq!(links.next(), None);
  }

  #[test]
  fn parses_next_and_prev_in_any_order() {
    let header = concat!(
      r#"<http://h/api/jobs?size=5&page=2>; rel="next", "#,
      r#"<http://h/api/jobs?size=5&page=0>; rel="prev", "#,
      r#"<http://h/api/jobs?size=5&page=7>; rel="last""#,
    );
    let links = Links::parse(header).unwrap();
    assert_eq!(links.next(), Some(2));
    assert_eq!(links.prev(), Some(0));
    assert_eq!(links.last(), Some(7));
  }

  #[test]
  fn empty_header_has_no_links() {
    assert!(Links::parse("").unwrap().is_empty());
  }

  #[test]
  fn section_without_rel_is_rejected() {
    let err = Links::parse("<http://h/api/jobs?page=1>").unwrap_err();
    assert!(matches!(err, Error::InvalidLinkHeader(_)));
  }

  #[test]
  fn query_repeats_sort() {
    let req = PageRequest {
      page: 3,
      size: 10,
      sort: vec!["lastName,desc".into(), "id".into()],
    };
    assert_eq!(
      req.to_query(),
      vec![
        ("page", "3".to_string()),
        ("size", "10".to_string()),
        ("sort", "lastName,desc".to_string()),
        ("sort", "id".to_string()),
      ]
    );
  }
}
