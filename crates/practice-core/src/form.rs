//! Form field descriptors and the string-typed input map behind every
//! create/edit screen.
//!
//! Inputs are kept as strings exactly as typed; conversion into typed record
//! fields happens once, on save, through the getters below.

use std::{collections::BTreeMap, str::FromStr};

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::{Error, Ref, Result, model::Language};

/// Input format for date-time fields, e.g. `2025-06-02T22:20`. Interpreted as
/// UTC.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

// ─── Descriptors ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
  Text,
  Integer,
  DateTime,
  Language,
  /// A single related record id.
  Ref,
  /// Comma-separated related record ids.
  RefList,
}

/// One input on an entity form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
  /// JSON / form key, e.g. `"firstName"`.
  pub name:     &'static str,
  pub label:    &'static str,
  pub kind:     FieldKind,
  pub required: bool,
}

impl FieldSpec {
  pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
    Self { name, label, kind, required: false }
  }

  pub const fn required(mut self) -> Self {
    self.required = true;
    self
  }
}

// ─── Values ──────────────────────────────────────────────────────────────────

/// Raw form inputs keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
  values: BTreeMap<String, String>,
}

impl FormValues {
  pub fn new() -> Self { Self::default() }

  /// The current input for `field`, or `""`.
  pub fn get(&self, field: &str) -> &str {
    self.values.get(field).map(String::as_str).unwrap_or_default()
  }

  pub fn set(&mut self, field: &str, value: impl Into<String>) {
    self.values.insert(field.to_string(), value.into());
  }

  pub fn push_char(&mut self, field: &str, c: char) {
    self.values.entry(field.to_string()).or_default().push(c);
  }

  pub fn pop_char(&mut self, field: &str) {
    if let Some(v) = self.values.get_mut(field) {
      v.pop();
    }
  }

  /// Check every required field in `fields` has a non-blank input.
  pub fn validate(&self, fields: &[FieldSpec]) -> Result<()> {
    for spec in fields {
      if spec.required && self.get(spec.name).trim().is_empty() {
        return Err(Error::MissingField(spec.name));
      }
    }
    Ok(())
  }

  // ── Writers ───────────────────────────────────────────────────────────────

  pub fn put_text(&mut self, field: &str, value: Option<&String>) {
    self.set(field, value.cloned().unwrap_or_default());
  }

  pub fn put_integer(&mut self, field: &str, value: Option<i64>) {
    self.set(field, value.map(|v| v.to_string()).unwrap_or_default());
  }

  pub fn put_date_time(&mut self, field: &str, value: Option<DateTime<Utc>>) {
    self.set(
      field,
      value
        .map(|v| v.format(DATE_TIME_FORMAT).to_string())
        .unwrap_or_default(),
    );
  }

  pub fn put_language(&mut self, field: &str, value: Option<Language>) {
    self.set(field, value.map(|l| l.to_string()).unwrap_or_default());
  }

  pub fn put_ref(&mut self, field: &str, value: Option<Ref>) {
    self.set(field, value.map(|r| r.id.to_string()).unwrap_or_default());
  }

  pub fn put_refs(&mut self, field: &str, value: &[Ref]) {
    let joined: Vec<String> = value.iter().map(|r| r.id.to_string()).collect();
    self.set(field, joined.join(", "));
  }

  // ── Typed getters ─────────────────────────────────────────────────────────

  fn trimmed(&self, field: &str) -> Option<&str> {
    let v = self.get(field).trim();
    (!v.is_empty()).then_some(v)
  }

  pub fn text(&self, field: &str) -> Option<String> {
    self.trimmed(field).map(str::to_string)
  }

  pub fn integer(&self, field: &'static str) -> Result<Option<i64>> {
    self
      .trimmed(field)
      .map(|v| parse(field, v, "an integer"))
      .transpose()
  }

  pub fn date_time(&self, field: &'static str) -> Result<Option<DateTime<Utc>>> {
    self
      .trimmed(field)
      .map(|v| {
        NaiveDateTime::parse_from_str(v, DATE_TIME_FORMAT)
          .map(|dt| dt.and_utc())
          .map_err(|_| invalid(field, v, "a date-time like 2025-06-02T22:20"))
      })
      .transpose()
  }

  pub fn language(&self, field: &'static str) -> Result<Option<Language>> {
    self
      .trimmed(field)
      .map(|v| parse(field, v, "FRENCH, ENGLISH or SPANISH"))
      .transpose()
  }

  pub fn reference(&self, field: &'static str) -> Result<Option<Ref>> {
    Ok(self.integer(field)?.map(Ref::new))
  }

  pub fn references(&self, field: &'static str) -> Result<Vec<Ref>> {
    self
      .get(field)
      .split(',')
      .map(str::trim)
      .filter(|s| !s.is_empty())
      .map(|s| parse(field, s, "comma-separated ids").map(Ref::new))
      .collect()
  }
}

fn parse<T: FromStr>(field: &'static str, value: &str, expected: &'static str) -> Result<T> {
  value.parse().map_err(|_| invalid(field, value, expected))
}

fn invalid(field: &'static str, value: &str, expected: &'static str) -> Error {
  Error::InvalidField { field, value: value.to_string(), expected }
}
