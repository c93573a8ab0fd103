//! Error types for `practice-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("field {0:?} is required")]
  MissingField(&'static str),

  #[error("field {field:?} has an invalid value {value:?}: expected {expected}")]
  InvalidField {
    field:    &'static str,
    value:    String,
    expected: &'static str,
  },

  #[error("unknown language: {0:?}")]
  UnknownLanguage(String),

  #[error("malformed link header section: {0:?}")]
  InvalidLinkHeader(String),

  #[error("no route matches {0:?}")]
  UnknownRoute(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
