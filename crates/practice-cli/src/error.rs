//! Error type for the HTTP client, services, and dialogs.

use reqwest::{Method, StatusCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
  #[error("request failed: {0}")]
  Transport(#[source] reqwest::Error),

  #[error("{method} {url} returned {status}: {message}")]
  Status {
    method:  Method,
    url:     String,
    status:  StatusCode,
    /// Response body, usually the server's error detail. May be empty.
    message: String,
  },

  #[error("could not decode response: {0}")]
  Decode(#[source] reqwest::Error),

  #[error("authentication rejected ({0})")]
  Authentication(StatusCode),

  #[error("invalid API url {url:?}: {reason}")]
  InvalidUrl { url: String, reason: String },

  #[error("{0} has no identifier")]
  MissingId(&'static str),

  #[error("a new {0} cannot already have an identifier")]
  AlreadyPersisted(&'static str),

  #[error("{0} records cannot be updated")]
  NotUpdatable(&'static str),

  #[error("the delete dialog is already closed")]
  DialogClosed,

  #[error(transparent)]
  Invalid(#[from] practice_core::Error),
}

impl ClientError {
  /// The HTTP status, when the server answered with one.
  pub fn status(&self) -> Option<StatusCode> {
    match self {
      Self::Status { status, .. } | Self::Authentication(status) => Some(*status),
      _ => None,
    }
  }
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
