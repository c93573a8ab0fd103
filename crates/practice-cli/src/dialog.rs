//! Delete-confirmation dialog.
//!
//! A dialog gates one delete behind explicit confirmation. It owns the
//! service it deletes through (usually a cheap clone of an
//! [`EntityService`](crate::service::EntityService), or a borrow in tests)
//! and resolves exactly once: either deleted or dismissed.
//!
//! ```text
//! Idle ──confirm──▶ Deleting ──ok──▶ ClosedDeleted
//!  │  ▲                 │
//!  │  └──────err────────┘
//!  └──cancel──▶ ClosedCancelled
//! ```

use tracing::{info, warn};

use crate::{
  error::{ClientError, Result},
  service::DeleteService,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
  /// Open, waiting for the user.
  Idle,
  /// The delete call is in flight.
  Deleting,
  ClosedDeleted,
  ClosedCancelled,
}

impl DialogState {
  pub fn is_open(self) -> bool {
    matches!(self, Self::Idle | Self::Deleting)
  }
}

/// How a dialog closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
  Deleted,
  Dismissed,
}

impl DialogOutcome {
  /// The close payload: `Some("deleted")` after a delete, nothing on dismiss.
  pub fn result(self) -> Option<&'static str> {
    match self {
      Self::Deleted => Some("deleted"),
      Self::Dismissed => None,
    }
  }
}

pub struct DeleteDialog<S, Id> {
  service: S,
  target:  Id,
  state:   DialogState,
}

impl<S, Id> DeleteDialog<S, Id>
where
  S: DeleteService<Id>,
  Id: std::fmt::Display,
{
  /// Open a dialog asking to delete the record identified by `target`.
  pub fn new(service: S, target: Id) -> Self {
    Self { service, target, state: DialogState::Idle }
  }

  pub fn state(&self) -> DialogState { self.state }

  /// The record this dialog was opened for.
  pub fn target(&self) -> &Id { &self.target }

  /// Delete `id` and close with [`DialogOutcome::Deleted`].
  ///
  /// Only an open, idle dialog issues the call. On failure the dialog stays
  /// open so the user can retry or cancel; nothing is retried automatically.
  pub async fn confirm_delete(&mut self, id: &Id) -> Result<DialogOutcome> {
    if self.state != DialogState::Idle {
      return Err(ClientError::DialogClosed);
    }
    self.state = DialogState::Deleting;
    match self.service.delete(id).await {
      Ok(_) => {
        self.state = DialogState::ClosedDeleted;
        info!(%id, "delete confirmed");
        Ok(DialogOutcome::Deleted)
      }
      Err(e) => {
        self.state = DialogState::Idle;
        warn!(%id, error = %e, "delete failed; dialog left open");
        Err(e)
      }
    }
  }

  /// Dismiss without deleting. Returns `None` if already closed.
  pub fn cancel(&mut self) -> Option<DialogOutcome> {
    if self.state != DialogState::Idle {
      return None;
    }
    self.state = DialogState::ClosedCancelled;
    Some(DialogOutcome::Dismissed)
  }
}
