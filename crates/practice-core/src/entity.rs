//! The `Entity` trait shared by every record type.
//!
//! A record is a flat struct whose identifier is absent while it is a
//! client-side draft and present once the server has persisted it. The
//! server is the source of truth; a record held by the client is a transient
//! display copy.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
  Result,
  form::{FieldSpec, FormValues},
};

// ─── Relation reference ──────────────────────────────────────────────────────

/// An id-only pointer to a related record, serialised as `{"id": n}`.
///
/// Relations are never carried as owned nested graphs; the referenced record
/// is fetched through its own service when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ref {
  pub id: i64,
}

impl Ref {
  pub fn new(id: i64) -> Self { Self { id } }
}

impl fmt::Display for Ref {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.id)
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// A persisted business record type.
pub trait Entity:
  Clone + fmt::Debug + Default + Serialize + DeserializeOwned + Send + Sync + 'static
{
  /// Identifier type. Parsed from route segments such as `/employee/12/view`.
  type Id: Clone
    + fmt::Debug
    + fmt::Display
    + PartialEq
    + FromStr
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static;

  /// Display name, e.g. `"Job History"`.
  const NAME: &'static str;

  /// Plural REST resource, e.g. `"job-histories"` for `/api/job-histories`.
  const RESOURCE: &'static str;

  /// Client route segment, e.g. `"job-history"`.
  const ROUTE: &'static str;

  /// Form fields in display order. Also used as the list columns.
  const FIELDS: &'static [FieldSpec];

  /// Whether the server assigns the identifier on create.
  const SERVER_ASSIGNS_ID: bool = true;

  /// Whether the API exposes `PUT`/`PATCH` for this record type.
  const UPDATABLE: bool = true;

  fn id(&self) -> Option<&Self::Id>;

  /// Render this record into form inputs.
  fn to_form(&self) -> FormValues;

  /// Build a record from form inputs, keeping `id` for edits.
  ///
  /// Fails with [`crate::Error::MissingField`] or
  /// [`crate::Error::InvalidField`].
  fn from_form(id: Option<Self::Id>, form: &FormValues) -> Result<Self>;

  /// `true` when the record has not been persisted yet.
  fn is_new(&self) -> bool { self.id().is_none() }

  /// Record identity: both identifiers present and equal.
  fn same_record(&self, other: &Self) -> bool {
    matches!((self.id(), other.id()), (Some(a), Some(b)) if a == b)
  }

  /// Text for one list cell; `field` is a name from [`Entity::FIELDS`].
  fn cell(&self, field: &str) -> String {
    self.to_form().get(field).to_string()
  }
}

/// Implements `PartialEq` as record identity for the given entity types.
///
/// Drafts never compare equal, even to themselves.
macro_rules! record_identity {
  ($($ty:ty),+ $(,)?) => {
    $(
      impl PartialEq for $ty {
        fn eq(&self, other: &Self) -> bool {
          $crate::entity::Entity::same_record(self, other)
        }
      }
    )+
  };
}

pub(crate) use record_identity;
