use serde::{Deserialize, Serialize};

use crate::{
  Entity, Error, Result,
  form::{FieldKind, FieldSpec, FormValues},
};

/// A security role, e.g. `ROLE_ADMIN`. The name is the identifier and is
/// chosen by the client; authorities cannot be updated, only created and
/// deleted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Authority {
  pub name: Option<String>,
}

impl Entity for Authority {
  type Id = String;

  const NAME: &'static str = "Authority";
  const RESOURCE: &'static str = "authorities";
  const ROUTE: &'static str = "authority";
  const FIELDS: &'static [FieldSpec] =
    &[FieldSpec::new("name", "Name", FieldKind::Text).required()];
  const SERVER_ASSIGNS_ID: bool = false;
  const UPDATABLE: bool = false;

  fn id(&self) -> Option<&String> { self.name.as_ref() }

  fn to_form(&self) -> FormValues {
    let mut form = FormValues::new();
    form.put_text("name", self.name.as_ref());
    form
  }

  fn from_form(id: Option<String>, form: &FormValues) -> Result<Self> {
    form.validate(Self::FIELDS)?;
    let name = form.text("name").ok_or(Error::MissingField("name"))?;
    if name.len() > 50 {
      return Err(Error::InvalidField {
        field:    "name",
        value:    name,
        expected: "at most 50 characters",
      });
    }
    // An existing authority keeps its name.
    Ok(Self { name: id.or(Some(name)) })
  }
}
