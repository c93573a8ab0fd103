use serde::{Deserialize, Serialize};

use crate::{
  Entity, Result,
  form::{FieldKind, FieldSpec, FormValues},
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Task {
  pub id:          Option<i64>,
  pub title:       Option<String>,
  pub description: Option<String>,
}

impl Entity for Task {
  type Id = i64;

  const NAME: &'static str = "Task";
  const RESOURCE: &'static str = "tasks";
  const ROUTE: &'static str = "task";
  const FIELDS: &'static [FieldSpec] = &[
    FieldSpec::new("title", "Title", FieldKind::Text),
    FieldSpec::new("description", "Description", FieldKind::Text),
  ];

  fn id(&self) -> Option<&i64> { self.id.as_ref() }

  fn to_form(&self) -> FormValues {
    let mut form = FormValues::new();
    form.put_text("title", self.title.as_ref());
    form.put_text("description", self.description.as_ref());
    form
  }

  fn from_form(id: Option<i64>, form: &FormValues) -> Result<Self> {
    form.validate(Self::FIELDS)?;
    Ok(Self {
      id,
      title: form.text("title"),
      description: form.text("description"),
    })
  }
}
