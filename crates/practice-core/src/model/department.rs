use serde::{Deserialize, Serialize};

use crate::{
  Entity, Ref, Result,
  form::{FieldKind, FieldSpec, FormValues},
};

/// A department. `departmentName` is the only required field across the
/// whole model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Department {
  pub id:              Option<i64>,
  pub department_name: String,
  pub location:        Option<Ref>,
}

impl Entity for Department {
  type Id = i64;

  const NAME: &'static str = "Department";
  const RESOURCE: &'static str = "departments";
  const ROUTE: &'static str = "department";
  const FIELDS: &'static [FieldSpec] = &[
    FieldSpec::new("departmentName", "Department Name", FieldKind::Text).required(),
    FieldSpec::new("location", "Location", FieldKind::Ref),
  ];

  fn id(&self) -> Option<&i64> { self.id.as_ref() }

  fn to_form(&self) -> FormValues {
    let mut form = FormValues::new();
    form.set("departmentName", self.department_name.clone());
    form.put_ref("location", self.location);
    form
  }

  fn from_form(id: Option<i64>, form: &FormValues) -> Result<Self> {
    form.validate(Self::FIELDS)?;
    Ok(Self {
      id,
      department_name: form.text("departmentName").unwrap_or_default(),
      location: form.reference("location")?,
    })
  }
}
