use serde::{Deserialize, Serialize};

use crate::{
  Entity, Result,
  form::{FieldKind, FieldSpec, FormValues},
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Region {
  pub id:          Option<i64>,
  pub region_name: Option<String>,
}

impl Entity for Region {
  type Id = i64;

  const NAME: &'static str = "Region";
  const RESOURCE: &'static str = "regions";
  const ROUTE: &'static str = "region";
  const FIELDS: &'static [FieldSpec] =
    &[FieldSpec::new("regionName", "Region Name", FieldKind::Text)];

  fn id(&self) -> Option<&i64> { self.id.as_ref() }

  fn to_form(&self) -> FormValues {
    let mut form = FormValues::new();
    form.put_text("regionName", self.region_name.as_ref());
    form
  }

  fn from_form(id: Option<i64>, form: &FormValues) -> Result<Self> {
    form.validate(Self::FIELDS)?;
    Ok(Self { id, region_name: form.text("regionName") })
  }
}
