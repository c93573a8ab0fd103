use serde::{Deserialize, Serialize};

use crate::{
  Entity, Ref, Result,
  form::{FieldKind, FieldSpec, FormValues},
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Country {
  pub id:           Option<i64>,
  pub country_name: Option<String>,
  pub region:       Option<Ref>,
}

impl Entity for Country {
  type Id = i64;

  const NAME: &'static str = "Country";
  const RESOURCE: &'static str = "countries";
  const ROUTE: &'static str = "country";
  const FIELDS: &'static [FieldSpec] = &[
    FieldSpec::new("countryName", "Country Name", FieldKind::Text),
    FieldSpec::new("region", "Region", FieldKind::Ref),
  ];

  fn id(&self) -> Option<&i64> { self.id.as_ref() }

  fn to_form(&self) -> FormValues {
    let mut form = FormValues::new();
    form.put_text("countryName", self.country_name.as_ref());
    form.put_ref("region", self.region);
    form
  }

  fn from_form(id: Option<i64>, form: &FormValues) -> Result<Self> {
    form.validate(Self::FIELDS)?;
    Ok(Self {
      id,
      country_name: form.text("countryName"),
      region: form.reference("region")?,
    })
  }
}
