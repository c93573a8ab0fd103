use serde::{Deserialize, Serialize};

use crate::{
  Entity, Ref, Result,
  form::{FieldKind, FieldSpec, FormValues},
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
  pub id:             Option<i64>,
  pub street_address: Option<String>,
  pub postal_code:    Option<String>,
  pub city:           Option<String>,
  pub state_province: Option<String>,
  pub country:        Option<Ref>,
}

impl Entity for Location {
  type Id = i64;

  const NAME: &'static str = "Location";
  const RESOURCE: &'static str = "locations";
  const ROUTE: &'static str = "location";
  const FIELDS: &'static [FieldSpec] = &[
    FieldSpec::new("streetAddress", "Street Address", FieldKind::Text),
    FieldSpec::new("postalCode", "Postal Code", FieldKind::Text),
    FieldSpec::new("city", "City", FieldKind::Text),
    FieldSpec::new("stateProvince", "State Province", FieldKind::Text),
    FieldSpec::new("country", "Country", FieldKind::Ref),
  ];

  fn id(&self) -> Option<&i64> { self.id.as_ref() }

  fn to_form(&self) -> FormValues {
    let mut form = FormValues::new();
    form.put_text("streetAddress", self.street_address.as_ref());
    form.put_text("postalCode", self.postal_code.as_ref());
    form.put_text("city", self.city.as_ref());
    form.put_text("stateProvince", self.state_province.as_ref());
    form.put_ref("country", self.country);
    form
  }

  fn from_form(id: Option<i64>, form: &FormValues) -> Result<Self> {
    form.validate(Self::FIELDS)?;
    Ok(Self {
      id,
      street_address: form.text("streetAddress"),
      postal_code: form.text("postalCode"),
      city: form.text("city"),
      state_province: form.text("stateProvince"),
      country: form.reference("country")?,
    })
  }
}
