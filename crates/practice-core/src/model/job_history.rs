use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{
  Entity, Ref, Result,
  form::{FieldKind, FieldSpec, FormValues},
};

/// Working language of a job history entry.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Language {
  French,
  English,
  Spanish,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobHistory {
  pub id:         Option<i64>,
  pub start_date: Option<DateTime<Utc>>,
  pub end_date:   Option<DateTime<Utc>>,
  pub language:   Option<Language>,
  pub job:        Option<Ref>,
  pub department: Option<Ref>,
  pub employee:   Option<Ref>,
}

impl Entity for JobHistory {
  type Id = i64;

  const NAME: &'static str = "Job History";
  const RESOURCE: &'static str = "job-histories";
  const ROUTE: &'static str = "job-history";
  const FIELDS: &'static [FieldSpec] = &[
    FieldSpec::new("startDate", "Start Date", FieldKind::DateTime),
    FieldSpec::new("endDate", "End Date", FieldKind::DateTime),
    FieldSpec::new("language", "Language", FieldKind::Language),
    FieldSpec::new("job", "Job", FieldKind::Ref),
    FieldSpec::new("department", "Department", FieldKind::Ref),
    FieldSpec::new("employee", "Employee", FieldKind::Ref),
  ];

  fn id(&self) -> Option<&i64> { self.id.as_ref() }

  fn to_form(&self) -> FormValues {
    let mut form = FormValues::new();
    form.put_date_time("startDate", self.start_date);
    form.put_date_time("endDate", self.end_date);
    form.put_language("language", self.language);
    form.put_ref("job", self.job);
    form.put_ref("department", self.department);
    form.put_ref("employee", self.employee);
    form
  }

  fn from_form(id: Option<i64>, form: &FormValues) -> Result<Self> {
    form.validate(Self::FIELDS)?;
    Ok(Self {
      id,
      start_date: form.date_time("startDate")?,
      end_date: form.date_time("endDate")?,
      language: form.language("language")?,
      job: form.reference("job")?,
      department: form.reference("department")?,
      employee: form.reference("employee")?,
    })
  }
}
