use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Entity, Ref, Result,
  form::{FieldKind, FieldSpec, FormValues},
};

use super::{Job, JobHistory};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Employee {
  pub id:             Option<i64>,
  pub first_name:     Option<String>,
  pub last_name:      Option<String>,
  pub email:          Option<String>,
  pub phone_number:   Option<String>,
  pub hire_date:      Option<DateTime<Utc>>,
  pub salary:         Option<i64>,
  pub commission_pct: Option<i64>,
  pub manager:        Option<Ref>,
  pub department:     Option<Ref>,
  /// Back-reference; the owning side is [`Job::employee`].
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub jobs:           Vec<Ref>,
  /// Back-reference; the owning side is [`JobHistory::employee`].
  #[serde(skip_serializing_if = "Option::is_none")]
  pub job_history:    Option<Ref>,
}

impl Employee {
  /// `"First Last"`, or whichever half is present.
  pub fn full_name(&self) -> String {
    [self.first_name.as_deref(), self.last_name.as_deref()]
      .into_iter()
      .flatten()
      .collect::<Vec<_>>()
      .join(" ")
  }

  /// Point this employee at `manager`. A draft manager (no id yet) clears the
  /// relation, since there is nothing to reference.
  pub fn set_manager(&mut self, manager: Option<&Employee>) {
    self.manager = manager.and_then(|m| m.id).map(Ref::new);
  }

  pub fn set_department(&mut self, department: Option<&super::Department>) {
    self.department = department.and_then(|d| d.id).map(Ref::new);
  }

  /// Link `job` to this employee on both sides. Only a persisted job is
  /// listed in [`Employee::jobs`]; adding it twice is a no-op.
  pub fn add_job(&mut self, job: &mut Job) {
    if let Some(id) = job.id
      && !self.jobs.contains(&Ref::new(id))
    {
      self.jobs.push(Ref::new(id));
    }
    job.employee = self.id.map(Ref::new);
  }

  pub fn remove_job(&mut self, job: &mut Job) {
    if let Some(id) = job.id {
      self.jobs.retain(|r| r.id != id);
    }
    job.employee = None;
  }

  /// Replace the linked jobs. `previous` are the records linked so far; they
  /// are unlinked before `jobs` are linked.
  pub fn set_jobs(&mut self, previous: &mut [Job], jobs: &mut [Job]) {
    for job in previous {
      self.remove_job(job);
    }
    self.jobs.clear();
    for job in jobs {
      self.add_job(job);
    }
  }

  /// Replace the job history on both sides. `previous` is the record linked
  /// so far, if the caller holds it.
  pub fn set_job_history(
    &mut self,
    previous: Option<&mut JobHistory>,
    history: Option<&mut JobHistory>,
  ) {
    if let Some(old) = previous {
      old.employee = None;
    }
    self.job_history = None;
    if let Some(history) = history {
      history.employee = self.id.map(Ref::new);
      self.job_history = history.id.map(Ref::new);
    }
  }
}

impl Entity for Employee {
  type Id = i64;

  const NAME: &'static str = "Employee";
  const RESOURCE: &'static str = "employees";
  const ROUTE: &'static str = "employee";
  const FIELDS: &'static [FieldSpec] = &[
    FieldSpec::new("firstName", "First Name", FieldKind::Text),
    FieldSpec::new("lastName", "Last Name", FieldKind::Text),
    FieldSpec::new("email", "Email", FieldKind::Text),
    FieldSpec::new("phoneNumber", "Phone Number", FieldKind::Text),
    FieldSpec::new("hireDate", "Hire Date", FieldKind::DateTime),
    FieldSpec::new("salary", "Salary", FieldKind::Integer),
    FieldSpec::new("commissionPct", "Commission Pct", FieldKind::Integer),
    FieldSpec::new("manager", "Manager", FieldKind::Ref),
    FieldSpec::new("department", "Department", FieldKind::Ref),
  ];

  fn id(&self) -> Option<&i64> { self.id.as_ref() }

  fn to_form(&self) -> FormValues {
    let mut form = FormValues::new();
    form.put_text("firstName", self.first_name.as_ref());
    form.put_text("lastName", self.last_name.as_ref());
    form.put_text("email", self.email.as_ref());
    form.put_text("phoneNumber", self.phone_number.as_ref());
    form.put_date_time("hireDate", self.hire_date);
    form.put_integer("salary", self.salary);
    form.put_integer("commissionPct", self.commission_pct);
    form.put_ref("manager", self.manager);
    form.put_ref("department", self.department);
    form
  }

  fn from_form(id: Option<i64>, form: &FormValues) -> Result<Self> {
    form.validate(Self::FIELDS)?;
    Ok(Self {
      id,
      first_name: form.text("firstName"),
      last_name: form.text("lastName"),
      email: form.text("email"),
      phone_number: form.text("phoneNumber"),
      hire_date: form.date_time("hireDate")?,
      salary: form.integer("salary")?,
      commission_pct: form.integer("commissionPct")?,
      manager: form.reference("manager")?,
      department: form.reference("department")?,
      jobs: Vec::new(),
      job_history: None,
    })
  }
}
