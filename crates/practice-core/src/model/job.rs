use serde::{Deserialize, Serialize};

use crate::{
  Entity, Ref, Result,
  form::{FieldKind, FieldSpec, FormValues},
};

use super::{Employee, Task};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Job {
  pub id:         Option<i64>,
  pub job_title:  Option<String>,
  pub min_salary: Option<i64>,
  pub max_salary: Option<i64>,
  pub tasks:      Vec<Ref>,
  pub employee:   Option<Ref>,
}

impl Job {
  /// Attach a persisted task. Adding the same task twice is a no-op.
  pub fn add_task(&mut self, task: &Task) {
    if let Some(id) = task.id
      && !self.tasks.contains(&Ref::new(id))
    {
      self.tasks.push(Ref::new(id));
    }
  }

  pub fn remove_task(&mut self, task: &Task) {
    if let Some(id) = task.id {
      self.tasks.retain(|r| r.id != id);
    }
  }

  pub fn assign_to(&mut self, employee: Option<&Employee>) {
    self.employee = employee.and_then(|e| e.id).map(Ref::new);
  }
}

impl Entity for Job {
  type Id = i64;

  const NAME: &'static str = "Job";
  const RESOURCE: &'static str = "jobs";
  const ROUTE: &'static str = "job";
  const FIELDS: &'static [FieldSpec] = &[
    FieldSpec::new("jobTitle", "Job Title", FieldKind::Text),
    FieldSpec::new("minSalary", "Min Salary", FieldKind::Integer),
    FieldSpec::new("maxSalary", "Max Salary", FieldKind::Integer),
    FieldSpec::new("tasks", "Tasks", FieldKind::RefList),
    FieldSpec::new("employee", "Employee", FieldKind::Ref),
  ];

  fn id(&self) -> Option<&i64> { self.id.as_ref() }

  fn to_form(&self) -> FormValues {
    let mut form = FormValues::new();
    form.put_text("jobTitle", self.job_title.as_ref());
    form.put_integer("minSalary", self.min_salary);
    form.put_integer("maxSalary", self.max_salary);
    form.put_refs("tasks", &self.tasks);
    form.put_ref("employee", self.employee);
    form
  }

  fn from_form(id: Option<i64>, form: &FormValues) -> Result<Self> {
    form.validate(Self::FIELDS)?;
    Ok(Self {
      id,
      job_title: form.text("jobTitle"),
      min_salary: form.integer("minSalary")?,
      max_salary: form.integer("maxSalary")?,
      tasks: form.references("tasks")?,
      employee: form.reference("employee")?,
    })
  }
}
