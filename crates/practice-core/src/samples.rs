//! Fixture records for tests and the stub API.
//!
//! Each entity has four shapes: only the required data, some optional data,
//! every field populated, and a new draft with no identifier.

use chrono::{DateTime, TimeZone, Utc};

use crate::{
  Ref,
  model::{
    Authority, Country, Department, Employee, Job, JobHistory, Language,
    Location, Region, Task,
  },
};

pub trait Samples: Sized {
  fn with_required_data() -> Self;
  fn with_partial_data() -> Self;
  fn with_full_data() -> Self;
  fn with_new_data() -> Self;
}

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> Option<DateTime<Utc>> {
  Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).single()
}

impl Samples for Authority {
  fn with_required_data() -> Self { Self { name: Some("ROLE_ADMIN".into()) } }

  fn with_partial_data() -> Self { Self { name: Some("ROLE_USER".into()) } }

  fn with_full_data() -> Self { Self { name: Some("ROLE_MANAGER".into()) } }

  fn with_new_data() -> Self { Self { name: None } }
}

impl Samples for Region {
  fn with_required_data() -> Self { Self { id: Some(8451), ..Default::default() } }

  fn with_partial_data() -> Self {
    Self { id: Some(2281), region_name: Some("Oceania".into()) }
  }

  fn with_full_data() -> Self {
    Self { id: Some(30377), region_name: Some("Western Europe".into()) }
  }

  fn with_new_data() -> Self { Self::default() }
}

impl Samples for Country {
  fn with_required_data() -> Self { Self { id: Some(11915), ..Default::default() } }

  fn with_partial_data() -> Self {
    Self { id: Some(7730), country_name: Some("Portugal".into()), region: None }
  }

  fn with_full_data() -> Self {
    Self {
      id:           Some(20410),
      country_name: Some("France".into()),
      region:       Some(Ref::new(30377)),
    }
  }

  fn with_new_data() -> Self { Self::default() }
}

impl Samples for Location {
  fn with_required_data() -> Self { Self { id: Some(4113), ..Default::default() } }

  fn with_partial_data() -> Self {
    Self {
      id: Some(19288),
      city: Some("Lyon".into()),
      ..Default::default()
    }
  }

  fn with_full_data() -> Self {
    Self {
      id:             Some(25543),
      street_address: Some("12 Rue de la Paix".into()),
      postal_code:    Some("75002".into()),
      city:           Some("Paris".into()),
      state_province: Some("Ile-de-France".into()),
      country:        Some(Ref::new(20410)),
    }
  }

  fn with_new_data() -> Self { Self::default() }
}

impl Samples for Department {
  fn with_required_data() -> Self {
    Self {
      id: Some(5210),
      department_name: "Payroll".into(),
      location: None,
    }
  }

  fn with_partial_data() -> Self {
    Self {
      id: Some(14967),
      department_name: "Logistics".into(),
      location: None,
    }
  }

  fn with_full_data() -> Self {
    Self {
      id:              Some(3089),
      department_name: "Research".into(),
      location:        Some(Ref::new(25543)),
    }
  }

  fn with_new_data() -> Self {
    Self {
      id: None,
      department_name: "Marketing".into(),
      location: None,
    }
  }
}

impl Samples for Task {
  fn with_required_data() -> Self { Self { id: Some(27506), ..Default::default() } }

  fn with_partial_data() -> Self {
    Self {
      id: Some(6341),
      title: Some("Quarterly review".into()),
      description: None,
    }
  }

  fn with_full_data() -> Self {
    Self {
      id:          Some(18822),
      title:       Some("Onboarding".into()),
      description: Some("Prepare equipment and accounts".into()),
    }
  }

  fn with_new_data() -> Self { Self::default() }
}

impl Samples for Employee {
  fn with_required_data() -> Self { Self { id: Some(9574), ..Default::default() } }

  fn with_partial_data() -> Self {
    Self {
      id: Some(1436),
      last_name: Some("Hirthe".into()),
      salary: Some(14228),
      ..Default::default()
    }
  }

  fn with_full_data() -> Self {
    Self {
      id:             Some(28213),
      first_name:     Some("Casey".into()),
      last_name:      Some("Hirthe".into()),
      email:          Some("Amelia4@gmail.com".into()),
      phone_number:   Some("boulevard".into()),
      hire_date:      at(2025, 6, 2, 22, 20),
      salary:         Some(14228),
      commission_pct: Some(353),
      manager:        Some(Ref::new(1436)),
      department:     Some(Ref::new(3089)),
      jobs:           Vec::new(),
      job_history:    None,
    }
  }

  fn with_new_data() -> Self { Self::default() }
}

impl Samples for Job {
  fn with_required_data() -> Self { Self { id: Some(13207), ..Default::default() } }

  fn with_partial_data() -> Self {
    Self {
      id: Some(2975),
      job_title: Some("Analyst".into()),
      min_salary: Some(31000),
      ..Default::default()
    }
  }

  fn with_full_data() -> Self {
    Self {
      id:         Some(22164),
      job_title:  Some("Engineer".into()),
      min_salary: Some(42000),
      max_salary: Some(88000),
      tasks:      vec![Ref::new(18822)],
      employee:   Some(Ref::new(28213)),
    }
  }

  fn with_new_data() -> Self { Self::default() }
}

impl Samples for JobHistory {
  fn with_required_data() -> Self { Self { id: Some(16459), ..Default::default() } }

  fn with_partial_data() -> Self {
    Self {
      id: Some(31185),
      language: Some(Language::Spanish),
      ..Default::default()
    }
  }

  fn with_full_data() -> Self {
    Self {
      id: Some(26932),
      start_date: at(2025, 6, 3, 0, 35),
      end_date: at(2025, 6, 3, 5, 3),
      language: Some(Language::English),
      ..Default::default()
    }
  }

  fn with_new_data() -> Self { Self::default() }
}
