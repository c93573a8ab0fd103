//! Record types, one module per entity.
//!
//! All records serialise as camelCase JSON. Relations are id-only
//! [`Ref`](crate::Ref)s.

mod authority;
mod country;
mod department;
mod employee;
mod job;
mod job_history;
mod location;
mod region;
mod task;

pub use authority::Authority;
pub use country::Country;
pub use department::Department;
pub use employee::Employee;
pub use job::Job;
pub use job_history::{JobHistory, Language};
pub use location::Location;
pub use region::Region;
pub use task::Task;

use crate::entity::record_identity;

record_identity!(
  Authority, Country, Department, Employee, Job, JobHistory, Location, Region,
  Task,
);
