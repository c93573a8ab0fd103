//! Core types for the Practice administration client.
//!
//! Holds the entity data model, form descriptors, pagination types, fixture
//! samples, and the route table. This crate has no HTTP dependencies; the
//! client and terminal UI live in `practice-cli`.

pub mod entity;
pub mod error;
pub mod form;
pub mod model;
pub mod page;
pub mod routes;
pub mod samples;

pub use entity::{Entity, Ref};
pub use error::{Error, Result};
