//! Terminal administration client for the Practice REST API.
//!
//! The library holds everything the `practice` binary drives: the HTTP
//! client and per-entity services, the delete-confirmation dialog, the
//! feature modules and application state machine, and ratatui rendering.
//! Keeping it a library lets the end-to-end tests drive [`app::App`] without
//! a terminal.

// Native `async fn` in traits; the futures are awaited in place, never
// spawned, so the missing `Send` bound is fine.
#![allow(async_fn_in_trait)]

pub mod app;
pub mod client;
pub mod dialog;
pub mod error;
pub mod feature;
pub mod service;
pub mod settings;
pub mod ui;

pub use client::{ApiClient, ApiConfig};
pub use error::ClientError;
