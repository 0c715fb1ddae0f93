//! Shared primitives for the folio workspace.
//!
//! - [`types`] -- database id and timestamp aliases.
//! - [`error`] -- the domain error enum shared by the db and api crates.

pub mod error;
pub mod types;
