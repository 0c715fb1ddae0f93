//! HTTP handlers.
//!
//! - [`resource`] -- the five CRUD operations, generic over the resource.
//! - [`user`] -- login.

pub mod resource;
pub mod user;
