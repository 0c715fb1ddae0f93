//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` input DTO carrying the mutable fields of a request body

pub mod blog;
pub mod book;
pub mod user;
