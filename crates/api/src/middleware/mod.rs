//! Request middleware.
//!
//! - [`auth::require_auth`] -- rejects requests without a valid bearer token.

pub mod auth;
