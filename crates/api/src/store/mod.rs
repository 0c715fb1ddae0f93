//! The entity model contract shared by every resource.
//!
//! Handlers only ever talk to a [`Store`]; expected failures never surface as
//! errors here. Implementations log persistence failures where they happen and
//! collapse them to `None` / `false` / an empty list, so "not found" and
//! "backend failed" look the same to callers. Only [`UserStore::check`]
//! returns a typed error, because login echoes its message to the client.
//!
//! - [`postgres`] -- the sqlx-backed implementations used in production.

use async_trait::async_trait;
use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_db::models::blog::{Blog, BlogInput};
use folio_db::models::book::{Book, BookInput};
use folio_db::models::user::{Credentials, User, UserInput};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod postgres;

/// An entity exposed as a REST resource.
pub trait Resource: Serialize + Send + Sync + 'static {
    /// Request body shape for create and update.
    type Input: DeserializeOwned + Send + 'static;

    /// Singular lowercase name used in client-facing messages.
    const NAME: &'static str;
}

impl Resource for User {
    type Input = UserInput;
    const NAME: &'static str = "user";
}

impl Resource for Book {
    type Input = BookInput;
    const NAME: &'static str = "book";
}

impl Resource for Blog {
    type Input = BlogInput;
    const NAME: &'static str = "blog";
}

/// CRUD over one resource. Every mutation is its own transaction.
#[async_trait]
pub trait Store<R: Resource>: Send + Sync {
    /// All live rows in primary-key order. Empty on failure.
    async fn get(&self) -> Vec<R>;

    /// The live row with `id`, if any.
    async fn find(&self, id: DbId) -> Option<R>;

    /// Insert a row. `None` on failure.
    async fn create(&self, input: R::Input) -> Option<R>;

    /// Overwrite every mutable field of row `id`. The id always comes from
    /// the caller, never from `input`. `None` on failure.
    async fn update(&self, id: DbId, input: R::Input) -> Option<R>;

    /// Soft-delete row `id`. `true` iff the transaction committed.
    async fn delete(&self, id: DbId) -> bool;
}

/// User storage plus credential verification.
#[async_trait]
pub trait UserStore: Store<User> {
    /// Verify `credentials`, issue a fresh token, persist it on the row and
    /// return the user carrying it.
    async fn check(&self, credentials: Credentials) -> Result<User, CoreError>;
}
