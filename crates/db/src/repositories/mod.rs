//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&mut PgConnection` as the first argument, so callers decide
//! whether a statement runs on a pooled connection or inside a transaction.

use async_trait::async_trait;
use folio_core::types::DbId;
use sqlx::PgConnection;

pub mod blog_repo;
pub mod book_repo;
pub mod user_repo;

pub use blog_repo::BlogRepo;
pub use book_repo::BookRepo;
pub use user_repo::UserRepo;

/// The CRUD surface shared by every table.
///
/// All reads exclude soft-deleted rows.
#[async_trait]
pub trait Repository {
    /// Row type returned by queries.
    type Row: Send;
    /// DTO carrying the mutable columns for insert and update.
    type Input: Sync;

    /// Entity name used in log fields.
    const ENTITY: &'static str;

    /// List all rows in primary-key order.
    async fn list(conn: &mut PgConnection) -> Result<Vec<Self::Row>, sqlx::Error>;

    /// Find a row by its internal ID.
    async fn find_by_id(conn: &mut PgConnection, id: DbId)
        -> Result<Option<Self::Row>, sqlx::Error>;

    /// Insert a new row, returning it with its assigned id.
    async fn create(conn: &mut PgConnection, input: &Self::Input) -> Result<Self::Row, sqlx::Error>;

    /// Overwrite every mutable column of row `id`.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &Self::Input,
    ) -> Result<Option<Self::Row>, sqlx::Error>;

    /// Soft-delete a row by ID. Returns `true` if a row was marked deleted.
    async fn soft_delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error>;
}
