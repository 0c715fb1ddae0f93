//! Blog entity model and DTOs.

use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A blog row from the `blogs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Blog {
    pub id: DbId,
    pub title: String,
    pub content: String,
    /// Owning user. Nullable; references `users(id)` without cascade.
    pub user_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Timestamp>,
}

/// Mutable blog fields, used for both create and full-overwrite update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BlogInput {
    pub title: String,
    pub content: String,
    pub user_id: Option<DbId>,
}
