//! Column types shared by every folio table.

/// Primary key of `users`, `books` and `blogs` (`BIGSERIAL`). Also the type of
/// the `blogs.user_id` owner reference and the token's `userId` claim.
pub type DbId = i64;

/// `created_at` / `updated_at` / `deleted_at` columns (`TIMESTAMPTZ`, UTC).
pub type Timestamp = chrono::DateTime<chrono::Utc>;
