//! Repository for the `users` table.

use async_trait::async_trait;
use folio_core::types::DbId;
use sqlx::PgConnection;

use crate::models::user::{CreateUser, User};
use crate::repositories::Repository;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, email, password_hash, token, created_at, updated_at, deleted_at";

/// Provides CRUD and credential lookups for users.
pub struct UserRepo;

impl UserRepo {
    /// Find the oldest live user with the given email.
    pub async fn find_by_email(
        conn: &mut PgConnection,
        email: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE email = $1 AND deleted_at IS NULL
             ORDER BY id
             LIMIT 1"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(conn)
            .await
    }

    /// Store the most recently issued token on a user row.
    pub async fn set_token(
        conn: &mut PgConnection,
        id: DbId,
        token: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET token = $2, updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(token)
            .fetch_optional(conn)
            .await
    }
}

#[async_trait]
impl Repository for UserRepo {
    type Row = User;
    type Input = CreateUser;

    const ENTITY: &'static str = "user";

    async fn list(conn: &mut PgConnection) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE deleted_at IS NULL ORDER BY id");
        sqlx::query_as::<_, User>(&query).fetch_all(conn).await
    }

    async fn find_by_id(conn: &mut PgConnection, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    async fn create(conn: &mut PgConnection, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(conn)
            .await
    }

    /// The stored token is left untouched; only login writes it.
    async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &CreateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = $2,
                email = $3,
                password_hash = $4,
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_optional(conn)
            .await
    }

    async fn soft_delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE users SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(conn)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
