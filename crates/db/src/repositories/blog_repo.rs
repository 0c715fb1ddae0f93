//! Repository for the `blogs` table.

use async_trait::async_trait;
use folio_core::types::DbId;
use sqlx::PgConnection;

use crate::models::blog::{Blog, BlogInput};
use crate::repositories::Repository;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, content, user_id, created_at, updated_at, deleted_at";

/// Provides CRUD operations for blogs.
pub struct BlogRepo;

impl BlogRepo {
    /// List the live blogs owned by `user_id`, oldest first.
    pub async fn list_by_user(
        conn: &mut PgConnection,
        user_id: DbId,
    ) -> Result<Vec<Blog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blogs
             WHERE user_id = $1 AND deleted_at IS NULL
             ORDER BY id"
        );
        sqlx::query_as::<_, Blog>(&query)
            .bind(user_id)
            .fetch_all(conn)
            .await
    }
}

#[async_trait]
impl Repository for BlogRepo {
    type Row = Blog;
    type Input = BlogInput;

    const ENTITY: &'static str = "blog";

    async fn list(conn: &mut PgConnection) -> Result<Vec<Blog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blogs WHERE deleted_at IS NULL ORDER BY id");
        sqlx::query_as::<_, Blog>(&query).fetch_all(conn).await
    }

    async fn find_by_id(conn: &mut PgConnection, id: DbId) -> Result<Option<Blog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blogs WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    async fn create(conn: &mut PgConnection, input: &BlogInput) -> Result<Blog, sqlx::Error> {
        let query = format!(
            "INSERT INTO blogs (title, content, user_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Blog>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.user_id)
            .fetch_one(conn)
            .await
    }

    async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &BlogInput,
    ) -> Result<Option<Blog>, sqlx::Error> {
        let query = format!(
            "UPDATE blogs SET
                title = $2,
                content = $3,
                user_id = $4,
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.user_id)
            .fetch_optional(conn)
            .await
    }

    async fn soft_delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE blogs SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(conn)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
