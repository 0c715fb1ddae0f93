//! Repository for the `books` table.

use async_trait::async_trait;
use folio_core::types::DbId;
use sqlx::PgConnection;

use crate::models::book::{Book, BookInput};
use crate::repositories::Repository;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, author, publisher, created_at, updated_at, deleted_at";

/// Provides CRUD operations for books.
pub struct BookRepo;

#[async_trait]
impl Repository for BookRepo {
    type Row = Book;
    type Input = BookInput;

    const ENTITY: &'static str = "book";

    async fn list(conn: &mut PgConnection) -> Result<Vec<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books WHERE deleted_at IS NULL ORDER BY id");
        sqlx::query_as::<_, Book>(&query).fetch_all(conn).await
    }

    async fn find_by_id(conn: &mut PgConnection, id: DbId) -> Result<Option<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    async fn create(conn: &mut PgConnection, input: &BookInput) -> Result<Book, sqlx::Error> {
        let query = format!(
            "INSERT INTO books (title, author, publisher)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(&input.title)
            .bind(&input.author)
            .bind(&input.publisher)
            .fetch_one(conn)
            .await
    }

    async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &BookInput,
    ) -> Result<Option<Book>, sqlx::Error> {
        let query = format!(
            "UPDATE books SET
                title = $2,
                author = $3,
                publisher = $4,
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.author)
            .bind(&input.publisher)
            .fetch_optional(conn)
            .await
    }

    async fn soft_delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE books SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(conn)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
