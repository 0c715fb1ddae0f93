//! Integration tests for the PostgreSQL stores against a real database.
//!
//! Verifies that:
//! - Login verifies the Argon2 hash, issues a token and persists it on the row
//! - Soft-deleted users cannot log in
//! - Delete of a missing row still commits and reports `true`
//! - Update of a soft-deleted row yields `None`
//! - Find on a user loads its live blogs
//! - A constraint violation collapses to `None`
//!
//! These need a PostgreSQL `DATABASE_URL`; run with `cargo test -- --ignored`.

use assert_matches::assert_matches;
use folio_api::auth::jwt::{validate_token, JwtConfig};
use folio_api::store::postgres::{PgStore, PgUserStore};
use folio_api::store::{Store, UserStore};
use folio_core::error::CoreError;
use folio_db::models::blog::BlogInput;
use folio_db::models::book::BookInput;
use folio_db::models::user::{Credentials, UserInput};
use folio_db::repositories::{BlogRepo, BookRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn jwt() -> JwtConfig {
    JwtConfig {
        secret: "store-test-secret".to_string(),
        token_expiry_hours: 2,
    }
}

fn dana() -> UserInput {
    UserInput {
        name: "Dana".to_string(),
        email: "dana@example.com".to_string(),
        password: "A123".to_string(),
    }
}

fn login(password: &str) -> Credentials {
    Credentials {
        email: "dana@example.com".to_string(),
        password: password.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_check_persists_a_token_for_the_user(pool: PgPool) {
    let users = PgUserStore::new(pool, jwt());
    let created = users.create(dana()).await.expect("user should be created");
    assert!(created.password_hash.starts_with("$argon2id$"));
    assert!(created.token.is_empty());

    let logged_in = users.check(login("A123")).await.expect("login should succeed");
    assert_eq!(logged_in.id, created.id);

    let claims = validate_token(&logged_in.token, &jwt()).expect("token should validate");
    assert_eq!(claims.user_id, created.id);

    let stored = users.find(created.id).await.unwrap();
    assert_eq!(stored.token, logged_in.token);
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_check_with_wrong_password_issues_no_token(pool: PgPool) {
    let users = PgUserStore::new(pool, jwt());
    let created = users.create(dana()).await.unwrap();

    assert_matches!(
        users.check(login("a123")).await,
        Err(CoreError::InvalidCredentials)
    );
    assert!(users.find(created.id).await.unwrap().token.is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_soft_deleted_user_cannot_log_in(pool: PgPool) {
    let users = PgUserStore::new(pool, jwt());
    let created = users.create(dana()).await.unwrap();

    assert!(users.delete(created.id).await);
    assert_matches!(
        users.check(login("A123")).await,
        Err(CoreError::InvalidCredentials)
    );
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_find_user_loads_live_blogs(pool: PgPool) {
    let users = PgUserStore::new(pool.clone(), jwt());
    let blogs = PgStore::<BlogRepo>::new(pool);
    let owner = users.create(dana()).await.unwrap();

    let kept = blogs
        .create(BlogInput {
            title: "Kept".into(),
            content: "c".into(),
            user_id: Some(owner.id),
        })
        .await
        .unwrap();
    let gone = blogs
        .create(BlogInput {
            title: "Gone".into(),
            content: "c".into(),
            user_id: Some(owner.id),
        })
        .await
        .unwrap();
    assert!(blogs.delete(gone.id).await);

    let found = users.find(owner.id).await.unwrap();
    let ids: Vec<i64> = found.blogs.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![kept.id]);

    // Index leaves the list empty.
    let listed = users.get().await;
    assert!(listed.iter().all(|u| u.blogs.is_empty()));
}

// ---------------------------------------------------------------------------
// Generic store
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_delete_of_missing_row_still_reports_true(pool: PgPool) {
    let books = PgStore::<BookRepo>::new(pool);
    assert!(books.delete(9_999).await);
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_update_of_deleted_row_is_none(pool: PgPool) {
    let books = PgStore::<BookRepo>::new(pool);
    let book = books
        .create(BookInput {
            title: "Dune".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(books.delete(book.id).await);

    let updated = books
        .update(
            book.id,
            BookInput {
                title: "Dune Messiah".into(),
                ..Default::default()
            },
        )
        .await;
    assert!(updated.is_none());
    assert!(books.find(book.id).await.is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_foreign_key_violation_collapses_to_none(pool: PgPool) {
    let blogs = PgStore::<BlogRepo>::new(pool);
    let created = blogs
        .create(BlogInput {
            title: "Orphan".into(),
            content: "c".into(),
            user_id: Some(424_242),
        })
        .await;
    assert!(created.is_none());
    assert!(blogs.get().await.is_empty());
}
