//! PostgreSQL-backed stores.
//!
//! [`PgStore`] serves any table whose request input maps straight onto its
//! repository input. Users need password hashing on write and a token on
//! login, so they get [`PgUserStore`].

use std::marker::PhantomData;

use async_trait::async_trait;
use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_db::models::user::{CreateUser, Credentials, User, UserInput};
use folio_db::repositories::{BlogRepo, Repository, UserRepo};
use folio_db::DbPool;

use crate::auth::jwt::{generate_token, JwtConfig};
use crate::auth::password::{hash_password, verify_password};
use crate::store::{Resource, Store, UserStore};

// ---------------------------------------------------------------------------
// Shared statement runners
// ---------------------------------------------------------------------------

async fn list_rows<Repo: Repository>(pool: &DbPool) -> Result<Vec<Repo::Row>, sqlx::Error> {
    let mut conn = pool.acquire().await?;
    Repo::list(&mut conn).await
}

async fn find_row<Repo: Repository>(
    pool: &DbPool,
    id: DbId,
) -> Result<Option<Repo::Row>, sqlx::Error> {
    let mut conn = pool.acquire().await?;
    Repo::find_by_id(&mut conn, id).await
}

async fn insert_row<Repo: Repository>(
    pool: &DbPool,
    input: &Repo::Input,
) -> Result<Repo::Row, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let row = Repo::create(&mut tx, input).await?;
    tx.commit().await?;
    Ok(row)
}

async fn update_row<Repo: Repository>(
    pool: &DbPool,
    id: DbId,
    input: &Repo::Input,
) -> Result<Option<Repo::Row>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let row = Repo::update(&mut tx, id, input).await?;
    tx.commit().await?;
    Ok(row)
}

async fn delete_row<Repo: Repository>(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let affected = Repo::soft_delete(&mut tx, id).await?;
    tx.commit().await?;
    Ok(affected)
}

// ---------------------------------------------------------------------------
// Error collapsing
// ---------------------------------------------------------------------------

/// Log a persistence failure and collapse it to `None`.
fn logged<T>(entity: &'static str, op: &'static str, result: Result<T, sqlx::Error>) -> Option<T> {
    result
        .map_err(|e| tracing::error!(entity, op, error = %e, "Persistence error"))
        .ok()
}

fn updated<T>(entity: &'static str, id: DbId, result: Result<Option<T>, sqlx::Error>) -> Option<T> {
    let row = logged(entity, "update", result)?;
    if row.is_none() {
        tracing::warn!(entity, id, "No live row to update");
    }
    row
}

fn deleted(entity: &'static str, id: DbId, result: Result<bool, sqlx::Error>) -> bool {
    match logged(entity, "delete", result) {
        Some(affected) => {
            if !affected {
                tracing::debug!(entity, id, "Delete matched no live row");
            }
            true
        }
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Generic store
// ---------------------------------------------------------------------------

/// A [`Store`] over a single repository.
pub struct PgStore<Repo> {
    pool: DbPool,
    _repo: PhantomData<fn() -> Repo>,
}

impl<Repo> PgStore<Repo> {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            _repo: PhantomData,
        }
    }
}

#[async_trait]
impl<Repo> Store<Repo::Row> for PgStore<Repo>
where
    Repo: Repository + 'static,
    Repo::Row: Resource<Input = Repo::Input>,
    Repo::Input: Send,
{
    async fn get(&self) -> Vec<Repo::Row> {
        logged(Repo::ENTITY, "get", list_rows::<Repo>(&self.pool).await).unwrap_or_default()
    }

    async fn find(&self, id: DbId) -> Option<Repo::Row> {
        logged(Repo::ENTITY, "find", find_row::<Repo>(&self.pool, id).await).flatten()
    }

    async fn create(&self, input: Repo::Input) -> Option<Repo::Row> {
        logged(
            Repo::ENTITY,
            "create",
            insert_row::<Repo>(&self.pool, &input).await,
        )
    }

    async fn update(&self, id: DbId, input: Repo::Input) -> Option<Repo::Row> {
        updated(
            Repo::ENTITY,
            id,
            update_row::<Repo>(&self.pool, id, &input).await,
        )
    }

    async fn delete(&self, id: DbId) -> bool {
        deleted(Repo::ENTITY, id, delete_row::<Repo>(&self.pool, id).await)
    }
}

// ---------------------------------------------------------------------------
// User store
// ---------------------------------------------------------------------------

/// Users with hashed passwords and token issuance on login.
pub struct PgUserStore {
    pool: DbPool,
    jwt: JwtConfig,
}

impl PgUserStore {
    pub fn new(pool: DbPool, jwt: JwtConfig) -> Self {
        Self { pool, jwt }
    }

    /// Swap the plaintext password for its Argon2id hash.
    fn hashed(input: UserInput) -> Option<CreateUser> {
        let password_hash = hash_password(&input.password)
            .map_err(|e| tracing::error!(error = %e, "Password hashing failed"))
            .ok()?;
        Some(CreateUser {
            name: input.name,
            email: input.email,
            password_hash,
        })
    }

    async fn find_with_blogs(&self, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        let Some(mut user) = UserRepo::find_by_id(&mut conn, id).await? else {
            return Ok(None);
        };
        user.blogs = BlogRepo::list_by_user(&mut conn, id).await?;
        Ok(Some(user))
    }
}

#[async_trait]
impl Store<User> for PgUserStore {
    async fn get(&self) -> Vec<User> {
        logged(UserRepo::ENTITY, "get", list_rows::<UserRepo>(&self.pool).await)
            .unwrap_or_default()
    }

    async fn find(&self, id: DbId) -> Option<User> {
        logged(UserRepo::ENTITY, "find", self.find_with_blogs(id).await).flatten()
    }

    async fn create(&self, input: UserInput) -> Option<User> {
        let record = Self::hashed(input)?;
        logged(
            UserRepo::ENTITY,
            "create",
            insert_row::<UserRepo>(&self.pool, &record).await,
        )
    }

    async fn update(&self, id: DbId, input: UserInput) -> Option<User> {
        let record = Self::hashed(input)?;
        updated(
            UserRepo::ENTITY,
            id,
            update_row::<UserRepo>(&self.pool, id, &record).await,
        )
    }

    async fn delete(&self, id: DbId) -> bool {
        deleted(
            UserRepo::ENTITY,
            id,
            delete_row::<UserRepo>(&self.pool, id).await,
        )
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn check(&self, credentials: Credentials) -> Result<User, CoreError> {
        let mut conn = self.pool.acquire().await.map_err(internal)?;

        let user = UserRepo::find_by_email(&mut conn, &credentials.email)
            .await
            .map_err(internal)?
            .ok_or(CoreError::InvalidCredentials)?;

        let valid = verify_password(&credentials.password, &user.password_hash)
            .map_err(|e| internal(format!("Password verification error: {e}")))?;
        if !valid {
            tracing::info!(user_id = user.id, "Login rejected");
            return Err(CoreError::InvalidCredentials);
        }

        let token = generate_token(user.id, &self.jwt)
            .map_err(|e| internal(format!("Token generation error: {e}")))?;

        let user = UserRepo::set_token(&mut conn, user.id, &token)
            .await
            .map_err(internal)?
            .ok_or(CoreError::InvalidCredentials)?;

        tracing::info!(user_id = user.id, "Login succeeded");
        Ok(user)
    }
}

/// Log an unexpected failure on the login path and wrap it as internal.
fn internal(err: impl std::fmt::Display) -> CoreError {
    tracing::error!(error = %err, "Login failed");
    CoreError::Internal(err.to_string())
}
