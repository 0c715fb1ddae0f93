use std::sync::Arc;

use folio_db::models::blog::Blog;
use folio_db::models::book::Book;
use folio_db::repositories::{BlogRepo, BookRepo};
use folio_db::DbPool;

use crate::config::ServerConfig;
use crate::store::postgres::{PgStore, PgUserStore};
use crate::store::{Store, UserStore};

/// Shared application state handed to the router builder.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// User model (CRUD plus credential check).
    pub users: Arc<dyn UserStore>,
    /// Book model.
    pub books: Arc<dyn Store<Book>>,
    /// Blog model.
    pub blogs: Arc<dyn Store<Blog>>,
}

impl AppState {
    /// Wire every model to the PostgreSQL pool.
    pub fn postgres(pool: DbPool, config: ServerConfig) -> Self {
        Self {
            users: Arc::new(PgUserStore::new(pool.clone(), config.jwt.clone())),
            books: Arc::new(PgStore::<BookRepo>::new(pool.clone())),
            blogs: Arc::new(PgStore::<BlogRepo>::new(pool)),
            config: Arc::new(config),
        }
    }
}
