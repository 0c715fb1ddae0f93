#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use chrono::Utc;
use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_db::models::blog::{Blog, BlogInput};
use folio_db::models::book::{Book, BookInput};
use folio_db::models::user::{Credentials, User, UserInput};
use folio_db::DatabaseConfig;
use http_body_util::BodyExt;
use tower::ServiceExt;

use folio_api::app::{self, App};
use folio_api::auth::jwt::{generate_token, JwtConfig};
use folio_api::auth::password::{hash_password, verify_password};
use folio_api::config::ServerConfig;
use folio_api::state::AppState;
use folio_api::store::{Resource, Store, UserStore};

/// Signing secret shared by the test config and the in-memory user store.
pub const TEST_SECRET: &str = "integration-test-secret";

pub fn test_jwt() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        token_expiry_hours: 2,
    }
}

/// Build a test `ServerConfig` with safe defaults.
///
/// The database section is never dialled; every model is in memory.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        protected_resources: Vec::new(),
        database: DatabaseConfig {
            host: "localhost".to_string(),
            port: 5432,
            user: "folio".to_string(),
            password: "folio".to_string(),
            name: "folio_test".to_string(),
            max_connections: 1,
        },
        jwt: test_jwt(),
    }
}

// ---------------------------------------------------------------------------
// In-memory models
// ---------------------------------------------------------------------------

/// How an in-memory row is built from its input.
pub trait Fixture: Resource + Clone {
    fn build(id: DbId, input: Self::Input, existing: Option<&Self>) -> Self;
    fn id(&self) -> DbId;
}

impl Fixture for Book {
    fn build(id: DbId, input: BookInput, existing: Option<&Self>) -> Self {
        let now = Utc::now();
        Book {
            id,
            title: input.title,
            author: input.author,
            publisher: input.publisher,
            created_at: existing.map_or(now, |b| b.created_at),
            updated_at: now,
            deleted_at: None,
        }
    }

    fn id(&self) -> DbId {
        self.id
    }
}

impl Fixture for Blog {
    fn build(id: DbId, input: BlogInput, existing: Option<&Self>) -> Self {
        let now = Utc::now();
        Blog {
            id,
            title: input.title,
            content: input.content,
            user_id: input.user_id,
            created_at: existing.map_or(now, |b| b.created_at),
            updated_at: now,
            deleted_at: None,
        }
    }

    fn id(&self) -> DbId {
        self.id
    }
}

impl Fixture for User {
    fn build(id: DbId, input: UserInput, existing: Option<&Self>) -> Self {
        let now = Utc::now();
        User {
            id,
            name: input.name,
            email: input.email,
            password_hash: hash_password(&input.password).expect("hashing should succeed"),
            token: existing.map(|u| u.token.clone()).unwrap_or_default(),
            blogs: Vec::new(),
            created_at: existing.map_or(now, |u| u.created_at),
            updated_at: now,
            deleted_at: None,
        }
    }

    fn id(&self) -> DbId {
        self.id
    }
}

/// A `Store` over a `Vec`. With `failing` set it behaves like a model whose
/// backend is down: empty lists, `None` and `false` everywhere.
pub struct MemoryStore<R> {
    rows: Mutex<Vec<R>>,
    next_id: Mutex<DbId>,
    failing: bool,
}

impl<R: Fixture> MemoryStore<R> {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
            failing: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new()
        }
    }

    /// Insert a row directly, bypassing the failure switch.
    pub fn seed(&self, input: R::Input) -> R {
        let mut next_id = self.next_id.lock().unwrap();
        let row = R::build(*next_id, input, None);
        *next_id += 1;
        self.rows.lock().unwrap().push(row.clone());
        row
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl<R: Fixture> Store<R> for MemoryStore<R> {
    async fn get(&self) -> Vec<R> {
        if self.failing {
            return Vec::new();
        }
        self.rows.lock().unwrap().clone()
    }

    async fn find(&self, id: DbId) -> Option<R> {
        if self.failing {
            return None;
        }
        self.rows.lock().unwrap().iter().find(|r| r.id() == id).cloned()
    }

    async fn create(&self, input: R::Input) -> Option<R> {
        if self.failing {
            return None;
        }
        Some(self.seed(input))
    }

    async fn update(&self, id: DbId, input: R::Input) -> Option<R> {
        if self.failing {
            return None;
        }
        let mut rows = self.rows.lock().unwrap();
        let slot = rows.iter_mut().find(|r| r.id() == id)?;
        *slot = R::build(id, input, Some(&*slot));
        Some(slot.clone())
    }

    async fn delete(&self, id: DbId) -> bool {
        if self.failing {
            return false;
        }
        self.rows.lock().unwrap().retain(|r| r.id() != id);
        true
    }
}

#[async_trait]
impl UserStore for MemoryStore<User> {
    async fn check(&self, credentials: Credentials) -> Result<User, CoreError> {
        if self.failing {
            return Err(CoreError::Internal("user store offline".into()));
        }
        let mut rows = self.rows.lock().unwrap();
        let user = rows
            .iter_mut()
            .find(|u| u.email == credentials.email)
            .ok_or(CoreError::InvalidCredentials)?;

        match verify_password(&credentials.password, &user.password_hash) {
            Ok(true) => {}
            _ => return Err(CoreError::InvalidCredentials),
        }

        user.token = generate_token(user.id, &test_jwt())
            .map_err(|e| CoreError::Internal(e.to_string()))?;
        Ok(user.clone())
    }
}

/// The three models wired into an app.
pub struct Models {
    pub users: Arc<MemoryStore<User>>,
    pub books: Arc<MemoryStore<Book>>,
    pub blogs: Arc<MemoryStore<Blog>>,
}

impl Models {
    pub fn new() -> Self {
        Self {
            users: Arc::new(MemoryStore::new()),
            books: Arc::new(MemoryStore::new()),
            blogs: Arc::new(MemoryStore::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            users: Arc::new(MemoryStore::failing()),
            books: Arc::new(MemoryStore::failing()),
            blogs: Arc::new(MemoryStore::failing()),
        }
    }

    pub fn state(&self, config: ServerConfig) -> AppState {
        AppState {
            config: Arc::new(config),
            users: self.users.clone(),
            books: self.books.clone(),
            blogs: self.blogs.clone(),
        }
    }
}

/// Build the full application, middleware included, over `models`.
///
/// Goes through `app::build`, so tests exercise the same stack as `main.rs`.
pub fn build_test_app(models: &Models) -> App {
    build_app_with(models, test_config())
}

pub fn build_app_with(models: &Models, config: ServerConfig) -> App {
    app::build(models.state(config))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: App, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: App, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_with_token(app: App, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: App, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn with_body(
    app: App,
    method: Method,
    uri: &str,
    content_type: &str,
    body: String,
) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: App, uri: &str, body: serde_json::Value) -> Response {
    with_body(app, Method::POST, uri, "application/json", body.to_string()).await
}

pub async fn put_json(app: App, uri: &str, body: serde_json::Value) -> Response {
    with_body(app, Method::PUT, uri, "application/json", body.to_string()).await
}

pub async fn post_raw_json(app: App, uri: &str, body: &str) -> Response {
    with_body(app, Method::POST, uri, "application/json", body.to_string()).await
}

pub async fn post_form(app: App, uri: &str, body: &str) -> Response {
    with_body(
        app,
        Method::POST,
        uri,
        "application/x-www-form-urlencoded",
        body.to_string(),
    )
    .await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}
