pub mod health;
pub mod resource;
pub mod users;

use std::sync::Arc;

use axum::Router;
use folio_db::models::blog::Blog;
use folio_db::models::book::Book;

use crate::state::AppState;
use crate::store::Store;

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users/login                 login (always public)
/// /users, /users/{id}          user CRUD
/// /books, /books/{id}          book CRUD
/// /blogs, /blogs/{id}          blog CRUD
/// ```
///
/// A resource listed in `PROTECTED_RESOURCES` requires a bearer token on
/// every route except `/users/login`.
pub fn api_routes(state: &AppState) -> Router {
    let jwt = Arc::new(state.config.jwt.clone());
    let guard = |name: &str| state.config.is_protected(name).then(|| Arc::clone(&jwt));

    Router::new()
        .nest(
            "/users",
            users::router(Arc::clone(&state.users), guard("users")),
        )
        .nest(
            "/books",
            resource::router::<Book, dyn Store<Book>>(Arc::clone(&state.books), guard("books")),
        )
        .nest(
            "/blogs",
            resource::router::<Blog, dyn Store<Blog>>(Arc::clone(&state.blogs), guard("blogs")),
        )
}
