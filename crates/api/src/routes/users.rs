//! Route definitions for the `/users` resource.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use folio_db::models::user::User;

use crate::auth::jwt::JwtConfig;
use crate::handlers::user;
use crate::routes::resource;
use crate::store::UserStore;

/// Routes mounted at `/users`: the shared CRUD table plus
///
/// ```text
/// GET    /login  -> login
/// ```
///
/// `/login` stays public even when the rest of `/users` is protected.
pub fn router(model: Arc<dyn UserStore>, auth: Option<Arc<JwtConfig>>) -> Router {
    let crud = resource::router::<User, dyn UserStore>(Arc::clone(&model), auth);

    Router::new()
        .route("/login", get(user::login::<dyn UserStore>))
        .with_state(model)
        .merge(crud)
}
