//! Route table shared by every resource.

use std::sync::Arc;

use axum::middleware;
use axum::routing::get;
use axum::Router;

use crate::auth::jwt::JwtConfig;
use crate::handlers::resource;
use crate::middleware::auth::require_auth;
use crate::store::{Resource, Store};

/// Routes for one resource, mounted under its collection path.
///
/// ```text
/// GET    /       -> index
/// POST   /       -> store
/// GET    /{id}   -> observe
/// PUT    /{id}   -> edit
/// DELETE /{id}   -> destroy
/// ```
///
/// With `auth` set, every route above requires a bearer token.
pub fn router<R, S>(model: Arc<S>, auth: Option<Arc<JwtConfig>>) -> Router
where
    R: Resource,
    S: Store<R> + ?Sized + 'static,
{
    let routes = Router::new()
        .route(
            "/",
            get(resource::index::<R, S>).post(resource::store::<R, S>),
        )
        .route(
            "/{id}",
            get(resource::observe::<R, S>)
                .put(resource::edit::<R, S>)
                .delete(resource::destroy::<R, S>),
        );

    protect(routes, auth).with_state(model)
}

/// Layer [`require_auth`] over the routes registered so far.
pub(crate) fn protect<S>(routes: Router<S>, auth: Option<Arc<JwtConfig>>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    match auth {
        Some(config) => routes.route_layer(middleware::from_fn_with_state(config, require_auth)),
        None => routes,
    }
}
