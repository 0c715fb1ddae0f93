//! Bearer-token authentication.
//!
//! Not applied anywhere by default; [`crate::routes::api_routes`] layers
//! [`require_auth`] onto the resources named in `PROTECTED_RESOURCES`.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use folio_core::error::CoreError;
use folio_core::types::DbId;

use crate::auth::jwt::{validate_token, JwtConfig};
use crate::error::AppError;

/// Authenticated caller extracted from a bearer token in the `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// The user's internal database id (from the `userId` claim).
    pub user_id: DbId,
}

impl AuthUser {
    /// Read and verify `Authorization: Bearer <token>`.
    pub fn from_headers(headers: &HeaderMap, config: &JwtConfig) -> Result<Self, AppError> {
        let auth_header = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "missing authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "invalid authorization format, expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, config).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.user_id,
        })
    }
}

/// Middleware that lets a request through only with a valid bearer token.
///
/// The verified [`AuthUser`] is stored in the request extensions.
pub async fn require_auth(
    State(config): State<Arc<JwtConfig>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = AuthUser::from_headers(request.headers(), &config)?;
    tracing::debug!(user_id = user.user_id, "Authenticated request");
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use axum::http::HeaderValue;

    use super::*;
    use crate::auth::jwt::generate_token;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "middleware-test-secret".into(),
            token_expiry_hours: 2,
        }
    }

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_valid_bearer_token() {
        let config = config();
        let token = generate_token(9, &config).unwrap();
        let user = AuthUser::from_headers(&headers(&format!("Bearer {token}")), &config).unwrap();
        assert_eq!(user, AuthUser { user_id: 9 });
    }

    #[test]
    fn test_missing_header() {
        assert_matches!(
            AuthUser::from_headers(&HeaderMap::new(), &config()),
            Err(AppError::Core(CoreError::Unauthorized(_)))
        );
    }

    #[test]
    fn test_wrong_scheme() {
        let config = config();
        let token = generate_token(9, &config).unwrap();
        assert_matches!(
            AuthUser::from_headers(&headers(&format!("Token {token}")), &config),
            Err(AppError::Core(CoreError::Unauthorized(_)))
        );
    }

    #[test]
    fn test_garbage_token() {
        assert_matches!(
            AuthUser::from_headers(&headers("Bearer not.a.token"), &config()),
            Err(AppError::Core(CoreError::Unauthorized(_)))
        );
    }
}
