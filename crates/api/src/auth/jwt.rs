//! Bearer-token issuance and verification.
//!
//! Tokens are HS256-signed JWTs carrying a [`Claims`] payload. Expiry lives in
//! the custom `expired` claim rather than the registered `exp` claim, so
//! [`validate_token`] checks it by hand after the signature is verified.

use folio_core::types::DbId;
use jsonwebtoken::errors::{Error, ErrorKind};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims embedded in every issued token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Always `true` for tokens minted by [`generate_token`].
    pub authorized: bool,
    /// The user's internal database id.
    #[serde(rename = "userId")]
    pub user_id: DbId,
    /// Expiration time (UTC Unix timestamp).
    pub expired: i64,
}

/// Configuration for token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in hours (default: 2).
    pub token_expiry_hours: i64,
}

/// Default token lifetime in hours.
pub const DEFAULT_TOKEN_EXPIRY_HOURS: i64 = 2;

/// Why a token could not be issued.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token lifetime of {0} hours is out of range")]
    Lifetime(i64),

    #[error(transparent)]
    Jwt(#[from] Error),
}

/// Unix time `hours` from now, or `None` unless `hours` is positive and the
/// result is representable.
pub fn expiry_from_now(hours: i64) -> Option<i64> {
    if hours <= 0 {
        return None;
    }
    let lifetime = chrono::Duration::try_hours(hours)?;
    chrono::Utc::now()
        .checked_add_signed(lifetime)
        .map(|at| at.timestamp())
}

/// Generate a signed token asserting `user_id` for the configured lifetime.
pub fn generate_token(user_id: DbId, config: &JwtConfig) -> Result<String, TokenError> {
    let expired = expiry_from_now(config.token_expiry_hours)
        .ok_or(TokenError::Lifetime(config.token_expiry_hours))?;

    let claims = Claims {
        authorized: true,
        user_id,
        expired,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;
    Ok(token)
}

/// Validate a token and return its [`Claims`].
///
/// Fails on a bad signature, on `authorized != true`, and once `expired` is
/// not in the future.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();
    validation.validate_exp = false;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?
    .claims;

    if !claims.authorized {
        return Err(ErrorKind::InvalidToken.into());
    }
    if claims.expired <= chrono::Utc::now().timestamp() {
        return Err(ErrorKind::ExpiredSignature.into());
    }
    Ok(claims)
}
