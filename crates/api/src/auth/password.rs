//! Password storage for user rows.
//!
//! The `users.password_hash` column holds a PHC string
//! (`$argon2id$v=19$m=...,t=...,p=...$<salt>$<hash>`), so the salt and cost
//! parameters travel with each hash and old rows keep verifying if the
//! defaults change.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Why a password could not be hashed or checked.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(password_hash::Error),

    #[error("stored password hash is malformed: {0}")]
    Malformed(password_hash::Error),
}

/// Hash `plain` with Argon2id under a fresh random salt.
pub fn hash_password(plain: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordError::Hash)
}

/// Check `plain` against a stored PHC string.
///
/// A mismatch is `Ok(false)`; errors are reserved for unreadable hashes.
pub fn verify_password(plain: &str, stored: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored).map_err(PasswordError::Malformed)?;
    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Hash(e)),
    }
}
