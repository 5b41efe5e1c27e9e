//! One-way password hashing.
//!
//! The engine never sees or stores a plaintext password beyond the login call; admins carry an argon2 PHC string.
//! The choice of algorithm is deliberately contained in this module so it can be swapped without touching the
//! auth flow.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::traits::AuthApiError;

pub fn hash_password(password: &str) -> Result<String, AuthApiError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthApiError::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

/// `Ok(false)` on a mismatch; `Err` only when the stored hash itself is malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthApiError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthApiError::PasswordHash(e.to_string()))?;
    Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}
