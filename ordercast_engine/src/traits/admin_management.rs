use thiserror::Error;

use crate::db_types::Admin;

/// Admin account storage behaviour. Accounts are created once at bootstrap and read at login; nothing in this
/// core mutates them afterwards.
#[allow(async_fn_in_trait)]
pub trait AdminManagement {
    async fn fetch_admin_by_username(&self, username: &str) -> Result<Option<Admin>, AuthApiError>;

    /// Idempotent seeding. Returns `true` if the account was created, `false` if it already existed.
    async fn insert_admin_if_absent(&self, username: &str, password_hash: &str) -> Result<bool, AuthApiError>;
}

#[derive(Debug, Clone, Error)]
pub enum AuthApiError {
    /// Deliberately covers both "no such user" and "wrong password", so responses cannot be used to enumerate
    /// usernames.
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Password hashing error: {0}")]
    PasswordHash(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for AuthApiError {
    fn from(e: sqlx::Error) -> Self {
        Self::DatabaseError(e.to_string())
    }
}
