use std::fmt::Debug;

use log::*;
use oc_common::Secret;

use crate::{
    db_types::Admin,
    helpers::{hash_password, verify_password},
    traits::{AdminManagement, AuthApiError},
};

/// `AuthApi` answers exactly one question — "are these credentials good?" — and seeds the bootstrap account.
/// Session issuing lives in [`crate::sessions`]; this API never holds state.
pub struct AuthApi<B> {
    db: B,
}

impl<B> Debug for AuthApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AuthApi")
    }
}

impl<B> AuthApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> AuthApi<B>
where B: AdminManagement
{
    /// Both unknown usernames and wrong passwords come back as [`AuthApiError::InvalidCredentials`].
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Admin, AuthApiError> {
        let admin = self
            .db
            .fetch_admin_by_username(username)
            .await?
            .ok_or(AuthApiError::InvalidCredentials)?;
        if verify_password(password, &admin.password_hash)? {
            Ok(admin)
        } else {
            debug!("🔑️ Password mismatch for '{username}'");
            Err(AuthApiError::InvalidCredentials)
        }
    }

    /// Creates the bootstrap admin account if it does not exist yet. Returns `true` when an account was created.
    pub async fn seed_admin(&self, username: &str, password: &Secret<String>) -> Result<bool, AuthApiError> {
        let hash = hash_password(password.reveal())?;
        let created = self.db.insert_admin_if_absent(username, &hash).await?;
        if created {
            info!("🔑️ Seeded admin account '{username}'");
        } else {
            debug!("🔑️ Admin account '{username}' already present, seed skipped");
        }
        Ok(created)
    }
}
