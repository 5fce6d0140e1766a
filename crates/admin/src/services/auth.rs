//! Staff authentication service.
//!
//! Email + password login with argon2 verification. Passwords are issued
//! through the CLI; there is no self-service registration or reset.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};
use sqlx::PgPool;
use thiserror::Error;

use fournil_core::Email;

use crate::db::{RepositoryError, StaffUserRepository};
use crate::models::CurrentStaff;

/// Errors that can occur during staff authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. One variant for both, so the
    /// login form cannot be used to probe which emails exist.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Database operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Staff authentication service.
pub struct AuthService<'a> {
    staff: StaffUserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            staff: StaffUserRepository::new(pool),
        }
    }

    /// Verify an email/password pair and return the session identity.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for unknown emails, bad
    /// passwords, and unparseable stored hashes alike.
    /// Returns `AuthError::Repository` if the lookup fails.
    pub async fn login(&self, email: &str, password: &str) -> Result<CurrentStaff, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let credentials = self
            .staff
            .find_for_login(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let parsed_hash = PasswordHash::new(&credentials.password_hash).map_err(|e| {
            tracing::error!("unparseable password hash for {email}: {e}");
            AuthError::InvalidCredentials
        })?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AuthError::InvalidCredentials)?;

        let user = credentials.user;
        Ok(CurrentStaff {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
        })
    }
}
