//! Staff account management commands.
//!
//! # Usage
//!
//! ```bash
//! fournil-cli staff create -e elise@fournil.example -n "Élise" -r owner
//! ```
//!
//! The initial password is generated, hashed with argon2 for storage, and
//! printed exactly once. There is no password reset flow; re-running the
//! command is the reset.
//!
//! # Environment Variables
//!
//! - `ADMIN_DATABASE_URL` - `PostgreSQL` connection string

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use rand::Rng;
use rand::distr::Alphanumeric;
use sqlx::PgPool;
use thiserror::Error;

use fournil_core::{Email, StaffRole};

/// Length of generated initial passwords.
const GENERATED_PASSWORD_LENGTH: usize = 20;

/// Errors that can occur during staff operations.
#[derive(Debug, Error)]
pub enum StaffError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid role.
    #[error("Invalid role: {0}. Valid roles: owner, cook")]
    InvalidRole(String),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Account already exists.
    #[error("Staff account already exists with email: {0}")]
    UserExists(String),

    /// Password hashing failed.
    #[error("Hashing error: {0}")]
    Hashing(String),
}

/// Create a new staff account and print its generated password.
///
/// # Errors
///
/// Returns `StaffError` if validation, hashing or the insert fails.
pub async fn create_user(email: &str, name: &str, role: &str) -> Result<i32, StaffError> {
    dotenvy::dotenv().ok();

    let role: StaffRole = role
        .parse()
        .map_err(|_| StaffError::InvalidRole(role.to_owned()))?;

    let email = Email::parse(email).map_err(|e| StaffError::InvalidEmail(e.to_string()))?;

    let database_url = std::env::var("ADMIN_DATABASE_URL")
        .map_err(|_| StaffError::MissingEnvVar("ADMIN_DATABASE_URL"))?;

    let password: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_PASSWORD_LENGTH)
        .map(char::from)
        .collect();

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| StaffError::Hashing(e.to_string()))?
        .to_string();

    tracing::info!("Connecting to back-office database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Creating staff account: {} ({})", email, role);
    let id: i32 = sqlx::query_scalar(
        r"
        INSERT INTO staff_user (email, name, role, password_hash)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        ",
    )
    .bind(email.as_str())
    .bind(name)
    .bind(role)
    .bind(&password_hash)
    .fetch_one(&pool)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StaffError::UserExists(email.to_string())
        }
        _ => StaffError::Database(e),
    })?;

    // The one place the password is ever visible
    #[allow(clippy::print_stdout)]
    {
        println!("Staff account created: {email} (id {id}, role {role})");
        println!("Initial password: {password}");
        println!("Share it over a secure channel; it is not stored in clear anywhere.");
    }

    Ok(id)
}
