//! Database operations for the back-office.
//!
//! ## Tables
//!
//! - `staff_user` - Back-office accounts (argon2 password hashes)
//! - `staff_session` - Session storage (tower-sessions)
//! - `accounting_entry` - Dated income/expense entries
//! - `meeting` - Scheduled staff meetings
//! - `client`, `customer_order` - Shared with the storefront, which writes
//!   them at checkout; the back-office reads and manages them
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p fournil-cli -- migrate admin
//! ```

pub mod accounting;
pub mod clients;
pub mod meetings;
pub mod orders;
pub mod staff_users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use accounting::AccountingRepository;
pub use clients::ClientRepository;
pub use meetings::MeetingRepository;
pub use orders::OrderRepository;
pub use staff_users::StaffUserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
