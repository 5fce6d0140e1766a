//! Staff user repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use fournil_core::{Email, StaffRole, StaffUserId};

use super::RepositoryError;
use crate::models::StaffUser;

/// Internal row type for staff user queries.
#[derive(Debug, sqlx::FromRow)]
struct StaffUserRow {
    id: i32,
    email: String,
    name: String,
    role: StaffRole,
    created_at: DateTime<Utc>,
}

impl TryFrom<StaffUserRow> for StaffUser {
    type Error = RepositoryError;

    fn try_from(row: StaffUserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: StaffUserId::new(row.id),
            email,
            name: row.name,
            role: row.role,
            created_at: row.created_at,
        })
    }
}

/// Staff user plus their password hash, for login verification only.
#[derive(Debug)]
pub struct StaffCredentials {
    /// The staff member.
    pub user: StaffUser,
    /// Argon2 PHC-format password hash.
    pub password_hash: String,
}

/// Repository for staff user database operations.
pub struct StaffUserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StaffUserRepository<'a> {
    /// Create a new staff user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all staff members, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all(&self) -> Result<Vec<StaffUser>, RepositoryError> {
        let rows = sqlx::query_as::<_, StaffUserRow>(
            r"
            SELECT id, email, name, role, created_at
            FROM staff_user
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a staff member by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: StaffUserId) -> Result<Option<StaffUser>, RepositoryError> {
        let row = sqlx::query_as::<_, StaffUserRow>(
            r"
            SELECT id, email, name, role, created_at
            FROM staff_user
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Fetch a staff member with their password hash for login.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_for_login(
        &self,
        email: &Email,
    ) -> Result<Option<StaffCredentials>, RepositoryError> {
        #[derive(Debug, sqlx::FromRow)]
        struct LoginRow {
            id: i32,
            email: String,
            name: String,
            role: StaffRole,
            password_hash: String,
            created_at: DateTime<Utc>,
        }

        let row = sqlx::query_as::<_, LoginRow>(
            r"
            SELECT id, email, name, role, password_hash, created_at
            FROM staff_user
            WHERE email = $1
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(|row| {
            let password_hash = row.password_hash;
            let user = StaffUserRow {
                id: row.id,
                email: row.email,
                name: row.name,
                role: row.role,
                created_at: row.created_at,
            }
            .try_into()?;
            Ok(StaffCredentials {
                user,
                password_hash,
            })
        })
        .transpose()
    }

    /// Create a staff member with an already-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is taken.
    /// Returns `RepositoryError::Database` for other failures.
    pub async fn create(
        &self,
        email: &Email,
        name: &str,
        role: StaffRole,
        password_hash: &str,
    ) -> Result<StaffUser, RepositoryError> {
        let row = sqlx::query_as::<_, StaffUserRow>(
            r"
            INSERT INTO staff_user (email, name, role, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, name, role, created_at
            ",
        )
        .bind(email.as_str())
        .bind(name)
        .bind(role)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepositoryError::Conflict(format!("staff email already exists: {email}"))
            }
            _ => RepositoryError::Database(e),
        })?;

        row.try_into()
    }

    /// Delete a staff member.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row was deleted.
    pub async fn delete(&self, id: StaffUserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM staff_user WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
