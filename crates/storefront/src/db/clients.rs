//! Client record repository for the storefront.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use fournil_core::{ClientId, Email};

use super::RepositoryError;
use crate::models::Client;

/// Internal row type for client queries.
#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    id: i32,
    email: String,
    name: String,
    phone: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ClientRow> for Client {
    type Error = RepositoryError;

    fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: ClientId::new(row.id),
            email,
            name: row.name,
            phone: row.phone,
            created_at: row.created_at,
        })
    }
}

/// Repository for client database operations.
pub struct ClientRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ClientRepository<'a> {
    /// Create a new client repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find a client by email, creating the record if it does not exist.
    ///
    /// Repeat buyers keep one record; name and phone are refreshed with
    /// whatever they entered this time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_or_create(
        &self,
        email: &Email,
        name: &str,
        phone: Option<&str>,
    ) -> Result<Client, RepositoryError> {
        let row = sqlx::query_as::<_, ClientRow>(
            r"
            INSERT INTO client (email, name, phone)
            VALUES ($1, $2, $3)
            ON CONFLICT (email)
            DO UPDATE SET name = EXCLUDED.name,
                          phone = COALESCE(EXCLUDED.phone, client.phone)
            RETURNING id, email, name, phone, created_at
            ",
        )
        .bind(email.as_str())
        .bind(name)
        .bind(phone)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }
}
