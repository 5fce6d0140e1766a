//! Staff meeting repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use fournil_core::{MeetingId, StaffUserId};

use super::RepositoryError;
use crate::models::{Meeting, NewMeeting};

/// Internal row type for meeting queries.
#[derive(Debug, sqlx::FromRow)]
struct MeetingRow {
    id: i32,
    title: String,
    starts_at: DateTime<Utc>,
    duration_minutes: i32,
    notes: Option<String>,
    created_by: i32,
}

impl From<MeetingRow> for Meeting {
    fn from(row: MeetingRow) -> Self {
        Self {
            id: MeetingId::new(row.id),
            title: row.title,
            starts_at: row.starts_at,
            duration_minutes: row.duration_minutes,
            notes: row.notes,
            created_by: StaffUserId::new(row.created_by),
        }
    }
}

/// Repository for meeting database operations.
pub struct MeetingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MeetingRepository<'a> {
    /// Create a new meeting repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Meetings starting at or after `from`, soonest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upcoming(&self, from: DateTime<Utc>) -> Result<Vec<Meeting>, RepositoryError> {
        let rows = sqlx::query_as::<_, MeetingRow>(
            r"
            SELECT id, title, starts_at, duration_minutes, notes, created_by
            FROM meeting
            WHERE starts_at >= $1
            ORDER BY starts_at
            ",
        )
        .bind(from)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Schedule a meeting.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, meeting: &NewMeeting) -> Result<Meeting, RepositoryError> {
        let row = sqlx::query_as::<_, MeetingRow>(
            r"
            INSERT INTO meeting (title, starts_at, duration_minutes, notes, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, starts_at, duration_minutes, notes, created_by
            ",
        )
        .bind(&meeting.title)
        .bind(meeting.starts_at)
        .bind(meeting.duration_minutes)
        .bind(meeting.notes.as_deref())
        .bind(meeting.created_by.as_i32())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Cancel (delete) a meeting.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the meeting does not exist.
    pub async fn delete(&self, id: MeetingId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM meeting WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
