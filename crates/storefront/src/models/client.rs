//! Client record domain type.

use chrono::{DateTime, Utc};

use fournil_core::{ClientId, Email};

/// A client of the bakery, created or refreshed at checkout.
#[derive(Debug, Clone)]
pub struct Client {
    /// Unique client ID.
    pub id: ClientId,
    /// Client's email address (unique).
    pub email: Email,
    /// Client's full name as entered at checkout.
    pub name: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// When the record was first created.
    pub created_at: DateTime<Utc>,
}
