//! Staff user domain types.

use chrono::{DateTime, Utc};

use fournil_core::{Email, StaffRole, StaffUserId};

/// A back-office staff member (domain type).
///
/// The password hash never leaves the database layer; this type is safe to
/// hand to templates.
#[derive(Debug, Clone)]
pub struct StaffUser {
    /// Unique staff user ID.
    pub id: StaffUserId,
    /// Staff member's email address, used as the login identifier.
    pub email: Email,
    /// Staff member's display name.
    pub name: String,
    /// Staff member's role.
    pub role: StaffRole,
    /// When the staff member was created.
    pub created_at: DateTime<Utc>,
}
