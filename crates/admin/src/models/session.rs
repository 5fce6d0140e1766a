//! Session-related types for staff authentication.

use serde::{Deserialize, Serialize};

use fournil_core::{Email, StaffRole, StaffUserId};

/// Session-stored staff identity.
///
/// Minimal data stored in the session to identify the logged-in staff
/// member. The role here is what the access guard authorizes against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentStaff {
    /// Staff member's database ID.
    pub id: StaffUserId,
    /// Staff member's email address.
    pub email: Email,
    /// Staff member's display name.
    pub name: String,
    /// Staff member's role.
    pub role: StaffRole,
}

/// Session keys for staff authentication data.
pub mod session_keys {
    /// Key for storing the current logged-in staff member.
    pub const CURRENT_STAFF: &str = "current_staff";
}
