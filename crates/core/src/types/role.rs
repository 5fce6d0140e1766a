//! Staff roles for the back-office.

use serde::{Deserialize, Serialize};

/// Role of a back-office staff member.
///
/// Role is the only authorization input in the admin: there is no
/// finer-grained permission model. The set is closed; adding a role means
/// touching every route policy that enumerates roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "staff_role", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    /// The bakery owner: full access, including clients, accounting and
    /// staff management.
    Owner,
    /// Production staff: orders, production planning and meetings.
    Cook,
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Owner => write!(f, "owner"),
            Self::Cook => write!(f, "cook"),
        }
    }
}

impl std::str::FromStr for StaffRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Self::Owner),
            "cook" => Ok(Self::Cook),
            _ => Err(format!("invalid staff role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_display_from_str_roundtrip() {
        for role in [StaffRole::Owner, StaffRole::Cook] {
            assert_eq!(StaffRole::from_str(&role.to_string()).unwrap(), role);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!(StaffRole::from_str("admin").is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&StaffRole::Owner).unwrap(),
            "\"owner\""
        );
    }
}
