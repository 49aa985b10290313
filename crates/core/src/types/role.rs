//! Role and status enums for platform users.

use serde::{Deserialize, Serialize};

/// Platform role attached to every authenticated identity.
///
/// The backend also accepts `"tourist"` as a legacy spelling of
/// [`Role::Traveler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular traveler booking trips and writing reviews.
    #[default]
    #[serde(alias = "tourist")]
    Traveler,
    /// Local guide offering tours.
    Guide,
    /// Restaurant owner managing listings.
    RestaurantOwner,
    /// Hotel owner managing listings.
    HotelOwner,
    /// Platform administrator with access to the admin dashboard.
    Admin,
}

impl Role {
    /// Whether this role grants access to the admin dashboard.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Traveler => write!(f, "traveler"),
            Self::Guide => write!(f, "guide"),
            Self::RestaurantOwner => write!(f, "restaurant_owner"),
            Self::HotelOwner => write!(f, "hotel_owner"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// Error returned when parsing an unknown role string.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid role: {0}")]
pub struct RoleParseError(pub String);

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "traveler" | "tourist" => Ok(Self::Traveler),
            "guide" => Ok(Self::Guide),
            "restaurant_owner" => Ok(Self::RestaurantOwner),
            "hotel_owner" => Ok(Self::HotelOwner),
            "admin" => Ok(Self::Admin),
            _ => Err(RoleParseError(s.to_owned())),
        }
    }
}

/// Account status shown in the user management view.
///
/// Display-only in the dashboard core; no transition function is exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    #[default]
    Active,
    Suspended,
    Deleted,
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Suspended => write!(f, "suspended"),
            Self::Deleted => write!(f, "deleted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::from_str("admin").expect("parses"), Role::Admin);
        assert_eq!(Role::from_str("guide").expect("parses"), Role::Guide);
        assert!(Role::from_str("wizard").is_err());
    }

    #[test]
    fn test_role_tourist_alias() {
        assert_eq!(Role::from_str("tourist").expect("parses"), Role::Traveler);
        let parsed: Role = serde_json::from_str("\"tourist\"").expect("deserialize");
        assert_eq!(parsed, Role::Traveler);
    }

    #[test]
    fn test_role_display_roundtrip() {
        for role in [
            Role::Traveler,
            Role::Guide,
            Role::RestaurantOwner,
            Role::HotelOwner,
            Role::Admin,
        ] {
            assert_eq!(Role::from_str(&role.to_string()).expect("parses"), role);
        }
    }

    #[test]
    fn test_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::Traveler.is_admin());
        assert!(!Role::HotelOwner.is_admin());
    }

    #[test]
    fn test_user_status_serde() {
        let status: UserStatus = serde_json::from_str("\"suspended\"").expect("deserialize");
        assert_eq!(status, UserStatus::Suspended);
        assert_eq!(UserStatus::default(), UserStatus::Active);
    }
}
