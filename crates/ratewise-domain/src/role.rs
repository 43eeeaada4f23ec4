//! User roles.

use serde::{Deserialize, Serialize};

/// Account role.
///
/// Wire format: `u8` in JWT claims (0 = User, 1 = StoreOwner, 2 = Admin),
/// snake_case string in JSON bodies (`user`, `store_owner`, `admin`).
///
/// Roles are a flat tag set, not a hierarchy. Every route declares its exact
/// allow-set and authorization is plain set membership; an admin is NOT
/// implicitly allowed on store_owner-only routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User = 0,
    StoreOwner = 1,
    Admin = 2,
}

impl Role {
    /// Convert from `u8` wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::User),
            1 => Some(Self::StoreOwner),
            2 => Some(Self::Admin),
            _ => None,
        }
    }

    /// Convert to `u8` wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// The snake_case name used in JSON bodies and query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::StoreOwner => "store_owner",
            Self::Admin => "admin",
        }
    }

    /// Parse the snake_case name. Returns `None` for unknown names.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Self::User),
            "store_owner" => Some(Self::StoreOwner),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
