//! Roles and their privilege ordering.

use serde::{Deserialize, Serialize};

use crate::constants::{ROLE_ADMIN, ROLE_LEAD_ADMIN, ROLE_SUPERADMIN, ROLE_USER};
use crate::error::DomainError;

/// Role names, declared from least to most privileged so the derived
/// `Ord` is the access ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum RoleName {
    #[serde(rename = "User")]
    User,
    #[serde(rename = "Admin")]
    Admin,
    #[serde(rename = "Lead Admin")]
    LeadAdmin,
    #[serde(rename = "Superadmin")]
    SuperAdmin,
}

impl RoleName {
    pub const ALL: [RoleName; 4] = [
        RoleName::SuperAdmin,
        RoleName::LeadAdmin,
        RoleName::Admin,
        RoleName::User,
    ];

    /// Primary key of the seeded `roles` row.
    pub fn id(self) -> i32 {
        match self {
            RoleName::SuperAdmin => 1,
            RoleName::LeadAdmin => 2,
            RoleName::Admin => 3,
            RoleName::User => 4,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.id() == id)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoleName::SuperAdmin => ROLE_SUPERADMIN,
            RoleName::LeadAdmin => ROLE_LEAD_ADMIN,
            RoleName::Admin => ROLE_ADMIN,
            RoleName::User => ROLE_USER,
        }
    }

    /// True when this role is at least `required`.
    pub fn satisfies(self, required: RoleName) -> bool {
        self >= required
    }
}

impl std::fmt::Display for RoleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RoleName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::validation("role", format!("unknown role '{}'", s)))
    }
}

/// A row of the `roles` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Role {
    pub id: i32,
    pub name: RoleName,
}

impl From<RoleName> for Role {
    fn from(name: RoleName) -> Self {
        Self { id: name.id(), name }
    }
}
