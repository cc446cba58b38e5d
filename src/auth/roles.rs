//! Role definitions and the role hierarchy
//!
//! Two unrelated enumerations: [`SystemRole`] is the coarse process-wide
//! privilege level carried in the JWT, [`MemberRole`] is the per-workspace
//! membership role. Each has a fixed total-order rank used for `>=`
//! comparisons; the tables are compile-time constants.

use crate::utils::error::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Per-workspace membership role, ordered by privilege
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberRole {
    /// Read-only access to workspace content
    Reader,
    /// Can create and edit projects, tasks, tags, and comments
    Collaborator,
    /// Full control, including workspace settings and member management
    Admin,
}

impl MemberRole {
    /// Hierarchy rank: READER(0) < COLLABORATOR(1) < ADMIN(2)
    pub const fn rank(self) -> u8 {
        match self {
            MemberRole::Reader => 0,
            MemberRole::Collaborator => 1,
            MemberRole::Admin => 2,
        }
    }

    /// Whether this role meets or exceeds `required`
    ///
    /// Equal rank satisfies: ADMIN satisfies everything, READER only READER.
    pub const fn satisfies(self, required: MemberRole) -> bool {
        self.rank() >= required.rank()
    }

    /// String form as stored in the membership relation
    pub const fn as_str(self) -> &'static str {
        match self {
            MemberRole::Reader => "READER",
            MemberRole::Collaborator => "COLLABORATOR",
            MemberRole::Admin => "ADMIN",
        }
    }
}

impl FromStr for MemberRole {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "READER" => Ok(MemberRole::Reader),
            "COLLABORATOR" => Ok(MemberRole::Collaborator),
            "ADMIN" => Ok(MemberRole::Admin),
            _ => Err(ApiError::InvalidMemberRole),
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process-wide system role, independent of any workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SystemRole {
    /// Regular user, subject to membership checks
    User,
    /// System administrator, bypasses all membership checks
    Sysadmin,
}

impl SystemRole {
    /// Hierarchy rank: USER(0) < SYSADMIN(1)
    pub const fn rank(self) -> u8 {
        match self {
            SystemRole::User => 0,
            SystemRole::Sysadmin => 1,
        }
    }

    /// Whether this role meets or exceeds `required`
    pub const fn satisfies(self, required: SystemRole) -> bool {
        self.rank() >= required.rank()
    }

    /// String form as stored in the users table and JWT claims
    pub const fn as_str(self) -> &'static str {
        match self {
            SystemRole::User => "USER",
            SystemRole::Sysadmin => "SYSADMIN",
        }
    }
}

impl FromStr for SystemRole {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(SystemRole::User),
            "SYSADMIN" => Ok(SystemRole::Sysadmin),
            _ => Err(ApiError::InvalidSystemRole),
        }
    }
}

impl fmt::Display for SystemRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_role_ranks_are_total_order() {
        assert!(MemberRole::Reader.rank() < MemberRole::Collaborator.rank());
        assert!(MemberRole::Collaborator.rank() < MemberRole::Admin.rank());
    }

    #[test]
    fn test_hierarchy_monotonicity() {
        let roles = [
            MemberRole::Reader,
            MemberRole::Collaborator,
            MemberRole::Admin,
        ];

        for held in roles {
            for required in roles {
                assert_eq!(
                    held.satisfies(required),
                    held.rank() >= required.rank(),
                    "held={held} required={required}"
                );
            }
        }
    }

    #[test]
    fn test_equal_rank_satisfies() {
        assert!(MemberRole::Reader.satisfies(MemberRole::Reader));
        assert!(MemberRole::Collaborator.satisfies(MemberRole::Collaborator));
        assert!(MemberRole::Admin.satisfies(MemberRole::Admin));
    }

    #[test]
    fn test_admin_satisfies_everything() {
        assert!(MemberRole::Admin.satisfies(MemberRole::Reader));
        assert!(MemberRole::Admin.satisfies(MemberRole::Collaborator));
        assert!(MemberRole::Admin.satisfies(MemberRole::Admin));
    }

    #[test]
    fn test_reader_only_satisfies_reader() {
        assert!(MemberRole::Reader.satisfies(MemberRole::Reader));
        assert!(!MemberRole::Reader.satisfies(MemberRole::Collaborator));
        assert!(!MemberRole::Reader.satisfies(MemberRole::Admin));
    }

    #[test]
    fn test_member_role_parsing() {
        assert_eq!("READER".parse::<MemberRole>().unwrap(), MemberRole::Reader);
        assert_eq!(
            "COLLABORATOR".parse::<MemberRole>().unwrap(),
            MemberRole::Collaborator
        );
        assert_eq!("ADMIN".parse::<MemberRole>().unwrap(), MemberRole::Admin);

        assert!(matches!(
            "owner".parse::<MemberRole>(),
            Err(ApiError::InvalidMemberRole)
        ));
        assert!(matches!(
            "admin".parse::<MemberRole>(),
            Err(ApiError::InvalidMemberRole)
        ));
        assert!(matches!(
            "".parse::<MemberRole>(),
            Err(ApiError::InvalidMemberRole)
        ));
    }

    #[test]
    fn test_system_role_parsing() {
        assert_eq!("USER".parse::<SystemRole>().unwrap(), SystemRole::User);
        assert_eq!(
            "SYSADMIN".parse::<SystemRole>().unwrap(),
            SystemRole::Sysadmin
        );
        assert!(matches!(
            "root".parse::<SystemRole>(),
            Err(ApiError::InvalidSystemRole)
        ));
    }

    #[test]
    fn test_roundtrip_display() {
        for role in [
            MemberRole::Reader,
            MemberRole::Collaborator,
            MemberRole::Admin,
        ] {
            assert_eq!(role.to_string().parse::<MemberRole>().unwrap(), role);
        }
    }
}
